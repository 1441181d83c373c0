use rand::seq::SliceRandom;
use rand::Rng;

use crate::{NimState, Value};

/// Plays uniformly random moves for both sides until the piles are empty.
///
/// The rollout starts with the maximizing flag raised and flips it after every
/// move; the finished game is scored with `utility(terminal, !maximizing)`.
/// That is `+1` when the player who moved into `state` took the last match and
/// `-1` when the player to act at `state` did.
pub fn random_rollout<R: Rng>(state: &NimState, rng: &mut R) -> Value {
    let mut current = state.clone();
    let mut maximizing = true;

    loop {
        if current.is_terminal() {
            return current.utility(!maximizing);
        }

        let successors = current.legal_moves();
        let Some(successor) = successors.choose(rng) else {
            return current.utility(!maximizing);
        };

        current = successor.state.clone();
        maximizing = !maximizing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn terminal_state_rewards_the_previous_mover() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(random_rollout(&NimState::from([0, 0]), &mut rng), 1);
    }

    #[test]
    fn single_match_is_taken_by_the_side_to_act() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(random_rollout(&NimState::from([1]), &mut rng), -1);
        assert_eq!(random_rollout(&NimState::from([1, 1]), &mut rng), 1);
    }

    #[test]
    fn seeded_rollouts_are_reproducible() {
        let state = NimState::default();
        let play = |seed| {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            (0..32).map(|_| random_rollout(&state, &mut rng)).collect::<Vec<_>>()
        };
        assert_eq!(play(42), play(42));
        assert!(play(42).iter().all(|&reward| reward == 1 || reward == -1));
    }
}
