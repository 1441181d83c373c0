use std::collections::HashMap;
use std::thread;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

use crate::ai::game_tree::score::Score;
use crate::{MctsConfig, Move, NimState, SearchTree};

/// Monte Carlo tree search with the default exploration constant.
///
/// Returns the most visited root move, or `None` when the position is already
/// over or `iterations` is zero.
pub fn mcts<R: Rng>(state: &NimState, iterations: u32, rng: &mut R) -> Option<Move> {
    let config = MctsConfig::default().with_iterations(iterations);
    build_search_tree(state, &config, rng).best_move()
}

pub fn build_search_tree<R: Rng>(state: &NimState, config: &MctsConfig, rng: &mut R) -> SearchTree {
    let mut tree = SearchTree::with_exploration(state.clone(), config.exploration);
    tree.search_n(rng, config.iterations);

    debug!(
        state = %state,
        iterations = config.iterations,
        nodes = tree.graph().node_count(),
        best_move = ?tree.best_move(),
        "mcts search complete"
    );

    tree
}

/// Root-parallel search: `config.workers` independent trees, each with its own
/// generator seeded from `rng`, merged by summing root visit counts per move.
///
/// Ties between equally visited moves go to the earliest move in
/// `legal_moves` order.
pub fn mcts_parallel<R: Rng>(state: &NimState, config: &MctsConfig, rng: &mut R) -> Option<Move> {
    let workers = config.workers.max(1);
    let seeds: Vec<u64> = (0..workers).map(|_| rng.gen()).collect();

    let worker_scores: Vec<Vec<Score>> = thread::scope(|scope| {
        let handles: Vec<_> = seeds
            .into_iter()
            .map(|seed| {
                scope.spawn(move || {
                    let mut rng = ChaCha20Rng::seed_from_u64(seed);
                    let mut tree = SearchTree::with_exploration(state.clone(), config.exploration);
                    tree.search_n(&mut rng, config.iterations);
                    tree.root_scores()
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
            .collect()
    });

    let mut total_visits: HashMap<Move, u32> = HashMap::new();
    for score in worker_scores.iter().flatten() {
        *total_visits.entry(score.mv).or_insert(0) += score.num_visits;
    }

    let mut best: Option<(Move, u32)> = None;
    for successor in state.legal_moves() {
        let Some(&visits) = total_visits.get(&successor.mv) else {
            continue;
        };
        if best.map_or(true, |(_, best_visits)| visits > best_visits) {
            best = Some((successor.mv, visits));
        }
    }

    debug!(
        state = %state,
        workers,
        iterations = config.iterations,
        best_move = ?best.map(|(mv, _)| mv),
        "parallel mcts search complete"
    );

    best.map(|(mv, _)| mv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{alpha_beta, VALUE_MAX, VALUE_MIN};

    #[test]
    fn finds_the_solved_move_on_small_positions() {
        let state = NimState::from([1, 2]);
        let solved = alpha_beta(&state, VALUE_MIN, VALUE_MAX, true).best_move;
        assert_eq!(solved, Some(Move::new(1, 1)));

        for seed in 0..10 {
            let mut rng = ChaCha20Rng::seed_from_u64(seed);
            assert_eq!(mcts(&state, 2000, &mut rng), solved, "seed {seed}");
        }
    }

    #[test]
    fn finds_the_winning_move_with_more_choices() {
        let state = NimState::from([2, 3]);
        let mut rng = ChaCha20Rng::seed_from_u64(17);
        assert_eq!(mcts(&state, 3000, &mut rng), Some(Move::new(1, 1)));
    }

    #[test]
    fn no_move_without_iterations_or_from_a_finished_game() {
        let mut rng = ChaCha20Rng::seed_from_u64(0);
        assert_eq!(mcts(&NimState::from([3, 1]), 0, &mut rng), None);
        assert_eq!(mcts(&NimState::from([0, 0, 0]), 100, &mut rng), None);
    }

    #[test]
    fn same_seed_builds_the_same_tree() {
        let state = NimState::default();
        let config = MctsConfig::default().with_iterations(400);
        let run = || {
            let mut rng = ChaCha20Rng::seed_from_u64(99);
            build_search_tree(&state, &config, &mut rng).root_scores()
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn returned_move_is_legal() {
        let state = NimState::default();
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let mv = mcts(&state, 100, &mut rng).unwrap();
        let next = state.apply(mv).unwrap();
        assert!(next.total() < state.total());
    }

    #[test]
    fn parallel_search_agrees_with_the_exact_solver() {
        let state = NimState::from([1, 2]);
        let config = MctsConfig::default().with_iterations(1000).with_workers(4);
        let mut rng = ChaCha20Rng::seed_from_u64(2024);
        assert_eq!(mcts_parallel(&state, &config, &mut rng), Some(Move::new(1, 1)));
    }

    #[test]
    fn parallel_search_of_a_finished_game_has_no_move() {
        let config = MctsConfig::default().with_workers(3);
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        assert_eq!(mcts_parallel(&NimState::from([0]), &config, &mut rng), None);
    }
}
