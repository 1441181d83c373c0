use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NimError;

/// Game-theoretic score of a position, always one of `-1`, `0` or `+1`.
pub type Value = i32;

/// Stand-in for negative infinity when seeding alpha-beta bounds.
pub const VALUE_MIN: Value = Value::MIN;
/// Stand-in for positive infinity when seeding alpha-beta bounds.
pub const VALUE_MAX: Value = Value::MAX;

const DEFAULT_PILES: [u32; 4] = [1, 3, 5, 7];

/// A Nim position: the number of matches left in each pile.
///
/// The piles are never mutated in place. Every transition builds a new state,
/// so sibling branches of a search can share a parent state freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NimState {
    piles: Vec<u32>,
}

/// Taking `take` matches from pile `pile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub pile: usize,
    pub take: u32,
}

/// A legal move together with the state it leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Successor {
    pub mv: Move,
    pub state: NimState,
}

impl Move {
    pub fn new(pile: usize, take: u32) -> Self {
        Self { pile, take }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "take {} from pile {}", self.take, self.pile)
    }
}

impl NimState {
    pub fn new(piles: impl Into<Vec<u32>>) -> Self {
        Self {
            piles: piles.into(),
        }
    }

    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    pub fn total(&self) -> u64 {
        self.piles.iter().map(|&count| count as u64).sum()
    }

    /// Xor of all pile counts. Zero exactly when the side to move loses under
    /// perfect play.
    pub fn nim_sum(&self) -> u32 {
        self.piles.iter().fold(0, |acc, &count| acc ^ count)
    }

    pub fn is_terminal(&self) -> bool {
        self.piles.iter().all(|&count| count == 0)
    }

    /// Every legal move, ordered by ascending pile index and then ascending take.
    ///
    /// The exact solvers rely on this order to break ties reproducibly.
    pub fn legal_moves(&self) -> Vec<Successor> {
        let mut successors = Vec::with_capacity(self.total() as usize);
        for (pile, &count) in self.piles.iter().enumerate() {
            for take in 1..=count {
                let mv = Move { pile, take };
                successors.push(Successor {
                    mv,
                    state: self.after(mv),
                });
            }
        }
        successors
    }

    /// Score of a finished game for the side described by `is_maximizing`.
    ///
    /// The side to act at a terminal state has no move left and has therefore
    /// lost (normal play). Non-terminal states score `0`.
    pub fn utility(&self, is_maximizing: bool) -> Value {
        if !self.is_terminal() {
            0
        } else if is_maximizing {
            -1
        } else {
            1
        }
    }

    /// Checked move application for callers holding an authoritative state.
    pub fn apply(&self, mv: Move) -> Result<NimState, NimError> {
        let Some(&available) = self.piles.get(mv.pile) else {
            return Err(NimError::PileOutOfRange {
                pile: mv.pile,
                piles: self.piles.len(),
            });
        };

        if mv.take == 0 || mv.take > available {
            return Err(NimError::InvalidTake {
                pile: mv.pile,
                take: mv.take,
                available,
            });
        }

        Ok(self.after(mv))
    }

    // caller guarantees the move is legal
    fn after(&self, mv: Move) -> NimState {
        let mut piles = self.piles.clone();
        piles[mv.pile] -= mv.take;
        NimState { piles }
    }
}

impl Default for NimState {
    fn default() -> Self {
        Self::new(DEFAULT_PILES)
    }
}

impl From<Vec<u32>> for NimState {
    fn from(piles: Vec<u32>) -> Self {
        Self::new(piles)
    }
}

impl<const N: usize> From<[u32; N]> for NimState {
    fn from(piles: [u32; N]) -> Self {
        Self::new(piles)
    }
}

impl fmt::Display for NimState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for count in &self.piles {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{count}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for NimState {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let piles = s
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u32>()
                    .map_err(|_| NimError::InvalidPile(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(piles))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_only_when_every_pile_is_empty() {
        assert!(NimState::from([0, 0, 0, 0]).is_terminal());
        assert!(NimState::new(Vec::new()).is_terminal());
        assert!(!NimState::from([0, 0, 1]).is_terminal());
    }

    #[test]
    fn no_legal_moves_from_empty_piles() {
        assert!(NimState::from([0, 0, 0, 0]).legal_moves().is_empty());
    }

    #[test]
    fn legal_moves_are_ordered_by_pile_then_take() {
        let moves: Vec<Move> = NimState::from([2, 0, 1])
            .legal_moves()
            .into_iter()
            .map(|successor| successor.mv)
            .collect();
        assert_eq!(
            moves,
            vec![Move::new(0, 1), Move::new(0, 2), Move::new(2, 1)]
        );
    }

    #[test]
    fn successor_reduces_total_by_take() {
        let state = NimState::default();
        for successor in state.legal_moves() {
            assert_eq!(
                successor.state.total() + successor.mv.take as u64,
                state.total()
            );
            for (pile, (&before, &after)) in state
                .piles()
                .iter()
                .zip(successor.state.piles())
                .enumerate()
            {
                if pile != successor.mv.pile {
                    assert_eq!(before, after);
                }
            }
        }
        assert_eq!(state, NimState::from([1, 3, 5, 7]));
    }

    #[test]
    fn utility_punishes_the_side_to_act() {
        let empty = NimState::from([0, 0]);
        assert_eq!(empty.utility(true), -1);
        assert_eq!(empty.utility(false), 1);
        assert_eq!(NimState::from([1]).utility(true), 0);
    }

    #[test]
    fn apply_rejects_illegal_moves() {
        let state = NimState::from([1, 3]);
        assert_eq!(
            state.apply(Move::new(2, 1)),
            Err(NimError::PileOutOfRange { pile: 2, piles: 2 })
        );
        assert_eq!(
            state.apply(Move::new(1, 4)),
            Err(NimError::InvalidTake {
                pile: 1,
                take: 4,
                available: 3
            })
        );
        assert!(state.apply(Move::new(0, 0)).is_err());
        assert_eq!(state.apply(Move::new(1, 2)), Ok(NimState::from([1, 1])));
    }

    #[test]
    fn parses_and_displays_piles() {
        let state: NimState = "1 3, 5 7".parse().unwrap();
        assert_eq!(state, NimState::default());
        assert_eq!(state.to_string(), "1 3 5 7");
        assert_eq!(
            "1 x".parse::<NimState>(),
            Err(NimError::InvalidPile("x".to_string()))
        );
    }

    #[test]
    fn nim_sum_of_reference_opening_is_zero() {
        assert_eq!(NimState::default().nim_sum(), 0);
        assert_eq!(NimState::from([1, 2]).nim_sum(), 3);
    }
}
