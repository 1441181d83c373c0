use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ai::mcts::{build_search_tree, mcts_parallel};
use crate::{alpha_beta, minimax, MctsConfig, Move, NimError, NimState, VALUE_MAX, VALUE_MIN};

/// The closed set of ways to pick a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Full minimax.
    Exact,
    /// Minimax with alpha-beta pruning.
    ExactPruned,
    /// Monte Carlo tree search.
    Sampled,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Exact, Strategy::ExactPruned, Strategy::Sampled];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Exact => "exact",
            Strategy::ExactPruned => "exact_pruned",
            Strategy::Sampled => "sampled",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = NimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" | "minimax" => Ok(Strategy::Exact),
            "exact_pruned" | "alpha_beta" | "minimax_ab" => Ok(Strategy::ExactPruned),
            "sampled" | "mcts" => Ok(Strategy::Sampled),
            _ => Err(NimError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Picks a move for the side to act. The side to act is always the
/// maximizing player.
pub trait Solver {
    fn strategy(&self) -> Strategy;
    fn choose_move<R: Rng>(&self, rng: &mut R, state: &NimState) -> Option<Move>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExactSolver;

impl Solver for ExactSolver {
    fn strategy(&self) -> Strategy {
        Strategy::Exact
    }

    fn choose_move<R: Rng>(&self, _rng: &mut R, state: &NimState) -> Option<Move> {
        minimax(state, true).best_move
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PrunedSolver;

impl Solver for PrunedSolver {
    fn strategy(&self) -> Strategy {
        Strategy::ExactPruned
    }

    fn choose_move<R: Rng>(&self, _rng: &mut R, state: &NimState) -> Option<Move> {
        alpha_beta(state, VALUE_MIN, VALUE_MAX, true).best_move
    }
}

#[derive(Debug, Clone, Default)]
pub struct SampledSolver {
    pub config: MctsConfig,
}

impl SampledSolver {
    pub fn new(config: MctsConfig) -> Self {
        Self { config }
    }
}

impl Solver for SampledSolver {
    fn strategy(&self) -> Strategy {
        Strategy::Sampled
    }

    fn choose_move<R: Rng>(&self, rng: &mut R, state: &NimState) -> Option<Move> {
        if self.config.workers > 1 {
            mcts_parallel(state, &self.config, rng)
        } else {
            build_search_tree(state, &self.config, rng).best_move()
        }
    }
}

/// Chooses a move with `strategy`, using default search settings and a fresh
/// entropy-seeded generator for the sampled strategy.
pub fn decide(state: &NimState, strategy: Strategy) -> Option<Move> {
    let mut rng = ChaCha20Rng::from_entropy();
    decide_with(state, strategy, &MctsConfig::default(), &mut rng)
}

pub fn decide_with<R: Rng>(
    state: &NimState,
    strategy: Strategy,
    config: &MctsConfig,
    rng: &mut R,
) -> Option<Move> {
    let mv = match strategy {
        Strategy::Exact => ExactSolver.choose_move(rng, state),
        Strategy::ExactPruned => PrunedSolver.choose_move(rng, state),
        Strategy::Sampled => SampledSolver::new(config.clone()).choose_move(rng, state),
    };

    debug!(state = %state, %strategy, mv = ?mv, "decided");

    mv
}
