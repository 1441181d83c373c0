mod ai;
mod config;
mod error;
mod game;
mod state;

pub use ai::{
    alpha_beta::alpha_beta,
    decision::{decide, decide_with, ExactSolver, PrunedSolver, SampledSolver, Solver, Strategy},
    game_tree::{
        edge::SearchEdge,
        node::SearchNode,
        score::Score,
        SearchTree,
    },
    mcts::{build_search_tree, mcts, mcts_parallel},
    minimax::minimax,
    random_rollout::random_rollout,
};
pub use config::MctsConfig;
pub use error::{GameError, NimError};
pub use game::{NimGame, Seat};
pub use state::{Move, NimState, Successor, Value, VALUE_MAX, VALUE_MIN};

/// Result of an exact search: the game-theoretic value of the position for the
/// maximizing side, and the move that achieves it (`None` at a terminal state).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub value: Value,
    pub best_move: Option<Move>,
}

impl Evaluation {
    pub fn terminal(value: Value) -> Self {
        Self {
            value,
            best_move: None,
        }
    }
}
