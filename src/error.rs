use thiserror::Error;

use crate::game::Seat;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NimError {
    #[error("pile {pile} does not exist, the state has {piles} piles")]
    PileOutOfRange { pile: usize, piles: usize },

    #[error("cannot take {take} from pile {pile} holding {available}")]
    InvalidTake { pile: usize, take: u32, available: u32 },

    #[error("invalid pile count {0:?}")]
    InvalidPile(String),

    #[error("unknown strategy {0:?}")]
    UnknownStrategy(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("the game is already over")]
    GameOver,

    #[error("the {0:?} seat was unable to decide on a move")]
    NoMove(Seat),

    #[error("unable to apply move: {0}")]
    Move(#[from] NimError),
}
