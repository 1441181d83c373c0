use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{decide_with, GameError, MctsConfig, Move, NimState, Strategy};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    First,
    Second,
}

impl Seat {
    pub fn other(self) -> Self {
        match self {
            Seat::First => Seat::Second,
            Seat::Second => Seat::First,
        }
    }
}

/// A game between two strategies, played on an authoritative state.
///
/// Each turn hands a copy of the state to the strategy of the seat to act and
/// applies the returned move with checked application.
pub struct NimGame<R: Rng> {
    pub state: NimState,
    pub strategies: [Strategy; 2],
    pub config: MctsConfig,
    pub rng: R,
    to_act: Seat,
    history: Vec<(Seat, Move)>,
}

impl<R: Rng> NimGame<R> {
    pub fn new(rng: R, state: NimState, first: Strategy, second: Strategy) -> Self {
        Self {
            state,
            strategies: [first, second],
            config: MctsConfig::default(),
            rng,
            to_act: Seat::First,
            history: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    pub fn run(&mut self) -> Result<Seat, GameError> {
        loop {
            if let Some(winner) = self.winner() {
                info!(?winner, moves = self.history.len(), "game over");
                return Ok(winner);
            }

            self.step()?;
        }
    }

    pub fn step(&mut self) -> Result<Move, GameError> {
        if self.is_terminated() {
            return Err(GameError::GameOver);
        }

        let seat = self.to_act;
        let strategy = self.strategy(seat);

        let Some(mv) = decide_with(&self.state, strategy, &self.config, &mut self.rng) else {
            return Err(GameError::NoMove(seat));
        };

        self.state = self.state.apply(mv)?;
        self.history.push((seat, mv));
        self.to_act = seat.other();

        Ok(mv)
    }

    pub fn strategy(&self, seat: Seat) -> Strategy {
        match seat {
            Seat::First => self.strategies[0],
            Seat::Second => self.strategies[1],
        }
    }

    pub fn to_act(&self) -> Seat {
        self.to_act
    }

    pub fn history(&self) -> &[(Seat, Move)] {
        &self.history
    }

    pub fn is_terminated(&self) -> bool {
        self.state.is_terminal()
    }

    /// Whoever took the last match. A game that starts finished has no winner.
    pub fn winner(&self) -> Option<Seat> {
        if !self.is_terminated() {
            return None;
        }
        self.history.last().map(|(seat, _)| *seat)
    }
}
