use crate::Move;

/// Search statistics of one root move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Score {
    pub mv: Move,
    pub num_visits: u32,
    pub reward: f64,
}
