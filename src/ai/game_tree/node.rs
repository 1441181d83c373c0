use crate::{NimState, Successor};

pub struct SearchNode {
    pub state: NimState,
    /// Successors not yet added to the tree. Expansion pops from the back.
    pub untried: Vec<Successor>,
    pub num_visits: u32,
    /// Sum of rollout rewards, seen by the player who moved into this node.
    pub reward: f64,
}

impl SearchNode {
    pub fn new(state: NimState) -> Self {
        let untried = state.legal_moves();
        Self {
            state,
            untried,
            num_visits: 0,
            reward: 0.0,
        }
    }

    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    pub fn mean_reward(&self) -> f64 {
        if self.num_visits == 0 {
            0.0
        } else {
            self.reward / self.num_visits as f64
        }
    }
}
