//! Monte Carlo search parameters.

use serde::{Deserialize, Serialize};

const DEFAULT_ITERATIONS: u32 = 100;
const DEFAULT_WORKERS: usize = 1;

fn d_iterations() -> u32 {
    DEFAULT_ITERATIONS
}
fn d_exploration() -> f64 {
    std::f64::consts::SQRT_2
}
fn d_workers() -> usize {
    DEFAULT_WORKERS
}

/// Configuration for the sampled strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MctsConfig {
    /// Number of select/expand/simulate/backpropagate rounds per search.
    /// With several workers this is the budget of each worker.
    #[serde(default = "d_iterations")]
    pub iterations: u32,

    /// Exploration constant `c` in `reward/n + c * sqrt(ln N / n)`.
    /// The default `sqrt(2)` gives the textbook UCB1 term `sqrt(2 ln N / n)`.
    #[serde(default = "d_exploration")]
    pub exploration: f64,

    /// Independent search trees built in parallel and merged at the root.
    /// `1` keeps the search on the calling thread.
    #[serde(default = "d_workers")]
    pub workers: usize,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            iterations: d_iterations(),
            exploration: d_exploration(),
            workers: d_workers(),
        }
    }
}

impl MctsConfig {
    /// Enough iterations for small positions to settle on the solved move.
    pub fn for_testing() -> Self {
        Self::default().with_iterations(2000)
    }

    pub fn with_iterations(mut self, n: u32) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_exploration(mut self, c: f64) -> Self {
        self.exploration = c;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }
}
