//! Solver configuration parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Solver configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Last turn worth exploring (default: 8).
    /// States past it end the search as truncated.
    pub max_turn: u32,

    /// Wall-clock budget for one solve (None = unlimited).
    /// Checked once per expanded state.
    pub time_budget: Option<Duration>,

    /// Skip states whose canonical key was already queued.
    /// Disabling gives an exhaustive (and much slower) search.
    pub deduplicate: bool,

    /// Drop states from turn 2 on with no land in play or in hand.
    pub early_abort: bool,

    /// Accept wins where Balustrade Spy resolved with lands of unknown
    /// position still in the library.
    pub allow_lucky_wins: bool,

    /// Smallest hand size a mulligan may go down to.
    pub min_hand_size: usize,

    /// Explore only this kept hand size instead of 7 down to `min_hand_size`.
    pub only_hand_size: Option<usize>,

    /// Skip kept hands that fail the static keep-hand check.
    pub keep_filter: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_turn: 8,
            time_budget: None,
            deduplicate: true,
            early_abort: true,
            allow_lucky_wins: true,
            min_hand_size: 3,
            only_hand_size: None,
            keep_filter: false,
        }
    }
}

impl SolverConfig {
    /// Create a new config with a custom turn limit.
    #[must_use]
    pub fn with_max_turn(mut self, turn: u32) -> Self {
        self.max_turn = turn;
        self
    }

    /// Create a new config with a wall-clock budget.
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    #[must_use]
    pub fn with_deduplicate(mut self, on: bool) -> Self {
        self.deduplicate = on;
        self
    }

    #[must_use]
    pub fn with_early_abort(mut self, on: bool) -> Self {
        self.early_abort = on;
        self
    }

    #[must_use]
    pub fn with_lucky_wins(mut self, on: bool) -> Self {
        self.allow_lucky_wins = on;
        self
    }

    /// Explore a single kept hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.only_hand_size = Some(size);
        self
    }

    #[must_use]
    pub fn with_keep_filter(mut self, on: bool) -> Self {
        self.keep_filter = on;
        self
    }

    /// Kept hand sizes to explore, largest first.
    #[must_use]
    pub fn hand_sizes(&self, opening: usize) -> Vec<usize> {
        match self.only_hand_size {
            Some(size) => vec![size.min(opening)],
            None => (self.min_hand_size.min(opening)..=opening).rev().collect(),
        }
    }
}
