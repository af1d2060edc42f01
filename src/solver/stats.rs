//! Search statistics for diagnostics and tuning.

use serde::{Deserialize, Serialize};

/// Statistics collected during one solve.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStats {
    /// States popped from the queues and expanded.
    pub states_expanded: u64,

    /// Actions applied in place by a forcing heuristic.
    pub forced_moves: u64,

    /// Child states created by forking.
    pub branches_created: u64,

    /// Children dropped because their key was already seen.
    pub duplicates_pruned: u64,

    /// States dropped by the early abort.
    pub dead_states_pruned: u64,

    /// Lines that lost the game.
    pub losses: u64,

    /// Starting states queued by the mulligan step.
    pub opening_states: u64,

    /// Total time spent searching (microseconds).
    pub time_us: u64,
}

impl SearchStats {
    /// Create new empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset all statistics to zero.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// States expanded per second.
    #[must_use]
    pub fn states_per_second(&self) -> f64 {
        if self.time_us == 0 {
            0.0
        } else {
            self.states_expanded as f64 / (self.time_us as f64 / 1_000_000.0)
        }
    }

    /// Share of created children that were duplicates.
    #[must_use]
    pub fn duplicate_rate(&self) -> f64 {
        if self.branches_created == 0 {
            0.0
        } else {
            self.duplicates_pruned as f64 / self.branches_created as f64
        }
    }
}

impl std::fmt::Display for SearchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} expanded, {} forced, {} branches ({} duplicate), {} dead, {} lost in {:.1} ms",
            self.states_expanded,
            self.forced_moves,
            self.branches_created,
            self.duplicates_pruned,
            self.dead_states_pruned,
            self.losses,
            self.time_us as f64 / 1000.0,
        )
    }
}
