//! Per-run simulation summary.
//!
//! One record per solved seed, compact enough to store thousands of them
//! and detailed enough to replay the winning line by hand.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cards::CardKind;
use crate::core::{GameState, LoggedStep};
use crate::solver::SolveOutcome;

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    Won,
    /// Search stopped by the turn limit or the time budget.
    Truncated,
    /// No winning line exists (or the opening hand could not be dealt).
    NoLine,
}

/// Summary of one simulated game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    /// Shuffle seed of the run.
    pub seed: u64,

    pub outcome: RunOutcome,

    /// Hand the winning line started from, after mulligans.
    pub initial_hand: Vec<CardKind>,

    /// Hand size kept; `None` when no line was found.
    ///
    /// Lines from different hand sizes that reach the same position are
    /// explored once, from the larger hand, so ties count toward it.
    pub kept_at: Option<usize>,

    pub winning_turn: Option<u32>,

    /// Cards left in the library at the win.
    pub cards_in_library: Option<usize>,

    /// Lands left in the library at the win.
    pub lands_in_library: Option<u32>,

    /// Lands of unknown position in the library when Balustrade Spy
    /// resolved. Nonzero means the mill could have stopped early.
    pub unknown_lands_on_combo: Option<u32>,

    /// Interaction cards drawn along the winning line.
    pub interaction_count: u32,

    /// Cards put on the bottom by the mulligan.
    pub mulligan_bottom: Vec<CardKind>,

    /// Every action of the winning line.
    pub steps: Vec<LoggedStep>,

    /// Wall-clock solving time (milliseconds).
    pub solving_time_ms: f64,
}

impl SimulationSummary {
    /// Summarize a solve outcome.
    #[must_use]
    pub fn from_outcome(seed: u64, outcome: &SolveOutcome, elapsed: Duration) -> Self {
        let solving_time_ms = elapsed.as_secs_f64() * 1000.0;
        match outcome {
            SolveOutcome::Won(state) => Self::won(seed, state, solving_time_ms),
            SolveOutcome::Truncated { .. } => Self::empty(seed, RunOutcome::Truncated, solving_time_ms),
            SolveOutcome::NoLine => Self::empty(seed, RunOutcome::NoLine, solving_time_ms),
        }
    }

    fn won(seed: u64, state: &GameState, solving_time_ms: f64) -> Self {
        Self {
            seed,
            outcome: RunOutcome::Won,
            initial_hand: state.initial_hand.iter().copied().collect(),
            kept_at: state.kept_at,
            winning_turn: Some(state.turn),
            cards_in_library: Some(state.library().len()),
            lands_in_library: Some(state.lands_in_library()),
            unknown_lands_on_combo: state.unknown_lands_on_combo,
            interaction_count: state.interaction_count,
            mulligan_bottom: state.mulligan_bottom.iter().copied().collect(),
            steps: state.history.iter().cloned().collect(),
            solving_time_ms,
        }
    }

    fn empty(seed: u64, outcome: RunOutcome, solving_time_ms: f64) -> Self {
        Self {
            seed,
            outcome,
            initial_hand: Vec::new(),
            kept_at: None,
            winning_turn: None,
            cards_in_library: None,
            lands_in_library: None,
            unknown_lands_on_combo: None,
            interaction_count: 0,
            mulligan_bottom: Vec::new(),
            steps: Vec::new(),
            solving_time_ms,
        }
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.outcome == RunOutcome::Won
    }

    /// A win that relied on Balustrade Spy not hitting a land early.
    #[must_use]
    pub fn is_lucky(&self) -> bool {
        self.is_win() && self.unknown_lands_on_combo.is_some_and(|n| n > 0)
    }
}

impl std::fmt::Display for SimulationSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |cards: &[CardKind]| cards.iter().map(|c| c.name()).collect::<Vec<_>>().join(", ");
        writeln!(f, "Seed: {}", self.seed)?;
        writeln!(f, "Outcome: {:?}", self.outcome)?;
        if !self.is_win() {
            return writeln!(f, "Solving time: {:.1} ms", self.solving_time_ms);
        }
        writeln!(f, "Initial hand: {}", names(&self.initial_hand))?;
        if let Some(kept) = self.kept_at {
            writeln!(f, "Kept at: {kept}")?;
        }
        if !self.mulligan_bottom.is_empty() {
            writeln!(f, "Bottomed: {}", names(&self.mulligan_bottom))?;
        }
        if let Some(turn) = self.winning_turn {
            writeln!(f, "Win at turn: {turn}")?;
        }
        if let Some(cards) = self.cards_in_library {
            writeln!(f, "Cards in library: {cards}")?;
        }
        if let Some(unknown) = self.unknown_lands_on_combo {
            writeln!(f, "Unknown lands in library on combo: {unknown}")?;
        }
        writeln!(f, "Interaction count: {}", self.interaction_count)?;
        writeln!(f, "Solving time: {:.1} ms", self.solving_time_ms)?;
        writeln!(f, "Steps:")?;
        for step in &self.steps {
            writeln!(f, "  {step}")?;
        }
        Ok(())
    }
}
