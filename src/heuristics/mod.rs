//! Search heuristics: forcing moves and branch filters.
//!
//! Heuristics are trait-based so the solver can be run with any subset:
//! - `ForcingHeuristic`: picks a single action to apply without branching
//! - `BranchFilter`: narrows the action set right before the solver forks
//!
//! Both are pure functions of `(state, legal actions)`. A forcing heuristic
//! must never force away the only path to a win; it may miss shortcuts.
//! [`HeuristicSet::standard`] is the ordered set the solver uses by default.

pub mod forcing;
pub mod pruning;

use crate::cards::CardKind;
use crate::core::{Ability, Action, GameState};

pub use forcing::{
    CastLotusPetal, CastOnlySpell, CastSaruliBeforeBattlement, FlashbackGiantForLethal,
    FreeLandGrant, MillWithSpy, NoUselessManaSwitch, OnlyAction, OnlyLandPlay, TapBasicLand,
    TutorOnlyLand,
};
pub use pruning::{is_dead_state, is_keepable, is_mana_card, PassPruning, PlayForestBeforeCycling, PrioritizeLandPlay};

// =============================================================================
// Traits
// =============================================================================

/// A rule that picks one action to play without exploring alternatives.
pub trait ForcingHeuristic: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Return the action to force, if this heuristic applies.
    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action>;
}

/// A rule that removes actions not worth branching on.
pub trait BranchFilter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Return the subset of `actions` worth exploring.
    ///
    /// Filters keep the relative order of the actions they retain.
    fn filter(&self, state: &GameState, actions: Vec<Action>) -> Vec<Action>;
}

// =============================================================================
// Heuristic Set
// =============================================================================

/// Ordered forcing heuristics plus branch filters.
pub struct HeuristicSet {
    forcing: Vec<Box<dyn ForcingHeuristic>>,
    filters: Vec<Box<dyn BranchFilter>>,
}

impl HeuristicSet {
    /// An empty set: every state branches on every legal action.
    #[must_use]
    pub fn none() -> Self {
        Self {
            forcing: Vec::new(),
            filters: Vec::new(),
        }
    }

    /// The standard ordering; first match wins.
    #[must_use]
    pub fn standard() -> Self {
        Self::none()
            .with_forcing(OnlyAction)
            .with_forcing(FlashbackGiantForLethal)
            .with_forcing(OnlyLandPlay)
            .with_forcing(TapBasicLand)
            .with_forcing(FreeLandGrant)
            .with_forcing(CastLotusPetal)
            .with_forcing(NoUselessManaSwitch)
            .with_forcing(CastSaruliBeforeBattlement)
            .with_forcing(CastOnlySpell)
            .with_forcing(TutorOnlyLand)
            .with_forcing(MillWithSpy)
            .with_filter(PlayForestBeforeCycling)
            .with_filter(PrioritizeLandPlay)
            .with_filter(PassPruning::default())
    }

    /// Append a forcing heuristic (lowest priority so far).
    #[must_use]
    pub fn with_forcing(mut self, heuristic: impl ForcingHeuristic + 'static) -> Self {
        self.forcing.push(Box::new(heuristic));
        self
    }

    /// Append a branch filter.
    #[must_use]
    pub fn with_filter(mut self, filter: impl BranchFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// First forced action, with the name of the heuristic that chose it.
    #[must_use]
    pub fn forced(&self, state: &GameState, actions: &[Action]) -> Option<(&'static str, Action)> {
        self.forcing
            .iter()
            .find_map(|h| h.force(state, actions).map(|a| (h.name(), a)))
    }

    /// Run every branch filter in order.
    #[must_use]
    pub fn filter(&self, state: &GameState, mut actions: Vec<Action>) -> Vec<Action> {
        for filter in &self.filters {
            actions = filter.filter(state, actions);
        }
        actions
    }

    /// Names of the forcing heuristics, in priority order.
    pub fn forcing_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.forcing.iter().map(|h| h.name())
    }
}

impl Default for HeuristicSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for HeuristicSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeuristicSet")
            .field("forcing", &self.forcing.iter().map(|h| h.name()).collect::<Vec<_>>())
            .field("filters", &self.filters.iter().map(|h| h.name()).collect::<Vec<_>>())
            .finish()
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// Kind of the card an action comes from.
pub(crate) fn source_kind(state: &GameState, action: &Action) -> Option<CardKind> {
    let at = state.zones.locate(action.source()?)?;
    state.zones.card_at(at).map(|c| c.kind)
}

/// Check whether an action is `ability` of a card of `kind`.
pub(crate) fn is_card_ability(state: &GameState, action: &Action, kind: CardKind, ability: Ability) -> bool {
    action.ability() == Some(ability) && source_kind(state, action) == Some(kind)
}
