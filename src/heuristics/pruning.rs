//! Branch filters, early abort and the keep-hand predicate.

use log::debug;

use super::{source_kind, BranchFilter};
use crate::cards::CardKind;
use crate::core::{Ability, Action, GameState, ManaColor};
use crate::zones::Zone;

/// Play a Forest from hand before forestcycling for another Forest.
///
/// Without a Haunted Mire left in the library both orders reach the same
/// cards, so only the land play is explored.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlayForestBeforeCycling;

impl BranchFilter for PlayForestBeforeCycling {
    fn name(&self) -> &'static str {
        "play_forest_before_cycling"
    }

    fn filter(&self, state: &GameState, actions: Vec<Action>) -> Vec<Action> {
        let cycling = Ability::Forestcycling(CardKind::Forest);
        let can_cycle = actions.iter().any(|a| a.ability() == Some(cycling));
        let can_play_forest = actions
            .iter()
            .any(|a| a.ability() == Some(Ability::Play) && source_kind(state, a) == Some(CardKind::Forest));
        if !can_cycle || !can_play_forest || state.zones.contains(Zone::Library, CardKind::HauntedMire) {
            return actions;
        }
        debug!("play Forest before cycling for Forest");
        actions.into_iter().filter(|a| a.ability() != Some(cycling)).collect()
    }
}

/// Play a land before anything else unless a land tutor competes with it.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrioritizeLandPlay;

impl BranchFilter for PrioritizeLandPlay {
    fn name(&self) -> &'static str {
        "prioritize_land_play"
    }

    fn filter(&self, _state: &GameState, actions: Vec<Action>) -> Vec<Action> {
        let can_play_land = actions.iter().any(|a| a.ability() == Some(Ability::Play));
        let can_tutor_land = actions.iter().any(|a| a.ability().is_some_and(Ability::is_land_tutor));
        if !can_play_land || can_tutor_land {
            return actions;
        }
        debug!("prioritize land play");
        actions.into_iter().filter(|a| a.ability() == Some(Ability::Play)).collect()
    }
}

/// Drop "just pass" when there is enough else to do.
///
/// Some actions do not count towards the threshold: holding on to their
/// mana (or not casting Balustrade Spy yet) can be right, so passing must
/// stay explorable next to them.
#[derive(Clone, Debug)]
pub struct PassPruning {
    exempt: Vec<(CardKind, Ability)>,
    min_alternatives: usize,
}

impl PassPruning {
    /// The exemptions for the Spy deck.
    #[must_use]
    pub fn standard_exemptions() -> Vec<(CardKind, Ability)> {
        vec![
            (CardKind::TinderWall, Ability::SacrificeForMana(ManaColor::Red)),
            (CardKind::WallOfRoots, Ability::CounterForMana(ManaColor::Green)),
            (CardKind::LotusPetal, Ability::SacrificeForMana(ManaColor::Green)),
            (CardKind::LotusPetal, Ability::SacrificeForMana(ManaColor::Black)),
            (CardKind::BalustradeSpy, Ability::Cast),
        ]
    }

    /// Replace the exemption list.
    #[must_use]
    pub fn with_exemptions(mut self, exempt: Vec<(CardKind, Ability)>) -> Self {
        self.exempt = exempt;
        self
    }

    /// Number of non-exempt alternatives needed before passing is dropped.
    #[must_use]
    pub fn with_min_alternatives(mut self, n: usize) -> Self {
        self.min_alternatives = n;
        self
    }

    fn is_exempt(&self, state: &GameState, action: &Action) -> bool {
        match (source_kind(state, action), action.ability()) {
            (Some(kind), Some(ability)) => self.exempt.contains(&(kind, ability)),
            _ => false,
        }
    }
}

impl Default for PassPruning {
    fn default() -> Self {
        Self {
            exempt: Self::standard_exemptions(),
            min_alternatives: 2,
        }
    }
}

impl BranchFilter for PassPruning {
    fn name(&self) -> &'static str {
        "pass_pruning"
    }

    fn filter(&self, state: &GameState, actions: Vec<Action>) -> Vec<Action> {
        let pass = Action::pass();
        if !actions.contains(&pass) {
            return actions;
        }
        let alternatives = actions
            .iter()
            .filter(|a| !a.is_system() && !self.is_exempt(state, a))
            .count();
        if alternatives < self.min_alternatives {
            return actions;
        }
        debug!("ignore 'just pass' with {} alternatives", alternatives);
        actions.into_iter().filter(|a| *a != pass).collect()
    }
}

// =============================================================================
// Early abort and hand selection
// =============================================================================

/// A state past turn 1 with no land anywhere in reach is hopeless.
#[must_use]
pub fn is_dead_state(state: &GameState) -> bool {
    state.turn >= 2
        && state.lands().is_empty()
        && !state.hand().iter().any(|c| c.kind.is_land())
}

/// Cards that make mana on the first turn, or find a land that does.
#[must_use]
pub fn is_mana_card(kind: CardKind) -> bool {
    kind.is_land()
        || matches!(
            kind,
            CardKind::LotusPetal
                | CardKind::LandGrant
                | CardKind::GenerousEnt
                | CardKind::TrollOfKhazadDum
                | CardKind::SaguWildling
        )
}

/// Static check whether an opening hand is worth exploring.
///
/// A hand without any mana card cannot cast anything.
#[must_use]
pub fn is_keepable(hand: &[CardKind]) -> bool {
    hand.iter().any(|&k| is_mana_card(k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StateBuilder;
    use crate::rules::{RulesEngine, SolitaireEngine};

    fn actions(state: &GameState) -> Vec<Action> {
        SolitaireEngine::new().legal_actions(state)
    }

    #[test]
    fn test_play_forest_before_cycling() {
        let state = StateBuilder::new()
            .library([CardKind::Forest])
            .hand([CardKind::Forest, CardKind::GenerousEnt])
            .mana(ManaColor::Green, 1)
            .build();
        let filtered = PlayForestBeforeCycling.filter(&state, actions(&state));
        let names: Vec<String> = filtered.iter().map(ToString::to_string).collect();
        assert!(!names.iter().any(|n| n.starts_with("forestcycling")));
        assert!(names.contains(&"play".to_string()));
    }

    #[test]
    fn test_cycling_kept_with_mire_in_library() {
        let state = StateBuilder::new()
            .library([CardKind::Forest, CardKind::HauntedMire])
            .hand([CardKind::Forest, CardKind::GenerousEnt])
            .mana(ManaColor::Green, 1)
            .build();
        let before = actions(&state);
        assert_eq!(PlayForestBeforeCycling.filter(&state, before.clone()), before);
    }

    #[test]
    fn test_prioritize_land_play() {
        let state = StateBuilder::new()
            .hand([CardKind::Swamp, CardKind::LotusPetal])
            .build();
        let filtered = PrioritizeLandPlay.filter(&state, actions(&state));
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].ability(), Some(Ability::Play));
    }

    #[test]
    fn test_pass_pruned_with_two_alternatives() {
        let state = StateBuilder::new()
            .hand([CardKind::LotusPetal, CardKind::TinderWall])
            .mana(ManaColor::Green, 1)
            .build();
        let before = actions(&state);
        assert!(before.contains(&Action::pass()));
        let filtered = PassPruning::default().filter(&state, before);
        assert!(!filtered.contains(&Action::pass()));
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_pass_kept_next_to_exempt_actions() {
        let state = StateBuilder::new()
            .hand([CardKind::LotusPetal])
            .battlefield([CardKind::TinderWall, CardKind::WallOfRoots])
            .build();
        let filtered = PassPruning::default().filter(&state, actions(&state));
        assert!(filtered.contains(&Action::pass()));

        let strict = PassPruning::default().with_exemptions(Vec::new());
        assert!(!strict.filter(&state, actions(&state)).contains(&Action::pass()));
    }

    #[test]
    fn test_dead_state() {
        let hopeless = StateBuilder::new().hand([CardKind::TinderWall]).turn(2).build();
        assert!(is_dead_state(&hopeless));

        let first_turn = StateBuilder::new().hand([CardKind::TinderWall]).build();
        assert!(!is_dead_state(&first_turn));

        let land_in_hand = StateBuilder::new().hand([CardKind::Swamp]).turn(3).build();
        assert!(!is_dead_state(&land_in_hand));
    }

    #[test]
    fn test_keepable() {
        assert!(is_keepable(&[CardKind::TinderWall, CardKind::LandGrant]));
        assert!(!is_keepable(&[CardKind::TinderWall, CardKind::BalustradeSpy, CardKind::DreadReturn]));
    }
}
