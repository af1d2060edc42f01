//! Card capability protocol.
//!
//! Every card answers three questions, each with the state passed in
//! explicitly:
//!
//! - [`candidates`]: which abilities (with target positions) it could use
//!   from its current zone
//! - [`is_available`]: whether one of them is legal right now
//! - [`resolve`]: what it does, expressed only through the transition
//!   primitives on [`GameState`]
//!
//! Dispatch is a `match` on [`CardKind`] split over three files by card
//! family. Timing is checked here once: sorcery-speed abilities need the
//! active phase.

mod creatures;
mod lands;
mod spells;

use crate::cards::{CardKind, CardStatus};
use crate::core::action::{Ability, Targets};
use crate::core::state::{GameState, TurnPhase};
use crate::zones::{Located, Zone, ZonePosition};

use smallvec::SmallVec;

/// Families of cards sharing a rules file.
enum Family {
    Land,
    Creature,
    Spell,
}

fn family(kind: CardKind) -> Family {
    if kind.is_land() {
        Family::Land
    } else if kind.is_creature() {
        Family::Creature
    } else {
        Family::Spell
    }
}

/// Candidate abilities of the card at `at`.
///
/// Candidates are not filtered for legality.
#[must_use]
pub fn candidates(state: &GameState, at: Located) -> Vec<(Ability, Targets)> {
    let mut out = Vec::new();
    if let Some(card) = state.zones.card_at(at) {
        match family(card.kind) {
            Family::Land => lands::candidates(state, at, card.kind, &mut out),
            Family::Creature => creatures::candidates(state, at, card.kind, &mut out),
            Family::Spell => spells::candidates(state, at, card.kind, &mut out),
        }
    }
    out
}

/// Legality of one ability of the card at `at`.
#[must_use]
pub fn is_available(state: &GameState, at: Located, ability: Ability, targets: &[u8]) -> bool {
    let Some(card) = state.zones.card_at(at) else {
        return false;
    };
    if !ability.is_instant_speed() && state.phase != TurnPhase::Active {
        return false;
    }
    match family(card.kind) {
        Family::Land => lands::is_available(state, at, card.kind, ability, targets),
        Family::Creature => creatures::is_available(state, at, card.kind, ability, targets),
        Family::Spell => spells::is_available(state, at, card.kind, ability, targets),
    }
}

/// Apply the effect of an ability. The caller has checked availability.
pub fn resolve(state: &mut GameState, at: Located, ability: Ability, targets: &[u8]) {
    let Some(kind) = state.zones.card_at(at).map(|c| c.kind) else {
        panic!("No card at {:?} to resolve {}", at, ability);
    };
    match family(kind) {
        Family::Land => lands::resolve(state, at, kind, ability, targets),
        Family::Creature => creatures::resolve(state, at, kind, ability, targets),
        Family::Spell => spells::resolve(state, at, kind, ability, targets),
    }
}

/// Zones the targets of an ability point into, in target order.
#[must_use]
pub fn target_zones(ability: Ability) -> &'static [Zone] {
    match ability {
        Ability::TapCreatureForMana(_) => &[Zone::Battlefield],
        Ability::UntapBouncingLand => &[Zone::Battlefield, Zone::Lands],
        Ability::CastWithTarget => &[Zone::Graveyard],
        Ability::Flashback => &[Zone::Graveyard, Zone::Battlefield, Zone::Battlefield, Zone::Battlefield],
        _ => &[],
    }
}

/// Functional status of each target, for deduplicating equivalent actions.
#[must_use]
pub fn target_status(state: &GameState, ability: Ability, targets: &[u8]) -> SmallVec<[CardStatus; 4]> {
    let mut status: SmallVec<[CardStatus; 4]> = targets
        .iter()
        .zip(target_zones(ability))
        .filter_map(|(&i, &zone)| state.zones[zone].get(i as usize).map(|c| c.status()))
        .collect();
    // Sacrificed creatures are an unordered set.
    if ability == Ability::Flashback && status.len() > 1 {
        status[1..].sort_unstable();
    }
    status
}

// =============================================================================
// Shared effects
// =============================================================================

/// Battlefield positions holding creatures.
pub(crate) fn creature_positions(state: &GameState) -> Vec<usize> {
    state
        .battlefield()
        .iter()
        .enumerate()
        .filter(|(_, c)| c.kind.is_creature())
        .map(|(i, _)| i)
        .collect()
}

/// Check whether the card at a target position exists and is a creature.
pub(crate) fn is_creature_at(state: &GameState, zone: Zone, index: u8) -> bool {
    state.zones[zone]
        .get(index as usize)
        .is_some_and(|c| c.kind.is_creature())
}

/// Cast a permanent from hand: pay, put it onto the battlefield, trigger.
pub(crate) fn cast_permanent(state: &mut GameState, at: Located, kind: CardKind) {
    state.pay(&kind.cost());
    let id = state.hand()[at.index].id;
    put_onto_battlefield(state, id);
}

/// Put a card onto the battlefield from any zone and run its trigger.
pub(crate) fn put_onto_battlefield(state: &mut GameState, id: crate::core::EntityId) {
    state.move_card(id, Zone::Battlefield, ZonePosition::Bottom);
    let last = state.battlefield().len() - 1;
    let at = Located { zone: Zone::Battlefield, index: last };
    let kind = match state.zones.card_at_mut(at) {
        Some(card) => {
            card.summoning_sick = true;
            card.kind
        }
        None => return,
    };
    enters_battlefield(state, kind);
}

/// Enter-the-battlefield triggers.
fn enters_battlefield(state: &mut GameState, kind: CardKind) {
    match kind {
        CardKind::BalustradeSpy => {
            let unknown = state.lands_in_library().saturating_sub(state.known_bottom_lands);
            state.unknown_lands_on_combo = Some(unknown);
            while let Some(milled) = state.mill_top() {
                if milled.is_land() {
                    break;
                }
            }
        }
        CardKind::LotlethGiant => {
            state.opponent_life -= state.creatures_in_graveyard() as i32;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::mana::ManaColor;
    use crate::core::state::StateBuilder;

    fn hand_at(index: usize) -> Located {
        Located { zone: Zone::Hand, index }
    }

    #[test]
    fn test_sorcery_speed_needs_active_phase() {
        let mut state = StateBuilder::new()
            .hand([CardKind::Forest])
            .build();
        assert!(is_available(&state, hand_at(0), Ability::Play, &[]));
        state.phase = TurnPhase::Passing;
        assert!(!is_available(&state, hand_at(0), Ability::Play, &[]));
    }

    #[test]
    fn test_spy_mills_until_land() {
        let mut state = StateBuilder::new()
            .library([CardKind::DreadReturn, CardKind::LotlethGiant, CardKind::Forest, CardKind::TinderWall])
            .hand([CardKind::BalustradeSpy])
            .mana(ManaColor::Black, 4)
            .build();
        assert!(is_available(&state, hand_at(0), Ability::Cast, &[]));
        resolve(&mut state, hand_at(0), Ability::Cast, &[]);

        assert_eq!(state.graveyard().len(), 3);
        assert_eq!(state.library().len(), 1);
        assert_eq!(state.unknown_lands_on_combo, Some(1));
        assert!(state.battlefield()[0].summoning_sick);
    }

    #[test]
    fn test_spy_on_known_bottom_land() {
        let mut state = StateBuilder::new()
            .library([CardKind::DreadReturn, CardKind::LotlethGiant, CardKind::Forest])
            .known_bottom_lands(1)
            .hand([CardKind::BalustradeSpy])
            .mana(ManaColor::Black, 4)
            .build();
        resolve(&mut state, hand_at(0), Ability::Cast, &[]);
        assert_eq!(state.unknown_lands_on_combo, Some(0));
        assert!(state.library().is_empty());
        assert_eq!(state.known_bottom_lands, 0);
    }

    #[test]
    fn test_target_status_sorts_sacrifices() {
        let state = StateBuilder::new()
            .graveyard([CardKind::LotlethGiant])
            .battlefield([CardKind::TinderWall, CardKind::WallOfRoots, CardKind::TinderWall])
            .build();
        let a = target_status(&state, Ability::Flashback, &[0, 0, 1, 2]);
        let mut b_state = state.clone();
        b_state.zones[Zone::Battlefield].swap(0, 1);
        let b = target_status(&b_state, Ability::Flashback, &[0, 0, 1, 2]);
        assert_eq!(a, b);
        assert_eq!(a[0].kind, CardKind::LotlethGiant);
    }
}
