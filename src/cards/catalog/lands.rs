//! Lands: Forest, Swamp, Haunted Mire.

use crate::cards::CardKind;
use crate::core::action::{Ability, Targets};
use crate::core::mana::ManaColor;
use crate::core::state::GameState;
use crate::zones::{Located, Zone, ZonePosition};

fn colors(kind: CardKind) -> &'static [ManaColor] {
    match kind {
        CardKind::Forest => &[ManaColor::Green],
        CardKind::Swamp => &[ManaColor::Black],
        CardKind::HauntedMire => &[ManaColor::Green, ManaColor::Black],
        _ => &[],
    }
}

pub(super) fn candidates(_state: &GameState, at: Located, kind: CardKind, out: &mut Vec<(Ability, Targets)>) {
    match at.zone {
        Zone::Hand => out.push((Ability::Play, Targets::new())),
        Zone::Lands => {
            for &color in colors(kind) {
                out.push((Ability::TapForMana(color), Targets::new()));
            }
        }
        _ => {}
    }
}

pub(super) fn is_available(state: &GameState, at: Located, kind: CardKind, ability: Ability, _targets: &[u8]) -> bool {
    match (at.zone, ability) {
        (Zone::Hand, Ability::Play) => !state.land_played,
        (Zone::Lands, Ability::TapForMana(color)) => {
            colors(kind).contains(&color) && !state.lands()[at.index].tapped
        }
        _ => false,
    }
}

pub(super) fn resolve(state: &mut GameState, at: Located, kind: CardKind, ability: Ability, _targets: &[u8]) {
    match ability {
        Ability::Play => {
            let id = state.hand()[at.index].id;
            state.move_card(id, Zone::Lands, ZonePosition::Bottom);
            state.land_played = true;
            if kind == CardKind::HauntedMire {
                let last = state.lands().len() - 1;
                state.tap(Located { zone: Zone::Lands, index: last });
            }
        }
        Ability::TapForMana(color) => {
            state.tap(at);
            state.add_mana(color, 1);
        }
        other => panic!("{} has no ability {}", kind, other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::StateBuilder;

    #[test]
    fn test_mire_enters_tapped() {
        let mut state = StateBuilder::new().hand([CardKind::HauntedMire]).build();
        let at = Located { zone: Zone::Hand, index: 0 };
        resolve(&mut state, at, CardKind::HauntedMire, Ability::Play, &[]);
        assert!(state.lands()[0].tapped);
        assert!(state.land_played);
    }

    #[test]
    fn test_one_land_per_turn() {
        let mut state = StateBuilder::new().hand([CardKind::Forest, CardKind::Swamp]).build();
        let at = Located { zone: Zone::Hand, index: 0 };
        resolve(&mut state, at, CardKind::Forest, Ability::Play, &[]);
        assert!(!is_available(&state, at, CardKind::Swamp, Ability::Play, &[]));
    }

    #[test]
    fn test_mire_taps_for_both_colors() {
        let state = StateBuilder::new().lands([CardKind::HauntedMire]).build();
        let at = Located { zone: Zone::Lands, index: 0 };
        let mut out = Vec::new();
        candidates(&state, at, CardKind::HauntedMire, &mut out);
        assert_eq!(out.len(), 2);
        assert!(is_available(&state, at, CardKind::HauntedMire, Ability::TapForMana(ManaColor::Black), &[]));
        assert!(!is_available(&state, at, CardKind::HauntedMire, Ability::TapForMana(ManaColor::Red), &[]));
    }

    #[test]
    fn test_tap_adds_mana() {
        let mut state = StateBuilder::new().lands([CardKind::Swamp]).build();
        let at = Located { zone: Zone::Lands, index: 0 };
        resolve(&mut state, at, CardKind::Swamp, Ability::TapForMana(ManaColor::Black), &[]);
        assert_eq!(state.mana_pool.get(ManaColor::Black), 1);
        assert!(!is_available(&state, at, CardKind::Swamp, Ability::TapForMana(ManaColor::Black), &[]));
    }
}
