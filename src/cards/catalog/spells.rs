//! Noncreature cards: Lotus Petal and the sorceries.

use super::{cast_permanent, creature_positions, is_creature_at, put_onto_battlefield};
use crate::cards::CardKind;
use crate::core::action::{Ability, Targets};
use crate::core::combinatorics::combinations;
use crate::core::entity::EntityId;
use crate::core::mana::ManaColor;
use crate::core::state::GameState;
use crate::zones::{Located, Zone, ZonePosition};

use smallvec::smallvec;

const WINDING_WAY_DEPTH: usize = 4;
const LEAD_THE_STAMPEDE_DEPTH: usize = 5;
const FLASHBACK_SACRIFICES: usize = 3;

const LAND_GRANT_FETCHES: [CardKind; 2] = [CardKind::Forest, CardKind::HauntedMire];

pub(super) fn candidates(state: &GameState, at: Located, kind: CardKind, out: &mut Vec<(Ability, Targets)>) {
    match (at.zone, kind) {
        (Zone::Hand, CardKind::LandGrant) => {
            for fetch in LAND_GRANT_FETCHES {
                for free in [true, false] {
                    out.push((Ability::CastForLand { fetch, free }, Targets::new()));
                }
            }
        }
        (Zone::Hand, CardKind::DreadReturn) => {
            for (i, card) in state.graveyard().iter().enumerate() {
                if card.kind.is_creature() {
                    out.push((Ability::CastWithTarget, smallvec![i as u8]));
                }
            }
        }
        (Zone::Hand, _) => out.push((Ability::Cast, Targets::new())),
        (Zone::Battlefield, CardKind::LotusPetal) => {
            for color in [ManaColor::Green, ManaColor::Black] {
                out.push((Ability::SacrificeForMana(color), Targets::new()));
            }
        }
        (Zone::Graveyard, CardKind::DreadReturn) => {
            let sacrifices = combinations(&creature_positions(state), FLASHBACK_SACRIFICES);
            if sacrifices.is_empty() {
                return;
            }
            for (i, card) in state.graveyard().iter().enumerate() {
                if !card.kind.is_creature() {
                    continue;
                }
                for sacrifice in &sacrifices {
                    let mut targets: Targets = smallvec![i as u8];
                    targets.extend(sacrifice.iter().map(|&s| s as u8));
                    out.push((Ability::Flashback, targets));
                }
            }
        }
        _ => {}
    }
}

fn has_land_in_hand(state: &GameState) -> bool {
    state.hand().iter().any(|c| c.kind.is_land())
}

pub(super) fn is_available(state: &GameState, at: Located, kind: CardKind, ability: Ability, targets: &[u8]) -> bool {
    match (at.zone, kind, ability) {
        (Zone::Hand, CardKind::LandGrant, Ability::CastForLand { fetch, free }) => {
            if !LAND_GRANT_FETCHES.contains(&fetch) || !state.zones.contains(Zone::Library, fetch) {
                return false;
            }
            // The free mode replaces the paid one whenever it is allowed.
            if free {
                !has_land_in_hand(state)
            } else {
                has_land_in_hand(state) && state.mana_pool.can_pay(&kind.cost())
            }
        }
        (Zone::Hand, CardKind::DreadReturn, Ability::CastWithTarget) => {
            let [target] = targets else {
                return false;
            };
            is_creature_at(state, Zone::Graveyard, *target) && state.mana_pool.can_pay(&kind.cost())
        }
        (Zone::Hand, CardKind::LotusPetal | CardKind::WindingWay | CardKind::LeadTheStampede, Ability::Cast) => {
            state.mana_pool.can_pay(&kind.cost())
        }
        (Zone::Battlefield, CardKind::LotusPetal, Ability::SacrificeForMana(color)) => {
            matches!(color, ManaColor::Green | ManaColor::Black)
        }
        (Zone::Graveyard, CardKind::DreadReturn, Ability::Flashback) => {
            let [target, sacrifices @ ..] = targets else {
                return false;
            };
            sacrifices.len() == FLASHBACK_SACRIFICES
                && is_creature_at(state, Zone::Graveyard, *target)
                && sacrifices.iter().all(|&s| is_creature_at(state, Zone::Battlefield, s))
                && sacrifices.windows(2).all(|w| w[0] < w[1])
        }
        _ => false,
    }
}

pub(super) fn resolve(state: &mut GameState, at: Located, kind: CardKind, ability: Ability, targets: &[u8]) {
    let id = match state.zones.card_at(at) {
        Some(card) => card.id,
        None => return,
    };
    match (kind, ability) {
        (CardKind::LotusPetal, Ability::Cast) => cast_permanent(state, at, kind),
        (CardKind::LotusPetal, Ability::SacrificeForMana(color)) => {
            state.sacrifice(id);
            state.add_mana(color, 1);
        }
        (CardKind::LandGrant, Ability::CastForLand { fetch, free }) => {
            if !free {
                state.pay(&kind.cost());
            }
            state.move_card(id, Zone::Graveyard, ZonePosition::Bottom);
            state.search_library_for(fetch);
            state.shuffle_library();
        }
        (CardKind::WindingWay, Ability::Cast) => {
            state.pay(&kind.cost());
            let revealed = top_cards(state, WINDING_WAY_DEPTH);
            for (card, card_kind) in revealed {
                let to = if card_kind.is_creature() { Zone::Hand } else { Zone::Graveyard };
                state.move_card(card, to, ZonePosition::Bottom);
            }
            state.move_card(id, Zone::Graveyard, ZonePosition::Bottom);
        }
        (CardKind::LeadTheStampede, Ability::Cast) => {
            state.pay(&kind.cost());
            let revealed = top_cards(state, LEAD_THE_STAMPEDE_DEPTH);
            let mut rest = Vec::new();
            for (card, card_kind) in revealed {
                if card_kind.is_creature() && card_kind != CardKind::LotlethGiant {
                    state.move_card(card, Zone::Hand, ZonePosition::Bottom);
                } else {
                    rest.push((card, card_kind));
                }
            }
            // Nonlands first, so the lands end up as a known run at the bottom.
            rest.sort_by_key(|&(_, k)| k.is_land());
            for (card, _) in rest {
                state.put_on_bottom(card);
            }
            state.move_card(id, Zone::Graveyard, ZonePosition::Bottom);
        }
        (CardKind::DreadReturn, Ability::CastWithTarget) => {
            state.pay(&kind.cost());
            let target = state.graveyard()[targets[0] as usize].id;
            state.move_card(id, Zone::Graveyard, ZonePosition::Bottom);
            put_onto_battlefield(state, target);
        }
        (CardKind::DreadReturn, Ability::Flashback) => {
            let target = state.graveyard()[targets[0] as usize].id;
            let sacrifices: Vec<EntityId> = targets[1..]
                .iter()
                .map(|&s| state.battlefield()[s as usize].id)
                .collect();
            state.move_card(id, Zone::Exile, ZonePosition::Bottom);
            for sacrifice in sacrifices {
                state.sacrifice(sacrifice);
            }
            put_onto_battlefield(state, target);
        }
        (_, other) => panic!("{} has no ability {}", kind, other),
    }
}

/// Ids and kinds of the top `n` library cards (fewer if the library is short).
fn top_cards(state: &GameState, n: usize) -> Vec<(EntityId, CardKind)> {
    state.library().iter().take(n).map(|c| (c.id, c.kind)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::StateBuilder;

    fn hand(index: usize) -> Located {
        Located { zone: Zone::Hand, index }
    }

    #[test]
    fn test_land_grant_free_only_without_lands() {
        let state = StateBuilder::new()
            .library([CardKind::Forest])
            .hand([CardKind::LandGrant])
            .build();
        let free = Ability::CastForLand { fetch: CardKind::Forest, free: true };
        let paid = Ability::CastForLand { fetch: CardKind::Forest, free: false };
        let mire = Ability::CastForLand { fetch: CardKind::HauntedMire, free: true };
        assert!(is_available(&state, hand(0), CardKind::LandGrant, free, &[]));
        assert!(!is_available(&state, hand(0), CardKind::LandGrant, paid, &[]));
        assert!(!is_available(&state, hand(0), CardKind::LandGrant, mire, &[]));

        let state = StateBuilder::new()
            .library([CardKind::Forest])
            .hand([CardKind::LandGrant, CardKind::Swamp])
            .mana(ManaColor::Green, 2)
            .build();
        assert!(!is_available(&state, hand(0), CardKind::LandGrant, free, &[]));
        assert!(is_available(&state, hand(0), CardKind::LandGrant, paid, &[]));
    }

    #[test]
    fn test_winding_way() {
        let mut state = StateBuilder::new()
            .library([CardKind::TinderWall, CardKind::Forest, CardKind::BalustradeSpy, CardKind::LandGrant, CardKind::Swamp])
            .hand([CardKind::WindingWay])
            .mana(ManaColor::Green, 2)
            .build();
        resolve(&mut state, hand(0), CardKind::WindingWay, Ability::Cast, &[]);
        let hand_kinds: Vec<_> = state.hand().iter().map(|c| c.kind).collect();
        assert_eq!(hand_kinds, vec![CardKind::TinderWall, CardKind::BalustradeSpy]);
        assert_eq!(state.graveyard().len(), 3);
        assert_eq!(state.library().len(), 1);
    }

    #[test]
    fn test_lead_the_stampede_bottoms_lands_last() {
        let mut state = StateBuilder::new()
            .library([
                CardKind::Forest,
                CardKind::LotlethGiant,
                CardKind::WallOfRoots,
                CardKind::Swamp,
                CardKind::LandGrant,
                CardKind::DreadReturn,
            ])
            .hand([CardKind::LeadTheStampede])
            .mana(ManaColor::Green, 3)
            .build();
        resolve(&mut state, hand(0), CardKind::LeadTheStampede, Ability::Cast, &[]);

        assert_eq!(state.hand()[0].kind, CardKind::WallOfRoots);
        let library: Vec<_> = state.library().iter().map(|c| c.kind).collect();
        assert_eq!(library[0], CardKind::DreadReturn);
        assert!(library[library.len() - 2..].iter().all(|k| k.is_land()));
        assert_eq!(state.known_bottom_lands, 2);
    }

    #[test]
    fn test_flashback_giant_deals_lethal() {
        let mut state = StateBuilder::new()
            .graveyard([CardKind::DreadReturn, CardKind::LotlethGiant, CardKind::MaskedVandal])
            .battlefield([CardKind::TinderWall, CardKind::WallOfRoots, CardKind::SaruliCaretaker])
            .opponent_life(4)
            .build();
        let at = Located { zone: Zone::Graveyard, index: 0 };
        let mut out = Vec::new();
        candidates(&state, at, CardKind::DreadReturn, &mut out);
        // two graveyard creatures, one way to pick three sacrifices
        assert_eq!(out.len(), 2);

        assert!(is_available(&state, at, CardKind::DreadReturn, Ability::Flashback, &[1, 0, 1, 2]));
        resolve(&mut state, at, CardKind::DreadReturn, Ability::Flashback, &[1, 0, 1, 2]);

        assert_eq!(state.exile()[0].kind, CardKind::DreadReturn);
        assert_eq!(state.battlefield()[0].kind, CardKind::LotlethGiant);
        // Vandal plus three sacrifices
        assert_eq!(state.opponent_life, 0);
        assert!(state.is_won());
    }

    #[test]
    fn test_dread_return_from_hand() {
        let mut state = StateBuilder::new()
            .hand([CardKind::DreadReturn])
            .graveyard([CardKind::Forest, CardKind::BalustradeSpy])
            .library([CardKind::TinderWall, CardKind::Swamp])
            .mana(ManaColor::Black, 4)
            .build();
        assert!(!is_available(&state, hand(0), CardKind::DreadReturn, Ability::CastWithTarget, &[0]));
        resolve(&mut state, hand(0), CardKind::DreadReturn, Ability::CastWithTarget, &[1]);
        assert_eq!(state.battlefield()[0].kind, CardKind::BalustradeSpy);
        // Spy milled through the Swamp
        assert!(state.library().is_empty());
    }

    #[test]
    fn test_lotus_petal() {
        let mut state = StateBuilder::new().hand([CardKind::LotusPetal]).build();
        assert!(is_available(&state, hand(0), CardKind::LotusPetal, Ability::Cast, &[]));
        resolve(&mut state, hand(0), CardKind::LotusPetal, Ability::Cast, &[]);
        let field = Located { zone: Zone::Battlefield, index: 0 };
        resolve(&mut state, field, CardKind::LotusPetal, Ability::SacrificeForMana(ManaColor::Black), &[]);
        assert_eq!(state.mana_pool.get(ManaColor::Black), 1);
        assert_eq!(state.graveyard()[0].kind, CardKind::LotusPetal);
    }
}
