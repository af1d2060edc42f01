//! Creatures: mana walls and dorks, landcyclers, the combo pieces.
//!
//! Every creature can be cast from hand. Battlefield abilities that use
//! the tap symbol need the creature to have been under our control since
//! the start of the turn; sacrifice and counter abilities do not.

use super::{cast_permanent, creature_positions, is_creature_at};
use crate::cards::{CardKind, CardTypes};
use crate::core::action::{Ability, Targets};
use crate::core::mana::{ManaColor, ManaCost};
use crate::core::state::GameState;
use crate::zones::{Located, Zone, ZonePosition};

use smallvec::smallvec;

/// Lands a hand ability can search for.
fn fetchable(kind: CardKind, ability: Ability) -> bool {
    match (kind, ability) {
        (CardKind::GenerousEnt, Ability::Forestcycling(f)) => {
            matches!(f, CardKind::Forest | CardKind::HauntedMire)
        }
        (CardKind::TrollOfKhazadDum, Ability::Swampcycling(f)) => {
            matches!(f, CardKind::Swamp | CardKind::HauntedMire)
        }
        (CardKind::SaguWildling, Ability::RoostSeek(f)) => {
            matches!(f, CardKind::Forest | CardKind::Swamp)
        }
        _ => false,
    }
}

const ROOST_SEEK_COST: u32 = 1;
const LANDCYCLING_COST: u32 = 1;
const WALL_OF_ROOTS_TOUGHNESS: u8 = 5;

fn tap_colors(kind: CardKind) -> &'static [ManaColor] {
    match kind {
        CardKind::OvergrownBattlement => &[ManaColor::Green],
        CardKind::ElvesOfDeepShadow => &[ManaColor::Black],
        CardKind::OrnithopterOfParadise => &[ManaColor::Green, ManaColor::Black],
        _ => &[],
    }
}

pub(super) fn candidates(state: &GameState, at: Located, kind: CardKind, out: &mut Vec<(Ability, Targets)>) {
    match at.zone {
        Zone::Hand => {
            out.push((Ability::Cast, Targets::new()));
            let hand_abilities: &[Ability] = match kind {
                CardKind::GenerousEnt => &[
                    Ability::Forestcycling(CardKind::Forest),
                    Ability::Forestcycling(CardKind::HauntedMire),
                ],
                CardKind::TrollOfKhazadDum => &[
                    Ability::Swampcycling(CardKind::Swamp),
                    Ability::Swampcycling(CardKind::HauntedMire),
                ],
                CardKind::SaguWildling => &[
                    Ability::RoostSeek(CardKind::Forest),
                    Ability::RoostSeek(CardKind::Swamp),
                ],
                _ => &[],
            };
            out.extend(hand_abilities.iter().map(|&a| (a, Targets::new())));
        }
        Zone::Battlefield => match kind {
            CardKind::TinderWall => out.push((Ability::SacrificeForMana(ManaColor::Red), Targets::new())),
            CardKind::WallOfRoots => out.push((Ability::CounterForMana(ManaColor::Green), Targets::new())),
            CardKind::SaruliCaretaker => {
                for other in creature_positions(state).into_iter().filter(|&i| i != at.index) {
                    for color in [ManaColor::Green, ManaColor::Black] {
                        out.push((Ability::TapCreatureForMana(color), smallvec![other as u8]));
                    }
                }
            }
            CardKind::QuirionRanger => {
                let forests: Vec<usize> = state
                    .lands()
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| c.kind.is(CardTypes::FOREST))
                    .map(|(j, _)| j)
                    .collect();
                for creature in creature_positions(state) {
                    for &land in &forests {
                        out.push((Ability::UntapBouncingLand, smallvec![creature as u8, land as u8]));
                    }
                }
            }
            _ => {
                for &color in tap_colors(kind) {
                    out.push((Ability::TapForMana(color), Targets::new()));
                }
            }
        },
        _ => {}
    }
}

pub(super) fn is_available(state: &GameState, at: Located, kind: CardKind, ability: Ability, targets: &[u8]) -> bool {
    match at.zone {
        Zone::Hand => match ability {
            Ability::Cast => state.mana_pool.can_pay(&kind.cost()),
            Ability::Forestcycling(fetch) | Ability::Swampcycling(fetch) => {
                fetchable(kind, ability)
                    && state.zones.contains(Zone::Library, fetch)
                    && state.mana_pool.total() >= LANDCYCLING_COST
            }
            Ability::RoostSeek(fetch) => {
                fetchable(kind, ability)
                    && state.zones.contains(Zone::Library, fetch)
                    && state
                        .mana_pool
                        .can_pay(&ManaCost::free().with(ManaColor::Green, ROOST_SEEK_COST))
            }
            _ => false,
        },
        Zone::Battlefield => {
            let card = &state.battlefield()[at.index];
            let ready = !card.tapped && !card.summoning_sick;
            match (kind, ability) {
                (CardKind::TinderWall, Ability::SacrificeForMana(ManaColor::Red)) => true,
                (CardKind::WallOfRoots, Ability::CounterForMana(ManaColor::Green)) => !card.ability_used,
                (CardKind::SaruliCaretaker, Ability::TapCreatureForMana(color)) => {
                    let [other] = targets else {
                        return false;
                    };
                    ready
                        && matches!(color, ManaColor::Green | ManaColor::Black)
                        && *other as usize != at.index
                        && is_creature_at(state, Zone::Battlefield, *other)
                        && !state.battlefield()[*other as usize].tapped
                }
                (CardKind::ElvesOfDeepShadow, Ability::TapForMana(ManaColor::Black)) => ready && state.life > 1,
                (CardKind::QuirionRanger, Ability::UntapBouncingLand) => {
                    let [creature, land] = targets else {
                        return false;
                    };
                    !card.ability_used
                        && is_creature_at(state, Zone::Battlefield, *creature)
                        && state.battlefield()[*creature as usize].tapped
                        && state
                            .lands()
                            .get(*land as usize)
                            .is_some_and(|c| c.kind.is(CardTypes::FOREST))
                }
                (_, Ability::TapForMana(color)) => ready && tap_colors(kind).contains(&color),
                _ => false,
            }
        }
        _ => false,
    }
}

pub(super) fn resolve(state: &mut GameState, at: Located, kind: CardKind, ability: Ability, targets: &[u8]) {
    match ability {
        Ability::Cast => cast_permanent(state, at, kind),
        Ability::Forestcycling(fetch) | Ability::Swampcycling(fetch) => {
            state.pay(&ManaCost::generic(LANDCYCLING_COST));
            let id = state.hand()[at.index].id;
            state.discard(id);
            state.search_library_for(fetch);
            state.shuffle_library();
        }
        Ability::RoostSeek(fetch) => {
            state.pay(&ManaCost::free().with(ManaColor::Green, ROOST_SEEK_COST));
            let id = state.hand()[at.index].id;
            state.move_card(id, Zone::Library, ZonePosition::Bottom);
            state.search_library_for(fetch);
            state.shuffle_library();
        }
        Ability::SacrificeForMana(color) => {
            let id = state.battlefield()[at.index].id;
            state.sacrifice(id);
            state.add_mana(color, 2);
        }
        Ability::CounterForMana(color) => {
            let Some(wall) = state.zones.card_at_mut(at) else {
                return;
            };
            wall.counters += 1;
            wall.ability_used = true;
            let (id, dies) = (wall.id, wall.counters >= WALL_OF_ROOTS_TOUGHNESS);
            state.add_mana(color, 1);
            if dies {
                state.sacrifice(id);
            }
        }
        Ability::TapForMana(color) => {
            state.tap(at);
            let amount = match kind {
                CardKind::OvergrownBattlement => state
                    .zones
                    .count(Zone::Battlefield, |c| c.kind.is(CardTypes::DEFENDER)) as u32,
                CardKind::ElvesOfDeepShadow => {
                    state.life -= 1;
                    1
                }
                _ => 1,
            };
            state.add_mana(color, amount);
        }
        Ability::TapCreatureForMana(color) => {
            state.tap(at);
            state.tap(Located { zone: Zone::Battlefield, index: targets[0] as usize });
            state.add_mana(color, 1);
        }
        Ability::UntapBouncingLand => {
            if let Some(ranger) = state.zones.card_at_mut(at) {
                ranger.ability_used = true;
            }
            let creature = Located { zone: Zone::Battlefield, index: targets[0] as usize };
            if let Some(card) = state.zones.card_at_mut(creature) {
                card.tapped = false;
            }
            let land = state.lands()[targets[1] as usize].id;
            state.move_card(land, Zone::Hand, ZonePosition::Bottom);
        }
        other => panic!("{} has no ability {}", kind, other),
    }
}
