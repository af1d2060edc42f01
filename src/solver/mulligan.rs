//! Mulligan enumeration: every kept hand the search starts from.
//!
//! ## Procedure
//!
//! For each target hand size (7 down to the configured minimum):
//! - 7 keeps the opening hand as dealt
//! - smaller sizes put the hand back, reshuffle with a forked RNG, draw 7
//!   again and put cards on the bottom until the target size is reached
//!
//! Dead cards go to the bottom first, by priority. When there are not
//! enough of them the choice of the remaining cards is not obvious, so
//! every combination of the needed size becomes its own starting state.

use log::debug;

use super::config::SolverConfig;
use crate::cards::CardKind;
use crate::core::combinatorics::combinations;
use crate::core::{EntityId, GameState};
use crate::heuristics::is_keepable;
use crate::zones::{Zone, ZonePosition};

/// Starting states for every kept hand size the config allows.
///
/// `root` holds the dealt opening hand. States whose redraw runs out of
/// library are left out.
#[must_use]
pub fn opening_states(root: &GameState, config: &SolverConfig) -> Vec<GameState> {
    let opening = root.hand().len();
    let mut forker = root.rng.clone();
    let mut states = Vec::new();

    for target in config.hand_sizes(opening) {
        if target >= opening {
            let mut kept = root.clone();
            kept.snapshot_initial_hand(opening);
            states.push(kept);
            continue;
        }

        let mut state = root.clone();
        state.rng = forker.fork();
        let hand: Vec<EntityId> = state.hand().iter().map(|c| c.id).collect();
        for id in hand {
            state.move_card(id, Zone::Library, ZonePosition::Bottom);
        }
        state.shuffle_library();
        if state.draw(opening).is_err() {
            debug!("mulligan to {} ran out of library", target);
            continue;
        }
        states.extend(cut_hand(state, target));
    }

    if config.keep_filter {
        states.retain(|s| {
            let hand: Vec<CardKind> = s.hand().iter().map(|c| c.kind).collect();
            is_keepable(&hand)
        });
    }
    states
}

/// Put cards from the current hand on the bottom until `target` remain.
///
/// Returns one state per way of choosing the cards that are not dead.
#[must_use]
pub fn cut_hand(mut state: GameState, target: usize) -> Vec<GameState> {
    let mut missing = state.hand().len().saturating_sub(target);

    for kind in CardKind::DEAD_CARD_PRIORITY {
        while missing > 0 {
            let Some(index) = state.zones.find(Zone::Hand, kind) else {
                break;
            };
            let id = state.hand()[index].id;
            bottom(&mut state, id);
            missing -= 1;
        }
    }

    if missing == 0 {
        state.snapshot_initial_hand(target);
        return vec![state];
    }

    let hand: Vec<EntityId> = state.hand().iter().map(|c| c.id).collect();
    combinations(&hand, missing)
        .into_iter()
        .map(|chosen| {
            let mut branch = state.clone();
            // Nonlands first so the bottomed lands form the known run.
            let (lands, nonlands): (Vec<EntityId>, Vec<EntityId>) = chosen.into_iter().partition(|&id| {
                branch
                    .zones
                    .locate(id)
                    .and_then(|at| branch.zones.card_at(at))
                    .is_some_and(|c| c.kind.is_land())
            });
            for id in nonlands.into_iter().chain(lands) {
                bottom(&mut branch, id);
            }
            branch.snapshot_initial_hand(target);
            branch
        })
        .collect()
}

fn bottom(state: &mut GameState, id: EntityId) {
    if let Some(kind) = state.zones.locate(id).and_then(|at| state.zones.card_at(at)).map(|c| c.kind) {
        state.mulligan_bottom.push_back(kind);
    }
    state.put_on_bottom(id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Deck;
    use crate::core::{GameConfig, StateBuilder};

    #[test]
    fn test_three_dead_cards_no_branching() {
        let state = StateBuilder::new()
            .library([CardKind::Forest; 10])
            .hand([
                CardKind::Swamp,
                CardKind::LotlethGiant,
                CardKind::TinderWall,
                CardKind::MaskedVandal,
                CardKind::DreadReturn,
                CardKind::BalustradeSpy,
                CardKind::LandGrant,
            ])
            .build();
        let cut = cut_hand(state, 4);
        assert_eq!(cut.len(), 1);
        let kept: Vec<CardKind> = cut[0].hand().iter().map(|c| c.kind).collect();
        assert_eq!(
            kept,
            vec![CardKind::Swamp, CardKind::TinderWall, CardKind::BalustradeSpy, CardKind::LandGrant]
        );
        assert_eq!(
            cut[0].mulligan_bottom.iter().copied().collect::<Vec<_>>(),
            vec![CardKind::LotlethGiant, CardKind::DreadReturn, CardKind::MaskedVandal]
        );
        assert_eq!(cut[0].kept_at, Some(4));
    }

    #[test]
    fn test_bottomed_land_is_known() {
        let state = StateBuilder::new()
            .library([CardKind::TinderWall; 5])
            .hand([CardKind::Forest, CardKind::Swamp])
            .build();
        let cut = cut_hand(state, 1);
        assert_eq!(cut.len(), 2);
        for branch in &cut {
            assert_eq!(branch.known_bottom_lands, 1);
            assert_eq!(branch.library().len(), 6);
        }
    }

    #[test]
    fn test_opening_states_cover_every_size() {
        let deck = Deck::stock().cards();
        let root = GameState::deal(&deck, &GameConfig::default(), 7).unwrap();
        let states = opening_states(&root, &SolverConfig::default());
        let mut sizes: Vec<usize> = states.iter().filter_map(|s| s.kept_at).collect();
        sizes.dedup();
        assert_eq!(sizes, vec![7, 6, 5, 4, 3]);
        for state in &states {
            assert_eq!(Some(state.hand().len()), state.kept_at);
            assert_eq!(state.zones.len(), 60);
        }
    }

    #[test]
    fn test_only_hand_size() {
        let deck = Deck::stock().cards();
        let root = GameState::deal(&deck, &GameConfig::default(), 11).unwrap();
        let states = opening_states(&root, &SolverConfig::default().with_hand_size(7));
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].hand().len(), 7);
    }
}
