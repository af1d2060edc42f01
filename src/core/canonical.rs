//! Canonical state key for deduplication.
//!
//! Two states with equal keys are interchangeable for the rest of the game,
//! so the solver explores only one of them. The key is a plain structure
//! compared field by field; it is never folded into a digest, so distinct
//! keys can never collide.
//!
//! ## What the key sees
//!
//! - Library: size and the multiset of land names (nonland order is unknown
//!   to the player anyway; land positions matter through
//!   `known_bottom_lands`)
//! - Hand, graveyard, exile: name multisets
//! - Lands and battlefield: multisets of functional status
//! - Mana pool, strategy, switch availability
//! - Turn, phase, both life totals, land-played flag
//!
//! Card identity never enters the key, and every multiset is sorted, so
//! reordering interchangeable cards leaves the key unchanged.
//!
//! Bookkeeping such as the history and the kept hand size stays out of the
//! key. When lines from two mulligan sizes meet, the one queued first
//! survives; opening states are queued largest hand first.

use serde::{Deserialize, Serialize};

use super::mana::{ManaPool, ManaStrategy};
use super::state::{GameState, TurnPhase};
use crate::cards::{CardKind, CardStatus};
use crate::zones::Zone;

/// Canonical, identity-free summary of a [`GameState`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateKey {
    library_size: u32,
    library_lands: Vec<CardKind>,
    hand: Vec<CardKind>,
    lands: Vec<CardStatus>,
    battlefield: Vec<CardStatus>,
    graveyard: Vec<CardKind>,
    exile: Vec<CardKind>,
    mana_pool: ManaPool,
    mana_strategy: ManaStrategy,
    mana_switch_allowed: bool,
    turn: u32,
    phase: TurnPhase,
    life: i32,
    opponent_life: i32,
    land_played: bool,
    known_bottom_lands: u32,
}

fn sorted_names(state: &GameState, zone: Zone) -> Vec<CardKind> {
    let mut names: Vec<CardKind> = state.zones[zone].iter().map(|c| c.kind).collect();
    names.sort_unstable();
    names
}

fn sorted_status(state: &GameState, zone: Zone) -> Vec<CardStatus> {
    let mut status: Vec<CardStatus> = state.zones[zone].iter().map(|c| c.status()).collect();
    status.sort_unstable();
    status
}

impl GameState {
    /// Compute the canonical key of this state.
    #[must_use]
    pub fn key(&self) -> StateKey {
        let mut library_lands: Vec<CardKind> = self
            .library()
            .iter()
            .map(|c| c.kind)
            .filter(|k| k.is_land())
            .collect();
        library_lands.sort_unstable();

        StateKey {
            library_size: self.library().len() as u32,
            library_lands,
            hand: sorted_names(self, Zone::Hand),
            lands: sorted_status(self, Zone::Lands),
            battlefield: sorted_status(self, Zone::Battlefield),
            graveyard: sorted_names(self, Zone::Graveyard),
            exile: sorted_names(self, Zone::Exile),
            mana_pool: self.mana_pool,
            mana_strategy: self.mana_strategy,
            mana_switch_allowed: self.mana_switch_allowed,
            turn: self.turn,
            phase: self.phase,
            life: self.life,
            opponent_life: self.opponent_life,
            land_played: self.land_played,
            known_bottom_lands: self.known_bottom_lands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::StateBuilder;

    #[test]
    fn test_identity_does_not_matter() {
        let a = StateBuilder::new()
            .hand([CardKind::Forest, CardKind::Swamp])
            .build();
        let b = StateBuilder::new()
            .hand([CardKind::Swamp, CardKind::Forest])
            .build();
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_turn_and_life_matter() {
        let base = StateBuilder::new().hand([CardKind::Forest]).build();
        let mut later = base.clone();
        later.turn += 1;
        let mut hurt = base.clone();
        hurt.opponent_life -= 1;
        assert_ne!(base.key(), later.key());
        assert_ne!(base.key(), hurt.key());
    }

    #[test]
    fn test_tapped_status_matters() {
        let base = StateBuilder::new().lands([CardKind::Forest]).build();
        let mut tapped = base.clone();
        tapped.zones[Zone::Lands][0].tapped = true;
        assert_ne!(base.key(), tapped.key());
    }

    #[test]
    fn test_library_nonland_order_ignored() {
        let a = StateBuilder::new()
            .library([CardKind::TinderWall, CardKind::Forest, CardKind::LandGrant])
            .build();
        let b = StateBuilder::new()
            .library([CardKind::LandGrant, CardKind::TinderWall, CardKind::Forest])
            .build();
        assert_eq!(a.key(), b.key());
    }
}
