//! Transition primitives.
//!
//! The only ways card effects and the turn machine touch a [`GameState`].
//! Zone moves keep the library knowledge (`known_bottom_lands`) and the
//! interaction counter consistent; mana payment enforces the pool invariant
//! by panicking on an overdraw, which is always a caller bug because every
//! effect checks affordability in its availability predicate first.

use crate::cards::CardKind;
use crate::core::entity::EntityId;
use crate::core::mana::{ManaColor, ManaCost};
use crate::core::state::{GameLost, GameState};
use crate::zones::{Located, Zone, ZonePosition};

impl GameState {
    /// Move a card between zones, returning the zone it left.
    ///
    /// Panics if the card is not in any zone.
    pub fn move_card(&mut self, id: EntityId, to: Zone, position: ZonePosition) -> Zone {
        let from = self.zones.move_card(id, to, position);
        let kind = match self.zones.locate(id).and_then(|at| self.zones.card_at(at)) {
            Some(card) => card.kind,
            None => return from,
        };
        if kind.is_interaction() {
            if from == Zone::Library && to == Zone::Hand {
                self.interaction_count += 1;
            } else if from == Zone::Hand && to == Zone::Library {
                self.interaction_count = self.interaction_count.saturating_sub(1);
            }
        }
        if from == Zone::Library {
            self.clamp_known_bottom();
        }
        from
    }

    /// Known bottom lands are the last cards of the library; once the
    /// library is shorter than that run, everything left is known.
    fn clamp_known_bottom(&mut self) {
        let len = self.library().len() as u32;
        if self.known_bottom_lands > len {
            self.known_bottom_lands = len;
        }
    }

    /// Draw `count` cards from the top of the library.
    ///
    /// Drawing from an empty library loses the game.
    pub fn draw(&mut self, count: usize) -> Result<(), GameLost> {
        for _ in 0..count {
            let Some(top) = self.library().front().map(|c| c.id) else {
                return Err(GameLost::DrewFromEmptyLibrary);
            };
            self.move_card(top, Zone::Hand, ZonePosition::Bottom);
        }
        Ok(())
    }

    /// Put the top card of the library into the graveyard.
    ///
    /// Returns the milled card, or `None` if the library is empty.
    pub fn mill_top(&mut self) -> Option<CardKind> {
        let top = self.library().front().map(|c| (c.id, c.kind))?;
        self.move_card(top.0, Zone::Graveyard, ZonePosition::Bottom);
        Some(top.1)
    }

    /// Put a card on the bottom of the library.
    ///
    /// A land placed there is a known bottom land until the next shuffle.
    pub fn put_on_bottom(&mut self, id: EntityId) {
        self.move_card(id, Zone::Library, ZonePosition::Bottom);
        let is_land = self.library().back().is_some_and(|c| c.kind.is_land());
        if is_land {
            self.known_bottom_lands += 1;
        } else {
            // A nonland below the known run breaks it.
            self.known_bottom_lands = 0;
        }
    }

    /// Move the first library card of `kind` into the hand.
    ///
    /// Returns whether one was found.
    pub fn search_library_for(&mut self, kind: CardKind) -> bool {
        match self.zones.find(Zone::Library, kind) {
            Some(index) => {
                let id = self.library()[index].id;
                self.move_card(id, Zone::Hand, ZonePosition::Bottom);
                true
            }
            None => false,
        }
    }

    /// Shuffle the library. Everything known about its order is lost.
    pub fn shuffle_library(&mut self) {
        self.zones.shuffle_library(&mut self.rng);
        self.known_bottom_lands = 0;
    }

    /// Add mana to the pool.
    pub fn add_mana(&mut self, color: ManaColor, amount: u32) {
        self.mana_pool.add(color, amount);
    }

    /// Pay a cost using the active strategy.
    ///
    /// Panics if the pool cannot cover it.
    pub fn pay(&mut self, cost: &ManaCost) {
        if let Err(e) = self.mana_pool.pay(cost, self.mana_strategy) {
            panic!("Mana contract violated: {e}");
        }
        self.mana_switch_allowed = true;
    }

    /// Tap the permanent at `at`.
    pub fn tap(&mut self, at: Located) {
        match self.zones.card_at_mut(at) {
            Some(card) => card.tapped = true,
            None => panic!("No permanent to tap at {:?}", at),
        }
    }

    /// Put a permanent into the graveyard.
    pub fn sacrifice(&mut self, id: EntityId) {
        self.move_card(id, Zone::Graveyard, ZonePosition::Bottom);
    }

    /// Put a card from hand into the graveyard.
    pub fn discard(&mut self, id: EntityId) {
        self.move_card(id, Zone::Graveyard, ZonePosition::Bottom);
    }

    /// The card we would discard first: dead cards by priority, then the
    /// first card not worth keeping, then the first card.
    #[must_use]
    pub fn worst_card_in_hand(&self) -> Option<EntityId> {
        let hand = self.hand();
        let dead = hand
            .iter()
            .filter_map(|c| c.kind.dead_priority().map(|p| (p, c.id)))
            .min_by_key(|&(p, _)| p)
            .map(|(_, id)| id);
        dead.or_else(|| hand.iter().find(|c| !c.kind.keep_on_discard()).map(|c| c.id))
            .or_else(|| hand.front().map(|c| c.id))
    }
}
