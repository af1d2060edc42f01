//! Card instances - runtime card state.
//!
//! `Card` represents one physical card during a game. Its zone is not
//! stored on the card; the zone containers own the cards.

use serde::{Deserialize, Serialize};

use super::definition::CardKind;
use crate::core::entity::EntityId;

/// A card instance in a game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique entity ID for this instance.
    pub id: EntityId,

    /// Which card this is.
    pub kind: CardKind,

    pub tapped: bool,

    /// Entered the battlefield this turn.
    pub summoning_sick: bool,

    /// A once-per-turn ability was already used this turn.
    pub ability_used: bool,

    /// -0/-1 counters (Wall of Roots).
    pub counters: u8,
}

/// The parts of a card that matter to the rules, without its identity.
///
/// Two permanents with equal status are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CardStatus {
    pub kind: CardKind,
    pub tapped: bool,
    pub summoning_sick: bool,
    pub ability_used: bool,
    pub counters: u8,
}

impl Card {
    /// Create a fresh, untapped card.
    #[must_use]
    pub fn new(id: EntityId, kind: CardKind) -> Self {
        Self {
            id,
            kind,
            tapped: false,
            summoning_sick: false,
            ability_used: false,
            counters: 0,
        }
    }

    /// Functional status used for deduplication.
    #[must_use]
    pub fn status(&self) -> CardStatus {
        CardStatus {
            kind: self.kind,
            tapped: self.tapped,
            summoning_sick: self.summoning_sick,
            ability_used: self.ability_used,
            counters: self.counters,
        }
    }

    /// Forget everything that happened to the card on the battlefield.
    ///
    /// Called whenever the card leaves play.
    pub fn reset(&mut self) {
        self.tapped = false;
        self.summoning_sick = false;
        self.ability_used = false;
        self.counters = 0;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.tapped {
            write!(f, " (T)")?;
        }
        if self.summoning_sick {
            write!(f, " (S)")?;
        }
        if self.counters > 0 {
            write!(f, " [{}]", self.counters)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ignores_identity() {
        let a = Card::new(EntityId(1), CardKind::Forest);
        let b = Card::new(EntityId(2), CardKind::Forest);
        assert_ne!(a, b);
        assert_eq!(a.status(), b.status());
    }

    #[test]
    fn test_reset() {
        let mut card = Card::new(EntityId(1), CardKind::WallOfRoots);
        card.tapped = true;
        card.counters = 3;
        card.ability_used = true;
        card.reset();
        assert_eq!(card.status(), Card::new(EntityId(9), CardKind::WallOfRoots).status());
    }

    #[test]
    fn test_display() {
        let mut card = Card::new(EntityId(1), CardKind::Swamp);
        card.tapped = true;
        assert_eq!(card.to_string(), "Swamp (T)");
    }
}
