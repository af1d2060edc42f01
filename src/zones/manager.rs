//! Zone containers for card locations and movement.
//!
//! `Zones` owns every card of a game, split over six ordered zones. The
//! library is ordered top-first (index 0 is the next draw); the other zones
//! keep insertion order, which the rules never depend on but which makes
//! positional targets stable between a state and its clones.
//!
//! Zones are persistent vectors, so cloning a whole game is O(1) and
//! clones share structure until one of them writes.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardKind};
use crate::core::entity::EntityId;
use crate::core::rng::GameRng;

/// The six zones of a solitaire game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    Library,
    Hand,
    /// Lands in play.
    Lands,
    /// Nonland permanents in play.
    Battlefield,
    Graveyard,
    Exile,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Library,
        Zone::Hand,
        Zone::Lands,
        Zone::Battlefield,
        Zone::Graveyard,
        Zone::Exile,
    ];

    const fn index(self) -> usize {
        match self {
            Zone::Library => 0,
            Zone::Hand => 1,
            Zone::Lands => 2,
            Zone::Battlefield => 3,
            Zone::Graveyard => 4,
            Zone::Exile => 5,
        }
    }

    /// Lands and battlefield.
    #[must_use]
    pub const fn in_play(self) -> bool {
        matches!(self, Zone::Lands | Zone::Battlefield)
    }
}

/// Position for inserting a card into a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZonePosition {
    /// Front of the zone (top of library).
    Top,
    /// Back of the zone (bottom of library).
    Bottom,
}

/// A card's current location.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Located {
    pub zone: Zone,
    pub index: usize,
}

/// All cards of a game, by zone.
///
/// ## Usage
///
/// ```
/// use spy_solitaire::zones::{Zones, Zone, ZonePosition};
/// use spy_solitaire::cards::{Card, CardKind};
/// use spy_solitaire::core::EntityId;
///
/// let mut zones = Zones::new();
/// zones.insert(Zone::Library, Card::new(EntityId(0), CardKind::Forest), ZonePosition::Bottom);
/// zones.insert(Zone::Library, Card::new(EntityId(1), CardKind::Swamp), ZonePosition::Top);
///
/// assert_eq!(zones[Zone::Library][0].kind, CardKind::Swamp);
/// let from = zones.move_card(EntityId(0), Zone::Hand, ZonePosition::Bottom);
/// assert_eq!(from, Zone::Library);
/// assert_eq!(zones.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Zones {
    zones: [Vector<Card>; 6],
}

impl Zones {
    /// Create empty zones.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of cards across all zones.
    #[must_use]
    pub fn len(&self) -> usize {
        self.zones.iter().map(Vector::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a card by id.
    #[must_use]
    pub fn locate(&self, id: EntityId) -> Option<Located> {
        Zone::ALL.into_iter().find_map(|zone| {
            self[zone]
                .iter()
                .position(|c| c.id == id)
                .map(|index| Located { zone, index })
        })
    }

    /// Get the card at a location.
    #[must_use]
    pub fn card_at(&self, at: Located) -> Option<&Card> {
        self[at.zone].get(at.index)
    }

    /// Mutable access to the card at a location.
    pub fn card_at_mut(&mut self, at: Located) -> Option<&mut Card> {
        self[at.zone].get_mut(at.index)
    }

    /// Add a card to a zone.
    pub fn insert(&mut self, zone: Zone, card: Card, position: ZonePosition) {
        match position {
            ZonePosition::Top => self[zone].push_front(card),
            ZonePosition::Bottom => self[zone].push_back(card),
        }
    }

    /// Remove the card at a location.
    ///
    /// Panics if the location is out of range.
    pub fn remove(&mut self, at: Located) -> Card {
        let len = self[at.zone].len();
        if at.index >= len {
            panic!("No card at {:?}[{}] (zone holds {})", at.zone, at.index, len);
        }
        self[at.zone].remove(at.index)
    }

    /// Move a card to another zone, returning the zone it left.
    ///
    /// Cards leaving play lose their battlefield status. Panics if the
    /// card is not in any zone.
    pub fn move_card(&mut self, id: EntityId, to: Zone, position: ZonePosition) -> Zone {
        let Some(at) = self.locate(id) else {
            panic!("Entity {} is not in any zone", id);
        };
        let mut card = self.remove(at);
        if at.zone.in_play() && !to.in_play() {
            card.reset();
        }
        self.insert(to, card, position);
        at.zone
    }

    /// Position of the first card of `kind` in a zone.
    #[must_use]
    pub fn find(&self, zone: Zone, kind: CardKind) -> Option<usize> {
        self[zone].iter().position(|c| c.kind == kind)
    }

    /// Number of cards in a zone matching a predicate.
    #[must_use]
    pub fn count(&self, zone: Zone, pred: impl Fn(&Card) -> bool) -> usize {
        self[zone].iter().filter(|c| pred(c)).count()
    }

    /// Check whether a zone holds a card of `kind`.
    #[must_use]
    pub fn contains(&self, zone: Zone, kind: CardKind) -> bool {
        self.find(zone, kind).is_some()
    }

    /// Shuffle the library in place.
    pub fn shuffle_library(&mut self, rng: &mut GameRng) {
        let mut cards: Vec<Card> = self[Zone::Library].iter().cloned().collect();
        rng.shuffle(&mut cards);
        self[Zone::Library] = cards.into_iter().collect();
    }
}

impl std::ops::Index<Zone> for Zones {
    type Output = Vector<Card>;

    fn index(&self, zone: Zone) -> &Vector<Card> {
        &self.zones[zone.index()]
    }
}

impl std::ops::IndexMut<Zone> for Zones {
    fn index_mut(&mut self, zone: Zone) -> &mut Vector<Card> {
        &mut self.zones[zone.index()]
    }
}
