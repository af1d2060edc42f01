//! Card system: definitions, instances, rules text, deck lists.
//!
//! ## Key Types
//!
//! - `CardKind`: The supported cards and their static data
//! - `CardTypes`: Type tag set (a land can be both Forest and Swamp)
//! - `Card`: Runtime card state (tapped, counters, summoning sickness)
//! - `catalog`: What each card can do, and when
//! - `Deck`: Deck lists and their text format

pub mod catalog;
pub mod deck;
pub mod definition;
pub mod instance;

pub use deck::{Deck, DeckError};
pub use definition::{CardKind, CardTypes};
pub use instance::{Card, CardStatus};
