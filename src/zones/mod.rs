//! Zone system for card locations.
//!
//! ## Key Types
//!
//! - `Zone`: The six zones (library, hand, lands, battlefield, graveyard, exile)
//! - `Zones`: Card storage and movement
//! - `ZonePosition`: Top or bottom insertion
//! - `Located`: A zone plus an index, the address positional targets use

pub mod manager;

pub use manager::{Located, Zone, ZonePosition, Zones};
