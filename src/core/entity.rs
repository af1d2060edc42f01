//! Card instance identification.
//!
//! Every physical card in a game has a unique `EntityId`. Two copies of the
//! same card name are distinct entities; identity never comes from the name.
//!
//! ```
//! use spy_solitaire::core::EntityId;
//!
//! let mut next = EntityId::FIRST;
//! let a = next.allocate();
//! let b = next.allocate();
//! assert_ne!(a, b);
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
///
/// Ids survive state cloning, so an action computed against a parent state
/// addresses the same card in every child branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// The first id handed out for a new game.
    pub const FIRST: Self = Self(0);

    /// Return the current id and advance to the next one.
    pub fn allocate(&mut self) -> Self {
        let id = *self;
        self.0 += 1;
        id
    }

    /// Get the raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}
