//! Game configuration.
//!
//! Everything about a single goldfish game that is not the deck itself:
//! life totals and hand sizes. Search-level settings live in
//! [`crate::solver::SolverConfig`].

use serde::{Deserialize, Serialize};

/// Game configuration parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Our starting life total.
    pub starting_life: i32,

    /// The inert opponent's starting life total.
    pub opponent_life: i32,

    /// Cards drawn for the opening hand (and for every mulligan redraw).
    pub opening_hand_size: usize,

    /// Hand size we discard down to when passing the turn.
    pub max_hand_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_life: 20,
            opponent_life: 20,
            opening_hand_size: 7,
            max_hand_size: 7,
        }
    }
}

impl GameConfig {
    /// Create a new config with a custom opponent life total.
    #[must_use]
    pub fn with_opponent_life(mut self, life: i32) -> Self {
        self.opponent_life = life;
        self
    }

    /// Create a new config with a custom starting life total.
    #[must_use]
    pub fn with_starting_life(mut self, life: i32) -> Self {
        self.starting_life = life;
        self
    }

    /// Create a new config with a custom maximum hand size.
    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.starting_life, 20);
        assert_eq!(config.opponent_life, 20);
        assert_eq!(config.opening_hand_size, 7);
        assert_eq!(config.max_hand_size, 7);
    }

    #[test]
    fn test_builder_pattern() {
        let config = GameConfig::default()
            .with_opponent_life(2)
            .with_max_hand_size(8);
        assert_eq!(config.opponent_life, 2);
        assert_eq!(config.max_hand_size, 8);
    }

    #[test]
    fn test_serialization() {
        let config = GameConfig::default().with_starting_life(7);
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
