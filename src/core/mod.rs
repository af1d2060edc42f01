//! Core types: entities, state, actions, mana, RNG, configuration.
//!
//! This module contains the data the rules operate on. The rules
//! themselves live in [`crate::rules`].

pub mod entity;
pub mod rng;
pub mod config;
pub mod mana;
pub mod action;
pub mod state;
pub mod canonical;
pub mod combinatorics;

pub use entity::EntityId;
pub use rng::GameRng;
pub use config::GameConfig;
pub use mana::{InsufficientMana, ManaColor, ManaCost, ManaPool, ManaStrategy};
pub use action::{Ability, Action, ActionParseError, LoggedStep, SystemAction, Targets};
pub use state::{GameLost, GameState, StateBuilder, TurnPhase};
pub use canonical::StateKey;
