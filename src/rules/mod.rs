//! Rules: the turn machine and the transition primitives.
//!
//! The solver calls into [`RulesEngine`] and never interprets card text
//! directly; [`transitions`] holds the primitive state mutations every
//! card effect is built from.

pub mod engine;
pub mod transitions;

pub use engine::{RulesEngine, SolitaireEngine};
