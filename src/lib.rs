//! # spy-solitaire
//!
//! A goldfish solver for the Balustrade Spy combo deck: given a shuffled
//! deck, find the earliest turn on which the deck can kill an opponent who
//! does nothing, and estimate that distribution over many shuffles.
//!
//! ## Design Principles
//!
//! 1. **Universes, Not Trees**: Every branch point clones the whole state.
//!    The search keeps a queue of independent universes per turn and never
//!    builds a tree.
//!
//! 2. **Turn-Ordered Search**: Universes are expanded lowest turn first, so
//!    the first win found is a win on the earliest possible turn.
//!
//! 3. **Heuristics Are Pluggable**: Forcing heuristics and branch filters
//!    are trait objects in a `HeuristicSet`; turning them off gives an
//!    exhaustive search to check them against.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: O(1) cloning via `im-rs` for branching.
//!
//! - **Exact Deduplication**: A `StateKey` captures everything that can
//!   change the outcome (not card instance ids, not library order), so
//!   equivalent universes reached by different paths are expanded once.
//!
//! - **Deterministic Runs**: Every shuffle draws from a seeded ChaCha RNG;
//!   the same seed and configuration always reproduce the same line.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, state, actions, mana, RNG, configuration
//! - `zones`: Library, hand, lands, battlefield, graveyard, exile
//! - `cards`: Card kinds, instances, rules text, deck lists
//! - `rules`: RulesEngine trait and the solitaire rules
//! - `heuristics`: Forcing heuristics and branch filters
//! - `solver`: Mulligans and the turn-ordered search
//! - `sim`: Batches of seeds, persisted results, statistics

pub mod core;
pub mod zones;
pub mod cards;
pub mod rules;
pub mod heuristics;
pub mod solver;
pub mod sim;

// Re-export commonly used types
pub use crate::core::{
    EntityId, GameRng, GameConfig,
    Ability, Action, LoggedStep,
    GameLost, GameState, StateBuilder, StateKey,
    ManaColor, ManaCost, ManaPool, ManaStrategy,
};

pub use crate::zones::{Zone, ZonePosition, Zones};

pub use crate::cards::{Card, CardKind, Deck, DeckError};

pub use crate::rules::{RulesEngine, SolitaireEngine};

pub use crate::heuristics::{BranchFilter, ForcingHeuristic, HeuristicSet};

pub use crate::solver::{SearchStats, SolveOutcome, Solver, SolverConfig, Truncation};

pub use crate::sim::{
    ResultStore, SimulationConfig, SimulationError, SimulationReport, SimulationSummary, Simulator,
};
