//! Solver: breadth-first search for a winning line from a dealt hand.
//!
//! ## Key Types
//!
//! - `Solver`: Search context (engine, heuristics, config, stats)
//! - `SolveOutcome`: Won / truncated / no line
//! - `SolverConfig`: Turn limit, time budget, dedup and mulligan settings
//! - `SearchStats`: Counters of the last solve
//!
//! ## Usage
//!
//! ```no_run
//! use spy_solitaire::cards::Deck;
//! use spy_solitaire::core::GameConfig;
//! use spy_solitaire::solver::{Solver, SolverConfig};
//!
//! let deck = Deck::stock().cards();
//! let mut solver = Solver::standard(SolverConfig::default());
//! let outcome = solver.solve_seed(&deck, &GameConfig::default(), 42);
//! println!("won: {} ({})", outcome.is_win(), solver.stats());
//! ```

pub mod config;
pub mod mulligan;
pub mod search;
pub mod stats;

pub use config::SolverConfig;
pub use mulligan::{cut_hand, opening_states};
pub use search::{SolveOutcome, Solver, Truncation};
pub use stats::SearchStats;
