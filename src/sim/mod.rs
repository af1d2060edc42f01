//! Simulation harness: many seeds, persisted results, aggregate statistics.
//!
//! ## Key Types
//!
//! - `Simulator`: Runs a batch on a rayon pool, resuming from the store
//! - `SimulationSummary`: One record per seed
//! - `ResultStore`: Append-only `bincode` file of summaries
//! - `SimulationReport`: Wins by turn, mulligans, lucky vs scientific wins

pub mod report;
pub mod runner;
pub mod store;
pub mod summary;

pub use report::{win_probability_by_turn, SimulationReport};
pub use runner::{SimulationConfig, SimulationError, Simulator};
pub use store::{ResultStore, StoreError};
pub use summary::{RunOutcome, SimulationSummary};
