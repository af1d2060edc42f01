//! Parallel simulation runner.
//!
//! Solves many seeds of one deck on a rayon thread pool. Seeds are
//! `base_seed + i` for run `i`, so a batch is reproducible and an
//! interrupted batch resumes by skipping the seeds already stored.
//!
//! ## Threads
//!
//! Pending seeds are solved one checkpoint-sized chunk at a time; each
//! chunk is collected in seed order and appended to the store by the
//! calling thread, which is the only one touching the results store.

use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::store::{ResultStore, StoreError};
use super::summary::SimulationSummary;
use crate::cards::{CardKind, Deck};
use crate::core::GameConfig;
use crate::solver::{Solver, SolverConfig};

/// Errors from running a simulation batch.
#[derive(Debug)]
pub enum SimulationError {
    Store(StoreError),
    ThreadPool(rayon::ThreadPoolBuildError),
}

impl std::fmt::Display for SimulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SimulationError::Store(e) => write!(f, "{e}"),
            SimulationError::ThreadPool(e) => write!(f, "could not start worker threads: {e}"),
        }
    }
}

impl std::error::Error for SimulationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimulationError::Store(e) => Some(e),
            SimulationError::ThreadPool(e) => Some(e),
        }
    }
}

impl From<StoreError> for SimulationError {
    fn from(e: StoreError) -> Self {
        SimulationError::Store(e)
    }
}

impl From<rayon::ThreadPoolBuildError> for SimulationError {
    fn from(e: rayon::ThreadPoolBuildError) -> Self {
        SimulationError::ThreadPool(e)
    }
}

/// Simulation batch configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of seeds to solve.
    pub runs: usize,

    /// Size of the rayon pool (at least 1).
    pub workers: usize,

    /// Seed of run 0.
    pub base_seed: u64,

    /// Seeds solved per chunk; each finished chunk is appended to the store.
    pub checkpoint_every: usize,

    /// Directory for the results store and the deck list.
    pub results_dir: PathBuf,

    /// Continue from an existing store instead of starting over.
    pub resume: bool,

    pub game: GameConfig,
    pub solver: SolverConfig,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            runs: 1000,
            workers: std::thread::available_parallelism().map_or(1, |n| n.get()),
            base_seed: 42,
            checkpoint_every: 100,
            results_dir: PathBuf::from("results"),
            resume: true,
            game: GameConfig::default(),
            solver: SolverConfig::default(),
        }
    }
}

impl SimulationConfig {
    #[must_use]
    pub fn with_runs(mut self, runs: usize) -> Self {
        self.runs = runs;
        self
    }

    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    #[must_use]
    pub fn with_base_seed(mut self, seed: u64) -> Self {
        self.base_seed = seed;
        self
    }

    #[must_use]
    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    #[must_use]
    pub fn with_resume(mut self, resume: bool) -> Self {
        self.resume = resume;
        self
    }
}

/// Runs a simulation batch for one deck.
pub struct Simulator {
    deck: Deck,
    config: SimulationConfig,
}

impl Simulator {
    #[must_use]
    pub fn new(deck: Deck, config: SimulationConfig) -> Self {
        Self { deck, config }
    }

    #[must_use]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Batch name: the deck fingerprint plus the settings that change results.
    #[must_use]
    pub fn run_name(&self) -> String {
        let mut name = self.deck.fingerprint();
        if !self.config.solver.allow_lucky_wins {
            name.push_str("_no_lw");
        }
        if let Some(size) = self.config.solver.only_hand_size {
            name.push_str(&format!("_hs{size}"));
        }
        name
    }

    /// Store holding this batch's summaries.
    #[must_use]
    pub fn store(&self) -> ResultStore {
        ResultStore::new(self.config.results_dir.join(format!("{}.bin", self.run_name())))
    }

    /// Solve a single seed.
    #[must_use]
    pub fn run_one(deck: &[CardKind], game: &GameConfig, solver: &SolverConfig, seed: u64) -> SimulationSummary {
        let start = Instant::now();
        let mut solver = Solver::standard(solver.clone());
        let outcome = solver.solve_seed(deck, game, seed);
        let summary = SimulationSummary::from_outcome(seed, &outcome, start.elapsed());
        debug!("seed {}: {:?} ({})", seed, summary.outcome, solver.stats());
        summary
    }

    /// Run the batch and return every summary, stored ones included.
    pub fn run(&self) -> Result<Vec<SimulationSummary>, SimulationError> {
        let store = self.store();
        if !self.config.resume {
            store.clear()?;
        }
        let mut summaries = store.load()?;
        if !summaries.is_empty() {
            info!("loaded {} past simulations from {}", summaries.len(), store.path().display());
        }
        self.write_deck_list()?;

        let diff = self.deck.diff(&Deck::stock());
        if !diff.is_empty() {
            let changes: Vec<String> = diff.iter().map(|(k, n)| format!("{n:+} {k}")).collect();
            info!("deck changes from stock: {}", changes.join(", "));
        }

        let done: HashSet<u64> = summaries.iter().map(|s| s.seed).collect();
        let pending: Vec<u64> = (0..self.config.runs as u64)
            .map(|i| self.config.base_seed.wrapping_add(i))
            .filter(|seed| !done.contains(seed))
            .collect();
        if pending.is_empty() {
            return Ok(summaries);
        }

        let start = Instant::now();
        let workers = self.config.workers.clamp(1, pending.len());
        info!("simulating {} games on {} workers", pending.len(), workers);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;

        let cards = self.deck.cards();
        let (game, solver) = (&self.config.game, &self.config.solver);
        for chunk in pending.chunks(self.config.checkpoint_every.max(1)) {
            let mut solved: Vec<SimulationSummary> = pool.install(|| {
                chunk
                    .par_iter()
                    .map(|&seed| Self::run_one(&cards, game, solver, seed))
                    .collect()
            });
            store.append(&solved)?;
            summaries.append(&mut solved);
            info!("simulations completed: {}", summaries.len());
        }

        info!("overall simulation time: {:.2} s", start.elapsed().as_secs_f64());
        Ok(summaries)
    }

    fn write_deck_list(&self) -> Result<(), StoreError> {
        let path = self
            .config
            .results_dir
            .join(format!("{}_deck.txt", self.deck.fingerprint()));
        if !path.exists() {
            std::fs::create_dir_all(&self.config.results_dir)?;
            std::fs::write(&path, self.deck.to_string())?;
        }
        Ok(())
    }
}
