//! Turn-indexed breadth-first search for a winning line.
//!
//! States wait in one FIFO queue per turn number and the lowest turn is
//! always served first, so every line is explored up to turn N before any
//! line reaches turn N + 1.
//!
//! Expanding a state:
//! 1. Apply forced moves in place until no heuristic fires
//! 2. Filter the remaining legal actions
//! 3. Clone the state once per action and queue every unseen child
//!
//! Card ids survive `clone()`, so the action list computed on the parent
//! applies unchanged to each child.

use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

use log::{debug, info, warn};
use rustc_hash::FxHashSet;

use crate::cards::CardKind;
use crate::core::{GameConfig, GameState, StateKey};
use crate::heuristics::{is_dead_state, HeuristicSet};
use crate::rules::{RulesEngine, SolitaireEngine};

use super::config::SolverConfig;
use super::mulligan::opening_states;
use super::stats::SearchStats;

/// Why a search stopped before running out of states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Truncation {
    /// The wall-clock budget elapsed.
    TimeBudget,
    /// Every line up to the turn limit was explored without a win.
    MaxTurn,
}

impl std::fmt::Display for Truncation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Truncation::TimeBudget => write!(f, "time budget exceeded"),
            Truncation::MaxTurn => write!(f, "turn limit reached"),
        }
    }
}

/// Result of a solve.
#[derive(Clone, Debug)]
pub enum SolveOutcome {
    /// A winning line; the state carries its full history.
    Won(Box<GameState>),
    /// The search stopped early at this state.
    Truncated { state: Box<GameState>, reason: Truncation },
    /// Every line loses or dead-ends.
    NoLine,
}

impl SolveOutcome {
    #[must_use]
    pub fn is_win(&self) -> bool {
        matches!(self, SolveOutcome::Won(_))
    }

    /// The winning state, if any.
    #[must_use]
    pub fn winning_state(&self) -> Option<&GameState> {
        match self {
            SolveOutcome::Won(state) => Some(state),
            _ => None,
        }
    }
}

/// What the forcing loop left behind.
enum Forced {
    /// No heuristic applies; branch from here.
    Settled,
    /// The turn advanced; queue the state again under its new turn.
    TurnAdvanced,
    Won,
    Dropped,
}

/// Main search context.
///
/// Generic over the rules engine type. Owns the configuration, the
/// heuristics and the statistics of the last solve.
pub struct Solver<E: RulesEngine = SolitaireEngine> {
    engine: E,
    config: SolverConfig,
    heuristics: HeuristicSet,
    stats: SearchStats,
}

impl Solver<SolitaireEngine> {
    /// Solver for the Spy deck with the standard heuristics.
    #[must_use]
    pub fn standard(config: SolverConfig) -> Self {
        Self::new(SolitaireEngine::new(), config)
    }
}

impl<E: RulesEngine> Solver<E> {
    /// Create a new solver with the standard heuristics.
    pub fn new(engine: E, config: SolverConfig) -> Self {
        Self {
            engine,
            config,
            heuristics: HeuristicSet::standard(),
            stats: SearchStats::default(),
        }
    }

    /// Replace the heuristic set.
    #[must_use]
    pub fn with_heuristics(mut self, heuristics: HeuristicSet) -> Self {
        self.heuristics = heuristics;
        self
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Statistics of the last solve.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Deal a game from `deck` with `seed` and solve it, mulligans included.
    pub fn solve_seed(&mut self, deck: &[CardKind], game: &GameConfig, seed: u64) -> SolveOutcome {
        match GameState::deal(deck, game, seed) {
            Ok(root) => self.solve(&root),
            Err(lost) => {
                warn!("seed {}: cannot deal an opening hand ({})", seed, lost);
                SolveOutcome::NoLine
            }
        }
    }

    /// Solve from a dealt opening hand, exploring every allowed mulligan.
    pub fn solve(&mut self, root: &GameState) -> SolveOutcome {
        let starts = opening_states(root, &self.config);
        self.solve_from(starts)
    }

    /// Solve from the given starting states as they are.
    pub fn solve_from(&mut self, starts: Vec<GameState>) -> SolveOutcome {
        let start = Instant::now();
        self.stats.reset();
        let outcome = self.run(starts, start);
        self.stats.time_us = start.elapsed().as_micros() as u64;
        debug!("search finished: {}", self.stats);
        outcome
    }

    fn run(&mut self, starts: Vec<GameState>, start: Instant) -> SolveOutcome {
        let mut queues: BTreeMap<u32, VecDeque<GameState>> = BTreeMap::new();
        let mut seen: FxHashSet<StateKey> = FxHashSet::default();

        for state in starts {
            self.stats.opening_states += 1;
            self.enqueue(&mut queues, &mut seen, state);
        }

        while let Some(mut state) = pop_lowest(&mut queues) {
            if self.config.time_budget.is_some_and(|budget| start.elapsed() >= budget) {
                warn!("search truncated at turn {}: {}", state.turn, Truncation::TimeBudget);
                return SolveOutcome::Truncated { state: Box::new(state), reason: Truncation::TimeBudget };
            }
            if state.turn > self.config.max_turn {
                info!("no win up to turn {}", self.config.max_turn);
                return SolveOutcome::Truncated { state: Box::new(state), reason: Truncation::MaxTurn };
            }
            if self.config.early_abort && is_dead_state(&state) {
                self.stats.dead_states_pruned += 1;
                continue;
            }
            self.stats.states_expanded += 1;

            match self.force(&mut state) {
                Forced::Won => return self.won(state),
                Forced::Dropped => continue,
                Forced::TurnAdvanced => {
                    self.enqueue(&mut queues, &mut seen, state);
                    continue;
                }
                Forced::Settled => {}
            }

            let actions = self.heuristics.filter(&state, self.engine.legal_actions(&state));
            for action in actions {
                let mut child = state.clone();
                self.stats.branches_created += 1;
                if self.engine.apply_action(&mut child, &action).is_err() {
                    self.stats.losses += 1;
                    continue;
                }
                if self.engine.is_won(&child) {
                    if self.accepts_win(&child) {
                        return self.won(child);
                    }
                    continue;
                }
                self.enqueue(&mut queues, &mut seen, child);
            }
        }
        SolveOutcome::NoLine
    }

    /// Apply forced moves in place.
    fn force(&mut self, state: &mut GameState) -> Forced {
        let turn = state.turn;
        loop {
            let actions = self.engine.legal_actions(state);
            let Some((name, action)) = self.heuristics.forced(state, &actions) else {
                return Forced::Settled;
            };
            debug!("turn {}: {} forces {}", state.turn, name, action);
            self.stats.forced_moves += 1;
            if self.engine.apply_action(state, &action).is_err() {
                self.stats.losses += 1;
                return Forced::Dropped;
            }
            if self.engine.is_won(state) {
                return if self.accepts_win(state) { Forced::Won } else { Forced::Dropped };
            }
            if state.turn != turn {
                return Forced::TurnAdvanced;
            }
        }
    }

    fn accepts_win(&self, state: &GameState) -> bool {
        self.config.allow_lucky_wins || state.unknown_lands_on_combo.unwrap_or(0) == 0
    }

    fn won(&self, state: GameState) -> SolveOutcome {
        info!(
            "won at turn {} (kept {:?}, {} cards left in library)",
            state.turn,
            state.kept_at,
            state.library().len()
        );
        SolveOutcome::Won(Box::new(state))
    }

    fn enqueue(
        &mut self,
        queues: &mut BTreeMap<u32, VecDeque<GameState>>,
        seen: &mut FxHashSet<StateKey>,
        state: GameState,
    ) {
        if self.config.deduplicate && !seen.insert(state.key()) {
            self.stats.duplicates_pruned += 1;
            return;
        }
        queues.entry(state.turn).or_default().push_back(state);
    }
}

/// Pop the head of the lowest non-empty turn queue.
fn pop_lowest(queues: &mut BTreeMap<u32, VecDeque<GameState>>) -> Option<GameState> {
    loop {
        let mut entry = queues.first_entry()?;
        match entry.get_mut().pop_front() {
            Some(state) => {
                if entry.get().is_empty() {
                    entry.remove();
                }
                return Some(state);
            }
            None => {
                entry.remove();
            }
        }
    }
}
