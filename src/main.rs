//! Goldfish solver CLI for the Balustrade Spy deck.
//!
//! `solve` finds the fastest line for one seed and prints it step by step.
//! `simulate` solves a batch of seeds and prints aggregate statistics.
//! `odds` runs one batch per fixed kept hand size and combines them into
//! win probabilities by turn under the "mulligan when there is no line" rule.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::eyre;
use color_eyre::Result;
use log::{info, LevelFilter};

use spy_solitaire::sim::win_probability_by_turn;
use spy_solitaire::{
    Deck, GameConfig, HeuristicSet, SimulationConfig, SimulationReport, SimulationSummary,
    Simulator, SolveOutcome, Solver, SolverConfig,
};

/// Goldfish combo solver for the Balustrade Spy deck
#[derive(Parser, Debug)]
#[command(name = "spy-solitaire")]
#[command(about = "Finds the fastest goldfish kill for a Balustrade Spy deck", long_about = None)]
struct Cli {
    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Deck list file; the stock list is used when omitted
    #[arg(long, global = true)]
    deck: Option<PathBuf>,

    /// Opponent starting life
    #[arg(long, global = true, default_value_t = 20)]
    opponent_life: i32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve a single seed and print the winning line
    Solve {
        /// Shuffle seed
        #[arg(long, default_value_t = 42)]
        seed: u64,

        #[command(flatten)]
        search: SearchArgs,

        /// Disable every heuristic (slow, for checking them)
        #[arg(long, default_value_t = false)]
        exhaustive: bool,
    },

    /// Solve a batch of seeds and print aggregate statistics
    Simulate {
        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        search: SearchArgs,
    },

    /// Win probability by turn, from one batch per kept hand size
    Odds {
        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        search: SearchArgs,

        /// Smallest hand size to mulligan to
        #[arg(long, default_value_t = 3)]
        min_hand_size: usize,
    },
}

#[derive(Args, Debug)]
struct SearchArgs {
    /// Give up on lines past this turn
    #[arg(long, default_value_t = 8)]
    max_turn: u32,

    /// Only keep hands of exactly this size
    #[arg(long)]
    hand_size: Option<usize>,

    /// Wall-clock budget per solve, in milliseconds
    #[arg(long)]
    time_budget_ms: Option<u64>,

    /// Reject wins that relied on Balustrade Spy missing unknown lands
    #[arg(long, default_value_t = false)]
    no_lucky_wins: bool,

    /// Only keep opening hands holding a mana source
    #[arg(long, default_value_t = false)]
    keep_filter: bool,
}

impl SearchArgs {
    fn solver_config(&self) -> SolverConfig {
        let mut config = SolverConfig::default()
            .with_max_turn(self.max_turn)
            .with_lucky_wins(!self.no_lucky_wins)
            .with_keep_filter(self.keep_filter);
        if let Some(size) = self.hand_size {
            config = config.with_hand_size(size);
        }
        if let Some(ms) = self.time_budget_ms {
            config = config.with_time_budget(Duration::from_millis(ms));
        }
        config
    }
}

#[derive(Args, Debug)]
struct BatchArgs {
    /// Number of seeds to solve
    #[arg(long, default_value_t = 1000)]
    runs: usize,

    /// Worker threads (defaults to the number of CPUs)
    #[arg(long)]
    workers: Option<usize>,

    /// Seed of the first run
    #[arg(long, default_value_t = 42)]
    base_seed: u64,

    /// Directory for stored results
    #[arg(long, default_value = "results")]
    results_dir: PathBuf,

    /// Discard stored results instead of resuming
    #[arg(long, default_value_t = false)]
    fresh: bool,
}

impl BatchArgs {
    fn simulation_config(&self, game: GameConfig, solver: SolverConfig) -> SimulationConfig {
        let mut config = SimulationConfig::default()
            .with_runs(self.runs)
            .with_base_seed(self.base_seed)
            .with_results_dir(&self.results_dir)
            .with_resume(!self.fresh)
            .with_solver(solver);
        config.game = game;
        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        config
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let level: LevelFilter = cli
        .log_level
        .parse()
        .map_err(|e| eyre!("invalid log level '{}': {}", cli.log_level, e))?;
    simple_logging::log_to_stderr(level);

    let deck = match &cli.deck {
        Some(path) => Deck::load(path)?,
        None => Deck::stock(),
    };
    info!("deck: {} cards ({})", deck.len(), deck.fingerprint());
    let game = GameConfig::default().with_opponent_life(cli.opponent_life);

    match cli.command {
        Command::Solve { seed, search, exhaustive } => solve(&deck, &game, seed, &search, exhaustive),
        Command::Simulate { batch, search } => {
            let config = batch.simulation_config(game, search.solver_config());
            let summaries = Simulator::new(deck, config).run()?;
            println!("{}", SimulationReport::from_summaries(&summaries));
            Ok(())
        }
        Command::Odds { batch, search, min_hand_size } => odds(deck, game, &batch, &search, min_hand_size),
    }
}

fn solve(deck: &Deck, game: &GameConfig, seed: u64, search: &SearchArgs, exhaustive: bool) -> Result<()> {
    let mut solver = Solver::standard(search.solver_config());
    if exhaustive {
        solver = solver.with_heuristics(HeuristicSet::none());
    }

    let start = Instant::now();
    let outcome = solver.solve_seed(&deck.cards(), game, seed);
    let elapsed = start.elapsed();

    if let SolveOutcome::Truncated { state, reason } = &outcome {
        println!("Search stopped ({reason}) at:\n{state}");
    }
    println!("{}", SimulationSummary::from_outcome(seed, &outcome, elapsed));
    println!("{}", solver.stats());
    Ok(())
}

fn odds(deck: Deck, game: GameConfig, batch: &BatchArgs, search: &SearchArgs, min_hand_size: usize) -> Result<()> {
    let opening = game.opening_hand_size;
    if min_hand_size == 0 || min_hand_size > opening {
        return Err(eyre!("--min-hand-size must be between 1 and {opening}"));
    }

    let mut by_hand_size = BTreeMap::new();
    for size in (min_hand_size..=opening).rev() {
        info!("simulating hands kept at {size}");
        let solver = search.solver_config().with_hand_size(size);
        let config = batch.simulation_config(game.clone(), solver);
        let summaries = Simulator::new(deck.clone(), config).run()?;
        by_hand_size.insert(size, SimulationReport::from_summaries(&summaries));
    }

    let max_turn = search.max_turn;
    let odds = win_probability_by_turn(&by_hand_size, max_turn);
    let mut cumulative = 0.0;
    for (turn, p) in odds {
        if turn > max_turn {
            println!("Win after turn {max_turn} or never: {:.2}%", p * 100.0);
        } else {
            cumulative += p;
            println!("Win at turn {turn}: {:.2}% (by turn {turn}: {:.2}%)", p * 100.0, cumulative * 100.0);
        }
    }
    Ok(())
}
