//! Simulation harness tests: batches on a thread pool, resume, reports.

use std::path::PathBuf;

use spy_solitaire::cards::Deck;
use spy_solitaire::sim::{SimulationConfig, SimulationReport, Simulator};
use spy_solitaire::solver::SolverConfig;

fn results_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("spy-sim-{}-{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn quick_config(dir: &PathBuf, runs: usize) -> SimulationConfig {
    SimulationConfig::default()
        .with_runs(runs)
        .with_workers(2)
        .with_base_seed(100)
        .with_results_dir(dir)
        .with_solver(SolverConfig::default().with_max_turn(2).with_hand_size(7))
}

#[test]
fn test_batch_covers_every_seed() {
    let dir = results_dir("batch");
    let summaries = Simulator::new(Deck::stock(), quick_config(&dir, 4)).run().unwrap();

    let mut seeds: Vec<u64> = summaries.iter().map(|s| s.seed).collect();
    seeds.sort_unstable();
    assert_eq!(seeds, vec![100, 101, 102, 103]);
    assert!(dir.join(format!("{}_deck.txt", Deck::stock().fingerprint())).exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_resume_skips_stored_seeds() {
    let dir = results_dir("resume");
    let first = Simulator::new(Deck::stock(), quick_config(&dir, 3)).run().unwrap();
    assert_eq!(first.len(), 3);

    let simulator = Simulator::new(Deck::stock(), quick_config(&dir, 5));
    let resumed = simulator.run().unwrap();
    assert_eq!(resumed.len(), 5);
    assert_eq!(simulator.store().load().unwrap().len(), 5);
    // stored summaries come back first, unchanged
    assert_eq!(&resumed[..3], &first[..]);

    let fresh = Simulator::new(Deck::stock(), quick_config(&dir, 2).with_resume(false));
    assert_eq!(fresh.run().unwrap().len(), 2);
    assert_eq!(fresh.store().load().unwrap().len(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_chunks_stored_in_seed_order() {
    let dir = results_dir("chunks");
    let mut config = quick_config(&dir, 5).with_workers(3);
    config.checkpoint_every = 2;
    let simulator = Simulator::new(Deck::stock(), config);
    let summaries = simulator.run().unwrap();

    let seeds: Vec<u64> = summaries.iter().map(|s| s.seed).collect();
    assert_eq!(seeds, vec![100, 101, 102, 103, 104]);
    assert_eq!(simulator.store().load().unwrap(), summaries);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_matches_single_runs() {
    let dir = results_dir("single");
    let config = quick_config(&dir, 3);
    let summaries = Simulator::new(Deck::stock(), config.clone()).run().unwrap();

    let deck = Deck::stock().cards();
    for summary in &summaries {
        let single = Simulator::run_one(&deck, &config.game, &config.solver, summary.seed);
        assert_eq!(single.outcome, summary.outcome);
        assert_eq!(single.steps, summary.steps);
    }

    let report = SimulationReport::from_summaries(&summaries);
    assert_eq!(report.games, 3);
    assert_eq!(report.wins() + report.no_line + report.truncated, 3);

    let _ = std::fs::remove_dir_all(&dir);
}
