//! Benchmark for the solver
//!
//! Measures a full solve of a few stock-deck seeds, and the per-state costs
//! the search pays on every expansion (clone, legal actions, key).

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use spy_solitaire::{
    Deck, GameConfig, GameState, RulesEngine, SolitaireEngine, Solver, SolverConfig,
};

fn bench_solve_seed(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_seed");
    group.sample_size(10);

    let deck = Deck::stock().cards();
    let game = GameConfig::default();

    for seed in [1u64, 7, 42] {
        group.bench_with_input(BenchmarkId::from_parameter(seed), &seed, |b, &seed| {
            // A fixed hand size keeps the run time comparable across seeds.
            let config = SolverConfig::default().with_max_turn(4).with_hand_size(7);
            b.iter(|| {
                let mut solver = Solver::standard(config.clone());
                black_box(solver.solve_seed(black_box(&deck), &game, seed))
            })
        });
    }

    group.finish();
}

fn bench_expansion(c: &mut Criterion) {
    let deck = Deck::stock().cards();
    let Ok(state) = GameState::deal(&deck, &GameConfig::default(), 42) else {
        return;
    };
    let engine = SolitaireEngine::new();

    c.bench_function("state_clone", |b| b.iter(|| black_box(state.clone())));
    c.bench_function("legal_actions", |b| b.iter(|| black_box(engine.legal_actions(black_box(&state)))));
    c.bench_function("state_key", |b| b.iter(|| black_box(state.key())));
}

criterion_group!(benches, bench_solve_seed, bench_expansion);
criterion_main!(benches);
