//! Solver integration tests: early abort, soundness against exhaustive
//! search, mulligan branching and reproducibility.

use std::collections::HashSet;

use spy_solitaire::cards::{CardKind, Deck};
use spy_solitaire::core::{GameConfig, GameState, StateBuilder};
use spy_solitaire::heuristics::HeuristicSet;
use spy_solitaire::solver::{cut_hand, opening_states, SolveOutcome, Solver, SolverConfig};

fn exhaustive(config: SolverConfig) -> Solver {
    Solver::standard(config.with_deduplicate(false)).with_heuristics(HeuristicSet::none())
}

// =============================================================================
// Early Abort
// =============================================================================

#[test]
fn test_landless_state_aborted_without_expansion() {
    let state = StateBuilder::new()
        .library([CardKind::Forest; 5])
        .hand([CardKind::TinderWall, CardKind::BalustradeSpy])
        .turn(2)
        .build();
    let mut solver = Solver::standard(SolverConfig::default());
    assert!(matches!(solver.solve_from(vec![state.clone()]), SolveOutcome::NoLine));
    assert_eq!(solver.stats().dead_states_pruned, 1);
    assert_eq!(solver.stats().states_expanded, 0);

    // Without early abort the same state is expanded.
    let mut solver = Solver::standard(SolverConfig::default().with_early_abort(false).with_max_turn(2));
    solver.solve_from(vec![state]);
    assert!(solver.stats().states_expanded > 0);
}

// =============================================================================
// Soundness
// =============================================================================

#[test]
fn test_heuristics_keep_exhaustive_wins() {
    let positions = [
        StateBuilder::new()
            .library([CardKind::Forest; 4])
            .graveyard([CardKind::DreadReturn, CardKind::LotlethGiant])
            .battlefield([CardKind::TinderWall, CardKind::WallOfRoots, CardKind::BalustradeSpy])
            .opponent_life(2)
            .build(),
        StateBuilder::new()
            .library([CardKind::Forest; 4])
            .hand([CardKind::Forest])
            .graveyard([CardKind::DreadReturn, CardKind::LotlethGiant, CardKind::MaskedVandal])
            .battlefield([CardKind::TinderWall, CardKind::WallOfRoots, CardKind::SaruliCaretaker])
            .opponent_life(4)
            .build(),
    ];

    for state in positions {
        let mut full = exhaustive(SolverConfig::default().with_max_turn(1));
        let reference = full.solve_from(vec![state.clone()]);
        let reference_turn = reference.winning_state().map(|s| s.turn).unwrap();

        let mut fast = Solver::standard(SolverConfig::default().with_max_turn(1));
        let outcome = fast.solve_from(vec![state]);
        let turn = outcome.winning_state().map(|s| s.turn).unwrap();

        assert_eq!(turn, reference_turn);
        assert!(fast.stats().states_expanded <= full.stats().states_expanded);
    }
}

#[test]
fn test_heuristic_wins_never_beat_exhaustive() {
    let deck = Deck::stock().cards();
    let config = SolverConfig::default()
        .with_max_turn(2)
        .with_hand_size(7)
        .with_time_budget(std::time::Duration::from_secs(2));

    for seed in 0..3 {
        let mut full = Solver::standard(config.clone()).with_heuristics(HeuristicSet::none());
        let SolveOutcome::Won(reference) = full.solve_seed(&deck, &GameConfig::default(), seed) else {
            continue;
        };
        let mut fast = Solver::standard(config.clone());
        if let Some(won) = fast.solve_seed(&deck, &GameConfig::default(), seed).winning_state() {
            assert!(won.turn >= reference.turn, "seed {seed}");
        }
    }
}

// =============================================================================
// Mulligans
// =============================================================================

fn hand_of(cards: [CardKind; 7]) -> GameState {
    StateBuilder::new()
        .library([CardKind::WallOfRoots; 20])
        .hand(cards)
        .build()
}

#[test]
fn test_three_dead_cards_bottomed_without_branching() {
    let state = hand_of([
        CardKind::Forest,
        CardKind::DreadReturn,
        CardKind::TinderWall,
        CardKind::LotlethGiant,
        CardKind::MesmericFiend,
        CardKind::LandGrant,
        CardKind::BalustradeSpy,
    ]);
    let cut = cut_hand(state, 4);
    assert_eq!(cut.len(), 1);
    let bottom: HashSet<CardKind> = cut[0].mulligan_bottom.iter().copied().collect();
    assert_eq!(
        bottom,
        HashSet::from([CardKind::DreadReturn, CardKind::LotlethGiant, CardKind::MesmericFiend])
    );
    assert_eq!(cut[0].hand().len(), 4);
    assert_eq!(cut[0].library().len(), 23);
}

#[test]
fn test_two_dead_cards_branch_on_the_last_cut() {
    let state = hand_of([
        CardKind::Forest,
        CardKind::DreadReturn,
        CardKind::TinderWall,
        CardKind::LotlethGiant,
        CardKind::Swamp,
        CardKind::LandGrant,
        CardKind::BalustradeSpy,
    ]);
    let cut = cut_hand(state, 4);
    // C(5, 1): one sibling per remaining card
    assert_eq!(cut.len(), 5);

    let keys: HashSet<_> = cut.iter().map(GameState::key).collect();
    assert_eq!(keys.len(), 5);
    for branch in &cut {
        assert_eq!(branch.hand().len(), 4);
        assert_eq!(branch.mulligan_bottom.len(), 3);
        assert_eq!(branch.kept_at, Some(4));
    }

    let mut solver = Solver::standard(SolverConfig::default().with_max_turn(1));
    solver.solve_from(cut);
    assert_eq!(solver.stats().opening_states, 5);
}

#[test]
fn test_opening_states_conserve_cards() {
    let deck = Deck::stock().cards();
    let root = GameState::deal(&deck, &GameConfig::default(), 5).unwrap();
    for state in opening_states(&root, &SolverConfig::default()) {
        assert_eq!(state.zones.len(), deck.len());
        assert_eq!(state.hand().len() + state.mulligan_bottom.len(), 7);
    }
}

// =============================================================================
// Reproducibility
// =============================================================================

#[test]
fn test_same_seed_same_line() {
    let deck = Deck::stock().cards();
    let config = SolverConfig::default().with_max_turn(3).with_hand_size(7);

    let run = |seed| {
        let mut solver = Solver::standard(config.clone());
        match solver.solve_seed(&deck, &GameConfig::default(), seed) {
            SolveOutcome::Won(state) => Some(state.history.iter().cloned().collect::<Vec<_>>()),
            _ => None,
        }
    };
    for seed in [3, 17] {
        assert_eq!(run(seed), run(seed));
    }
}
