//! Heuristic scenarios: dominance, lethal detection, pass pruning.

use spy_solitaire::cards::CardKind;
use spy_solitaire::core::{Ability, Action, ManaColor, StateBuilder};
use spy_solitaire::heuristics::{HeuristicSet, PassPruning};
use spy_solitaire::rules::{RulesEngine, SolitaireEngine};
use spy_solitaire::solver::{SolveOutcome, Solver, SolverConfig, Truncation};

// =============================================================================
// Dominance
// =============================================================================

#[test]
fn test_basic_land_tapped_without_branching() {
    let state = StateBuilder::new()
        .library([CardKind::TinderWall; 3])
        .lands([CardKind::Forest])
        .build();
    let engine = SolitaireEngine::new();
    let actions = engine.legal_actions(&state);
    let names: Vec<String> = actions.iter().map(ToString::to_string).collect();
    assert_eq!(names, vec!["tap_for_mana_G", "system_pass"]);

    let (name, forced) = HeuristicSet::standard().forced(&state, &actions).unwrap();
    assert_eq!(name, "tap_basic_land");
    assert_eq!(forced.ability(), Some(Ability::TapForMana(ManaColor::Green)));

    let mut solver = Solver::standard(SolverConfig::default().with_max_turn(1));
    let outcome = solver.solve_from(vec![state]);
    assert!(matches!(outcome, SolveOutcome::Truncated { reason: Truncation::MaxTurn, .. }));
    assert_eq!(solver.stats().branches_created, 0);

    let SolveOutcome::Truncated { state, .. } = outcome else {
        unreachable!();
    };
    assert_eq!(state.history[0].to_string(), "T1 Forest: tap_for_mana_G");
}

// =============================================================================
// Lethal
// =============================================================================

#[test]
fn test_lethal_forced_over_alternatives() {
    let state = StateBuilder::new()
        .library([CardKind::Forest; 4])
        .hand([CardKind::Forest, CardKind::LotusPetal])
        .graveyard([CardKind::DreadReturn, CardKind::LotlethGiant])
        .battlefield([CardKind::TinderWall, CardKind::WallOfRoots, CardKind::BalustradeSpy])
        .lands([CardKind::Swamp])
        .opponent_life(2)
        .build();
    let actions = SolitaireEngine::new().legal_actions(&state);
    assert!(actions.len() > 3);

    let (name, forced) = HeuristicSet::standard().forced(&state, &actions).unwrap();
    assert_eq!(name, "flashback_giant_for_lethal");
    assert_eq!(forced.ability(), Some(Ability::Flashback));

    let mut solver = Solver::standard(SolverConfig::default());
    let won = solver.solve_from(vec![state]);
    let won = won.winning_state().unwrap();
    assert_eq!(won.turn, 1);
    assert_eq!(won.history.len(), 1);
    assert_eq!(solver.stats().branches_created, 0);
}

// =============================================================================
// Pass Pruning
// =============================================================================

#[test]
fn test_pass_removed_only_with_enough_alternatives() {
    let engine = SolitaireEngine::new();
    let pruning = HeuristicSet::none().with_filter(PassPruning::default());

    let two = StateBuilder::new()
        .hand([CardKind::Forest, CardKind::LotusPetal])
        .build();
    let filtered = pruning.filter(&two, engine.legal_actions(&two));
    assert!(!filtered.contains(&Action::pass()));
    assert_eq!(filtered.len(), 2);

    let one = StateBuilder::new().hand([CardKind::Forest]).build();
    let filtered = pruning.filter(&one, engine.legal_actions(&one));
    assert!(filtered.contains(&Action::pass()));
}

#[test]
fn test_pass_kept_when_cycling_finds_nothing() {
    let engine = SolitaireEngine::new();
    let pruning = HeuristicSet::none().with_filter(PassPruning::default());
    let state = StateBuilder::new()
        .library([CardKind::Swamp, CardKind::Swamp])
        .hand([CardKind::GenerousEnt])
        .mana(ManaColor::Green, 1)
        .build();
    let filtered = pruning.filter(&state, engine.legal_actions(&state));
    assert!(filtered.contains(&Action::pass()));
}

#[test]
fn test_filters_never_empty_the_action_set() {
    let engine = SolitaireEngine::new();
    let standard = HeuristicSet::standard();
    let positions = [
        StateBuilder::new().build(),
        StateBuilder::new().hand([CardKind::Forest, CardKind::Swamp]).build(),
        StateBuilder::new()
            .library([CardKind::Forest])
            .hand([CardKind::GenerousEnt, CardKind::Forest])
            .mana(ManaColor::Black, 1)
            .build(),
    ];
    for state in positions {
        let actions = engine.legal_actions(&state);
        assert!(!standard.filter(&state, actions).is_empty());
    }
}
