//! Deck files and dealing.

use spy_solitaire::cards::{CardKind, Deck, DeckError};
use spy_solitaire::core::{GameConfig, GameState};

#[test]
fn test_load_deck_file() {
    let path = std::env::temp_dir().join(format!("spy-deck-{}.txt", std::process::id()));
    std::fs::write(&path, format!("{}1 Forest\n", Deck::stock())).unwrap();

    let deck = Deck::load(&path).unwrap();
    assert_eq!(deck.len(), 61);
    assert_eq!(deck.diff(&Deck::stock()), vec![(CardKind::Forest, 1)]);

    std::fs::remove_file(&path).unwrap();
    assert!(matches!(Deck::load(&path), Err(DeckError::Io(_))));
}

#[test]
fn test_deal_is_reproducible() {
    let cards = Deck::stock().cards();
    let a = GameState::deal(&cards, &GameConfig::default(), 9).unwrap();
    let b = GameState::deal(&cards, &GameConfig::default(), 9).unwrap();
    let c = GameState::deal(&cards, &GameConfig::default(), 10).unwrap();
    let kinds = |s: &GameState| s.library().iter().map(|card| card.kind).collect::<Vec<_>>();
    assert_eq!(kinds(&a), kinds(&b));
    assert_ne!(kinds(&a), kinds(&c));
}

#[test]
fn test_deal_from_short_deck_fails() {
    let cards = vec![CardKind::Forest; 5];
    assert!(GameState::deal(&cards, &GameConfig::default(), 1).is_err());
}
