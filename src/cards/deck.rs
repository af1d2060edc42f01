//! Deck lists.
//!
//! A deck file holds one `"<quantity> <card name>"` entry per line. Blank
//! lines and lines starting with `#` are ignored. Names are matched
//! case-insensitively against the supported cards; anything else is an
//! error, since a card the solver cannot play would silently skew results.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::path::Path;
use std::str::FromStr;

use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};

use super::definition::CardKind;

/// Error loading or parsing a deck list.
#[derive(Debug)]
pub enum DeckError {
    Io(std::io::Error),
    /// A line that is not `<quantity> <name>`.
    Malformed { line: usize, text: String },
    UnknownCard { line: usize, name: String },
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::Io(e) => write!(f, "failed to read deck list: {e}"),
            DeckError::Malformed { line, text } => write!(f, "line {line}: expected '<quantity> <card name>', got '{text}'"),
            DeckError::UnknownCard { line, name } => write!(f, "line {line}: unknown card '{name}'"),
        }
    }
}

impl std::error::Error for DeckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DeckError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DeckError {
    fn from(e: std::io::Error) -> Self {
        DeckError::Io(e)
    }
}

/// A deck: card counts by kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    counts: BTreeMap<CardKind, u32>,
}

impl Deck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference 60-card Balustrade Spy list.
    #[must_use]
    pub fn stock() -> Self {
        use CardKind::*;
        [
            (BalustradeSpy, 4),
            (DreadReturn, 2),
            (ElvesOfDeepShadow, 4),
            (Forest, 3),
            (GenerousEnt, 4),
            (LandGrant, 4),
            (LeadTheStampede, 4),
            (LotlethGiant, 2),
            (MaskedVandal, 3),
            (MesmericFiend, 2),
            (OrnithopterOfParadise, 2),
            (OvergrownBattlement, 4),
            (SaguWildling, 4),
            (SaruliCaretaker, 4),
            (Swamp, 1),
            (TinderWall, 4),
            (TrollOfKhazadDum, 1),
            (WallOfRoots, 4),
            (WindingWay, 4),
        ]
        .into_iter()
        .fold(Self::new(), |deck, (kind, n)| deck.with(kind, n))
    }

    /// Add copies of a card.
    #[must_use]
    pub fn with(mut self, kind: CardKind, count: u32) -> Self {
        *self.counts.entry(kind).or_default() += count;
        self
    }

    /// Read a deck list from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DeckError> {
        let text = std::fs::read_to_string(path)?;
        text.parse()
    }

    /// Number of copies of a card.
    #[must_use]
    pub fn count(&self, kind: CardKind) -> u32 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.values().sum::<u32>() as usize
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every card, one entry per copy, in a stable order.
    #[must_use]
    pub fn cards(&self) -> Vec<CardKind> {
        self.counts
            .iter()
            .flat_map(|(&kind, &n)| std::iter::repeat(kind).take(n as usize))
            .collect()
    }

    /// Stable fingerprint of the list, used to name result files.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = FxHasher::default();
        for (kind, n) in &self.counts {
            kind.name().hash(&mut hasher);
            n.hash(&mut hasher);
        }
        format!("{:016x}", hasher.finish())
    }

    /// Count changes from `base` to `self`, e.g. `(Forest, +1)`.
    #[must_use]
    pub fn diff(&self, base: &Deck) -> Vec<(CardKind, i64)> {
        CardKind::ALL
            .into_iter()
            .filter_map(|kind| {
                let delta = i64::from(self.count(kind)) - i64::from(base.count(kind));
                (delta != 0).then_some((kind, delta))
            })
            .collect()
    }
}

impl FromStr for Deck {
    type Err = DeckError;

    fn from_str(text: &str) -> Result<Self, DeckError> {
        let mut deck = Deck::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let malformed = || DeckError::Malformed { line: i + 1, text: line.to_string() };
            let (quantity, name) = line.split_once(char::is_whitespace).ok_or_else(malformed)?;
            let quantity: u32 = quantity.parse().map_err(|_| malformed())?;
            let kind = CardKind::from_name(name).ok_or_else(|| DeckError::UnknownCard {
                line: i + 1,
                name: name.trim().to_string(),
            })?;
            deck = deck.with(kind, quantity);
        }
        Ok(deck)
    }
}

impl std::fmt::Display for Deck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (kind, n) in &self.counts {
            writeln!(f, "{n} {kind}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_deck_is_sixty() {
        let deck = Deck::stock();
        assert_eq!(deck.len(), 60);
        assert_eq!(deck.count(CardKind::BalustradeSpy), 4);
        assert_eq!(deck.cards().iter().filter(|k| k.is_land()).count(), 4);
    }

    #[test]
    fn test_parse() {
        let deck: Deck = "# combo\n4 Balustrade Spy\n\n2 dread return\n1 Troll of Khazad-dûm\n"
            .parse()
            .unwrap();
        assert_eq!(deck.len(), 7);
        assert_eq!(deck.count(CardKind::DreadReturn), 2);
        assert_eq!(deck.count(CardKind::TrollOfKhazadDum), 1);
    }

    #[test]
    fn test_unknown_card_is_an_error() {
        let err = "4 Forest\n1 Black Lotus".parse::<Deck>().unwrap_err();
        assert!(matches!(err, DeckError::UnknownCard { line: 2, .. }));
    }

    #[test]
    fn test_malformed_line() {
        assert!(matches!("Forest".parse::<Deck>(), Err(DeckError::Malformed { line: 1, .. })));
        assert!(matches!("x Forest".parse::<Deck>(), Err(DeckError::Malformed { .. })));
    }

    #[test]
    fn test_display_parses_back() {
        let deck = Deck::stock();
        let again: Deck = deck.to_string().parse().unwrap();
        assert_eq!(deck, again);
        assert_eq!(deck.fingerprint(), again.fingerprint());
    }

    #[test]
    fn test_diff() {
        let base = Deck::stock();
        let tweaked = base.clone().with(CardKind::Forest, 1);
        assert_eq!(tweaked.diff(&base), vec![(CardKind::Forest, 1)]);
        assert_ne!(tweaked.fingerprint(), base.fingerprint());
    }
}
