//! Game state for one goldfish universe.
//!
//! ## GameState
//!
//! Complete game state:
//! - Zones (library, hand, lands, battlefield, graveyard, exile)
//! - Floating mana and the spending strategy
//! - Turn, phase, life totals, per-turn flags
//! - Bookkeeping for the simulation summary (initial hand, mulligan, log)
//! - RNG
//!
//! Every field is either a persistent `im` structure or plain data, so
//! `clone()` is cheap and yields a fully independent universe.
//!
//! Mutation goes through the transition primitives in
//! [`crate::rules::transitions`]; this module only holds data.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::action::LoggedStep;
use super::config::GameConfig;
use super::entity::EntityId;
use super::mana::{ManaPool, ManaStrategy};
use super::rng::GameRng;
use crate::cards::{Card, CardKind};
use crate::zones::{Zone, ZonePosition, Zones};

/// Where we are in the turn cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TurnPhase {
    /// Our main phase: anything can be done.
    #[default]
    Active,
    /// Priority passed: only instant-speed abilities until the next turn.
    Passing,
}

/// Why a game was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameLost {
    /// Tried to draw from an empty library.
    DrewFromEmptyLibrary,
}

impl std::fmt::Display for GameLost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameLost::DrewFromEmptyLibrary => write!(f, "drew from an empty library"),
        }
    }
}

impl std::error::Error for GameLost {}

/// Complete state of a solitaire game.
#[derive(Clone, Debug)]
pub struct GameState {
    /// All cards, by zone.
    pub zones: Zones,

    // === Mana ===
    pub mana_pool: ManaPool,
    pub mana_strategy: ManaStrategy,
    /// Switching is allowed once per mana-spending event.
    pub mana_switch_allowed: bool,

    // === Game Progression ===
    /// Turn number (starts at 1).
    pub turn: u32,
    pub phase: TurnPhase,
    pub land_played: bool,
    pub life: i32,
    pub opponent_life: i32,
    pub max_hand_size: usize,

    // === Library Knowledge ===
    /// Lands known to sit at the very bottom of the library.
    pub known_bottom_lands: u32,
    /// Lands in the whole deck.
    pub lands_in_deck: u32,

    // === Summary Bookkeeping ===
    /// Interaction cards drawn into hand so far.
    pub interaction_count: u32,
    /// Lands of unknown position left in the library when Balustrade Spy resolved.
    pub unknown_lands_on_combo: Option<u32>,
    /// Hand size we kept after mulligans.
    pub kept_at: Option<usize>,
    pub initial_hand: Vector<CardKind>,
    pub mulligan_bottom: Vector<CardKind>,
    pub history: Vector<LoggedStep>,

    pub(crate) rng: GameRng,
}

impl GameState {
    /// Create a game with the whole deck shuffled into the library.
    ///
    /// No cards are drawn; see [`GameState::deal`].
    #[must_use]
    pub fn new(deck: &[CardKind], config: &GameConfig, seed: u64) -> Self {
        let mut next_id = EntityId::FIRST;
        let mut zones = Zones::new();
        for &kind in deck {
            zones.insert(Zone::Library, Card::new(next_id.allocate(), kind), ZonePosition::Bottom);
        }
        let mut rng = GameRng::new(seed);
        zones.shuffle_library(&mut rng);

        Self {
            zones,
            mana_pool: ManaPool::new(),
            mana_strategy: ManaStrategy::default(),
            mana_switch_allowed: true,
            turn: 1,
            phase: TurnPhase::Active,
            land_played: false,
            life: config.starting_life,
            opponent_life: config.opponent_life,
            max_hand_size: config.max_hand_size,
            known_bottom_lands: 0,
            lands_in_deck: deck.iter().filter(|k| k.is_land()).count() as u32,
            interaction_count: 0,
            unknown_lands_on_combo: None,
            kept_at: None,
            initial_hand: Vector::new(),
            mulligan_bottom: Vector::new(),
            history: Vector::new(),
            rng,
        }
    }

    /// Create a game and draw the opening hand.
    pub fn deal(deck: &[CardKind], config: &GameConfig, seed: u64) -> Result<Self, GameLost> {
        let mut state = Self::new(deck, config, seed);
        state.draw(config.opening_hand_size)?;
        state.snapshot_initial_hand(config.opening_hand_size);
        Ok(state)
    }

    /// Record the current hand as the kept opening hand.
    pub fn snapshot_initial_hand(&mut self, kept_at: usize) {
        self.initial_hand = self.hand().iter().map(|c| c.kind).collect();
        self.kept_at = Some(kept_at);
    }

    // === Zone Shortcuts ===

    #[must_use]
    pub fn library(&self) -> &Vector<Card> {
        &self.zones[Zone::Library]
    }

    #[must_use]
    pub fn hand(&self) -> &Vector<Card> {
        &self.zones[Zone::Hand]
    }

    #[must_use]
    pub fn lands(&self) -> &Vector<Card> {
        &self.zones[Zone::Lands]
    }

    #[must_use]
    pub fn battlefield(&self) -> &Vector<Card> {
        &self.zones[Zone::Battlefield]
    }

    #[must_use]
    pub fn graveyard(&self) -> &Vector<Card> {
        &self.zones[Zone::Graveyard]
    }

    #[must_use]
    pub fn exile(&self) -> &Vector<Card> {
        &self.zones[Zone::Exile]
    }

    /// Lands still in the library.
    #[must_use]
    pub fn lands_in_library(&self) -> u32 {
        self.zones.count(Zone::Library, |c| c.kind.is_land()) as u32
    }

    /// Creature cards in the graveyard.
    #[must_use]
    pub fn creatures_in_graveyard(&self) -> u32 {
        self.zones.count(Zone::Graveyard, |c| c.kind.is_creature()) as u32
    }

    /// Creatures on the battlefield.
    #[must_use]
    pub fn creatures_in_play(&self) -> u32 {
        self.zones.count(Zone::Battlefield, |c| c.kind.is_creature()) as u32
    }

    /// The game is won once the opponent is at or below zero life.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.opponent_life <= 0
    }

    /// Seed of the RNG driving library shuffles.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}

impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names = |zone: Zone| {
            self.zones[zone]
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        writeln!(
            f,
            "Turn {} ({:?}) life {} vs {} | mana {} ({:?})",
            self.turn, self.phase, self.life, self.opponent_life, self.mana_pool, self.mana_strategy
        )?;
        writeln!(f, "  library: {} cards ({} known bottom lands)", self.library().len(), self.known_bottom_lands)?;
        writeln!(f, "  hand: {}", names(Zone::Hand))?;
        writeln!(f, "  lands: {}", names(Zone::Lands))?;
        writeln!(f, "  battlefield: {}", names(Zone::Battlefield))?;
        writeln!(f, "  graveyard: {}", names(Zone::Graveyard))?;
        write!(f, "  exile: {}", names(Zone::Exile))
    }
}

/// Build arbitrary positions for tests, benches and replays.
///
/// ```
/// use spy_solitaire::core::StateBuilder;
/// use spy_solitaire::cards::CardKind;
///
/// let state = StateBuilder::new()
///     .library([CardKind::Forest, CardKind::Swamp])
///     .hand([CardKind::LandGrant])
///     .lands([CardKind::Forest])
///     .turn(2)
///     .build();
///
/// assert_eq!(state.library().len(), 2);
/// assert_eq!(state.turn, 2);
/// ```
#[derive(Clone, Debug)]
pub struct StateBuilder {
    config: GameConfig,
    zones: Vec<(Zone, CardKind, bool)>,
    turn: u32,
    seed: u64,
    pool: ManaPool,
    lands_in_deck: Option<u32>,
    known_bottom_lands: u32,
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: GameConfig::default(),
            zones: Vec::new(),
            turn: 1,
            seed: 0,
            pool: ManaPool::new(),
            lands_in_deck: None,
            known_bottom_lands: 0,
        }
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    fn push(mut self, zone: Zone, kinds: impl IntoIterator<Item = CardKind>, sick: bool) -> Self {
        self.zones.extend(kinds.into_iter().map(|k| (zone, k, sick)));
        self
    }

    /// Library cards, top first.
    #[must_use]
    pub fn library(self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.push(Zone::Library, kinds, false)
    }

    #[must_use]
    pub fn hand(self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.push(Zone::Hand, kinds, false)
    }

    /// Untapped lands in play.
    #[must_use]
    pub fn lands(self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.push(Zone::Lands, kinds, false)
    }

    /// Permanents in play since an earlier turn.
    #[must_use]
    pub fn battlefield(self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.push(Zone::Battlefield, kinds, false)
    }

    /// Permanents that entered this turn.
    #[must_use]
    pub fn battlefield_sick(self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.push(Zone::Battlefield, kinds, true)
    }

    #[must_use]
    pub fn graveyard(self, kinds: impl IntoIterator<Item = CardKind>) -> Self {
        self.push(Zone::Graveyard, kinds, false)
    }

    #[must_use]
    pub fn turn(mut self, turn: u32) -> Self {
        self.turn = turn;
        self
    }

    #[must_use]
    pub fn opponent_life(mut self, life: i32) -> Self {
        self.config.opponent_life = life;
        self
    }

    #[must_use]
    pub fn mana(mut self, color: super::mana::ManaColor, amount: u32) -> Self {
        self.pool.add(color, amount);
        self
    }

    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn known_bottom_lands(mut self, count: u32) -> Self {
        self.known_bottom_lands = count;
        self
    }

    /// Override the deck land count (defaults to lands placed anywhere).
    #[must_use]
    pub fn lands_in_deck(mut self, count: u32) -> Self {
        self.lands_in_deck = Some(count);
        self
    }

    /// Assemble the state. Library order is kept as given.
    #[must_use]
    pub fn build(self) -> GameState {
        let mut state = GameState::new(&[], &self.config, self.seed);
        let mut next_id = EntityId::FIRST;
        for (zone, kind, sick) in self.zones {
            let mut card = Card::new(next_id.allocate(), kind);
            card.summoning_sick = sick;
            state.zones.insert(zone, card, ZonePosition::Bottom);
        }
        state.turn = self.turn;
        state.mana_pool = self.pool;
        state.known_bottom_lands = self.known_bottom_lands;
        state.lands_in_deck = self
            .lands_in_deck
            .unwrap_or_else(|| state.zones_land_count());
        state.snapshot_initial_hand(self.config.opening_hand_size);
        state
    }
}

impl GameState {
    fn zones_land_count(&self) -> u32 {
        Zone::ALL
            .into_iter()
            .map(|z| self.zones.count(z, |c| c.kind.is_land()) as u32)
            .sum()
    }
}
