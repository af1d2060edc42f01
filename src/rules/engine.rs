//! Rules engine: legal actions, action application, the turn machine.
//!
//! The solver only talks to the rules through [`RulesEngine`]:
//! - What actions are legal
//! - How an action modifies a state (and whether it loses the game)
//! - Whether a state is won
//!
//! [`SolitaireEngine`] is the implementation for the Spy deck. It walks
//! every card in hand, battlefield, lands and graveyard, asks the card
//! catalog for candidates, keeps the legal ones and appends the system
//! actions.

use log::trace;
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::cards::{catalog, CardStatus};
use crate::core::action::{Ability, Action, LoggedStep, SystemAction, Targets};
use crate::core::mana::ManaColor;
use crate::core::state::{GameLost, GameState, TurnPhase};
use crate::zones::{Located, Zone};

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `legal_actions`: Never empty; passing or starting a turn is always legal
/// - `apply_action`: Must be deterministic given the state (its RNG included)
/// - `apply_action`: Panics on an unavailable action; that is a caller bug
pub trait RulesEngine {
    /// Enumerate all legal actions, card actions first, system actions last.
    fn legal_actions(&self, state: &GameState) -> Vec<Action>;

    /// Check whether a single action is legal right now.
    fn is_available(&self, state: &GameState, action: &Action) -> bool;

    /// Apply an action to the game state.
    ///
    /// Returns `Err` when the action loses the game.
    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), GameLost>;

    /// Check if the game is won.
    fn is_won(&self, state: &GameState) -> bool {
        state.is_won()
    }
}

/// Zones scanned for card actions, in enumeration order.
const ACTION_ZONES: [Zone; 4] = [Zone::Hand, Zone::Battlefield, Zone::Lands, Zone::Graveyard];

/// Key under which two card actions are interchangeable.
type ActionIdentity = (CardStatus, Ability, SmallVec<[CardStatus; 4]>);

/// Rules for the Balustrade Spy goldfish.
#[derive(Clone, Copy, Debug, Default)]
pub struct SolitaireEngine;

impl SolitaireEngine {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn switch_available(state: &GameState) -> bool {
        state.mana_switch_allowed
            && state.mana_pool.get(ManaColor::Black) > 0
            && state.mana_pool.get(ManaColor::Green) > 0
    }

    /// End the turn: discard to hand size, empty the pool, reset
    /// once-per-turn abilities (they work again on the opponent's turn).
    fn pass(state: &mut GameState) {
        while state.hand().len() > state.max_hand_size {
            let Some(worst) = state.worst_card_in_hand() else {
                break;
            };
            state.discard(worst);
        }
        state.mana_pool.clear();
        for zone in [Zone::Lands, Zone::Battlefield] {
            for card in state.zones[zone].iter_mut() {
                card.ability_used = false;
            }
        }
        state.phase = TurnPhase::Passing;
    }

    /// Begin the next turn: untap, clear sickness, draw.
    fn start_new_turn(state: &mut GameState) -> Result<(), GameLost> {
        state.turn += 1;
        state.phase = TurnPhase::Active;
        for zone in [Zone::Lands, Zone::Battlefield] {
            for card in state.zones[zone].iter_mut() {
                card.tapped = false;
                card.summoning_sick = false;
                card.ability_used = false;
            }
        }
        state.land_played = false;
        state.mana_switch_allowed = true;
        state.mana_pool.clear();
        state.draw(1)
    }
}

impl RulesEngine for SolitaireEngine {
    fn legal_actions(&self, state: &GameState) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut seen: FxHashSet<ActionIdentity> = FxHashSet::default();

        for zone in ACTION_ZONES {
            for (index, card) in state.zones[zone].iter().enumerate() {
                let at = Located { zone, index };
                for (ability, targets) in catalog::candidates(state, at) {
                    if !catalog::is_available(state, at, ability, &targets) {
                        continue;
                    }
                    let identity = (card.status(), ability, catalog::target_status(state, ability, &targets));
                    if seen.insert(identity) {
                        actions.push(Action::Card { card: card.id, ability, targets });
                    }
                }
            }
        }

        if Self::switch_available(state) {
            actions.push(Action::switch_mana_strategy());
        }
        actions.push(match state.phase {
            TurnPhase::Active => Action::pass(),
            TurnPhase::Passing => Action::start_new_turn(),
        });
        actions
    }

    fn is_available(&self, state: &GameState, action: &Action) -> bool {
        match action {
            Action::System(SystemAction::Pass) => state.phase == TurnPhase::Active,
            Action::System(SystemAction::StartNewTurn) => state.phase == TurnPhase::Passing,
            Action::System(SystemAction::SwitchManaStrategy) => Self::switch_available(state),
            Action::Card { card, ability, targets } => state
                .zones
                .locate(*card)
                .is_some_and(|at| catalog::is_available(state, at, *ability, targets)),
        }
    }

    fn apply_action(&self, state: &mut GameState, action: &Action) -> Result<(), GameLost> {
        if !self.is_available(state, action) {
            panic!("Action {} is not available:\n{}", action, state);
        }

        let card = action
            .source()
            .and_then(|id| state.zones.locate(id))
            .and_then(|at| state.zones.card_at(at))
            .map(|c| c.kind);
        trace!("turn {} applying {} ({:?})", state.turn, action, card);
        state.history.push_back(LoggedStep {
            turn: state.turn,
            card,
            action: action.to_string(),
        });

        match action {
            Action::System(SystemAction::Pass) => {
                Self::pass(state);
                Ok(())
            }
            Action::System(SystemAction::StartNewTurn) => Self::start_new_turn(state),
            Action::System(SystemAction::SwitchManaStrategy) => {
                state.mana_strategy = state.mana_strategy.toggled();
                state.mana_switch_allowed = false;
                Ok(())
            }
            Action::Card { card, ability, targets } => {
                let Some(at) = state.zones.locate(*card) else {
                    panic!("Entity {} vanished before resolving {}", card, action);
                };
                catalog::resolve(state, at, *ability, targets);
                Ok(())
            }
        }
    }
}

/// Parse and apply an encoded action for the card with the given id.
///
/// Convenience for replaying logs and for tests.
pub fn step(
    engine: &impl RulesEngine,
    state: &mut GameState,
    card: Option<crate::core::EntityId>,
    action: &str,
) -> Result<Result<(), GameLost>, crate::core::ActionParseError> {
    let action = Action::parse(card, action)?;
    Ok(engine.apply_action(state, &action))
}

/// Abilities offered for one card, for diagnostics.
#[must_use]
pub fn card_actions(state: &GameState, at: Located) -> Vec<(Ability, Targets)> {
    catalog::candidates(state, at)
        .into_iter()
        .filter(|(ability, targets)| catalog::is_available(state, at, *ability, targets))
        .collect()
}
