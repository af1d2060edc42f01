//! Action representation: card + ability + positional targets.
//!
//! Actions are compositional: a card (the source), an ability (the "verb")
//! and zero or more target positions (the "nouns"). System actions have no
//! source card. For example:
//! - `system_pass` = no card, no targets
//! - `cast` = card only
//! - `tap_creature_for_mana_G@2` = card + 1 target (battlefield index)
//! - `flashback_with_target@0,1-3-4` = card + graveyard target + three sacrifices
//!
//! The textual encoding is `name`, `name@i`, `name@i,j` or `name@i,j-k-l`;
//! [`Action::parse`] and `Display` round-trip it.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::entity::EntityId;
use super::mana::ManaColor;
use crate::cards::CardKind;

/// Target positions of an action. Up to four without heap allocation.
pub type Targets = SmallVec<[u8; 4]>;

/// Actions that belong to the game rather than to a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SystemAction {
    /// End our turn: Active -> Passing.
    Pass,
    /// Begin the next turn: Passing -> Active.
    StartNewTurn,
    /// Toggle which color generic costs consume first.
    SwitchManaStrategy,
}

impl SystemAction {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            SystemAction::Pass => "system_pass",
            SystemAction::StartNewTurn => "system_start_new_turn",
            SystemAction::SwitchManaStrategy => "system_switch_mana_strategy",
        }
    }
}

/// What a card does. Closed set; every card maps a subset of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    /// Play a land from hand.
    Play,
    /// Cast from hand, paying the printed cost.
    Cast,
    /// Tap this permanent for mana.
    TapForMana(ManaColor),
    /// Sacrifice this permanent for mana.
    SacrificeForMana(ManaColor),
    /// Put a -0/-1 counter on this permanent for mana.
    CounterForMana(ManaColor),
    /// Tap this and another untapped creature (target) for mana.
    TapCreatureForMana(ManaColor),
    /// Forestcycling, searching for the given land.
    Forestcycling(CardKind),
    /// Swampcycling, searching for the given land.
    Swampcycling(CardKind),
    /// Sagu Wildling's adventure, searching for the given land.
    RoostSeek(CardKind),
    /// Land Grant, searching for the given land.
    CastForLand { fetch: CardKind, free: bool },
    /// Return a Forest to hand to untap a creature (targets: creature, land).
    UntapBouncingLand,
    /// Cast with a graveyard target.
    CastWithTarget,
    /// Cast from the graveyard: graveyard target plus three sacrifices.
    Flashback,
}

impl Ability {
    /// Abilities usable after priority was passed.
    #[must_use]
    pub const fn is_instant_speed(self) -> bool {
        matches!(
            self,
            Ability::TapForMana(_)
                | Ability::SacrificeForMana(_)
                | Ability::CounterForMana(_)
                | Ability::TapCreatureForMana(_)
                | Ability::Forestcycling(_)
                | Ability::Swampcycling(_)
                | Ability::UntapBouncingLand
        )
    }

    /// Abilities that only add mana.
    #[must_use]
    pub const fn is_mana_ability(self) -> bool {
        matches!(
            self,
            Ability::TapForMana(_)
                | Ability::SacrificeForMana(_)
                | Ability::CounterForMana(_)
                | Ability::TapCreatureForMana(_)
        )
    }

    /// Abilities that search the library for a land.
    #[must_use]
    pub const fn is_land_tutor(self) -> bool {
        matches!(
            self,
            Ability::Forestcycling(_) | Ability::Swampcycling(_) | Ability::RoostSeek(_)
        )
    }

    /// Abilities that put a spell onto the stack.
    #[must_use]
    pub const fn is_cast(self) -> bool {
        matches!(
            self,
            Ability::Cast | Ability::CastForLand { .. } | Ability::CastWithTarget | Ability::Flashback
        )
    }

    fn parse(name: &str) -> Option<Self> {
        let color = |s: &str| {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => ManaColor::from_symbol(c),
                _ => None,
            }
        };
        let ability = match name {
            "play" => Ability::Play,
            "cast" => Ability::Cast,
            "untap_creature_bouncing_land" => Ability::UntapBouncingLand,
            "cast_with_target" => Ability::CastWithTarget,
            "flashback_with_target" => Ability::Flashback,
            _ => {
                if let Some(c) = name.strip_prefix("tap_for_mana_") {
                    Ability::TapForMana(color(c)?)
                } else if let Some(c) = name.strip_prefix("sacrifice_for_mana_") {
                    Ability::SacrificeForMana(color(c)?)
                } else if let Some(c) = name.strip_prefix("put_counter_for_mana_") {
                    Ability::CounterForMana(color(c)?)
                } else if let Some(c) = name.strip_prefix("tap_creature_for_mana_") {
                    Ability::TapCreatureForMana(color(c)?)
                } else if let Some(s) = name.strip_prefix("forestcycling_") {
                    Ability::Forestcycling(CardKind::from_slug(s)?)
                } else if let Some(s) = name.strip_prefix("swampcycling_") {
                    Ability::Swampcycling(CardKind::from_slug(s)?)
                } else if let Some(s) = name.strip_prefix("roost_seek_") {
                    Ability::RoostSeek(CardKind::from_slug(s)?)
                } else if let Some(rest) = name.strip_prefix("cast_for_") {
                    match rest.strip_suffix("_for_free") {
                        Some(s) => Ability::CastForLand { fetch: CardKind::from_slug(s)?, free: true },
                        None => Ability::CastForLand { fetch: CardKind::from_slug(rest)?, free: false },
                    }
                } else {
                    return None;
                }
            }
        };
        Some(ability)
    }
}

impl std::fmt::Display for Ability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Ability::Play => write!(f, "play"),
            Ability::Cast => write!(f, "cast"),
            Ability::TapForMana(c) => write!(f, "tap_for_mana_{}", c.symbol()),
            Ability::SacrificeForMana(c) => write!(f, "sacrifice_for_mana_{}", c.symbol()),
            Ability::CounterForMana(c) => write!(f, "put_counter_for_mana_{}", c.symbol()),
            Ability::TapCreatureForMana(c) => write!(f, "tap_creature_for_mana_{}", c.symbol()),
            Ability::Forestcycling(k) => write!(f, "forestcycling_{}", k.slug()),
            Ability::Swampcycling(k) => write!(f, "swampcycling_{}", k.slug()),
            Ability::RoostSeek(k) => write!(f, "roost_seek_{}", k.slug()),
            Ability::CastForLand { fetch, free: false } => write!(f, "cast_for_{}", fetch.slug()),
            Ability::CastForLand { fetch, free: true } => write!(f, "cast_for_{}_for_free", fetch.slug()),
            Ability::UntapBouncingLand => write!(f, "untap_creature_bouncing_land"),
            Ability::CastWithTarget => write!(f, "cast_with_target"),
            Ability::Flashback => write!(f, "flashback_with_target"),
        }
    }
}

/// A complete game action.
///
/// ## Example
///
/// ```
/// use spy_solitaire::core::{Action, Ability, EntityId};
///
/// let pass = Action::pass();
/// assert_eq!(pass.to_string(), "system_pass");
///
/// let tap = Action::card(EntityId(3), Ability::Play, &[]);
/// assert_eq!(tap.to_string(), "play");
///
/// let flashback = Action::card(EntityId(5), Ability::Flashback, &[0, 1, 3, 4]);
/// assert_eq!(flashback.to_string(), "flashback_with_target@0,1-3-4");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    System(SystemAction),
    Card {
        /// Source card.
        card: EntityId,
        ability: Ability,
        /// Zone positions the ability points at.
        targets: Targets,
    },
}

impl Action {
    #[must_use]
    pub fn pass() -> Self {
        Action::System(SystemAction::Pass)
    }

    #[must_use]
    pub fn start_new_turn() -> Self {
        Action::System(SystemAction::StartNewTurn)
    }

    #[must_use]
    pub fn switch_mana_strategy() -> Self {
        Action::System(SystemAction::SwitchManaStrategy)
    }

    /// Create a card action with the given targets.
    #[must_use]
    pub fn card(card: EntityId, ability: Ability, targets: &[u8]) -> Self {
        Action::Card {
            card,
            ability,
            targets: SmallVec::from_slice(targets),
        }
    }

    /// Source card, if any.
    #[must_use]
    pub fn source(&self) -> Option<EntityId> {
        match self {
            Action::System(_) => None,
            Action::Card { card, .. } => Some(*card),
        }
    }

    /// Ability, if this is a card action.
    #[must_use]
    pub fn ability(&self) -> Option<Ability> {
        match self {
            Action::System(_) => None,
            Action::Card { ability, .. } => Some(*ability),
        }
    }

    /// Either of the two turn-advancing system actions.
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(
            self,
            Action::System(SystemAction::Pass) | Action::System(SystemAction::StartNewTurn)
        )
    }

    #[must_use]
    pub fn is_system(&self) -> bool {
        matches!(self, Action::System(_))
    }

    /// Parse the textual encoding. `card` is required for card actions.
    pub fn parse(card: Option<EntityId>, text: &str) -> Result<Self, ActionParseError> {
        for system in [SystemAction::Pass, SystemAction::StartNewTurn, SystemAction::SwitchManaStrategy] {
            if text == system.name() {
                return Ok(Action::System(system));
            }
        }

        let (name, target_text) = match text.split_once('@') {
            Some((name, targets)) => (name, Some(targets)),
            None => (text, None),
        };
        let ability = Ability::parse(name).ok_or_else(|| ActionParseError::UnknownAbility(name.to_string()))?;
        let card = card.ok_or_else(|| ActionParseError::MissingCard(text.to_string()))?;

        let mut targets = Targets::new();
        if let Some(target_text) = target_text {
            let (first, rest) = match target_text.split_once(',') {
                Some((first, rest)) => (first, Some(rest)),
                None => (target_text, None),
            };
            let index = |s: &str| {
                s.parse::<u8>()
                    .map_err(|_| ActionParseError::BadTarget(text.to_string()))
            };
            targets.push(index(first)?);
            if let Some(rest) = rest {
                for part in rest.split('-') {
                    targets.push(index(part)?);
                }
            }
        }

        Ok(Action::Card { card, ability, targets })
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::System(system) => f.write_str(system.name()),
            Action::Card { ability, targets, .. } => {
                write!(f, "{ability}")?;
                if let Some((first, rest)) = targets.split_first() {
                    write!(f, "@{first}")?;
                    for (i, t) in rest.iter().enumerate() {
                        write!(f, "{}{t}", if i == 0 { ',' } else { '-' })?;
                    }
                }
                Ok(())
            }
        }
    }
}

/// Error returned by [`Action::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionParseError {
    UnknownAbility(String),
    MissingCard(String),
    BadTarget(String),
}

impl std::fmt::Display for ActionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionParseError::UnknownAbility(name) => write!(f, "unknown action name '{name}'"),
            ActionParseError::MissingCard(text) => write!(f, "action '{text}' needs a source card"),
            ActionParseError::BadTarget(text) => write!(f, "malformed targets in '{text}'"),
        }
    }
}

impl std::error::Error for ActionParseError {}

/// One applied action, recorded in the state history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggedStep {
    /// Turn number when the action was taken.
    pub turn: u32,

    /// Source card, `None` for system actions.
    pub card: Option<CardKind>,

    /// Encoded action.
    pub action: String,
}

impl std::fmt::Display for LoggedStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.card {
            Some(card) => write!(f, "T{} {}: {}", self.turn, card, self.action),
            None => write!(f, "T{} {}", self.turn, self.action),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(action: &Action) -> Action {
        Action::parse(action.source(), &action.to_string()).unwrap()
    }

    #[test]
    fn test_system_actions() {
        assert_eq!(Action::pass().to_string(), "system_pass");
        assert_eq!(Action::parse(None, "system_start_new_turn").unwrap(), Action::start_new_turn());
        assert!(Action::pass().is_pass());
        assert!(Action::start_new_turn().is_pass());
        assert!(!Action::switch_mana_strategy().is_pass());
    }

    #[test]
    fn test_target_encoding() {
        let id = EntityId(4);
        assert_eq!(Action::card(id, Ability::CastWithTarget, &[2]).to_string(), "cast_with_target@2");
        assert_eq!(Action::card(id, Ability::UntapBouncingLand, &[1, 0]).to_string(), "untap_creature_bouncing_land@1,0");
        assert_eq!(Action::card(id, Ability::Flashback, &[0, 1, 2, 3]).to_string(), "flashback_with_target@0,1-2-3");
    }

    #[test]
    fn test_every_ability_parses_back() {
        let id = EntityId(9);
        let actions = [
            Action::card(id, Ability::Play, &[]),
            Action::card(id, Ability::Cast, &[]),
            Action::card(id, Ability::TapForMana(ManaColor::Black), &[]),
            Action::card(id, Ability::SacrificeForMana(ManaColor::Red), &[]),
            Action::card(id, Ability::CounterForMana(ManaColor::Green), &[]),
            Action::card(id, Ability::TapCreatureForMana(ManaColor::Green), &[3]),
            Action::card(id, Ability::Forestcycling(CardKind::HauntedMire), &[]),
            Action::card(id, Ability::Swampcycling(CardKind::Swamp), &[]),
            Action::card(id, Ability::RoostSeek(CardKind::Forest), &[]),
            Action::card(id, Ability::CastForLand { fetch: CardKind::Forest, free: true }, &[]),
            Action::card(id, Ability::CastForLand { fetch: CardKind::HauntedMire, free: false }, &[]),
            Action::card(id, Ability::UntapBouncingLand, &[0, 2]),
            Action::card(id, Ability::Flashback, &[1, 0, 2, 4]),
        ];
        for action in &actions {
            assert_eq!(&round_trip(action), action, "{action}");
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Action::parse(Some(EntityId(1)), "explode"),
            Err(ActionParseError::UnknownAbility("explode".to_string()))
        );
        assert!(matches!(Action::parse(None, "cast"), Err(ActionParseError::MissingCard(_))));
        assert!(matches!(
            Action::parse(Some(EntityId(1)), "cast_with_target@x"),
            Err(ActionParseError::BadTarget(_))
        ));
    }

    #[test]
    fn test_speed() {
        assert!(Ability::TapForMana(ManaColor::Green).is_instant_speed());
        assert!(Ability::Forestcycling(CardKind::Forest).is_instant_speed());
        assert!(!Ability::RoostSeek(CardKind::Forest).is_instant_speed());
        assert!(!Ability::Cast.is_instant_speed());
    }

    #[test]
    fn test_logged_step_display() {
        let step = LoggedStep { turn: 2, card: Some(CardKind::Forest), action: "play".to_string() };
        assert_eq!(step.to_string(), "T2 Forest: play");
    }
}
