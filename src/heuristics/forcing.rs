//! Forcing heuristics, in the order the standard set applies them.

use super::{is_card_ability, source_kind, ForcingHeuristic};
use crate::cards::CardKind;
use crate::core::{Ability, Action, GameState, ManaColor, SystemAction};
use crate::zones::Zone;

/// Damage Lotleth Giant deals beyond the creatures already in the graveyard
/// when reanimated by flashback: three sacrifices in, the Giant itself out.
const FLASHBACK_EXTRA_DAMAGE: u32 = 2;

fn card_actions(actions: &[Action]) -> impl Iterator<Item = &Action> {
    actions.iter().filter(|a| !a.is_system())
}

/// With exactly one legal action there is nothing to explore.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnlyAction;

impl ForcingHeuristic for OnlyAction {
    fn name(&self) -> &'static str {
        "only_action"
    }

    fn force(&self, _state: &GameState, actions: &[Action]) -> Option<Action> {
        match actions {
            [only] => Some(only.clone()),
            _ => None,
        }
    }
}

/// Flash back Dread Return onto Lotleth Giant when that kills.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlashbackGiantForLethal;

impl ForcingHeuristic for FlashbackGiantForLethal {
    fn name(&self) -> &'static str {
        "flashback_giant_for_lethal"
    }

    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action> {
        let damage = state.creatures_in_graveyard() + FLASHBACK_EXTRA_DAMAGE;
        if i64::from(damage) < i64::from(state.opponent_life) {
            return None;
        }
        // Which creatures get sacrificed does not matter.
        actions
            .iter()
            .find(|action| match action {
                Action::Card { ability: Ability::Flashback, targets, .. } => targets
                    .first()
                    .and_then(|&i| state.zones[Zone::Graveyard].get(i as usize))
                    .is_some_and(|c| c.kind == CardKind::LotlethGiant),
                _ => false,
            })
            .cloned()
    }
}

/// Play the land if that is the only card action.
#[derive(Clone, Copy, Debug, Default)]
pub struct OnlyLandPlay;

impl ForcingHeuristic for OnlyLandPlay {
    fn name(&self) -> &'static str {
        "only_land_play"
    }

    fn force(&self, _state: &GameState, actions: &[Action]) -> Option<Action> {
        let mut cards = card_actions(actions);
        match (cards.next(), cards.next()) {
            (Some(only), None) if only.ability() == Some(Ability::Play) => Some(only.clone()),
            _ => None,
        }
    }
}

/// Tapping a basic land costs nothing and is never worse than waiting.
#[derive(Clone, Copy, Debug, Default)]
pub struct TapBasicLand;

impl ForcingHeuristic for TapBasicLand {
    fn name(&self) -> &'static str {
        "tap_basic_land"
    }

    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action> {
        actions
            .iter()
            .find(|a| match (source_kind(state, a), a.ability()) {
                (Some(kind), Some(Ability::TapForMana(color))) => basic_color(kind) == Some(color),
                _ => false,
            })
            .cloned()
    }
}

fn basic_color(kind: CardKind) -> Option<ManaColor> {
    match kind {
        CardKind::Forest => Some(ManaColor::Green),
        CardKind::Swamp => Some(ManaColor::Black),
        _ => None,
    }
}

/// Take the free Land Grant when only one kind of land can be fetched for free.
#[derive(Clone, Copy, Debug, Default)]
pub struct FreeLandGrant;

impl ForcingHeuristic for FreeLandGrant {
    fn name(&self) -> &'static str {
        "free_land_grant"
    }

    fn force(&self, _state: &GameState, actions: &[Action]) -> Option<Action> {
        let mut free = actions
            .iter()
            .filter(|a| matches!(a.ability(), Some(Ability::CastForLand { free: true, .. })));
        match (free.next(), free.next()) {
            (Some(only), None) => Some(only.clone()),
            _ => None,
        }
    }
}

/// Lotus Petal costs nothing to cast and keeps its mana for later.
#[derive(Clone, Copy, Debug, Default)]
pub struct CastLotusPetal;

impl ForcingHeuristic for CastLotusPetal {
    fn name(&self) -> &'static str {
        "cast_lotus_petal"
    }

    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action> {
        actions
            .iter()
            .find(|a| is_card_ability(state, a, CardKind::LotusPetal, Ability::Cast))
            .cloned()
    }
}

/// Switching strategy right before passing changes nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoUselessManaSwitch;

impl ForcingHeuristic for NoUselessManaSwitch {
    fn name(&self) -> &'static str {
        "no_useless_mana_switch"
    }

    fn force(&self, _state: &GameState, actions: &[Action]) -> Option<Action> {
        match actions {
            [Action::System(SystemAction::SwitchManaStrategy), other] if other.is_pass() => Some(other.clone()),
            [other, Action::System(SystemAction::SwitchManaStrategy)] if other.is_pass() => Some(other.clone()),
            _ => None,
        }
    }
}

/// Saruli Caretaker gives Overgrown Battlement another defender to count.
#[derive(Clone, Copy, Debug, Default)]
pub struct CastSaruliBeforeBattlement;

impl ForcingHeuristic for CastSaruliBeforeBattlement {
    fn name(&self) -> &'static str {
        "cast_saruli_before_battlement"
    }

    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action> {
        let battlement_ready = actions.iter().any(|a| {
            source_kind(state, a) == Some(CardKind::OvergrownBattlement)
                && matches!(a.ability(), Some(Ability::TapForMana(_)))
        });
        if !battlement_ready {
            return None;
        }
        actions
            .iter()
            .find(|a| is_card_ability(state, a, CardKind::SaruliCaretaker, Ability::Cast))
            .cloned()
    }
}

/// Cast a spell rather than pass when that is the only alternative.
///
/// Balustrade Spy is excluded: milling early can lose the game.
#[derive(Clone, Copy, Debug, Default)]
pub struct CastOnlySpell;

impl ForcingHeuristic for CastOnlySpell {
    fn name(&self) -> &'static str {
        "cast_only_spell"
    }

    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action> {
        let [first, second] = actions else {
            return None;
        };
        let (spell, pass) = if first.is_system() { (second, first) } else { (first, second) };
        let is_spell = spell.ability().is_some_and(Ability::is_cast);
        let passes = *pass == Action::pass();
        (is_spell && passes && source_kind(state, spell) != Some(CardKind::BalustradeSpy)).then(|| spell.clone())
    }
}

/// Fetch a land rather than pass when that is the only alternative.
#[derive(Clone, Copy, Debug, Default)]
pub struct TutorOnlyLand;

impl ForcingHeuristic for TutorOnlyLand {
    fn name(&self) -> &'static str {
        "tutor_only_land"
    }

    fn force(&self, _state: &GameState, actions: &[Action]) -> Option<Action> {
        let [first, second] = actions else {
            return None;
        };
        let (tutor, pass) = if first.is_system() { (second, first) } else { (first, second) };
        (tutor.ability().is_some_and(Ability::is_land_tutor) && pass.is_pass()).then(|| tutor.clone())
    }
}

/// Cast Balustrade Spy once it is guaranteed to mill the whole library.
///
/// Every land of the deck must be accounted for (in play, in hand, in the
/// graveyard, or known at the bottom), the flashback needs two creatures
/// besides the Spy, and both Dread Return and Lotleth Giant must still be
/// in the library so the mill puts them in the graveyard.
#[derive(Clone, Copy, Debug, Default)]
pub struct MillWithSpy;

impl ForcingHeuristic for MillWithSpy {
    fn name(&self) -> &'static str {
        "mill_with_spy"
    }

    fn force(&self, state: &GameState, actions: &[Action]) -> Option<Action> {
        let spy = actions
            .iter()
            .find(|a| is_card_ability(state, a, CardKind::BalustradeSpy, Ability::Cast))?;

        let lands = |zone: Zone| state.zones.count(zone, |c| c.kind.is_land()) as u32;
        let accounted = lands(Zone::Lands) + lands(Zone::Hand) + lands(Zone::Graveyard) + state.known_bottom_lands;
        let ready = accounted == state.lands_in_deck
            && state.creatures_in_play() >= 2
            && state.zones.contains(Zone::Library, CardKind::DreadReturn)
            && state.zones.contains(Zone::Library, CardKind::LotlethGiant);
        ready.then(|| spy.clone())
    }
}
