//! Card definitions - static card data.
//!
//! `CardKind` names one of the cards the solver understands. Everything
//! about a kind that never changes during a game (name, cost, type tags,
//! how the mulligan and discard logic rank it) is derived from it here.
//!
//! Instance-specific data (tapped, counters, summoning sickness) is stored
//! separately in [`Card`](super::Card).

use serde::{Deserialize, Serialize};

use crate::core::mana::{ManaColor, ManaCost};

/// Set of type tags carried by a card.
///
/// Cards can hold several tags at once: Haunted Mire is a land that is
/// both a Forest and a Swamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardTypes(u16);

impl CardTypes {
    pub const NONE: Self = Self(0);
    pub const LAND: Self = Self(1 << 0);
    pub const FOREST: Self = Self(1 << 1);
    pub const SWAMP: Self = Self(1 << 2);
    pub const CREATURE: Self = Self(1 << 3);
    pub const DEFENDER: Self = Self(1 << 4);
    pub const ARTIFACT: Self = Self(1 << 5);
    pub const SORCERY: Self = Self(1 << 6);

    /// Check whether every tag in `other` is present.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two tag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for CardTypes {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A card the solver knows how to play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CardKind {
    // Lands
    Forest,
    Swamp,
    HauntedMire,
    // Mana creatures and walls
    TinderWall,
    WallOfRoots,
    OvergrownBattlement,
    SaruliCaretaker,
    ElvesOfDeepShadow,
    OrnithopterOfParadise,
    QuirionRanger,
    // Landcyclers
    GenerousEnt,
    TrollOfKhazadDum,
    SaguWildling,
    // Interaction
    MaskedVandal,
    MesmericFiend,
    // Combo
    BalustradeSpy,
    LotlethGiant,
    // Noncreature spells
    LotusPetal,
    LandGrant,
    WindingWay,
    LeadTheStampede,
    DreadReturn,
}

impl CardKind {
    /// Every supported card.
    pub const ALL: [CardKind; 22] = [
        CardKind::Forest,
        CardKind::Swamp,
        CardKind::HauntedMire,
        CardKind::TinderWall,
        CardKind::WallOfRoots,
        CardKind::OvergrownBattlement,
        CardKind::SaruliCaretaker,
        CardKind::ElvesOfDeepShadow,
        CardKind::OrnithopterOfParadise,
        CardKind::QuirionRanger,
        CardKind::GenerousEnt,
        CardKind::TrollOfKhazadDum,
        CardKind::SaguWildling,
        CardKind::MaskedVandal,
        CardKind::MesmericFiend,
        CardKind::BalustradeSpy,
        CardKind::LotlethGiant,
        CardKind::LotusPetal,
        CardKind::LandGrant,
        CardKind::WindingWay,
        CardKind::LeadTheStampede,
        CardKind::DreadReturn,
    ];

    /// Cards bottomed first when mulliganing or discarding, best to bottom first.
    pub const DEAD_CARD_PRIORITY: [CardKind; 4] = [
        CardKind::LotlethGiant,
        CardKind::DreadReturn,
        CardKind::MesmericFiend,
        CardKind::MaskedVandal,
    ];

    /// Printed card name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CardKind::Forest => "Forest",
            CardKind::Swamp => "Swamp",
            CardKind::HauntedMire => "Haunted Mire",
            CardKind::TinderWall => "Tinder Wall",
            CardKind::WallOfRoots => "Wall of Roots",
            CardKind::OvergrownBattlement => "Overgrown Battlement",
            CardKind::SaruliCaretaker => "Saruli Caretaker",
            CardKind::ElvesOfDeepShadow => "Elves of Deep Shadow",
            CardKind::OrnithopterOfParadise => "Ornithopter of Paradise",
            CardKind::QuirionRanger => "Quirion Ranger",
            CardKind::GenerousEnt => "Generous Ent",
            CardKind::TrollOfKhazadDum => "Troll of Khazad-dum",
            CardKind::SaguWildling => "Sagu Wildling",
            CardKind::MaskedVandal => "Masked Vandal",
            CardKind::MesmericFiend => "Mesmeric Fiend",
            CardKind::BalustradeSpy => "Balustrade Spy",
            CardKind::LotlethGiant => "Lotleth Giant",
            CardKind::LotusPetal => "Lotus Petal",
            CardKind::LandGrant => "Land Grant",
            CardKind::WindingWay => "Winding Way",
            CardKind::LeadTheStampede => "Lead the Stampede",
            CardKind::DreadReturn => "Dread Return",
        }
    }

    /// Look a card up by name, ignoring case and the diacritic in Khazad-dûm.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().replace('û', "u").to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().to_lowercase() == wanted)
    }

    /// Short lowercase token used in action names (`cast_for_forest`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            CardKind::Forest => "forest",
            CardKind::Swamp => "swamp",
            CardKind::HauntedMire => "mire",
            _ => "card",
        }
    }

    /// Parse an action-name slug back into a fetchable land.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        match slug {
            "forest" => Some(CardKind::Forest),
            "swamp" => Some(CardKind::Swamp),
            "mire" => Some(CardKind::HauntedMire),
            _ => None,
        }
    }

    /// Type tags.
    #[must_use]
    pub const fn types(self) -> CardTypes {
        match self {
            CardKind::Forest => CardTypes::LAND.union(CardTypes::FOREST),
            CardKind::Swamp => CardTypes::LAND.union(CardTypes::SWAMP),
            CardKind::HauntedMire => CardTypes::LAND.union(CardTypes::FOREST).union(CardTypes::SWAMP),
            CardKind::TinderWall
            | CardKind::WallOfRoots
            | CardKind::OvergrownBattlement
            | CardKind::SaruliCaretaker => CardTypes::CREATURE.union(CardTypes::DEFENDER),
            CardKind::LotusPetal => CardTypes::ARTIFACT,
            CardKind::LandGrant
            | CardKind::WindingWay
            | CardKind::LeadTheStampede
            | CardKind::DreadReturn => CardTypes::SORCERY,
            _ => CardTypes::CREATURE,
        }
    }

    /// Check a type tag.
    #[must_use]
    pub const fn is(self, types: CardTypes) -> bool {
        self.types().contains(types)
    }

    #[must_use]
    pub const fn is_land(self) -> bool {
        self.is(CardTypes::LAND)
    }

    #[must_use]
    pub const fn is_creature(self) -> bool {
        self.is(CardTypes::CREATURE)
    }

    /// Basic lands tap for exactly one color, so tapping them is never a choice.
    #[must_use]
    pub const fn is_basic_land(self) -> bool {
        matches!(self, CardKind::Forest | CardKind::Swamp)
    }

    /// Mana cost to cast. Lands have none.
    #[must_use]
    pub fn cost(self) -> ManaCost {
        use ManaColor::{Black, Green};
        match self {
            CardKind::Forest | CardKind::Swamp | CardKind::HauntedMire => ManaCost::free(),
            CardKind::TinderWall
            | CardKind::SaruliCaretaker
            | CardKind::ElvesOfDeepShadow
            | CardKind::QuirionRanger => ManaCost::free().with(Green, 1),
            CardKind::WallOfRoots
            | CardKind::OvergrownBattlement
            | CardKind::MaskedVandal
            | CardKind::LandGrant
            | CardKind::WindingWay => ManaCost::generic(1).with(Green, 1),
            CardKind::MesmericFiend => ManaCost::generic(1).with(Black, 1),
            CardKind::OrnithopterOfParadise => ManaCost::generic(2),
            CardKind::LeadTheStampede => ManaCost::generic(2).with(Green, 1),
            CardKind::BalustradeSpy => ManaCost::generic(3).with(Black, 1),
            // {4}{G} as printed
            CardKind::SaguWildling => ManaCost::generic(4).with(Green, 1),
            CardKind::GenerousEnt => ManaCost::generic(5).with(Green, 1),
            CardKind::TrollOfKhazadDum => ManaCost::generic(5).with(Black, 1),
            CardKind::LotlethGiant => ManaCost::generic(6).with(Black, 1),
            CardKind::LotusPetal => ManaCost::free(),
            CardKind::DreadReturn => ManaCost::generic(2).with(Black, 2),
        }
    }

    /// Rank among dead cards (0 = bottom first), `None` for live cards.
    #[must_use]
    pub fn dead_priority(self) -> Option<usize> {
        Self::DEAD_CARD_PRIORITY.iter().position(|&k| k == self)
    }

    /// Cards that would interact with the opponent in a real game.
    #[must_use]
    pub const fn is_interaction(self) -> bool {
        matches!(self, CardKind::MaskedVandal | CardKind::MesmericFiend)
    }

    /// Cards never picked as the "worst card" when discarding to hand size.
    #[must_use]
    pub const fn keep_on_discard(self) -> bool {
        self.is_land()
            || matches!(
                self,
                CardKind::LandGrant
                    | CardKind::GenerousEnt
                    | CardKind::TrollOfKhazadDum
                    | CardKind::SaguWildling
                    | CardKind::WindingWay
                    | CardKind::LeadTheStampede
                    | CardKind::LotusPetal
            )
    }
}

impl std::fmt::Display for CardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
