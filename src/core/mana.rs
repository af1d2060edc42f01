//! Mana colors, costs, the floating mana pool and the spending strategy.
//!
//! ## Payment
//!
//! Colored pips are paid first from their own color. Generic mana is then
//! paid greedily, color by color, in the order given by the active
//! [`ManaStrategy`]. The two strategies differ only in whether Black or
//! Green is spent first, which decides what is left floating for the next
//! spell.

use serde::{Deserialize, Serialize};

/// One of the six mana types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ManaColor {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl ManaColor {
    /// All colors in pool order.
    pub const ALL: [ManaColor; 6] = [
        ManaColor::White,
        ManaColor::Blue,
        ManaColor::Black,
        ManaColor::Red,
        ManaColor::Green,
        ManaColor::Colorless,
    ];

    /// Index into a pool array.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            ManaColor::White => 0,
            ManaColor::Blue => 1,
            ManaColor::Black => 2,
            ManaColor::Red => 3,
            ManaColor::Green => 4,
            ManaColor::Colorless => 5,
        }
    }

    /// Single-letter symbol (`W U B R G C`).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            ManaColor::White => 'W',
            ManaColor::Blue => 'U',
            ManaColor::Black => 'B',
            ManaColor::Red => 'R',
            ManaColor::Green => 'G',
            ManaColor::Colorless => 'C',
        }
    }

    /// Parse a single-letter symbol.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.symbol() == symbol)
    }
}

/// A mana cost: generic amount plus colored pips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ManaCost {
    generic: u32,
    pips: [u32; 6],
}

impl ManaCost {
    /// A cost of nothing.
    #[must_use]
    pub fn free() -> Self {
        Self::default()
    }

    /// A purely generic cost.
    #[must_use]
    pub fn generic(amount: u32) -> Self {
        Self { generic: amount, ..Self::default() }
    }

    /// Add colored pips to the cost.
    #[must_use]
    pub fn with(mut self, color: ManaColor, amount: u32) -> Self {
        self.pips[color.index()] += amount;
        self
    }

    /// Generic part of the cost.
    #[must_use]
    pub fn generic_amount(&self) -> u32 {
        self.generic
    }

    /// Colored pips of one color.
    #[must_use]
    pub fn pips(&self, color: ManaColor) -> u32 {
        self.pips[color.index()]
    }

    /// Converted mana value.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.generic + self.pips.iter().sum::<u32>()
    }
}

impl std::fmt::Display for ManaCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.total() == 0 {
            return write!(f, "0");
        }
        if self.generic > 0 {
            write!(f, "{}", self.generic)?;
        }
        for color in ManaColor::ALL {
            for _ in 0..self.pips(color) {
                write!(f, "{}", color.symbol())?;
            }
        }
        Ok(())
    }
}

/// Which color generic costs consume first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManaStrategy {
    /// Spend Black before Green for generic costs (keeps Green floating).
    #[default]
    PreserveGreen,
    /// Spend Green before Black for generic costs (keeps Black floating).
    PreserveBlack,
}

impl ManaStrategy {
    /// Generic payment order for this strategy.
    #[must_use]
    pub const fn order(self) -> [ManaColor; 6] {
        use ManaColor::*;
        match self {
            ManaStrategy::PreserveGreen => [Colorless, Red, Black, Green, White, Blue],
            ManaStrategy::PreserveBlack => [Colorless, Red, Green, Black, White, Blue],
        }
    }

    /// The other strategy.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            ManaStrategy::PreserveGreen => ManaStrategy::PreserveBlack,
            ManaStrategy::PreserveBlack => ManaStrategy::PreserveGreen,
        }
    }
}

/// Returned when a pool cannot cover a cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsufficientMana {
    pub cost: ManaCost,
    pub pool: ManaPool,
}

impl std::fmt::Display for InsufficientMana {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot pay {} from pool {}", self.cost, self.pool)
    }
}

impl std::error::Error for InsufficientMana {}

/// Floating mana, one non-negative counter per color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ManaPool([u32; 6]);

impl ManaPool {
    /// Create an empty pool.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Amount of one color.
    #[must_use]
    pub fn get(&self, color: ManaColor) -> u32 {
        self.0[color.index()]
    }

    /// Total floating mana.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Check whether nothing is floating.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Add mana of one color.
    pub fn add(&mut self, color: ManaColor, amount: u32) {
        self.0[color.index()] += amount;
    }

    /// Empty the pool.
    pub fn clear(&mut self) {
        self.0 = [0; 6];
    }

    /// Check whether `cost` can be paid.
    ///
    /// Greedy generic payment never strands a payable cost, so the answer
    /// does not depend on the strategy.
    #[must_use]
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        let mut remaining = 0;
        for color in ManaColor::ALL {
            let have = self.get(color);
            let need = cost.pips(color);
            if have < need {
                return false;
            }
            remaining += have - need;
        }
        remaining >= cost.generic_amount()
    }

    /// Pay `cost`, colored pips first and then generic in `strategy` order.
    ///
    /// The pool is left untouched on failure.
    pub fn pay(&mut self, cost: &ManaCost, strategy: ManaStrategy) -> Result<(), InsufficientMana> {
        if !self.can_pay(cost) {
            return Err(InsufficientMana { cost: *cost, pool: *self });
        }
        for color in ManaColor::ALL {
            self.0[color.index()] -= cost.pips(color);
        }
        let mut generic = cost.generic_amount();
        for color in strategy.order() {
            if generic == 0 {
                break;
            }
            let slot = &mut self.0[color.index()];
            let spent = (*slot).min(generic);
            *slot -= spent;
            generic -= spent;
        }
        Ok(())
    }
}

impl std::fmt::Display for ManaPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for color in ManaColor::ALL {
            let amount = self.get(color);
            if amount > 0 {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}{}", color.symbol(), amount)?;
                first = false;
            }
        }
        if first {
            write!(f, "-")?;
        }
        Ok(())
    }
}
