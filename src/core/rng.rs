//! Seeded shuffling.
//!
//! Library order is the only randomness in a goldfish game. Every run is
//! reproducible from its seed: the initial shuffle, each mulligan redraw
//! (through [`GameRng::fork`]) and every in-game library shuffle.
//!
//! ```
//! use spy_solitaire::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut redraw = rng.fork();
//! assert_ne!(rng.seed(), redraw.seed());
//!
//! let mut library = vec![1, 2, 3, 4, 5, 6, 7, 8];
//! redraw.shuffle(&mut library);
//! assert_eq!(library.len(), 8);
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Odd constant spreading consecutive fork indices over the seed space.
const FORK_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// ChaCha8 stream plus the seed it came from.
///
/// Cloning copies the stream position, so a cloned state shuffles exactly
/// like its parent would have.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    forks: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            forks: 0,
        }
    }

    /// Derive the next independent stream.
    ///
    /// The n-th fork of a given seed is always the same stream, regardless of
    /// how much the parent was used in between.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.forks += 1;
        Self::new(self.seed.wrapping_add(self.forks.wrapping_mul(FORK_STRIDE)))
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardKind, Deck};

    fn shuffled_deck(rng: &mut GameRng) -> Vec<CardKind> {
        let mut cards = Deck::stock().cards();
        rng.shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_same_seed_same_library() {
        assert_eq!(shuffled_deck(&mut GameRng::new(7)), shuffled_deck(&mut GameRng::new(7)));
        assert_ne!(shuffled_deck(&mut GameRng::new(7)), shuffled_deck(&mut GameRng::new(8)));
    }

    #[test]
    fn test_forks_ignore_parent_usage() {
        let mut used = GameRng::new(3);
        shuffled_deck(&mut used);
        let mut fresh = GameRng::new(3);

        let mut a = used.fork();
        let mut b = fresh.fork();
        assert_eq!(shuffled_deck(&mut a), shuffled_deck(&mut b));

        // the second fork is a different stream
        let c = fresh.fork();
        assert_ne!(c.seed(), b.seed());
    }

    #[test]
    fn test_clone_continues_the_stream() {
        let mut rng = GameRng::new(11);
        shuffled_deck(&mut rng);
        let mut copy = rng.clone();
        assert_eq!(shuffled_deck(&mut rng), shuffled_deck(&mut copy));
    }
}
