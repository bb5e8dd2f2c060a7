//! Deterministic random number generation for dealing and end screens.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces an identical deal
//! - **Context streams**: Independent sequences for different purposes, so
//!   changing how many jitter values a layout draws never changes the deck
//!
//! ```
//! use memory_kiosk::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! let mut deck_rng = rng.for_context("deck");
//! let mut jitter_rng = rng.for_context("jitter");
//!
//! // Streams are independent but reproducible.
//! let mut again = GameRng::new(42).for_context("deck");
//! assert_eq!(deck_rng.gen_range(0..100), again.gen_range(0..100));
//! assert!((-4..=4).contains(&jitter_rng.jitter(4)));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::hash::{Hash, Hasher};

/// Deterministic RNG backed by ChaCha8.
///
/// Kiosk sessions seed one `GameRng` per round and split it into context
/// streams for the deck, the layout jitter and the end-screen messages.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;

        let mut hasher = DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        let context_seed = hasher.finish();

        Self::new(context_seed)
    }

    /// Derive the seed for the next round from this stream.
    pub fn next_seed(&mut self) -> u64 {
        self.inner.gen()
    }

    /// Generate a random integer in `-spread..=spread`.
    ///
    /// A spread of zero always yields zero.
    pub fn jitter(&mut self, spread: u32) -> i32 {
        let spread = spread.min(i32::MAX as u32) as i32;
        self.inner.gen_range(-spread..=spread)
    }

    /// Generate a random index in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }
}
