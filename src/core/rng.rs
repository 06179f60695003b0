//! Seeded randomness for a session.
//!
//! One `GameRng` per game feeds the deck shuffle, every bag shuffle on
//! replenish, and the first-player draw. Replaying the same decisions on the
//! same seed reproduces the game exactly.
//!
//! ```
//! use crown_duel::core::GameRng;
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! let mut tokens_a = vec!['W', 'R', 'B', 'G', 'K'];
//! let mut tokens_b = tokens_a.clone();
//! a.shuffle(&mut tokens_a);
//! b.shuffle(&mut tokens_b);
//! assert_eq!(tokens_a, tokens_b);
//! ```

use std::hash::{Hash, Hasher};

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::seat::PlayerId;

/// ChaCha8 generator that remembers its seed.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// A separate stream derived from the seed and a label.
    ///
    /// Draws from the stream leave `self` untouched, so adding or removing a
    /// labelled draw does not shift the deck and bag shuffles.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        self.seed.hash(&mut hasher);
        context.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn below(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform seat at a table of `player_count`.
    pub fn pick_seat(&mut self, player_count: usize) -> PlayerId {
        PlayerId::new(self.below(player_count.max(1)) as u8)
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}
