//! Deterministic random number generation for dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces the same deal
//! - **Uniform shuffle**: Explicit Fisher–Yates over ChaCha8
//! - **Subset draw**: Pick `n` distinct symbols from a larger pool
//!
//! ```
//! use memory_match::core::GameRng;
//!
//! let mut a = GameRng::new(42);
//! let mut b = GameRng::new(42);
//!
//! let mut left = vec![1, 2, 3, 4, 5, 6];
//! let mut right = left.clone();
//! a.shuffle(&mut left);
//! b.shuffle(&mut right);
//! assert_eq!(left, right);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used by the board to deal decks.
///
/// Uses ChaCha8 for speed while keeping good statistical quality.
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

    /// Create an RNG seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    ///
    /// Fisher–Yates: walks from the last index down to 1 and swaps each
    /// position with a uniformly chosen index in `[0, i]`.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.inner.gen_range(0..=i);
            slice.swap(i, j);
        }
    }

    /// Choose `amount` distinct indices from `0..len`, in random order.
    ///
    /// Runs a partial Fisher–Yates over the index range, so every subset is
    /// equally likely. `amount` is clamped to `len`.
    pub fn choose_distinct(&mut self, len: usize, amount: usize) -> Vec<usize> {
        let amount = amount.min(len);
        let mut indices: Vec<usize> = (0..len).collect();
        for i in 0..amount {
            let j = self.inner.gen_range(i..len);
            indices.swap(i, j);
        }
        indices.truncate(amount);
        indices
    }
}
