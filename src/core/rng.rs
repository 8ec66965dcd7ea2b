//! Deterministic random number generation.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Injectable**: The engine owns its `GameRng`; nothing is global
//! - **Serializable**: O(1) state capture and restore
//! - **Context streams**: Independent sequences for different purposes
//!
//! ## Usage
//!
//! ```
//! use match3_engine::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! // Board refills and bonus placement draw from separate streams, so
//! // adding a bonus never shifts the colors of later refills.
//! let mut refill = rng.for_context("refill");
//! let mut bonus = rng.for_context("bonus");
//! let _ = refill.gen_range_usize(0..5);
//! let _ = bonus.gen_range_usize(0..4);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// Deterministic RNG used for tile draws and bonus placement.
///
/// Uses ChaCha8 for speed while keeping a stable, seedable sequence.
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

        Self {
            inner: ChaCha8Rng::seed_from_u64(context_seed),
            seed: context_seed,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Pick a uniformly random element, `None` for an empty slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Stream seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draws(rng: &mut GameRng, n: usize) -> Vec<usize> {
        (0..n).map(|_| rng.gen_range_usize(0..5)).collect()
    }

    #[test]
    fn test_same_seed_same_draws() {
        assert_eq!(draws(&mut GameRng::new(42), 64), draws(&mut GameRng::new(42), 64));
        assert_ne!(draws(&mut GameRng::new(1), 64), draws(&mut GameRng::new(2), 64));
    }

    #[test]
    fn test_context_streams_are_independent() {
        let root = GameRng::new(42);
        let mut refill = root.for_context("refill");
        let mut bonus = root.for_context("bonus");
        assert_ne!(draws(&mut refill, 32), draws(&mut bonus, 32));

        // Draining one stream does not shift another.
        let mut fresh_bonus = root.for_context("bonus");
        let mut again = GameRng::new(42).for_context("bonus");
        assert_eq!(draws(&mut fresh_bonus, 16), draws(&mut again, 16));
    }

    #[test]
    fn test_choose() {
        let mut rng = GameRng::new(42);
        let cells = [3, 5, 8];
        for _ in 0..20 {
            assert!(cells.contains(rng.choose(&cells).unwrap()));
        }
        assert!(rng.choose::<u8>(&[]).is_none());
    }

    #[test]
    fn test_snapshot_resumes_sequence() {
        let mut rng = GameRng::new(7).for_context("refill");
        draws(&mut rng, 50);

        let snapshot = rng.state();
        let json = serde_json::to_string(&snapshot).unwrap();
        let restored_state: GameRngState = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, restored_state);

        let mut restored = GameRng::from_state(&restored_state);
        assert_eq!(draws(&mut rng, 20), draws(&mut restored, 20));
    }
}
