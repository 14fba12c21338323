//! Deterministic random number generation for board placement and shuffles.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical boards and shuffles
//! - **Serializable**: O(1) state capture and restore for replaying a game
//! - **Context streams**: Independent sequences for different purposes,
//!   derived with `FxHasher` so a stored seed replays on any toolchain
//!
//! ## Usage
//!
//! ```
//! use theme_sweeper::core::GameRng;
//!
//! let rng = GameRng::new(42);
//!
//! // Separate streams for curation shuffles and mine placement
//! let mut board_rng = rng.for_context("board");
//! let mut curator_rng = rng.for_context("curator");
//!
//! assert_ne!(board_rng.gen_range_usize(0..1000), curator_rng.gen_range_usize(0..1000));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;

/// Deterministic RNG injected wherever the crate needs randomness.
///
/// Uses ChaCha8 for speed while keeping a high-quality uniform stream,
/// which the Fisher-Yates shuffle relies on for unbiased permutations.
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
    ///
    /// The chosen seed is kept, so `seed()` still allows replaying the game.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Create an independent stream for a specific context.
    ///
    /// The same context always produces the same stream from the same seed.
    #[must_use]
    pub fn for_context(&self, context: &str) -> Self {
        Self::new(context_seed(self.seed, context))
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place. Every permutation is equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Return a shuffled copy of `items`, leaving the input untouched.
    #[must_use]
    pub fn shuffled<T: Clone>(&mut self, items: &[T]) -> Vec<T> {
        let mut copy = items.to_vec();
        self.shuffle(&mut copy);
        copy
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

/// Serializable RNG state for replaying a board.
///
/// Uses the ChaCha8 word position, so capture is O(1) regardless of
/// how many values have been drawn.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}

/// Seed of a named sub-stream. Fixed function of its inputs: `FxHasher`
/// over the root seed and the context bytes.
fn context_seed(seed: u64, context: &str) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write_u64(seed);
    hasher.write(context.as_bytes());
    hasher.finish()
}
