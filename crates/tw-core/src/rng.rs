//! Deterministic simulation RNG and the shuffle seam the engine consumes.
//!
//! # Determinism
//!
//! The engine never draws randomness on its own.  The only consumer is the
//! movement resolver, which needs a shuffle to randomise conflict order.  It
//! takes any [`Shuffle`] implementor, so hosts can inject:
//!
//! - [`SimRng`]: a seeded `SmallRng`; the same seed always produces the same
//!   sequence of shuffles, hence the same resolutions;
//! - [`IdentityShuffle`]: leaves the slice untouched, for tests that need a
//!   fixed conflict order.

use rand::distributions::uniform::{SampleRange, SampleUniform};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Odd 64-bit constant (2^64 / φ) used to spread stream ids.
const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

// ── Shuffle ───────────────────────────────────────────────────────────────────

/// Anything that can permute a slice in place.
pub trait Shuffle {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}

/// A [`Shuffle`] that leaves the slice in its original order.
#[derive(Copy, Clone, Debug, Default)]
pub struct IdentityShuffle;

impl Shuffle for IdentityShuffle {
    #[inline]
    fn shuffle<T>(&mut self, _slice: &mut [T]) {}
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Seeded engine RNG.
///
/// Single-threaded like the rest of the engine.  Split off an independent
/// stream per subsystem with [`SimRng::child`] so extra draws in one place
/// leave the others' sequences alone.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Fork a new stream.  Distinct `stream` ids give unrelated sequences.
    pub fn child(&mut self, stream: u64) -> SimRng {
        let seed = self.0.r#gen::<u64>() ^ stream.wrapping_mul(GOLDEN_GAMMA);
        Self(SmallRng::seed_from_u64(seed))
    }

    /// Uniform sample from `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

impl Shuffle for SimRng {
    #[inline]
    fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.0);
    }
}
