//! Deterministic random number generation.
//!
//! RULE: Nothing in the generator may call a process-wide RNG.
//! All randomness flows through ShiftRng instances derived from the
//! single master seed recorded on the generation run.
//!
//! Each concern gets its own stream, seeded from
//! (master_seed XOR stream_index * golden-ratio constant):
//!   - Adding a new stream never changes existing streams.
//!   - Each stream is fully reproducible in isolation.

use rand::{rngs::OsRng, seq::index, Rng, RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;
use serde::{Deserialize, Serialize};

/// How the master seed for a run is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedMode {
    /// Reproducible: the same seed and roster give the same month.
    Fixed(u64),
    /// Non-reproducible: the seed is drawn from OS entropy.
    /// The drawn seed is still reported so the run can be replayed.
    Entropy,
}

impl SeedMode {
    pub fn resolve(self) -> u64 {
        match self {
            SeedMode::Fixed(seed) => seed,
            SeedMode::Entropy => OsRng.next_u64(),
        }
    }
}

impl From<Option<u64>> for SeedMode {
    fn from(seed: Option<u64>) -> Self {
        seed.map_or(SeedMode::Entropy, SeedMode::Fixed)
    }
}

/// A deterministic RNG for a single concern.
pub struct ShiftRng {
    inner: Pcg64Mcg,
}

impl ShiftRng {
    /// Create a stream RNG from the master seed and a stable index.
    /// The index must never change once assigned.
    pub fn new(master_seed: u64, stream_index: u64) -> Self {
        let derived_seed = master_seed ^ (stream_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    /// Draw a raw u64 (full range).
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    /// Roll a usize in [0, n).
    pub fn below(&mut self, n: usize) -> usize {
        assert!(n > 0, "n must be > 0");
        self.inner.gen_range(0..n)
    }

    /// Roll a u32 uniformly in [lo, hi], both ends inclusive.
    pub fn between_inclusive(&mut self, lo: u32, hi: u32) -> u32 {
        assert!(lo <= hi, "lo must be <= hi");
        self.inner.gen_range(lo..=hi)
    }

    /// Draw `amount` distinct indices from [0, len) uniformly without
    /// replacement. `amount` must not exceed `len`.
    pub fn distinct_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        index::sample(&mut self.inner, len, amount).into_vec()
    }

    /// Pick one element uniformly.
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len())]
    }
}

/// All stream RNGs for a single generation run, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_stream(&self, stream: RngStream) -> ShiftRng {
        ShiftRng::new(self.master_seed, stream as u64)
    }
}

/// Stable stream slot assignments.
/// NEVER reorder or remove entries; only append.
/// Reordering changes every stream's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u64)]
pub enum RngStream {
    Headcount = 0,
    Sampling = 1,
    TimeBand = 2,
    DemoRoster = 3,
    // Add new streams here, append only.
}
