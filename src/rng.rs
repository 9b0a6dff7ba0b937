//! Deterministic random number generation for pseudo-random inputs.
//!
//! Some producers generate their own inputs (shuffled arrays, random
//! wall layouts). Those draws come from a PCG generator seeded from a
//! master seed so that identical seeds reproduce identical snapshot
//! sequences across runs and platforms.

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Deterministic, reproducible random number generator.
///
/// Thin wrapper over PCG (Permuted Congruential Generator): fast,
/// statistically solid, and fully determined by the seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VizRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl VizRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a random usize in `[0, bound)`.
    ///
    /// Returns 0 when `bound` is 0.
    pub fn gen_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.rng.gen_range(0..bound)
    }

    /// Generate a random i32 in the given inclusive range.
    pub fn gen_range_i32(&mut self, min: i32, max: i32) -> i32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.rng);
    }

    /// Generate `n` distinct values in `[1, n]`, shuffled.
    #[must_use]
    pub fn permutation(&mut self, n: usize) -> Vec<u32> {
        let mut values: Vec<u32> = (1..=n as u32).collect();
        self.shuffle(&mut values);
        values
    }
}
