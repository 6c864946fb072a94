// Copyright (c) 2024 Mike Tsao. All rights reserved.

//! Provides a random-number generator for rhythm generation and testing.

use byteorder::{BigEndian, ByteOrder};

/// A pseudorandom number generator (PRNG) for applications that don't require
/// cryptographically secure random numbers.
#[derive(Debug)]
pub struct Rng(oorandom::Rand64);
impl Default for Rng {
    fn default() -> Self {
        // We want to panic if this fails, because it indicates that a core OS
        // facility isn't functioning.
        Self::new_with_seed(Self::generate_seed().unwrap())
    }
}
impl Rng {
    /// Pass the same number to [Rng::new_with_seed()] to get the same stream
    /// back again. Good for reproducing test failures, and for regenerating a
    /// rhythm track the user liked.
    pub fn new_with_seed(seed: u128) -> Self {
        Self(oorandom::Rand64::new(seed))
    }

    /// Asks the OS for a fresh seed.
    pub fn generate_seed() -> anyhow::Result<u128> {
        let mut bytes = [0u8; 16];

        getrandom::getrandom(&mut bytes)?;
        Ok(BigEndian::read_u128(&bytes))
    }

    /// The next random u64.
    pub fn rand_u64(&mut self) -> u64 {
        self.0.rand_u64()
    }

    /// The next random f64 in 0.0..1.0.
    pub fn rand_float(&mut self) -> f64 {
        self.0.rand_float()
    }

    /// The next random u64 in the given range.
    pub fn rand_range(&mut self, range: core::ops::Range<u64>) -> u64 {
        self.0.rand_range(range)
    }

    /// Flips a weighted coin. A probability of 1.0 always lands true, 0.0
    /// never does.
    pub fn rand_bool(&mut self, probability: f64) -> bool {
        self.0.rand_float() < probability
    }
}
