//! Deterministic RNG wrapper and seed-derivation helpers.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

/// Explicit random source threaded through every generator call.
///
/// Wraps `StdRng` seeded from a caller supplied `u64`. Independent streams
/// (pitch shuffle, exposure walk, each trial block) are obtained with
/// [`RngHandle::substream`], which hashes `(seed, substream_id)` with
/// SipHash-1-3 under fixed zero keys. The derivation is stable across
/// platforms.
#[derive(Debug, Clone)]
pub struct RngHandle {
    seed: u64,
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns the seed this handle was created from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Creates a fresh handle for the given substream of this handle's seed.
    ///
    /// The result does not depend on how many values were already drawn.
    pub fn substream(&self, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(self.seed, substream))
    }
}

impl RngCore for RngHandle {
    fn next_u32(&mut self) -> u32 {
        self.rng.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.rng.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.rng.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.rng.try_fill_bytes(dest)
    }
}

/// Derives the deterministic seed for a specific substream.
pub fn derive_substream_seed(master_seed: u64, substream: u64) -> u64 {
    let mut hasher = SipHasher13::new_with_keys(0, 0);
    hasher.write_u64(master_seed);
    hasher.write_u64(substream);
    hasher.finish()
}
