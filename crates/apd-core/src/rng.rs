//! Deterministic RNG wrapper and seed-derivation helpers.

use rand::distributions::{Distribution, WeightedError, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use siphasher::sip::SipHasher13;
use std::hash::Hasher;

use crate::errors::{ApdError, ErrorInfo};

/// Deterministic RNG handle used by the matrix generators.
///
/// A master `seed: u64` is always supplied explicitly by the caller; there is
/// no process-wide generator. Per-size substreams are derived by hashing
/// `(master_seed, substream_id)` with SipHash-1-3 under fixed zero keys, so a
/// size can be rerun in isolation and reproduce the same matrices.
#[derive(Debug, Clone)]
pub struct RngHandle {
    rng: StdRng,
}

impl RngHandle {
    /// Creates a new RNG handle from a master seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates the handle for a derived substream of `master_seed`.
    pub fn substream(master_seed: u64, substream: u64) -> Self {
        Self::from_seed(derive_substream_seed(master_seed, substream))
    }

    /// Draws an integer uniformly from the inclusive range `[low, high]`.
    pub fn int_inclusive(&mut self, low: i64, high: i64) -> Result<i64, ApdError> {
        if low > high {
            return Err(ApdError::Rng(
                ErrorInfo::new("empty-range", "lower bound exceeds upper bound")
                    .with_context("low", low)
                    .with_context("high", high),
            ));
        }
        Ok(self.rng.gen_range(low..=high))
    }

    /// Draws an index in `[0, len)`.
    pub fn index(&mut self, len: usize) -> Result<usize, ApdError> {
        if len == 0 {
            return Err(ApdError::Rng(ErrorInfo::new(
                "empty-range",
                "cannot draw an index from an empty collection",
            )));
        }
        Ok(self.rng.gen_range(0..len))
    }

    /// Picks an index with probability proportional to `weights[idx]`.
    pub fn weighted_index(&mut self, weights: &[u32]) -> Result<usize, ApdError> {
        let dist = WeightedIndex::new(weights).map_err(|err| {
            let code = match err {
                WeightedError::NoItem => "empty-range",
                WeightedError::AllWeightsZero => "zero-weight",
                _ => "invalid-weight",
            };
            ApdError::Rng(
                ErrorInfo::new(code, err.to_string())
                    .with_context("len", weights.len()),
            )
        })?;
        Ok(dist.sample(&mut self.rng))
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
