//! Randomness sources used by unit tests.

use core::fmt;

use rand::{SeedableRng, TryCryptoRng, TryRngCore};
use rand_chacha::ChaCha20Rng;

/// Returns a deterministic generator, so that failures can be reproduced from the seed.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}

/// A source that has run dry and fails every request.
#[derive(Debug, Default)]
pub struct ExhaustedRng;

#[derive(Debug)]
pub struct EntropyExhausted;

impl fmt::Display for EntropyExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entropy pool exhausted")
    }
}

impl TryRngCore for ExhaustedRng {
    type Error = EntropyExhausted;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Err(EntropyExhausted)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Err(EntropyExhausted)
    }

    fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> Result<(), Self::Error> {
        Err(EntropyExhausted)
    }
}

impl TryCryptoRng for ExhaustedRng {}
