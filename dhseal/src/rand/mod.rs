//! Randomness plumbing.
//!
//! Nothing in this crate draws entropy on its own. Every operation that needs random bytes takes
//! an explicit `&mut R` where `R: TryCryptoRng`, which covers infallible generators such as
//! `rand::rng()` or a seeded `ChaCha20Rng` as well as fallible sources such as `OsRng`.

use rand::TryCryptoRng;
use thiserror::Error;

#[cfg(test)]
pub(crate) mod test_utils;

// ERRORS
// ================================================================================================

/// The randomness source could not supply the requested number of bytes.
///
/// This is never papered over with weaker randomness; the enclosing operation is aborted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("randomness source failed to provide {requested} bytes")]
pub struct RandomnessError {
    requested: usize,
}

impl RandomnessError {
    /// Number of bytes that were requested from the failing source.
    pub fn requested(&self) -> usize {
        self.requested
    }
}

// HELPERS
// ================================================================================================

/// Fills `dest` from `rng`, surfacing a source failure as [`RandomnessError`].
pub fn fill_bytes<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
    dest: &mut [u8],
) -> Result<(), RandomnessError> {
    let requested = dest.len();
    rng.try_fill_bytes(dest).map_err(|err| {
        tracing::warn!(requested, %err, "randomness source failure");
        RandomnessError { requested }
    })
}
