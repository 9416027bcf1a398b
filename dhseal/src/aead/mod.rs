//! AEAD (authenticated encryption with associated data) schemes.

use thiserror::Error;

use crate::rand::RandomnessError;

pub mod aes_gcm;

// ERROR TYPES
// ================================================================================================

/// Errors that can occur during sealing and opening.
///
/// None of the variants carry data derived from a rejected ciphertext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncryptionError {
    /// The randomness source could not supply a nonce or key
    #[error("failed to draw random bytes")]
    Randomness(#[from] RandomnessError),
    /// The symmetric key does not have the width required by the cipher
    #[error("cipher key must be {expected} bytes, found {actual}")]
    KeyLength { expected: usize, actual: usize },
    /// The sealed message is too short to even contain a nonce
    #[error("sealed message must be at least {min} bytes, found {actual}")]
    MalformedInput { min: usize, actual: usize },
    /// Authentication tag verification failed
    #[error("authentication tag verification failed")]
    Authentication,
    /// The plaintext exceeds what the cipher can process under one nonce
    #[error("plaintext of {len} bytes is too long for the cipher")]
    PlaintextTooLong { len: usize },
    /// A nonce sequence ran out of fresh values
    #[error("nonce sequence is exhausted; the key must be rotated")]
    NonceExhausted,
}
