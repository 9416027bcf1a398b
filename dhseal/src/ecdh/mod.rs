//! ECDH (Elliptic Curve Diffie-Hellman) key agreement over Curve25519 (X25519).
//!
//! Each party generates a [`KeyPair`] and hands its [`PublicKey`] to the other side through some
//! out-of-band channel. Both parties then call [`compute_shared_secret`] with their own secret
//! key and the peer's public key and arrive at the same [`SharedSecret`].
//!
//! The exchange itself is unauthenticated: nothing here binds a public key to an identity. See
//! [`crate::session::PeerAuthenticator`] for the hook where such a check belongs.

use thiserror::Error;

use crate::rand::RandomnessError;

mod x25519;
pub use x25519::{
    KeyPair, PUBLIC_KEY_BYTES, PublicKey, SECRET_KEY_BYTES, SHARED_SECRET_BYTES, SecretKey,
    SharedSecret, compute_shared_secret, generate_keypair,
};

#[cfg(test)]
mod tests;

// ERRORS
// ================================================================================================

/// Errors that can occur while generating keys or performing the key agreement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyAgreementError {
    #[error("failed to generate secret key")]
    Randomness(#[from] RandomnessError),
    /// The peer's public key is a low-order point, so the exchange would not be contributory.
    #[error("peer public key is a low-order point")]
    InvalidPublicKey,
    #[error("public key must be {expected} bytes, found {actual}")]
    InvalidPublicKeyLength { expected: usize, actual: usize },
    #[error("public key is not valid hex")]
    InvalidPublicKeyHex(#[from] crate::utils::HexParseError),
}
