//! X25519 keys and shared secrets.

use alloc::string::String;
use core::fmt;

use dhseal_derive::{SilentDebug, SilentDisplay};
use rand::TryCryptoRng;
use subtle::ConstantTimeEq;
use x25519_dalek::StaticSecret;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::KeyAgreementError;
use crate::{
    rand::fill_bytes,
    utils::{bytes_to_hex_string, hex_to_bytes},
};

// CONSTANTS
// ================================================================================================

/// Length of an X25519 secret scalar in bytes.
pub const SECRET_KEY_BYTES: usize = 32;

/// Length of an encoded X25519 public key (Montgomery u-coordinate) in bytes.
pub const PUBLIC_KEY_BYTES: usize = 32;

/// Length of the raw X25519 output in bytes.
pub const SHARED_SECRET_BYTES: usize = 32;

// SECRET KEY
// ================================================================================================

/// An X25519 secret scalar.
///
/// The scalar is clamped on construction, so the stored bytes are always a valid X25519 secret.
/// The backing memory is overwritten when the key is dropped.
#[derive(Clone, SilentDebug, SilentDisplay)]
pub struct SecretKey {
    inner: StaticSecret,
}

impl SecretKey {
    /// Draws a fresh secret key from the provided randomness source.
    pub fn with_rng<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, KeyAgreementError> {
        let mut bytes = Zeroizing::new([0u8; SECRET_KEY_BYTES]);
        fill_bytes(rng, &mut bytes[..])?;

        Ok(Self::from_bytes(*bytes))
    }

    /// Builds a secret key from 32 bytes, clamping them as required by RFC 7748.
    pub fn from_bytes(mut bytes: [u8; SECRET_KEY_BYTES]) -> Self {
        clamp_scalar(&mut bytes);
        let inner = StaticSecret::from(bytes);
        bytes.zeroize();

        Self { inner }
    }

    /// Returns the public key corresponding to this secret key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey { inner: x25519_dalek::PublicKey::from(&self.inner) }
    }

    /// Computes the shared secret between this key and the peer's public key.
    ///
    /// See [`compute_shared_secret`].
    pub fn diffie_hellman(&self, peer: &PublicKey) -> Result<SharedSecret, KeyAgreementError> {
        compute_shared_secret(self, peer)
    }

    #[cfg(test)]
    pub(crate) fn scalar_bytes(&self) -> &[u8; SECRET_KEY_BYTES] {
        self.inner.as_bytes()
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.inner.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SecretKey {}

/// Applies the X25519 clamping rule: clear the three low bits, clear the top bit and set the
/// second highest bit.
fn clamp_scalar(bytes: &mut [u8; SECRET_KEY_BYTES]) {
    bytes[0] &= 248;
    bytes[31] &= 127;
    bytes[31] |= 64;
}

// PUBLIC KEY
// ================================================================================================

/// An X25519 public key, encoded as the 32-byte little-endian Montgomery u-coordinate.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    inner: x25519_dalek::PublicKey,
}

impl PublicKey {
    /// Wraps a raw 32-byte encoding.
    ///
    /// Any 32 bytes decode to some u-coordinate; degenerate points are only detected when the
    /// key is used in [`compute_shared_secret`].
    pub fn from_bytes(bytes: [u8; PUBLIC_KEY_BYTES]) -> Self {
        Self { inner: x25519_dalek::PublicKey::from(bytes) }
    }

    /// Parses a public key from a slice, which must be exactly [`PUBLIC_KEY_BYTES`] long.
    pub fn read_from_bytes(bytes: &[u8]) -> Result<Self, KeyAgreementError> {
        let bytes: [u8; PUBLIC_KEY_BYTES] =
            bytes.try_into().map_err(|_| KeyAgreementError::InvalidPublicKeyLength {
                expected: PUBLIC_KEY_BYTES,
                actual: bytes.len(),
            })?;

        Ok(Self::from_bytes(bytes))
    }

    /// Parses a `0x`-prefixed hex encoding of the public key.
    pub fn from_hex(value: &str) -> Result<Self, KeyAgreementError> {
        Ok(Self::from_bytes(hex_to_bytes(value)?))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTES] {
        self.inner.as_bytes()
    }

    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_BYTES] {
        self.inner.to_bytes()
    }

    /// Returns the `0x`-prefixed hex encoding of the public key.
    pub fn to_hex(&self) -> String {
        bytes_to_hex_string(self.as_bytes())
    }
}

impl From<[u8; PUBLIC_KEY_BYTES]> for PublicKey {
    fn from(bytes: [u8; PUBLIC_KEY_BYTES]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&SecretKey> for PublicKey {
    fn from(secret_key: &SecretKey) -> Self {
        secret_key.public_key()
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_hex()).finish()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// SHARED SECRET
// ================================================================================================

/// The raw output of an X25519 exchange.
///
/// This value is not uniformly random and should normally go through a
/// [`KeyDerivation`](crate::kdf::KeyDerivation) before it keys a cipher. It is zeroized on drop
/// and cannot be cloned.
#[derive(SilentDebug)]
pub struct SharedSecret {
    inner: x25519_dalek::SharedSecret,
}

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8; SHARED_SECRET_BYTES] {
        self.inner.as_bytes()
    }
}

impl AsRef<[u8]> for SharedSecret {
    fn as_ref(&self) -> &[u8] {
        self.inner.as_bytes()
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.inner.as_bytes().ct_eq(other.inner.as_bytes()).into()
    }
}

impl Eq for SharedSecret {}

impl ZeroizeOnDrop for SharedSecret {}

// KEY PAIR
// ================================================================================================

/// A party's X25519 key pair. Only the public half is meant to leave the owning party.
#[derive(Debug, Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Generates a new key pair from the provided randomness source.
    pub fn generate<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, KeyAgreementError> {
        Ok(Self::from_secret_key(SecretKey::with_rng(rng)?))
    }

    pub fn from_secret_key(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Computes the shared secret between this key pair and the peer's public key.
    pub fn diffie_hellman(&self, peer: &PublicKey) -> Result<SharedSecret, KeyAgreementError> {
        compute_shared_secret(&self.secret, peer)
    }
}

// KEY AGREEMENT
// ================================================================================================

/// Generates a new X25519 key pair from the provided randomness source.
pub fn generate_keypair<R: TryCryptoRng + ?Sized>(
    rng: &mut R,
) -> Result<KeyPair, KeyAgreementError> {
    KeyPair::generate(rng)
}

/// Performs X25519 between `secret` and `peer` and returns the raw shared secret.
///
/// Every low-order point (and every non-canonical encoding of one) maps to the all-zero output
/// under a clamped scalar. Such exchanges are rejected with
/// [`KeyAgreementError::InvalidPublicKey`], since the resulting secret would not depend on our
/// own key at all.
pub fn compute_shared_secret(
    secret: &SecretKey,
    peer: &PublicKey,
) -> Result<SharedSecret, KeyAgreementError> {
    let inner = secret.inner.diffie_hellman(&peer.inner);

    if !inner.was_contributory() {
        tracing::warn!(%peer, "rejected low-order peer public key");
        return Err(KeyAgreementError::InvalidPublicKey);
    }

    Ok(SharedSecret { inner })
}
