//! Key derivation from X25519 shared secrets.
//!
//! The raw output of an X25519 exchange is a curve coordinate, not a uniformly random string.
//! A [`KeyDerivation`] turns it into an AES-256-GCM key, optionally binding a context label so
//! that keys derived for different purposes from the same exchange are independent.

use alloc::vec::Vec;

use hkdf::Hkdf;
use sha2::Sha256;
use thiserror::Error;
use zeroize::Zeroizing;

use crate::{
    aead::aes_gcm::{KEY_SIZE, SecretKey as CipherKey},
    ecdh::SharedSecret,
};


// ERRORS
// ================================================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyDerivationError {
    #[error("key derivation cannot produce {requested} bytes of output")]
    InvalidOutputLength { requested: usize },
}

// KEY DERIVATION TRAIT
// ================================================================================================

/// Derives a cipher key from a shared secret and a context label.
///
/// Both parties must use the same strategy and label, otherwise they end up with different keys
/// and every message fails authentication.
pub trait KeyDerivation {
    fn derive_key(
        &self,
        shared_secret: &SharedSecret,
        context_label: &[u8],
    ) -> Result<CipherKey, KeyDerivationError>;
}

// RAW SECRET
// ================================================================================================

/// Uses the 32-byte X25519 output directly as the cipher key and ignores the context label.
///
/// This is the minimal construction; prefer [`HkdfSha256`] unless interoperating with a peer that
/// keys its cipher this way.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSecret;

impl KeyDerivation for RawSecret {
    fn derive_key(
        &self,
        shared_secret: &SharedSecret,
        _context_label: &[u8],
    ) -> Result<CipherKey, KeyDerivationError> {
        Ok(CipherKey::from_bytes(*shared_secret.as_bytes()))
    }
}

// HKDF-SHA256
// ================================================================================================

/// HKDF (RFC 5869) over SHA-256: extract with the optional salt, expand with the context label
/// as `info`.
#[derive(Debug, Clone, Default)]
pub struct HkdfSha256 {
    salt: Option<Vec<u8>>,
}

impl HkdfSha256 {
    /// HKDF without a salt (equivalent to a salt of 32 zero bytes).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_salt(salt: impl Into<Vec<u8>>) -> Self {
        Self { salt: Some(salt.into()) }
    }
}

impl KeyDerivation for HkdfSha256 {
    fn derive_key(
        &self,
        shared_secret: &SharedSecret,
        context_label: &[u8],
    ) -> Result<CipherKey, KeyDerivationError> {
        let hkdf = Hkdf::<Sha256>::new(self.salt.as_deref(), shared_secret.as_bytes());

        let mut okm = Zeroizing::new([0u8; KEY_SIZE]);
        hkdf.expand(context_label, &mut okm[..])
            .map_err(|_| KeyDerivationError::InvalidOutputLength { requested: KEY_SIZE })?;

        Ok(CipherKey::from_bytes(*okm))
    }
}

/// Derives a cipher key with unsalted HKDF-SHA256, using `context_label` as the HKDF info.
pub fn derive_key(
    shared_secret: &SharedSecret,
    context_label: &[u8],
) -> Result<CipherKey, KeyDerivationError> {
    HkdfSha256::new().derive_key(shared_secret, context_label)
}
