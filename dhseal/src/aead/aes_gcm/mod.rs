//! AES-256-GCM sealing with self-contained `nonce || ciphertext` messages.
//!
//! A sealed message is the 12-byte nonce followed by the GCM ciphertext, which already carries
//! the 16-byte authentication tag at its end. There is no version byte or length prefix; the
//! ciphertext length is implied by the buffer length.
//!
//! Nonces are drawn at random for every call to [`SecretKey::seal`]. With 96-bit nonces the
//! collision probability stays negligible up to roughly 2^32 messages under one key. Callers
//! that send many messages under a long-lived key should use [`CountingSealer`] instead.

use alloc::vec::Vec;

use aes_gcm::{
    Aes256Gcm,
    aead::{Aead, KeyInit, Payload},
};
use dhseal_derive::{SilentDebug, SilentDisplay};
use rand::TryCryptoRng;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::EncryptionError;
use crate::rand::{RandomnessError, fill_bytes};

mod counter;
pub use counter::CountingSealer;


// CONSTANTS
// ================================================================================================

/// Size of an AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of a GCM nonce in bytes (96 bits).
pub const NONCE_SIZE: usize = 12;

/// Size of the GCM authentication tag in bytes (128 bits).
pub const TAG_SIZE: usize = 16;

// NONCE
// ================================================================================================

/// A 96-bit nonce
///
/// Note: a nonce must never be used twice under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Creates a new random nonce using the provided random number generator
    pub fn with_rng<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, RandomnessError> {
        let mut bytes = [0u8; NONCE_SIZE];
        fill_bytes(rng, &mut bytes)?;
        Ok(Self(bytes))
    }

    /// Creates a nonce from the provided array of bytes
    pub fn from_bytes(bytes: [u8; NONCE_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

// SECRET KEY
// ================================================================================================

/// A 256-bit AES-GCM key.
///
/// The key bytes are overwritten when the key is dropped.
#[derive(Clone, SilentDebug, SilentDisplay, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey([u8; KEY_SIZE]);

impl SecretKey {
    /// Creates a new random secret key using the provided random number generator
    pub fn with_rng<R: TryCryptoRng + ?Sized>(rng: &mut R) -> Result<Self, EncryptionError> {
        let mut bytes = Zeroizing::new([0u8; KEY_SIZE]);
        fill_bytes(rng, &mut bytes[..])?;
        Ok(Self(*bytes))
    }

    pub fn from_bytes(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }

    /// Creates a key from a slice, which must be exactly [`KEY_SIZE`] bytes long.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, EncryptionError> {
        let bytes: [u8; KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| EncryptionError::KeyLength { expected: KEY_SIZE, actual: bytes.len() })?;
        Ok(Self(bytes))
    }

    /// Seals the plaintext under this key and a fresh random nonce.
    pub fn seal<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<SealedMessage, EncryptionError> {
        self.seal_with_associated_data(rng, plaintext, &[])
    }

    /// Seals the plaintext under this key and a fresh random nonce, binding the associated data
    /// into the authentication tag.
    ///
    /// The associated data is not part of the sealed message; the receiver must supply the same
    /// bytes to [`Self::open_with_associated_data`].
    pub fn seal_with_associated_data<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<SealedMessage, EncryptionError> {
        let nonce = Nonce::with_rng(rng)?;
        self.seal_with_nonce(&nonce, plaintext, associated_data)
    }

    /// Seals the plaintext under this key and the specified nonce.
    ///
    /// The caller is responsible for never repeating a nonce under this key.
    pub fn seal_with_nonce(
        &self,
        nonce: &Nonce,
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<SealedMessage, EncryptionError> {
        let payload = Payload { msg: plaintext, aad: associated_data };

        let cipher = Aes256Gcm::new(&self.0.into());

        let ciphertext = cipher
            .encrypt(aes_gcm::Nonce::from_slice(nonce.as_bytes()), payload)
            .map_err(|_| EncryptionError::PlaintextTooLong { len: plaintext.len() })?;

        Ok(SealedMessage { nonce: *nonce, ciphertext })
    }

    /// Opens a wire-encoded sealed message (`nonce || ciphertext`).
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, EncryptionError> {
        self.open_with_associated_data(sealed, &[])
    }

    /// Opens a wire-encoded sealed message that was sealed with associated data.
    pub fn open_with_associated_data(
        &self,
        sealed: &[u8],
        associated_data: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let message = SealedMessage::from_bytes(sealed)?;
        self.open_message(&message, associated_data)
    }

    /// Opens an already parsed sealed message.
    ///
    /// Fails with [`EncryptionError::Authentication`] if the key is wrong or the nonce,
    /// ciphertext, tag or associated data were altered. No plaintext is returned in that case.
    pub fn open_message(
        &self,
        message: &SealedMessage,
        associated_data: &[u8],
    ) -> Result<Vec<u8>, EncryptionError> {
        let payload = Payload { msg: &message.ciphertext, aad: associated_data };

        let cipher = Aes256Gcm::new(&self.0.into());

        cipher
            .decrypt(aes_gcm::Nonce::from_slice(message.nonce.as_bytes()), payload)
            .map_err(|_| {
                tracing::debug!(
                    ciphertext_len = message.ciphertext.len(),
                    "rejected sealed message: authentication failed"
                );
                EncryptionError::Authentication
            })
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for SecretKey {}

// SEALED MESSAGE
// ================================================================================================

/// A nonce together with the ciphertext (and trailing tag) it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedMessage {
    nonce: Nonce,
    ciphertext: Vec<u8>,
}

impl SealedMessage {
    pub fn nonce(&self) -> &Nonce {
        &self.nonce
    }

    /// The GCM ciphertext, including the trailing authentication tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Length of the wire encoding in bytes.
    pub fn len(&self) -> usize {
        NONCE_SIZE + self.ciphertext.len()
    }

    /// Always false, since every sealed message carries a nonce.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the wire encoding: `nonce || ciphertext`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());
        bytes.extend_from_slice(self.nonce.as_bytes());
        bytes.extend_from_slice(&self.ciphertext);

        debug_assert_eq!(bytes.len(), self.len());
        bytes
    }

    /// Parses the wire encoding.
    ///
    /// Only the nonce length is checked here; a ciphertext too short to hold a tag is rejected
    /// when the message is opened.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EncryptionError> {
        if bytes.len() < NONCE_SIZE {
            tracing::debug!(len = bytes.len(), "rejected sealed message: shorter than nonce");
            return Err(EncryptionError::MalformedInput { min: NONCE_SIZE, actual: bytes.len() });
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_SIZE);
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        nonce_bytes.copy_from_slice(nonce);

        Ok(Self {
            nonce: Nonce(nonce_bytes),
            ciphertext: ciphertext.to_vec(),
        })
    }
}

impl From<SealedMessage> for Vec<u8> {
    fn from(message: SealedMessage) -> Self {
        message.to_bytes()
    }
}

// CONVENIENCE FUNCTIONS
// ================================================================================================

/// Seals `plaintext` under a raw 32-byte key, returning the sealed message.
///
/// Fails with [`EncryptionError::KeyLength`] if `key` is not exactly [`KEY_SIZE`] bytes.
pub fn seal<R: TryCryptoRng + ?Sized>(
    key: &[u8],
    rng: &mut R,
    plaintext: &[u8],
) -> Result<SealedMessage, EncryptionError> {
    SecretKey::try_from_slice(key)?.seal(rng, plaintext)
}

/// Opens a wire-encoded sealed message under a raw 32-byte key.
///
/// Fails with [`EncryptionError::KeyLength`] if `key` is not exactly [`KEY_SIZE`] bytes.
pub fn open(key: &[u8], sealed: &[u8]) -> Result<Vec<u8>, EncryptionError> {
    SecretKey::try_from_slice(key)?.open(sealed)
}
