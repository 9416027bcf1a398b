//! Counter-based nonces for long-lived keys.

use rand::TryCryptoRng;

use super::{NONCE_SIZE, Nonce, SealedMessage, SecretKey};
use crate::{aead::EncryptionError, rand::fill_bytes};

/// Number of random bytes at the start of every nonce produced by a [`CountingSealer`].
const PREFIX_SIZE: usize = NONCE_SIZE - core::mem::size_of::<u64>();

/// Seals messages under one key using deterministic, never-repeating nonces.
///
/// Nonces are built as `prefix || counter`, where the 4-byte prefix is fixed per sealer and the
/// 8-byte counter is big-endian and incremented after every message. Two sealers under the same
/// key must use different prefixes; drawing the prefix at random with [`Self::with_rng`] makes a
/// collision unlikely for a small number of sealers per key.
///
/// The sealer refuses to continue once the counter would wrap, returning
/// [`EncryptionError::NonceExhausted`].
#[derive(Debug)]
pub struct CountingSealer {
    key: SecretKey,
    prefix: [u8; PREFIX_SIZE],
    counter: u64,
}

impl CountingSealer {
    /// Creates a sealer whose nonce prefix is drawn from the provided randomness source.
    pub fn with_rng<R: TryCryptoRng + ?Sized>(
        key: SecretKey,
        rng: &mut R,
    ) -> Result<Self, EncryptionError> {
        let mut prefix = [0u8; PREFIX_SIZE];
        fill_bytes(rng, &mut prefix)?;
        Ok(Self::with_prefix(key, prefix))
    }

    /// Creates a sealer with an explicit nonce prefix.
    pub fn with_prefix(key: SecretKey, prefix: [u8; PREFIX_SIZE]) -> Self {
        Self { key, prefix, counter: 0 }
    }

    /// Returns the key messages are sealed under, e.g. to open them again.
    pub fn key(&self) -> &SecretKey {
        &self.key
    }

    /// Number of messages sealed so far.
    pub fn messages_sealed(&self) -> u64 {
        self.counter
    }

    /// Seals the plaintext under the next nonce in the sequence.
    pub fn seal(&mut self, plaintext: &[u8]) -> Result<SealedMessage, EncryptionError> {
        self.seal_with_associated_data(plaintext, &[])
    }

    /// Seals the plaintext with associated data under the next nonce in the sequence.
    pub fn seal_with_associated_data(
        &mut self,
        plaintext: &[u8],
        associated_data: &[u8],
    ) -> Result<SealedMessage, EncryptionError> {
        let nonce = self.next_nonce()?;
        self.key.seal_with_nonce(&nonce, plaintext, associated_data)
    }

    /// Reserves the next nonce. A reserved nonce is never handed out again, even if sealing
    /// with it subsequently fails.
    fn next_nonce(&mut self) -> Result<Nonce, EncryptionError> {
        let current = self.counter;
        self.counter = current.checked_add(1).ok_or_else(|| {
            tracing::warn!("nonce counter exhausted");
            EncryptionError::NonceExhausted
        })?;

        let mut bytes = [0u8; NONCE_SIZE];
        bytes[..PREFIX_SIZE].copy_from_slice(&self.prefix);
        bytes[PREFIX_SIZE..].copy_from_slice(&current.to_be_bytes());

        Ok(Nonce::from_bytes(bytes))
    }
}

// TESTS
// ================================================================================================
