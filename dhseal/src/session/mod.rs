//! One party's view of an established exchange.
//!
//! A [`Session`] ties the pieces together: the peer's public key is first checked by a
//! [`PeerAuthenticator`], then the X25519 exchange is performed, and the shared secret is run
//! through a [`KeyDerivation`] to obtain the cipher key. The shared secret itself does not
//! outlive [`Session::establish`].
//!
//! # Examples
//!
//! ```
//! use dhseal::{HkdfSha256, KeyPair, Session, Unauthenticated};
//!
//! let mut rng = rand::rng();
//! let alice = KeyPair::generate(&mut rng).unwrap();
//! let bob = KeyPair::generate(&mut rng).unwrap();
//!
//! let kdf = HkdfSha256::new();
//! let label = b"example";
//! let alice_session =
//!     Session::establish(&alice, bob.public_key(), &Unauthenticated, &kdf, label).unwrap();
//! let bob_session =
//!     Session::establish(&bob, alice.public_key(), &Unauthenticated, &kdf, label).unwrap();
//!
//! let sealed = alice_session.seal(&mut rng, b"Hello Bob!").unwrap();
//! assert_eq!(bob_session.open(&sealed).unwrap(), b"Hello Bob!");
//! ```

use alloc::vec::Vec;

use rand::TryCryptoRng;
use thiserror::Error;

use crate::{
    aead::{EncryptionError, aes_gcm::SecretKey as CipherKey},
    ecdh::{KeyAgreementError, KeyPair, PublicKey},
    kdf::{KeyDerivation, KeyDerivationError, RawSecret},
};

mod authenticator;
pub use authenticator::{PeerAuthenticator, PeerRejected, PinnedPeers, Unauthenticated};


// ERRORS
// ================================================================================================

/// Errors that can occur while establishing or using a session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    PeerRejected(#[from] PeerRejected),
    #[error("key agreement failed")]
    KeyAgreement(#[from] KeyAgreementError),
    #[error("key derivation failed")]
    KeyDerivation(#[from] KeyDerivationError),
    #[error("message protection failed")]
    Encryption(#[from] EncryptionError),
}

// SESSION
// ================================================================================================

/// A cipher key agreed with one peer, plus the public keys it was agreed between.
#[derive(Debug)]
pub struct Session {
    local: PublicKey,
    peer: PublicKey,
    key: CipherKey,
}

impl Session {
    /// Establishes a session with `peer`.
    ///
    /// The authenticator is consulted before any secret-dependent work is done. Both parties
    /// must use the same key derivation and context label.
    pub fn establish<A, D>(
        keypair: &KeyPair,
        peer: &PublicKey,
        authenticator: &A,
        kdf: &D,
        context_label: &[u8],
    ) -> Result<Self, SessionError>
    where
        A: PeerAuthenticator + ?Sized,
        D: KeyDerivation + ?Sized,
    {
        authenticator.authenticate(peer).inspect_err(|_| {
            tracing::warn!(%peer, "peer public key rejected by authenticator");
        })?;

        let shared_secret = keypair.diffie_hellman(peer)?;
        let key = kdf.derive_key(&shared_secret, context_label)?;

        tracing::debug!(local = %keypair.public_key(), %peer, "session established");

        Ok(Self { local: *keypair.public_key(), peer: *peer, key })
    }

    /// Establishes a session the minimal way: any peer key is trusted and the raw X25519 output
    /// keys the cipher.
    ///
    /// Such a session is open to an active man-in-the-middle.
    pub fn unauthenticated(keypair: &KeyPair, peer: &PublicKey) -> Result<Self, SessionError> {
        Self::establish(keypair, peer, &Unauthenticated, &RawSecret, &[])
    }

    pub fn local_public_key(&self) -> &PublicKey {
        &self.local
    }

    pub fn peer_public_key(&self) -> &PublicKey {
        &self.peer
    }

    /// Seals a message for the peer and returns its wire encoding (`nonce || ciphertext`).
    pub fn seal<R: TryCryptoRng + ?Sized>(
        &self,
        rng: &mut R,
        plaintext: &[u8],
    ) -> Result<Vec<u8>, SessionError> {
        Ok(self.key.seal(rng, plaintext)?.to_bytes())
    }

    /// Opens a wire-encoded message from the peer.
    pub fn open(&self, sealed: &[u8]) -> Result<Vec<u8>, SessionError> {
        Ok(self.key.open(sealed)?)
    }
}
