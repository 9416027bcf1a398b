use alloc::vec::Vec;

use subtle::{Choice, ConstantTimeEq};
use thiserror::Error;

use crate::ecdh::PublicKey;

/// The peer's public key was not accepted by a [`PeerAuthenticator`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("peer public key {peer} is not trusted")]
pub struct PeerRejected {
    peer: PublicKey,
}

impl PeerRejected {
    pub fn new(peer: PublicKey) -> Self {
        Self { peer }
    }

    pub fn peer(&self) -> &PublicKey {
        &self.peer
    }
}

/// Decides whether a received public key may be used for key agreement.
///
/// Plain X25519 does not tell who is on the other end. Binding a key to an identity (signatures,
/// certificates, a pre-shared list) is the job of an implementation of this trait.
pub trait PeerAuthenticator {
    fn authenticate(&self, peer: &PublicKey) -> Result<(), PeerRejected>;
}

impl<F> PeerAuthenticator for F
where
    F: Fn(&PublicKey) -> bool,
{
    fn authenticate(&self, peer: &PublicKey) -> Result<(), PeerRejected> {
        if self(peer) { Ok(()) } else { Err(PeerRejected::new(*peer)) }
    }
}

/// Accepts every public key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unauthenticated;

impl PeerAuthenticator for Unauthenticated {
    fn authenticate(&self, _peer: &PublicKey) -> Result<(), PeerRejected> {
        Ok(())
    }
}

/// Accepts only public keys from a list distributed ahead of time.
#[derive(Debug, Clone, Default)]
pub struct PinnedPeers {
    trusted: Vec<PublicKey>,
}

impl PinnedPeers {
    pub fn new(trusted: impl IntoIterator<Item = PublicKey>) -> Self {
        Self { trusted: trusted.into_iter().collect() }
    }

    pub fn pin(&mut self, peer: PublicKey) {
        self.trusted.push(peer);
    }

    pub fn len(&self) -> usize {
        self.trusted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trusted.is_empty()
    }
}

impl PeerAuthenticator for PinnedPeers {
    fn authenticate(&self, peer: &PublicKey) -> Result<(), PeerRejected> {
        // scan the whole list so timing does not reveal the position of a match
        let found = self
            .trusted
            .iter()
            .fold(Choice::from(0), |found, key| found | key.as_bytes().ct_eq(peer.as_bytes()));

        if bool::from(found) { Ok(()) } else { Err(PeerRejected::new(*peer)) }
    }
}
