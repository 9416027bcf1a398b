#![no_std]

#[macro_use]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

pub mod aead;
pub mod ecdh;
pub mod kdf;
pub mod rand;
pub mod session;
pub mod utils;

// RE-EXPORTS
// ================================================================================================

pub use aead::{
    EncryptionError,
    aes_gcm::{CountingSealer, Nonce, SealedMessage, SecretKey as CipherKey, open, seal},
};
pub use ecdh::{
    KeyAgreementError, KeyPair, PublicKey, SecretKey, SharedSecret, compute_shared_secret,
    generate_keypair,
};
pub use kdf::{HkdfSha256, KeyDerivation, KeyDerivationError, RawSecret, derive_key};
pub use session::{
    PeerAuthenticator, PeerRejected, PinnedPeers, Session, SessionError, Unauthenticated,
};

// TESTS
// ================================================================================================

#[cfg(test)]
mod tests {

    #[test]
    #[should_panic]
    fn debug_assert_is_checked() {
        // enforce the release checks to always have `RUSTFLAGS="-C debug-assertions"`.
        //
        // some wire-format invariants in this crate are checked with `debug_assert`.
        debug_assert!(false);
    }

    #[test]
    #[should_panic]
    #[allow(arithmetic_overflow)]
    fn overflow_panics_for_test() {
        // overflows might be disabled if tests are performed in release mode. these are critical,
        // mandatory checks as overflows might be attack vectors.
        //
        // to enable overflow checks in release mode, ensure `RUSTFLAGS="-C overflow-checks"`
        let a = 1_u64;
        let b = 64;
        assert_ne!(a << b, 0);
    }
}
