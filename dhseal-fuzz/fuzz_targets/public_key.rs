#![no_main]

use dhseal::{KeyAgreementError, KeyPair, PublicKey, SecretKey};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing should NEVER panic
    let Ok(peer) = PublicKey::read_from_bytes(data) else {
        return;
    };

    // Every 32-byte string is a u-coordinate; the exchange either succeeds or rejects the point
    // as low-order
    let keypair = KeyPair::from_secret_key(SecretKey::from_bytes([0x42; 32]));
    match keypair.diffie_hellman(&peer) {
        Ok(shared) => assert_ne!(shared.as_bytes(), &[0u8; 32]),
        Err(err) => assert_eq!(err, KeyAgreementError::InvalidPublicKey),
    }
});
