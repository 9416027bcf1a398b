#![no_main]

use dhseal::{CipherKey, EncryptionError, SealedMessage, open};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing arbitrary bytes should NEVER panic - short input must be reported as malformed
    match SealedMessage::from_bytes(data) {
        Ok(message) => assert_eq!(message.to_bytes(), data),
        Err(err) => assert!(matches!(err, EncryptionError::MalformedInput { .. })),
    }

    // Using a fixed key for deterministic fuzzing. Forging a tag is out of reach for the fuzzer,
    // so every input must be rejected without returning plaintext
    let key = CipherKey::from_bytes([0u8; 32]);
    assert!(key.open(data).is_err());

    // The leading bytes double as a raw key of arbitrary length
    let split = data.first().map_or(0, |&len| (len as usize).min(data.len()));
    let (raw_key, sealed) = data.split_at(split);
    let _ = open(raw_key, sealed);
});
