use assert_matches::assert_matches;
use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::rand::test_utils::{ExhaustedRng, seeded_rng};

fn decode_hex<const N: usize>(value: &str) -> [u8; N] {
    hex::decode(value).unwrap().try_into().unwrap()
}

// RFC 7748, section 6.1
const ALICE_SECRET: &str = "77076d0a7318a57d3c16c17251b26645df4c2f87ebc0992ab177fba51db92c2a";
const ALICE_PUBLIC: &str = "8520f0098930a754748b7ddcb43ef75a0dbf3a0d26381af4eba4a98eaa9b4e6a";
const BOB_SECRET: &str = "5dab087e624a8a4b79e17f8b83800ee66f3bb1292618b6fd1c2f8b27ff88e0eb";
const BOB_PUBLIC: &str = "de9edb7d7b7dc1b4d35b61c2ece435373f8343c85b78674dadfc7e146f882b4f";
const SHARED: &str = "4a5d9d5ba4ce2de1728e3bf480350f25e07e21c947d19e3376f09b3c1e161742";

#[test]
fn rfc7748_key_agreement_vector() {
    let alice = KeyPair::from_secret_key(SecretKey::from_bytes(decode_hex(ALICE_SECRET)));
    let bob = KeyPair::from_secret_key(SecretKey::from_bytes(decode_hex(BOB_SECRET)));

    assert_eq!(alice.public_key().as_bytes(), &decode_hex::<32>(ALICE_PUBLIC));
    assert_eq!(bob.public_key().as_bytes(), &decode_hex::<32>(BOB_PUBLIC));

    let alice_shared = alice.diffie_hellman(bob.public_key()).unwrap();
    let bob_shared = bob.diffie_hellman(alice.public_key()).unwrap();

    assert_eq!(alice_shared.as_bytes(), &decode_hex::<32>(SHARED));
    assert_eq!(alice_shared, bob_shared);
}

#[test]
fn key_agreement() {
    let mut rng = rand::rng();

    let alice = generate_keypair(&mut rng).unwrap();
    let bob = generate_keypair(&mut rng).unwrap();

    let alice_shared = compute_shared_secret(alice.secret_key(), bob.public_key()).unwrap();
    let bob_shared = compute_shared_secret(bob.secret_key(), alice.public_key()).unwrap();

    assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
}

#[test]
fn different_peers_give_different_secrets() {
    let mut rng = seeded_rng(7);

    let alice = KeyPair::generate(&mut rng).unwrap();
    let bob = KeyPair::generate(&mut rng).unwrap();
    let carol = KeyPair::generate(&mut rng).unwrap();

    let with_bob = alice.diffie_hellman(bob.public_key()).unwrap();
    let with_carol = alice.diffie_hellman(carol.public_key()).unwrap();

    assert_ne!(with_bob, with_carol);
}

#[test]
fn generation_is_deterministic_for_a_seeded_source() {
    let first = KeyPair::generate(&mut seeded_rng(42)).unwrap();
    let second = KeyPair::generate(&mut seeded_rng(42)).unwrap();
    let other = KeyPair::generate(&mut seeded_rng(43)).unwrap();

    assert_eq!(first.secret_key(), second.secret_key());
    assert_eq!(first.public_key(), second.public_key());
    assert_ne!(first.public_key(), other.public_key());
}

#[test]
fn secret_keys_are_clamped() {
    let key = SecretKey::from_bytes([0xff; SECRET_KEY_BYTES]);
    let scalar = key.scalar_bytes();

    assert_eq!(scalar[0] & 0b0000_0111, 0);
    assert_eq!(scalar[31] & 0b1000_0000, 0);
    assert_eq!(scalar[31] & 0b0100_0000, 0b0100_0000);

    let generated = SecretKey::with_rng(&mut seeded_rng(1)).unwrap();
    let scalar = generated.scalar_bytes();
    assert_eq!(scalar[0] & 0b0000_0111, 0);
    assert_eq!(scalar[31] & 0b1100_0000, 0b0100_0000);
}

#[test]
fn generation_fails_when_randomness_is_exhausted() {
    assert_matches!(
        KeyPair::generate(&mut ExhaustedRng),
        Err(KeyAgreementError::Randomness(err)) if err.requested() == SECRET_KEY_BYTES
    );
}

// Low-order points of Curve25519 and its twist, plus non-canonical encodings of 0 and 1.
#[rstest]
#[case::zero("0000000000000000000000000000000000000000000000000000000000000000")]
#[case::one("0100000000000000000000000000000000000000000000000000000000000000")]
#[case::order_eight_a("e0eb7a7c3b41b8ae1656e3faf19fc46ada098deb9c32b1fd866205165f49b800")]
#[case::order_eight_b("5f9c95bca3508c24b1d0b1559c83ef5b04445cc4581c8e86d8224eddd09f1157")]
#[case::p_minus_one("ecffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")]
#[case::p("edffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")]
#[case::p_plus_one("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f")]
fn low_order_public_keys_are_rejected(#[case] encoded: &str) {
    let keypair = KeyPair::generate(&mut seeded_rng(3)).unwrap();
    let peer = PublicKey::from_bytes(decode_hex(encoded));

    assert_matches!(keypair.diffie_hellman(&peer), Err(KeyAgreementError::InvalidPublicKey));
}

#[rstest]
#[case(0)]
#[case(31)]
#[case(33)]
#[case(64)]
fn public_key_length_is_checked(#[case] len: usize) {
    let bytes = vec![9u8; len];

    assert_matches!(
        PublicKey::read_from_bytes(&bytes),
        Err(KeyAgreementError::InvalidPublicKeyLength { expected: 32, actual }) if actual == len
    );
}

#[test]
fn public_key_encodings() {
    let keypair = KeyPair::generate(&mut seeded_rng(11)).unwrap();
    let public = *keypair.public_key();

    assert_eq!(PublicKey::read_from_bytes(public.as_bytes()).unwrap(), public);
    assert_eq!(PublicKey::from_hex(&public.to_hex()).unwrap(), public);
    assert_eq!(PublicKey::from(keypair.secret_key()), public);
    assert_eq!(format!("{public}"), public.to_hex());

    assert_matches!(
        PublicKey::from_hex("0x1234"),
        Err(KeyAgreementError::InvalidPublicKeyHex(_))
    );
}

#[test]
fn secrets_are_not_printed() {
    let keypair = KeyPair::generate(&mut seeded_rng(5)).unwrap();
    let peer = KeyPair::generate(&mut seeded_rng(6)).unwrap();
    let shared = keypair.diffie_hellman(peer.public_key()).unwrap();

    assert_eq!(format!("{:?}", keypair.secret_key()), "<elided secret for SecretKey>");
    assert_eq!(format!("{}", keypair.secret_key()), "<elided secret for SecretKey>");
    assert_eq!(format!("{shared:?}"), "<elided secret for SharedSecret>");

    let hex_secret = hex::encode(keypair.secret_key().scalar_bytes());
    assert!(!format!("{keypair:?}").contains(&hex_secret));
}

proptest! {
    #[test]
    fn swapped_roles_agree(seed_a in any::<u64>(), seed_b in any::<u64>()) {
        prop_assume!(seed_a != seed_b);

        let alice = KeyPair::generate(&mut seeded_rng(seed_a)).unwrap();
        let bob = KeyPair::generate(&mut seeded_rng(seed_b)).unwrap();

        let alice_shared = alice.diffie_hellman(bob.public_key()).unwrap();
        let bob_shared = bob.diffie_hellman(alice.public_key()).unwrap();

        prop_assert_eq!(alice_shared.as_bytes(), bob_shared.as_bytes());
    }
}
