//! Two-party demonstration: Alice and Bob agree on a key over X25519 and exchange one sealed
//! message in each direction.

use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use dhseal::{
    HkdfSha256, KeyDerivation, KeyPair, RawSecret, Session, SessionError, Unauthenticated,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "dhseal", version, about = "X25519 + AES-256-GCM message exchange demo")]
struct Args {
    /// Message Alice seals for Bob
    #[arg(long, default_value = "Hello Bob!")]
    to_bob: String,

    /// Message Bob seals for Alice
    #[arg(long, default_value = "Hello Alice!")]
    to_alice: String,

    /// How the cipher key is derived from the shared secret
    #[arg(long, value_enum, default_value_t = Kdf::Raw)]
    kdf: Kdf,

    /// Context label bound into the derived key (HKDF only)
    #[arg(long, default_value = "dhseal demo")]
    label: String,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Kdf {
    /// Use the raw X25519 output as the AES key
    Raw,
    /// HKDF-SHA256 with the context label as info
    Hkdf,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(%err, "exchange failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        },
    }
}

fn run(args: &Args) -> Result<(), SessionError> {
    let kdf: Box<dyn KeyDerivation> = match args.kdf {
        Kdf::Raw => Box::new(RawSecret),
        Kdf::Hkdf => Box::new(HkdfSha256::new()),
    };
    let label = args.label.as_bytes();

    let mut rng = rand::rng();
    let alice = KeyPair::generate(&mut rng)?;
    let bob = KeyPair::generate(&mut rng)?;
    tracing::debug!(alice = %alice.public_key(), bob = %bob.public_key(), "generated key pairs");

    let alice_session =
        Session::establish(&alice, bob.public_key(), &Unauthenticated, kdf.as_ref(), label)?;
    let bob_session =
        Session::establish(&bob, alice.public_key(), &Unauthenticated, kdf.as_ref(), label)?;

    let sealed = alice_session.seal(&mut rng, args.to_bob.as_bytes())?;
    let message = bob_session.open(&sealed)?;
    println!("alice -> bob: {}", String::from_utf8_lossy(&message));

    let sealed = bob_session.seal(&mut rng, args.to_alice.as_bytes())?;
    let message = alice_session.open(&sealed)?;
    println!("bob -> alice: {}", String::from_utf8_lossy(&message));

    Ok(())
}
