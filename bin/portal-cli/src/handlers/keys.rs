//! Validator keypair generation.

use anyhow::Result;
use portal_bls::SecretKey;
use rand::{
    rngs::{OsRng, StdRng},
    SeedableRng,
};

use crate::cli::GenerateKeyArgs;

pub(crate) fn handle_generate_key(args: GenerateKeyArgs) -> Result<()> {
    let keypair = generate(args.seed);

    println!("Secret Key: {}", hex::encode(keypair.to_bytes()));
    println!("Public Key: {}", keypair.public_key());
    println!();
    println!(
        "Share the public key (with a proof of possession) with the other \
         validators; keep the secret key offline."
    );

    Ok(())
}

/// Generates a keypair from the seed, or from OS entropy when no seed is
/// given. Seeded generation exists for test networks where the whole set
/// must be reproducible.
fn generate(seed: Option<u64>) -> SecretKey {
    match seed {
        Some(seed) => SecretKey::generate(&mut StdRng::seed_from_u64(seed)),
        None => SecretKey::generate(&mut OsRng),
    }
}
