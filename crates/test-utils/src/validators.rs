//! Seeded validator sets for tests.

use portal_bls::{SecretKey, Signature, SignatureBundle, ValidatorIdx};
use portal_primitives::prelude::ValidatorTable;
use rand::{rngs::StdRng, SeedableRng};

/// A deterministic validator set holding both halves of every keypair.
#[derive(Debug, Clone)]
pub struct ValidatorFixture {
    secrets: Vec<SecretKey>,
}

impl ValidatorFixture {
    /// Generates `n` keypairs from a seed; the same seed always yields the
    /// same set.
    pub fn generate(n: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let secrets = (0..n).map(|_| SecretKey::generate(&mut rng)).collect();

        Self { secrets }
    }

    /// Number of validators in the fixture.
    pub fn cardinality(&self) -> usize {
        self.secrets.len()
    }

    /// Public keys in signing order.
    pub fn public_keys(&self) -> Vec<portal_bls::PublicKey> {
        self.secrets.iter().map(SecretKey::public_key).collect()
    }

    /// The fixture as a [`ValidatorTable`].
    pub fn table(&self) -> ValidatorTable {
        ValidatorTable::new(self.public_keys()).expect("generated keys are distinct")
    }

    /// Signs `message` with the validators whose switch is on.
    ///
    /// Panics if the switch list's length differs from the set size, since
    /// that is always a broken test.
    pub fn sign_with_switches(&self, message: &[u8], switches: &[bool]) -> SignatureBundle {
        assert_eq!(
            switches.len(),
            self.secrets.len(),
            "one switch per validator",
        );

        self.secrets
            .iter()
            .zip(switches)
            .enumerate()
            .filter(|(_, (_, &on))| on)
            .map(|(idx, (sk, _))| (idx as ValidatorIdx, sk.sign(message)))
            .collect()
    }

    /// Signs `message` with the first `count` validators.
    pub fn sign_first(&self, message: &[u8], count: usize) -> SignatureBundle {
        self.secrets
            .iter()
            .take(count)
            .enumerate()
            .map(|(idx, sk)| (idx as ValidatorIdx, sk.sign(message)))
            .collect()
    }

    /// One validator's partial signature over `message`.
    pub fn partial(&self, index: usize, message: &[u8]) -> Signature {
        self.secrets[index].sign(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_keys() {
        let a = ValidatorFixture::generate(3, 42);
        let b = ValidatorFixture::generate(3, 42);

        assert_eq!(a.public_keys(), b.public_keys());
        assert_ne!(
            a.public_keys(),
            ValidatorFixture::generate(3, 43).public_keys(),
        );
    }

    #[test]
    fn switches_select_signers() {
        let fixture = ValidatorFixture::generate(4, 1);
        let bundle = fixture.sign_with_switches(b"m", &[true, false, true, false]);

        assert_eq!(bundle.signers().collect::<Vec<_>>(), vec![0, 2]);
    }
}
