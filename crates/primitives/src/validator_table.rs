//! The registered validator set of a portal state version.

use std::collections::BTreeMap;

use portal_bls::{PublicKey, ValidatorIdx};
use serde::{Deserialize, Serialize};

/// An ordered validator set with index lookups in both directions.
///
/// The index order is the signing order: a
/// [`SignatureBundle`](portal_bls::SignatureBundle) refers to validators by
/// their position here. The table is immutable per portal state version;
/// rotation replaces the whole table via an update transition.
///
/// Keys are expected to have carried a proof-of-possession when the set was
/// agreed on, since bundle verification aggregates over a shared commitment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorTable {
    keys: Vec<PublicKey>,
    by_key: BTreeMap<PublicKey, ValidatorIdx>,
}

impl ValidatorTable {
    /// Builds a table from keys in signing order.
    ///
    /// Returns `None` if the set is empty or contains a duplicate key; a
    /// duplicate would let one signer count twice toward the threshold.
    pub fn new(keys: Vec<PublicKey>) -> Option<Self> {
        if keys.is_empty() {
            return None;
        }

        let mut by_key = BTreeMap::new();
        for (index, key) in keys.iter().enumerate() {
            if by_key.insert(*key, index as ValidatorIdx).is_some() {
                return None;
            }
        }

        Some(Self { keys, by_key })
    }

    /// The key registered at `index`.
    pub fn key(&self, index: ValidatorIdx) -> Option<&PublicKey> {
        self.keys.get(index as usize)
    }

    /// The index a key is registered at.
    pub fn index_of(&self, key: &PublicKey) -> Option<ValidatorIdx> {
        self.by_key.get(key).copied()
    }

    /// All keys in signing order.
    pub fn keys(&self) -> &[PublicKey] {
        &self.keys
    }

    /// Number of registered validators.
    pub fn cardinality(&self) -> usize {
        self.keys.len()
    }
}

#[cfg(test)]
mod tests {
    use portal_bls::PUBLIC_KEY_SIZE;

    use super::*;

    fn key(byte: u8) -> PublicKey {
        PublicKey::from_bytes([byte; PUBLIC_KEY_SIZE])
    }

    #[test]
    fn lookups_are_bidirectional() {
        let table = ValidatorTable::new(vec![key(1), key(2), key(3)]).unwrap();

        assert_eq!(table.cardinality(), 3);
        assert_eq!(table.key(1), Some(&key(2)));
        assert_eq!(table.index_of(&key(3)), Some(2));
        assert_eq!(table.key(3), None);
        assert_eq!(table.index_of(&key(9)), None);
    }

    #[test]
    fn duplicates_and_empty_are_rejected() {
        assert!(ValidatorTable::new(vec![key(1), key(1)]).is_none());
        assert!(ValidatorTable::new(vec![]).is_none());
    }
}
