//! Partial-signature bundles collected by a relayer.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};

use crate::keys::Signature;

/// Index of a validator within the ordered validator set of a portal state.
pub type ValidatorIdx = u32;

/// Partial signatures over one message commitment, keyed by validator index.
///
/// Absence of an index means that validator did not sign (or the relayer
/// dropped a partial it could not verify). The bundle carries no threshold of
/// its own; sufficiency is judged against the portal state it is submitted
/// to.
#[derive(Debug, Clone, Default, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignatureBundle(BTreeMap<ValidatorIdx, Signature>);

impl SignatureBundle {
    /// Creates an empty bundle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a partial signature for the given validator index, replacing any
    /// previous partial from the same validator.
    pub fn insert(&mut self, index: ValidatorIdx, signature: Signature) {
        self.0.insert(index, signature);
    }

    /// Number of partial signatures present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the bundle holds no partials at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a partial from the given validator is present.
    pub fn contains(&self, index: ValidatorIdx) -> bool {
        self.0.contains_key(&index)
    }

    /// Iterates over `(validator index, partial signature)` pairs in index
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (ValidatorIdx, &Signature)> {
        self.0.iter().map(|(idx, sig)| (*idx, sig))
    }

    /// The validator indices that contributed a partial, in ascending order.
    pub fn signers(&self) -> impl Iterator<Item = ValidatorIdx> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(ValidatorIdx, Signature)> for SignatureBundle {
    fn from_iter<T: IntoIterator<Item = (ValidatorIdx, Signature)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::SIGNATURE_SIZE;

    #[test]
    fn insert_replaces_existing_partial() {
        let mut bundle = SignatureBundle::new();
        bundle.insert(3, Signature::from_bytes([1; SIGNATURE_SIZE]));
        bundle.insert(3, Signature::from_bytes([2; SIGNATURE_SIZE]));

        assert_eq!(bundle.len(), 1);
        assert_eq!(
            bundle.iter().next().unwrap().1,
            &Signature::from_bytes([2; SIGNATURE_SIZE])
        );
    }

    #[test]
    fn signers_are_ordered() {
        let bundle: SignatureBundle = [(9, [0; SIGNATURE_SIZE]), (2, [0; SIGNATURE_SIZE])]
            .into_iter()
            .map(|(idx, bytes)| (idx, Signature::from_bytes(bytes)))
            .collect();

        assert_eq!(bundle.signers().collect::<Vec<_>>(), vec![2, 9]);
    }
}
