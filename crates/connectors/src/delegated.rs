//! The delegated-conditions script: the simplest cooperative destination.

use borsh::BorshDeserialize;
use portal_primitives::prelude::*;

/// Domain tag for the delegated-conditions script hash.
const DELEGATED_TAG: &[u8] = b"portal/script/delegated/v1";

/// A script that emits exactly the conditions given in its solution.
///
/// This is the stock claimer for message artifacts: an output locked by it
/// can announce the claim and direct the delivery in one spend. Anything can
/// spend such an output, so it is a staging resource, not a vault; claimers
/// fund it immediately before redeeming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DelegatedConditions;

impl DelegatedConditions {
    /// Encodes a condition list into this script's solution format.
    pub fn solution_for(conditions: &[Condition]) -> Vec<u8> {
        borsh::to_vec(conditions).expect("condition encoding is infallible")
    }
}

impl LockingScript for DelegatedConditions {
    fn script_hash(&self) -> ScriptHash {
        ScriptHash::from_bytes(portal_primitives::hashes::tagged_hash(DELEGATED_TAG, &[]))
    }

    fn evaluate(&self, solution: &[u8]) -> Result<Vec<Condition>, EvalError> {
        Vec::<Condition>::try_from_slice(solution).map_err(EvalError::malformed)
    }
}
