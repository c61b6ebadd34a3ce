//! Commitments that validators sign.
//!
//! Every signed operation (message relay, validator-set update, termination)
//! hashes to a commitment that binds the id of the *live* portal state
//! output, not just the lineage. A signature therefore authorizes exactly one
//! operation against exactly one state version of exactly one portal
//! instance: it cannot be replayed after the state advances, nor against a
//! parallel deployment, nor for a different operation kind (the three tags
//! are distinct).

use portal_bls::PublicKey;

use crate::{
    conditions::Amount,
    hashes::{tagged_hash, OutputId},
    message::PortalMessage,
};

/// Domain tag for message-relay commitments.
pub const MESSAGE_COMMITMENT_TAG: &[u8] = b"portal/commit/message/v1";

/// Domain tag for validator-set update commitments.
pub const UPDATE_COMMITMENT_TAG: &[u8] = b"portal/commit/update/v1";

/// Domain tag for termination commitments.
pub const TERMINATE_COMMITMENT_TAG: &[u8] = b"portal/commit/terminate/v1";

/// The byte string validators sign for one operation against one portal
/// state version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Commitment([u8; 32]);

impl Commitment {
    /// The commitment bytes handed to signing and verification.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

/// Commits to delivering `message` through the portal state identified by
/// `state_id`.
///
/// Every field that affects delivery is bound: source chain, nonce, sender,
/// destination and payload, through the message's deterministic encoding.
pub fn commit_message(state_id: &OutputId, message: &PortalMessage) -> Commitment {
    let encoded = borsh::to_vec(message).expect("message encoding is infallible");

    Commitment(tagged_hash(
        MESSAGE_COMMITMENT_TAG,
        &[&encoded, state_id.as_bytes()],
    ))
}

/// Commits to rotating the portal identified by `state_id` to a new
/// validator set and threshold.
pub fn commit_update(
    state_id: &OutputId,
    new_validators: &[PublicKey],
    new_threshold: usize,
) -> Commitment {
    let encoded = borsh::to_vec(&(new_threshold as u64, new_validators))
        .expect("update encoding is infallible");

    Commitment(tagged_hash(
        UPDATE_COMMITMENT_TAG,
        &[&encoded, state_id.as_bytes()],
    ))
}

/// Commits to terminating the portal identified by `state_id`, forfeiting
/// `reserve_fee`.
///
/// The fee is part of the signed bytes so a relayer cannot raise it after
/// signatures are collected.
pub fn commit_termination(state_id: &OutputId, reserve_fee: Amount) -> Commitment {
    Commitment(tagged_hash(
        TERMINATE_COMMITMENT_TAG,
        &[&reserve_fee.to_units().to_le_bytes(), state_id.as_bytes()],
    ))
}
