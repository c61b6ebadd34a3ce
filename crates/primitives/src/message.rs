//! Cross-chain messages and their per-source ordering primitives.

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use crate::hashes::{tagged_hash, MessageHash, ScriptHash};

/// Domain tag for hashing message payloads.
const PAYLOAD_HASH_TAG: &[u8] = b"portal/payload/v1";

/// Opaque identifier of an originating chain.
///
/// The portal never interprets it; it only scopes nonce bookkeeping. New
/// source chains are discovered lazily as their first message arrives.
#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct SourceChainId(String);

impl SourceChainId {
    /// Creates a source-chain identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SourceChainId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SourceChainId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A message sequence number, strictly increasing per source chain.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    BorshSerialize,
    BorshDeserialize,
)]
pub struct Nonce(u64);

impl Nonce {
    /// Creates a nonce.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// The numeric value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The nonce immediately following this one.
    pub const fn next(self) -> Nonce {
        Nonce(self.0 + 1)
    }

    /// Whether this nonce may open the sequence of a never-seen source
    /// chain. Zero is reserved as "nothing recorded".
    pub const fn is_valid_first(self) -> bool {
        self.0 >= 1
    }
}

impl std::fmt::Display for Nonce {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An immutable cross-chain message as authorized by the validator set.
///
/// `source_address` is the raw byte identity of the sender on the source
/// chain; the portal echoes it without interpretation. `destination` is the
/// hash of the locking script that must claim the delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PortalMessage {
    /// Chain the message originates from.
    pub source_chain: SourceChainId,

    /// Position in the source chain's message sequence.
    pub nonce: Nonce,

    /// Raw sender identity on the source chain.
    pub source_address: Vec<u8>,

    /// Script hash the payload must be delivered to.
    pub destination: ScriptHash,

    /// Opaque message payload.
    pub payload: Vec<u8>,
}

impl PortalMessage {
    /// Content hash of the payload, as committed into the claimable
    /// artifact's locking script.
    pub fn payload_hash(&self) -> MessageHash {
        MessageHash::from_bytes(tagged_hash(PAYLOAD_HASH_TAG, &[&self.payload]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_hash_tracks_payload_only() {
        let message = PortalMessage {
            source_chain: "eth".into(),
            nonce: Nonce::new(1),
            source_address: b"0xabc".to_vec(),
            destination: ScriptHash::from_bytes([7; 32]),
            payload: vec![1, 2, 3],
        };

        let mut renonced = message.clone();
        renonced.nonce = Nonce::new(2);
        assert_eq!(message.payload_hash(), renonced.payload_hash());

        let mut edited = message.clone();
        edited.payload = vec![1, 2, 4];
        assert_ne!(message.payload_hash(), edited.payload_hash());
    }

    #[test]
    fn nonce_first_rules() {
        assert!(!Nonce::new(0).is_valid_first());
        assert!(Nonce::new(1).is_valid_first());
        assert!(Nonce::new(1337).is_valid_first());
        assert_eq!(Nonce::new(41).next(), Nonce::new(42));
    }
}
