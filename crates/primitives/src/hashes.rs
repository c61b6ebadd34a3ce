//! 32-byte identifiers used throughout the portal and the rule that derives
//! fresh output ids.

use sha2::{Digest, Sha256};

use crate::conditions::Amount;

macro_rules! hash_newtype {
    ($(#[doc = $doc:expr])* $name:ident) => {
        $(#[doc = $doc])*
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            borsh::BorshSerialize,
            borsh::BorshDeserialize,
        )]
        pub struct $name([u8; 32]);

        impl $name {
            /// Wraps raw bytes.
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            /// Returns the underlying bytes.
            pub const fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&hex::encode(self.0))
            }
        }

        impl std::str::FromStr for $name {
            type Err = hex::FromHexError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let mut bytes = [0u8; 32];
                hex::decode_to_slice(s, &mut bytes)?;

                Ok(Self(bytes))
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(
                deserializer: D,
            ) -> Result<Self, D::Error> {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;

                s.parse().map_err(serde::de::Error::custom)
            }
        }
    };
}

hash_newtype!(
    /// Identity of an output materialized on the host ledger.
    ///
    /// Derived from the spent parent, the locking script and the carried
    /// value, so an output's id commits to its entire ancestry.
    OutputId
);

hash_newtype!(
    /// Content hash of a locking script.
    ScriptHash
);

hash_newtype!(
    /// One-time announcement identity scoped to a spend bundle.
    AnnouncementId
);

hash_newtype!(
    /// Content hash of a message payload.
    MessageHash
);

impl OutputId {
    /// Derives the id of an output created by spending `parent`.
    ///
    /// The rule is the ledger's: an output is identified by the spend that
    /// created it together with its own locking script and value, which is
    /// what makes at most one successor of a given output exist.
    pub fn derive(parent: &OutputId, script_hash: &ScriptHash, value: Amount) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(parent.as_bytes());
        hasher.update(script_hash.as_bytes());
        hasher.update(value.to_units().to_le_bytes());

        Self(hasher.finalize().into())
    }
}

impl AnnouncementId {
    /// Announcement identity for `message` announced by the output `creator`.
    pub fn for_output(creator: &OutputId, message: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(creator.as_bytes());
        hasher.update(message);

        Self(hasher.finalize().into())
    }
}

/// Hashes `chunks` under a fixed domain tag.
pub fn tagged_hash(tag: &[u8], chunks: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(tag);
    for chunk in chunks {
        hasher.update(chunk);
    }

    hasher.finalize().into()
}
