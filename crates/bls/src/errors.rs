//! Errors for BLS key handling and threshold verification.

use thiserror::Error;

use crate::bundle::ValidatorIdx;

/// Error while handling BLS key material or an individual signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// Public key bytes do not decode to a valid G1 point.
    #[error("public key bytes are not a valid curve point")]
    MalformedPublicKey,

    /// Signature bytes do not decode to a valid G2 point.
    #[error("signature bytes are not a valid curve point")]
    MalformedSignature,

    /// Secret key bytes do not decode to a valid scalar.
    #[error("secret key bytes are not a valid scalar")]
    MalformedSecretKey,

    /// The pairing equation does not hold for this key, message and
    /// signature.
    #[error("signature does not verify against the public key")]
    BadSignature,

    /// Aggregation over an empty set is undefined.
    #[error("cannot aggregate an empty set")]
    EmptyAggregate,
}

/// Outcome of verifying a [`SignatureBundle`](crate::SignatureBundle) against
/// a validator set and threshold.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// The bundle references a validator index outside the validator set.
    #[error("bundle references validator index {0} outside the validator set")]
    UnknownSigner(ValidatorIdx),

    /// Fewer partial signatures than the required threshold, regardless of
    /// their validity.
    #[error("quorum not met: {present} signatures present, {required} required")]
    InsufficientSignatures {
        /// Number of partial signatures present in the bundle.
        present: usize,

        /// Threshold required by the portal state under verification.
        required: usize,
    },

    /// The registered public key of a claimed signer does not decode.
    #[error("public key of validator {index} is malformed")]
    MalformedKey {
        /// Index of the validator whose key failed to decode.
        index: ValidatorIdx,
    },

    /// A partial signature in the bundle does not decode.
    #[error("partial signature from validator {index} is malformed")]
    MalformedPartial {
        /// Index of the validator whose partial failed to decode.
        index: ValidatorIdx,
    },

    /// The aggregate does not verify against the commitment. Either a claimed
    /// signer did not actually sign this commitment or the caller encoded the
    /// message differently than the signers did.
    #[error("aggregate signature does not verify against the commitment")]
    InvalidSignature,
}
