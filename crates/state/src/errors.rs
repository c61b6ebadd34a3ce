//! Errors that can reject a portal state transition.

use portal_bls::VerifyError;
use portal_primitives::prelude::{Amount, EvalError, Nonce, ScriptHash, SourceChainId};
use thiserror::Error;

/// Why a proposed transition was rejected.
///
/// Every rejection is local and recoverable: the current state is untouched
/// and the caller may retry with a corrected input. None of these downgrade
/// to a partial success.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The signature bundle did not verify against the current validator set
    /// and threshold.
    #[error("signature verification failed: {0}")]
    Verify(#[from] VerifyError),

    /// A message's nonce is not exactly one past the recorded nonce for its
    /// source chain (gap, replay, or reordering). A recorded nonce of zero
    /// means the chain has never been seen; its first message may carry any
    /// nonce of at least one.
    #[error(
        "nonce {got} for source chain {source_chain} does not advance the recorded nonce {recorded}"
    )]
    StaleNonce {
        /// The source chain whose sequence was violated.
        source_chain: SourceChainId,

        /// The nonce currently recorded for that chain (zero if none).
        recorded: Nonce,

        /// The offending message nonce.
        got: Nonce,
    },

    /// The message targets a destination outside the portal's registry. Only
    /// raised by portals launched with a non-empty registry.
    #[error("destination {destination} is not in the portal's registry")]
    UnknownDestination {
        /// The unregistered destination script hash.
        destination: ScriptHash,
    },

    /// A relay with no messages transitions nothing.
    #[error("relay batch is empty")]
    EmptyBatch,

    /// The threshold must be between one and the validator-set size.
    #[error("threshold {threshold} is invalid for a validator set of {validators}")]
    InvalidThreshold {
        /// The offending threshold.
        threshold: usize,

        /// Size of the validator set it was proposed for.
        validators: usize,
    },

    /// The proposed validator set is empty or contains duplicate keys.
    #[error("validator set is empty or contains duplicate keys")]
    InvalidValidatorSet,

    /// Termination cannot reserve more than the portal output carries.
    #[error("reserve fee {fee} exceeds the portal output's value {available}")]
    ReserveFeeTooLarge {
        /// The proposed forfeited fee.
        fee: Amount,

        /// Value actually carried by the portal output.
        available: Amount,
    },
}

impl From<TransitionError> for EvalError {
    fn from(err: TransitionError) -> Self {
        EvalError::unsatisfied(err)
    }
}
