//! Errors raised while constructing a claim.

use portal_primitives::prelude::ScriptHash;
use thiserror::Error;

/// Why a claim could not be constructed against an artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    /// The revealed message fields do not reproduce the artifact's locking
    /// script. Either the message is not the one the quorum approved or the
    /// artifact belongs to a different portal instance.
    #[error("revealed message does not match the artifact's locking condition")]
    PayloadMismatch,

    /// The claimer output is not locked by the message's destination script.
    #[error("claimer script {claimer} is not the committed destination {destination}")]
    DestinationMismatch {
        /// Script hash locking the claimer output.
        claimer: ScriptHash,

        /// Destination script hash committed in the message.
        destination: ScriptHash,
    },

    /// The artifact output carries value, which a genuine artifact never
    /// does.
    #[error("artifact output carries value; genuine artifacts are zero-worth")]
    ArtifactCarriesValue,
}
