//! # Portal State
//!
//! The destination-chain resident state of the portal: the registered
//! validator set and threshold, per-source-chain nonce bookkeeping, and the
//! destination registry, all carried by a single live output whose locking
//! script *is* the encoded state.
//!
//! The state is never mutated. Accepting a batch of messages (or a lifecycle
//! update) spends the version-`k` output and creates the version-`k+1`
//! output in one atomic settlement, so the lineage is a linear chain and the
//! ledger's single-spend rule guarantees at most one successor per version.
//! A transition that loses the settlement race simply never finalizes; the
//! caller re-derives from the latest confirmed version and retries. Nothing
//! in this crate assumes its own proposal settled.

pub mod errors;
pub mod lifecycle;
pub mod portal_state;
pub mod transition;

pub use errors::TransitionError;
pub use lifecycle::{launch, Terminated};
pub use portal_state::{LineageProof, PortalState, StateSnapshot};
pub use transition::{ClaimableArtifact, PortalSolution, SignedMessage, Transition};
