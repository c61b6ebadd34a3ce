//! Protocol constants shared across crates.

use crate::conditions::Amount;

/// Value carried by the portal state output at every version.
///
/// The state output is a marker, not a store of value; one unit keeps it
/// materialized on ledgers that refuse zero-value outputs with successors.
pub const PORTAL_STATE_VALUE: Amount = Amount::from_units(1);

/// Value carried by a claimable artifact.
///
/// Artifacts are zero-worth by construction; their existence is the proof
/// that a message was quorum-approved and not yet delivered.
pub const ARTIFACT_VALUE: Amount = Amount::ZERO;
