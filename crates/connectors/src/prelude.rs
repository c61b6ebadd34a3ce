//! Re-exports of all connector types for convenience.

pub use crate::{
    claim::{claim, Claim, ClaimerResource},
    connector_msg::{ClaimSolution, ClaimerOutput, MessageConnector},
    delegated::DelegatedConditions,
    errors::ClaimError,
};
