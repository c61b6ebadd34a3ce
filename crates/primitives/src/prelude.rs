//! Re-exports of the types most crates need.

pub use crate::{
    commitment::{commit_message, commit_termination, commit_update, Commitment},
    conditions::{Amount, Condition},
    constants::{ARTIFACT_VALUE, PORTAL_STATE_VALUE},
    errors::EvalError,
    hashes::{AnnouncementId, MessageHash, OutputId, ScriptHash},
    ledger::{LockingScript, Output, OutputLedger, OutputState, Spend, SpendBundle},
    message::{Nonce, PortalMessage, SourceChainId},
    validator_table::ValidatorTable,
};
