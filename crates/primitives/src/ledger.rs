//! Seams to the external script-execution engine and host ledger.
//!
//! The portal never talks to a concrete ledger; it produces spend bundles
//! and observes whether they finalized. Settlement is asynchronous and may
//! simply never happen (a competing successor finalized first, the fee was
//! too low), in which case the caller re-derives from the latest confirmed
//! state and retries. Nothing here assumes a proposed transition succeeded.

use std::sync::Arc;

use crate::{
    conditions::{Amount, Condition},
    errors::EvalError,
    hashes::{OutputId, ScriptHash},
};

/// An unspent (or once-spent) output materialized on the host ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    /// The output's ledger identity.
    pub id: OutputId,

    /// Hash of the script locking it.
    pub script_hash: ScriptHash,

    /// Value it carries.
    pub value: Amount,
}

/// A program locking an output.
///
/// The script-execution engine is external; this trait is the portal's whole
/// view of it: a script has a content hash, and evaluating it against a
/// solution yields the conditions the ledger must enforce. Implementations
/// must be pure.
pub trait LockingScript: std::fmt::Debug + Send + Sync {
    /// Content hash of this script; the locking condition of any output it
    /// guards.
    fn script_hash(&self) -> ScriptHash;

    /// Evaluates the script against `solution`.
    fn evaluate(&self, solution: &[u8]) -> Result<Vec<Condition>, EvalError>;
}

/// One spend: an output, the revealed script locking it, and a solution.
#[derive(Debug, Clone)]
pub struct Spend {
    /// The output being consumed.
    pub output: Output,

    /// The full script whose hash locks the output.
    pub script: Arc<dyn LockingScript>,

    /// Solution bytes the script is evaluated against.
    pub solution: Vec<u8>,
}

/// A group of spends that settle atomically or not at all.
///
/// Announcements are scoped to the bundle: an assertion in one spend is
/// satisfied only by an announcement made by another spend in the same
/// bundle.
#[derive(Debug, Clone, Default)]
pub struct SpendBundle {
    /// The spends in this bundle.
    pub spends: Vec<Spend>,
}

impl SpendBundle {
    /// Creates a bundle from spends.
    pub fn new(spends: Vec<Spend>) -> Self {
        Self { spends }
    }
}

/// Where an output currently stands on the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputState {
    /// The ledger has never materialized this output.
    Unknown,

    /// Materialized and still spendable.
    Unspent,

    /// Consumed; it can never be spent again.
    Spent,
}

/// The host ledger, reduced to what the portal needs: atomic settlement of
/// spend bundles and observation of output lifecycles.
///
/// Implementations must guarantee that at most one spend of any output ever
/// settles; competing bundles race and exactly one wins. That guarantee is
/// what serializes portal state transitions and makes artifact redemption
/// exactly-once.
pub trait OutputLedger {
    /// Settlement failure surfaced to the caller.
    type Error: std::error::Error;

    /// Submits a bundle for settlement.
    fn broadcast(&mut self, bundle: SpendBundle) -> Result<(), Self::Error>;

    /// Observes an output's current state.
    fn output_state(&self, id: &OutputId) -> OutputState;
}
