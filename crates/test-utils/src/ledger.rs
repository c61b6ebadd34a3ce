//! An in-memory ledger enforcing the settlement rules the portal relies on.

use std::collections::{BTreeMap, BTreeSet};

use portal_primitives::{
    hashes::tagged_hash,
    prelude::{
        Amount, AnnouncementId, Condition, EvalError, Output, OutputId, OutputLedger, OutputState,
        ScriptHash, SpendBundle,
    },
};
use thiserror::Error;

/// Domain tag for ids of outputs minted out of thin air.
const MINT_TAG: &[u8] = b"portal/test/mint/v1";

/// Settlement failure in the [`MockLedger`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The bundle spends an output the ledger never materialized.
    #[error("output {0} does not exist")]
    UnknownOutput(OutputId),

    /// The bundle spends an output that is already consumed. This is the
    /// double-spend rejection that makes claims exactly-once and state
    /// transitions linear.
    #[error("output {0} is already spent")]
    AlreadySpent(OutputId),

    /// The revealed script does not hash to the output's locking condition.
    #[error("revealed script {script} does not lock output {output}")]
    ScriptHashMismatch {
        /// The output being spent.
        output: OutputId,

        /// Hash of the script the spend revealed.
        script: ScriptHash,
    },

    /// The spend's record of the output disagrees with the ledger's.
    #[error("spend carries a stale view of output {0}")]
    OutputMismatch(OutputId),

    /// A script rejected its solution.
    #[error(transparent)]
    Script(#[from] EvalError),

    /// An asserted announcement was not made by any spend in the bundle.
    #[error("announcement {0} was asserted but never made")]
    UnsatisfiedAssertion(AnnouncementId),

    /// A script pinned a self id that is not the spent output's id.
    #[error("script pinned id {claimed} but the spent output is {actual}")]
    SelfIdMismatch {
        /// The id the solution claimed.
        claimed: OutputId,

        /// The id of the output actually being spent.
        actual: OutputId,
    },

    /// The bundle would create an output that already exists.
    #[error("output {0} would be created twice")]
    DuplicateOutput(OutputId),

    /// Created value plus reserved fees exceed the consumed value.
    #[error("bundle creates {outputs} and reserves {reserved} but only consumes {inputs}")]
    InsufficientValue {
        /// Total units consumed.
        inputs: u64,

        /// Total units created.
        outputs: u64,

        /// Total units reserved as fees.
        reserved: u64,
    },
}

/// An in-memory single-spend ledger.
///
/// Bundles settle atomically: the whole bundle is validated against the
/// current state and either every effect applies or none does.
/// Announcements are scoped to the bundle being settled, matching the
/// exactly-once pairing the claim flow depends on.
#[derive(Debug, Clone, Default)]
pub struct MockLedger {
    unspent: BTreeMap<OutputId, Output>,
    spent: BTreeSet<OutputId>,
    minted: u64,
}

impl MockLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Materializes an output out of thin air, funding a test scenario.
    pub fn mint(&mut self, script_hash: ScriptHash, value: Amount) -> Output {
        let id = OutputId::from_bytes(tagged_hash(MINT_TAG, &[&self.minted.to_le_bytes()]));
        self.minted += 1;

        let output = Output {
            id,
            script_hash,
            value,
        };
        self.unspent.insert(id, output.clone());

        output
    }

    /// The unspent output with the given id, if any.
    pub fn unspent(&self, id: &OutputId) -> Option<&Output> {
        self.unspent.get(id)
    }
}

impl OutputLedger for MockLedger {
    type Error = LedgerError;

    fn broadcast(&mut self, bundle: SpendBundle) -> Result<(), LedgerError> {
        let mut consumed: BTreeSet<OutputId> = BTreeSet::new();
        let mut created: Vec<Output> = Vec::new();
        let mut announced: BTreeSet<AnnouncementId> = BTreeSet::new();
        let mut asserted: Vec<AnnouncementId> = Vec::new();
        let mut value_in: u64 = 0;
        let mut value_out: u64 = 0;
        let mut reserved: u64 = 0;

        for spend in &bundle.spends {
            let output = self.unspent.get(&spend.output.id).ok_or_else(|| {
                if self.spent.contains(&spend.output.id) {
                    LedgerError::AlreadySpent(spend.output.id)
                } else {
                    LedgerError::UnknownOutput(spend.output.id)
                }
            })?;

            if *output != spend.output {
                return Err(LedgerError::OutputMismatch(spend.output.id));
            }

            let revealed = spend.script.script_hash();
            if revealed != output.script_hash {
                return Err(LedgerError::ScriptHashMismatch {
                    output: output.id,
                    script: revealed,
                });
            }

            if !consumed.insert(output.id) {
                return Err(LedgerError::AlreadySpent(output.id));
            }

            value_in += output.value.to_units();

            for condition in spend.script.evaluate(&spend.solution)? {
                match condition {
                    Condition::CreateOutput { script_hash, value } => {
                        created.push(Output {
                            id: OutputId::derive(&output.id, &script_hash, value),
                            script_hash,
                            value,
                        });
                        value_out += value.to_units();
                    }
                    Condition::CreateAnnouncement { id } => {
                        announced.insert(id);
                    }
                    Condition::AssertAnnouncement { id } => {
                        asserted.push(id);
                    }
                    Condition::AssertSelfId { id } => {
                        if id != output.id {
                            return Err(LedgerError::SelfIdMismatch {
                                claimed: id,
                                actual: output.id,
                            });
                        }
                    }
                    Condition::ReserveFee { amount } => {
                        reserved += amount.to_units();
                    }
                    Condition::Melt => {}
                }
            }
        }

        for id in asserted {
            if !announced.contains(&id) {
                return Err(LedgerError::UnsatisfiedAssertion(id));
            }
        }

        if value_in < value_out + reserved {
            return Err(LedgerError::InsufficientValue {
                inputs: value_in,
                outputs: value_out,
                reserved,
            });
        }

        for output in &created {
            if self.unspent.contains_key(&output.id)
                || self.spent.contains(&output.id)
                || created.iter().filter(|o| o.id == output.id).count() > 1
            {
                return Err(LedgerError::DuplicateOutput(output.id));
            }
        }

        // All checks passed; apply atomically.
        for id in consumed {
            self.unspent.remove(&id);
            self.spent.insert(id);
        }
        for output in created {
            self.unspent.insert(output.id, output);
        }

        Ok(())
    }

    fn output_state(&self, id: &OutputId) -> OutputState {
        if self.spent.contains(id) {
            OutputState::Spent
        } else if self.unspent.contains_key(id) {
            OutputState::Unspent
        } else {
            OutputState::Unknown
        }
    }
}
