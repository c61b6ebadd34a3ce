//! The versioned portal state value and its on-ledger representation.

use std::collections::{BTreeMap, BTreeSet};

use borsh::{BorshDeserialize, BorshSerialize};
use portal_bls::PublicKey;
use portal_primitives::{
    hashes::tagged_hash,
    prelude::{
        Condition, EvalError, LockingScript, Nonce, Output, OutputId, ScriptHash, SourceChainId,
        ValidatorTable, PORTAL_STATE_VALUE,
    },
};

use crate::{errors::TransitionError, transition::PortalSolution};

/// Domain tag for the portal state's script hash.
const PORTAL_STATE_TAG: &[u8] = b"portal/script/state/v1";

/// Link from a portal state version to its predecessor.
///
/// Version zero links to the genesis output that the launch spend consumed;
/// every later version links to the portal output it replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct LineageProof {
    /// Id of the output whose spend created this state's output.
    pub parent_id: OutputId,

    /// Script hash that locked the parent output.
    pub parent_script_hash: ScriptHash,
}

/// The authoritative, losslessly round-trippable encoding of a portal state.
///
/// This is exactly what the state's locking script commits to: the ledger
/// materializes the portal as an output locked by the hash of this snapshot,
/// so decoding the snapshot recovers the full logical state.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct StateSnapshot {
    /// Id of the genesis output this lineage grew from.
    pub instance_id: OutputId,

    /// Position in the lineage.
    pub version: u64,

    /// Number of validator signatures required per operation.
    pub threshold: u64,

    /// Validator public keys in signing order.
    pub validator_keys: Vec<PublicKey>,

    /// Destination script hashes the portal will deliver to; empty means any.
    pub destination_registry: BTreeSet<ScriptHash>,

    /// Last processed nonce per source chain.
    pub nonces: BTreeMap<SourceChainId, Nonce>,
}

/// One version of the portal's destination-chain state.
///
/// An immutable value: transitions construct the successor version rather
/// than mutating in place, and the ledger's single-spend rule serializes
/// which successor becomes live. The value also *is* the locking script of
/// its own output (see the [`LockingScript`] impl), which is what forces any
/// on-ledger transition through the same verification and nonce rules the
/// typed methods apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalState {
    pub(crate) instance_id: OutputId,
    pub(crate) version: u64,
    pub(crate) validators: ValidatorTable,
    pub(crate) threshold: usize,
    pub(crate) nonces: BTreeMap<SourceChainId, Nonce>,
    pub(crate) registry: BTreeSet<ScriptHash>,
    pub(crate) lineage: LineageProof,
    pub(crate) state_id: OutputId,
}

impl PortalState {
    /// Id of the genesis output this lineage grew from; stable across all
    /// versions.
    pub fn instance_id(&self) -> OutputId {
        self.instance_id
    }

    /// Position of this state in its lineage.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// The registered validator set.
    pub fn validators(&self) -> &ValidatorTable {
        &self.validators
    }

    /// Signatures required to authorize an operation.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Last processed nonce for `source_chain`, if any message from it has
    /// been accepted.
    pub fn last_nonce(&self, source_chain: &SourceChainId) -> Option<Nonce> {
        self.nonces.get(source_chain).copied()
    }

    /// The destination registry; empty means the portal delivers anywhere.
    pub fn registry(&self) -> &BTreeSet<ScriptHash> {
        &self.registry
    }

    /// Link to the predecessor version.
    pub fn lineage(&self) -> LineageProof {
        self.lineage
    }

    /// Ledger id of this state's output.
    pub fn state_id(&self) -> OutputId {
        self.state_id
    }

    /// The ledger output carrying this state.
    pub fn output(&self) -> Output {
        Output {
            id: self.state_id,
            script_hash: self.script_hash(),
            value: PORTAL_STATE_VALUE,
        }
    }

    /// The authoritative snapshot this state's locking script commits to.
    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            instance_id: self.instance_id,
            version: self.version,
            threshold: self.threshold as u64,
            validator_keys: self.validators.keys().to_vec(),
            destination_registry: self.registry.clone(),
            nonces: self.nonces.clone(),
        }
    }

    /// Reconstructs a state from its snapshot and lineage link.
    ///
    /// This is the decode half of the round-trip through the ledger's
    /// materialization; the output id is recomputed, not trusted.
    pub fn from_snapshot(
        snapshot: StateSnapshot,
        lineage: LineageProof,
    ) -> Result<Self, TransitionError> {
        let validators =
            ValidatorTable::new(snapshot.validator_keys).ok_or(TransitionError::InvalidValidatorSet)?;
        let threshold = snapshot.threshold as usize;
        if threshold == 0 || threshold > validators.cardinality() {
            return Err(TransitionError::InvalidThreshold {
                threshold,
                validators: validators.cardinality(),
            });
        }

        let mut state = Self {
            instance_id: snapshot.instance_id,
            version: snapshot.version,
            validators,
            threshold,
            nonces: snapshot.nonces,
            registry: snapshot.destination_registry,
            lineage,
            state_id: OutputId::from_bytes([0; 32]),
        };
        state.state_id = OutputId::derive(&lineage.parent_id, &state.script_hash(), PORTAL_STATE_VALUE);

        Ok(state)
    }
}

impl LockingScript for PortalState {
    fn script_hash(&self) -> ScriptHash {
        let encoded = borsh::to_vec(&self.snapshot()).expect("snapshot encoding is infallible");

        ScriptHash::from_bytes(tagged_hash(PORTAL_STATE_TAG, &[&encoded]))
    }

    fn evaluate(&self, solution: &[u8]) -> Result<Vec<Condition>, EvalError> {
        let solution = PortalSolution::try_from_slice(solution).map_err(EvalError::malformed)?;

        match solution {
            PortalSolution::Messages(batch) => {
                let transition = self.relay(&batch)?;

                let mut conditions = vec![Condition::CreateOutput {
                    script_hash: transition.successor.script_hash(),
                    value: PORTAL_STATE_VALUE,
                }];
                conditions.extend(transition.artifacts.iter().map(|artifact| {
                    Condition::CreateOutput {
                        script_hash: artifact.output.script_hash,
                        value: artifact.output.value,
                    }
                }));

                Ok(conditions)
            }
            PortalSolution::Update {
                new_validators,
                new_threshold,
                bundle,
            } => {
                let transition = self.update(new_validators, new_threshold as usize, bundle)?;

                Ok(vec![Condition::CreateOutput {
                    script_hash: transition.successor.script_hash(),
                    value: PORTAL_STATE_VALUE,
                }])
            }
            PortalSolution::Terminate {
                reserve_fee,
                bundle,
            } => {
                self.terminate(reserve_fee, bundle)?;

                Ok(vec![
                    Condition::Melt,
                    Condition::ReserveFee {
                        amount: reserve_fee,
                    },
                ])
            }
        }
    }
}
