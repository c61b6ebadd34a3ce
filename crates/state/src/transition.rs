//! Relay and update transitions over the portal state.

use std::{collections::BTreeMap, sync::Arc};

use borsh::{BorshDeserialize, BorshSerialize};
use portal_bls::{verify, PublicKey, SignatureBundle};
use portal_connectors::MessageConnector;
use portal_primitives::prelude::*;
use tracing::info;

use crate::{
    errors::TransitionError,
    portal_state::{LineageProof, PortalState},
};

/// A message paired with the quorum proof a relayer collected for it.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct SignedMessage {
    /// The message to deliver.
    pub message: PortalMessage,

    /// Partial signatures over this message's commitment against the state
    /// being spent.
    pub bundle: SignatureBundle,
}

/// Solution to the portal state's locking script: one of the three
/// authorized operations.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub enum PortalSolution {
    /// Relay a batch of quorum-approved messages.
    Messages(Vec<SignedMessage>),

    /// Rotate the validator set and threshold.
    Update {
        /// The proposed validator keys in signing order.
        new_validators: Vec<PublicKey>,

        /// The proposed threshold.
        new_threshold: u64,

        /// Quorum proof by the *current* validator set over the update
        /// commitment.
        bundle: SignatureBundle,
    },

    /// End the lineage, forfeiting a fee.
    Terminate {
        /// The forfeited fee.
        reserve_fee: Amount,

        /// Quorum proof over the termination commitment.
        bundle: SignatureBundle,
    },
}

/// An ephemeral claimable artifact minted for one accepted message.
///
/// Its existence on the ledger is the proof "this message was
/// quorum-approved and not yet delivered"; redeeming it consumes it forever.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimableArtifact {
    /// The zero-value marker output.
    pub output: Output,

    /// The message it delivers.
    pub message: PortalMessage,
}

/// The result of a transition: everything needed to settle it and to carry
/// on from the successor once settlement is confirmed.
#[derive(Debug, Clone)]
pub struct Transition {
    /// The version-`k+1` state this transition produces.
    pub successor: PortalState,

    /// One artifact per relayed message; empty for updates.
    pub artifacts: Vec<ClaimableArtifact>,

    /// The portal spend realizing the transition. Settlement may still lose
    /// the race against a competing successor; the successor here is real
    /// only once the ledger confirms it.
    pub spend: Spend,
}

impl PortalState {
    /// Relays a batch of verified messages, producing the successor state
    /// and one claimable artifact per message.
    ///
    /// Every message's bundle must meet this state's threshold over the
    /// commitment binding *this* state's output id. Nonces are applied in
    /// batch order: within one source chain the batch must be consecutive,
    /// while different chains are independent. The whole batch commits as
    /// one state transition or not at all; any rejection leaves this state
    /// untouched and recorded nonces unchanged.
    pub fn relay(&self, batch: &[SignedMessage]) -> Result<Transition, TransitionError> {
        if batch.is_empty() {
            return Err(TransitionError::EmptyBatch);
        }

        for signed in batch {
            let commitment = commit_message(&self.state_id, &signed.message);
            verify(
                commitment.as_bytes(),
                self.validators.keys(),
                self.threshold,
                &signed.bundle,
            )?;

            if !self.registry.is_empty() && !self.registry.contains(&signed.message.destination) {
                return Err(TransitionError::UnknownDestination {
                    destination: signed.message.destination,
                });
            }
        }

        let mut nonces = self.nonces.clone();
        for signed in batch {
            let message = &signed.message;
            let recorded = nonces.get(&message.source_chain).copied();
            let admissible = match recorded {
                Some(last) => message.nonce == last.next(),
                // A never-seen chain establishes its baseline with any
                // positive nonce; zero is the "nothing recorded" sentinel.
                None => message.nonce.is_valid_first(),
            };

            if !admissible {
                return Err(TransitionError::StaleNonce {
                    source_chain: message.source_chain.clone(),
                    recorded: recorded.unwrap_or(Nonce::new(0)),
                    got: message.nonce,
                });
            }

            nonces.insert(message.source_chain.clone(), message.nonce);
        }

        let artifacts = batch
            .iter()
            .map(|signed| {
                let connector = MessageConnector::new(self.instance_id, &signed.message);
                let script_hash = connector.script_hash();

                ClaimableArtifact {
                    output: Output {
                        id: OutputId::derive(&self.state_id, &script_hash, ARTIFACT_VALUE),
                        script_hash,
                        value: ARTIFACT_VALUE,
                    },
                    message: signed.message.clone(),
                }
            })
            .collect();

        let successor = self.successor(self.validators.clone(), self.threshold, nonces);
        let spend = self.spend_with(PortalSolution::Messages(batch.to_vec()));

        info!(
            version = self.version,
            successor = successor.version,
            messages = batch.len(),
            "relay transition constructed"
        );

        Ok(Transition {
            successor,
            artifacts,
            spend,
        })
    }

    /// Rotates the validator set and threshold, authorized by a quorum of
    /// the *current* set over the update commitment.
    ///
    /// Nonce bookkeeping and the destination registry carry over unchanged;
    /// rotation is an ordinary transition in the same lineage, never an
    /// out-of-band mutation.
    pub fn update(
        &self,
        new_validators: Vec<PublicKey>,
        new_threshold: usize,
        bundle: SignatureBundle,
    ) -> Result<Transition, TransitionError> {
        let table =
            ValidatorTable::new(new_validators.clone()).ok_or(TransitionError::InvalidValidatorSet)?;
        if new_threshold == 0 || new_threshold > table.cardinality() {
            return Err(TransitionError::InvalidThreshold {
                threshold: new_threshold,
                validators: table.cardinality(),
            });
        }

        let commitment = commit_update(&self.state_id, &new_validators, new_threshold);
        verify(
            commitment.as_bytes(),
            self.validators.keys(),
            self.threshold,
            &bundle,
        )?;

        let successor = self.successor(table, new_threshold, self.nonces.clone());
        let spend = self.spend_with(PortalSolution::Update {
            new_validators,
            new_threshold: new_threshold as u64,
            bundle,
        });

        info!(
            version = self.version,
            successor = successor.version,
            validators = successor.validators.cardinality(),
            threshold = successor.threshold,
            "update transition constructed"
        );

        Ok(Transition {
            successor,
            artifacts: Vec::new(),
            spend,
        })
    }

    fn successor(
        &self,
        validators: ValidatorTable,
        threshold: usize,
        nonces: BTreeMap<SourceChainId, Nonce>,
    ) -> PortalState {
        let mut next = PortalState {
            instance_id: self.instance_id,
            version: self.version + 1,
            validators,
            threshold,
            nonces,
            registry: self.registry.clone(),
            lineage: LineageProof {
                parent_id: self.state_id,
                parent_script_hash: self.script_hash(),
            },
            state_id: OutputId::from_bytes([0; 32]),
        };
        next.state_id = OutputId::derive(&self.state_id, &next.script_hash(), PORTAL_STATE_VALUE);

        next
    }

    pub(crate) fn spend_with(&self, solution: PortalSolution) -> Spend {
        Spend {
            output: self.output(),
            script: Arc::new(self.clone()),
            solution: borsh::to_vec(&solution).expect("solution encoding is infallible"),
        }
    }
}
