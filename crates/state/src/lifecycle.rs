//! Launch and termination of a portal lineage.

use std::collections::{BTreeMap, BTreeSet};

use portal_bls::{verify, PublicKey, SignatureBundle};
use portal_primitives::prelude::*;
use tracing::info;

use crate::{
    errors::TransitionError,
    portal_state::{LineageProof, PortalState},
    transition::PortalSolution,
};

/// Bootstraps a portal lineage from a genesis output.
///
/// The genesis output's id becomes the portal's instance id, so one genesis
/// output starts at most one lineage; spending it to create the version-zero
/// state output is the launch event. The threshold is fixed here and changes
/// only through an explicit update transition.
pub fn launch(
    genesis: &Output,
    validators: Vec<PublicKey>,
    threshold: usize,
    registry: BTreeSet<ScriptHash>,
) -> Result<PortalState, TransitionError> {
    let table = ValidatorTable::new(validators).ok_or(TransitionError::InvalidValidatorSet)?;
    if threshold == 0 || threshold > table.cardinality() {
        return Err(TransitionError::InvalidThreshold {
            threshold,
            validators: table.cardinality(),
        });
    }

    let mut state = PortalState {
        instance_id: genesis.id,
        version: 0,
        validators: table,
        threshold,
        nonces: BTreeMap::new(),
        registry,
        lineage: LineageProof {
            parent_id: genesis.id,
            parent_script_hash: genesis.script_hash,
        },
        state_id: OutputId::from_bytes([0; 32]),
    };
    state.state_id = OutputId::derive(&genesis.id, &state.script_hash(), PORTAL_STATE_VALUE);

    info!(
        instance = %state.instance_id,
        validators = state.validators.cardinality(),
        threshold = state.threshold,
        "portal launched"
    );

    Ok(state)
}

/// The end of a portal lineage.
///
/// Once the termination spend settles, the lineage has no live output and no
/// further transition can ever be constructed; migration means launching a
/// fresh lineage elsewhere.
#[derive(Debug, Clone)]
pub struct Terminated {
    /// The melt spend ending the lineage.
    pub spend: Spend,

    /// The fee forfeited to the ledger, by design, to discourage spurious
    /// termination attempts.
    pub forfeited: Amount,

    /// The lineage that ended.
    pub instance_id: OutputId,

    /// The last version the lineage reached.
    pub final_version: u64,
}

impl PortalState {
    /// Ends the lineage, authorized by a quorum over the termination
    /// commitment.
    ///
    /// The reserved fee is bound into the signed commitment and is forfeited
    /// rather than returned; it cannot exceed the value the portal output
    /// actually carries.
    pub fn terminate(
        &self,
        reserve_fee: Amount,
        bundle: SignatureBundle,
    ) -> Result<Terminated, TransitionError> {
        if reserve_fee > PORTAL_STATE_VALUE {
            return Err(TransitionError::ReserveFeeTooLarge {
                fee: reserve_fee,
                available: PORTAL_STATE_VALUE,
            });
        }

        let commitment = commit_termination(&self.state_id, reserve_fee);
        verify(
            commitment.as_bytes(),
            self.validators.keys(),
            self.threshold,
            &bundle,
        )?;

        let spend = self.spend_with(PortalSolution::Terminate {
            reserve_fee,
            bundle,
        });

        info!(
            instance = %self.instance_id,
            version = self.version,
            forfeited = %reserve_fee,
            "termination constructed"
        );

        Ok(Terminated {
            spend,
            forfeited: reserve_fee,
            instance_id: self.instance_id,
            final_version: self.version,
        })
    }
}
