//! Construction of the atomic claim that redeems a message artifact.

use std::sync::Arc;

use borsh::to_vec;
use portal_primitives::prelude::*;
use tracing::debug;

use crate::{
    connector_msg::{ClaimSolution, MessageConnector},
    delegated::DelegatedConditions,
    errors::ClaimError,
};

/// The claimer-supplied resource funding a claim: an unspent output locked
/// by the message's destination script.
///
/// The stock destination here is [`DelegatedConditions`]; integrators with
/// bespoke destination scripts can assemble their own claimer spend around
/// [`MessageConnector::claim_announcement`] instead.
#[derive(Debug, Clone)]
pub struct ClaimerResource {
    /// The unspent destination-script output.
    pub output: Output,
}

/// A fully-constructed claim, ready for settlement.
#[derive(Debug, Clone)]
pub struct Claim {
    /// The paired spends (artifact + claimer) that settle atomically.
    pub bundle: SpendBundle,

    /// The one-time announcement binding the claim to this artifact.
    pub announcement: AnnouncementId,

    /// The delivery output directed at the destination script.
    pub delivery: Output,
}

/// Builds the claim that redeems `artifact` by revealing `message`.
///
/// The artifact spend and the claimer spend settle together or not at all:
/// the artifact asserts the claimer's announcement, and the announcement
/// only exists inside this bundle. After settlement the artifact is spent,
/// and the ledger's single-spend rule makes any second claim fail
/// structurally; the payload can never be delivered twice.
///
/// The delivery output carries the claimer's value and stays locked by the
/// destination script committed in the message; the claimer supplies value,
/// not direction.
pub fn claim(
    artifact: &Output,
    portal_instance: &OutputId,
    message: &PortalMessage,
    claimer: ClaimerResource,
) -> Result<Claim, ClaimError> {
    let connector = MessageConnector::new(*portal_instance, message);
    if connector.script_hash() != artifact.script_hash {
        return Err(ClaimError::PayloadMismatch);
    }

    if claimer.output.script_hash != message.destination {
        return Err(ClaimError::DestinationMismatch {
            claimer: claimer.output.script_hash,
            destination: message.destination,
        });
    }

    if artifact.value != ARTIFACT_VALUE {
        return Err(ClaimError::ArtifactCarriesValue);
    }

    let announcement = MessageConnector::claim_announcement(&claimer.output.id, &artifact.id);
    let delivery = Output {
        id: OutputId::derive(&claimer.output.id, &message.destination, claimer.output.value),
        script_hash: message.destination,
        value: claimer.output.value,
    };

    let artifact_solution = to_vec(&ClaimSolution {
        artifact_id: artifact.id,
        claimer: (&claimer.output).into(),
    })
    .expect("solution encoding is infallible");

    let claimer_solution = DelegatedConditions::solution_for(&[
        Condition::CreateAnnouncement { id: announcement },
        Condition::CreateOutput {
            script_hash: delivery.script_hash,
            value: delivery.value,
        },
    ]);

    let bundle = SpendBundle::new(vec![
        Spend {
            output: artifact.clone(),
            script: Arc::new(connector),
            solution: artifact_solution,
        },
        Spend {
            output: claimer.output,
            script: Arc::new(DelegatedConditions),
            solution: claimer_solution,
        },
    ]);

    debug!(artifact = %artifact.id, %announcement, "claim constructed");

    Ok(Claim {
        bundle,
        announcement,
        delivery,
    })
}
