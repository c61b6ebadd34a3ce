//! The connector locking a claimable message artifact.

use borsh::{BorshDeserialize, BorshSerialize};
use portal_primitives::prelude::*;

/// Domain tag for the message connector's script hash.
const MESSAGE_CONNECTOR_TAG: &[u8] = b"portal/script/message/v1";

/// The locking script of a claimable message artifact.
///
/// Every field that affects delivery is baked into the script at
/// construction, so the artifact's locking hash is unique to one
/// quorum-approved message of one portal instance. Claiming requires
/// revealing these exact fields: a claimer that cannot reproduce them cannot
/// reconstruct the script that hashes to the artifact's locking condition.
///
/// The locking condition itself requires cooperation from the destination:
/// the artifact spend asserts an announcement that only the destination
/// script's own spend can make. Delivery and redemption are therefore one
/// atomic event.
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize)]
pub struct MessageConnector {
    /// Lineage id of the portal that approved the message.
    portal_instance: OutputId,

    /// Chain the message originated from.
    source_chain: SourceChainId,

    /// Raw sender identity on the source chain.
    source_address: Vec<u8>,

    /// The message's position in its source chain's sequence.
    nonce: Nonce,

    /// Script hash the payload must be delivered to.
    destination: ScriptHash,

    /// Content hash of the payload.
    payload_hash: MessageHash,
}

impl MessageConnector {
    /// Builds the connector for `message` as approved by the portal lineage
    /// `portal_instance`.
    pub fn new(portal_instance: OutputId, message: &PortalMessage) -> Self {
        Self {
            portal_instance,
            source_chain: message.source_chain.clone(),
            source_address: message.source_address.clone(),
            nonce: message.nonce,
            destination: message.destination,
            payload_hash: message.payload_hash(),
        }
    }

    /// The destination script hash this artifact delivers to.
    pub fn destination(&self) -> ScriptHash {
        self.destination
    }

    /// The announcement a claimer output must make to redeem the artifact
    /// identified by `artifact_id`.
    ///
    /// Binding the claimer's own output id makes the announcement
    /// single-use: it exists only within the bundle that consumes both the
    /// claimer output and the artifact.
    pub fn claim_announcement(claimer_id: &OutputId, artifact_id: &OutputId) -> AnnouncementId {
        AnnouncementId::for_output(claimer_id, artifact_id.as_bytes())
    }
}

impl LockingScript for MessageConnector {
    fn script_hash(&self) -> ScriptHash {
        let encoded = borsh::to_vec(self).expect("connector encoding is infallible");

        ScriptHash::from_bytes(portal_primitives::hashes::tagged_hash(
            MESSAGE_CONNECTOR_TAG,
            &[&encoded],
        ))
    }

    fn evaluate(&self, solution: &[u8]) -> Result<Vec<Condition>, EvalError> {
        let solution = ClaimSolution::try_from_slice(solution).map_err(EvalError::malformed)?;

        if solution.claimer.script_hash != self.destination {
            return Err(EvalError::unsatisfied(format!(
                "claimer script {} is not the committed destination {}",
                solution.claimer.script_hash, self.destination,
            )));
        }

        Ok(vec![
            Condition::AssertSelfId {
                id: solution.artifact_id,
            },
            Condition::AssertAnnouncement {
                id: Self::claim_announcement(&solution.claimer.id, &solution.artifact_id),
            },
        ])
    }
}

/// Solution to a [`MessageConnector`]: the claimer output redeeming the
/// artifact, and the artifact's own id (pinned via [`Condition::AssertSelfId`]).
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ClaimSolution {
    /// The artifact output being redeemed.
    pub artifact_id: OutputId,

    /// The destination-script output participating in the claim.
    pub claimer: ClaimerOutput,
}

/// Borsh-encodable mirror of the claimer [`Output`].
#[derive(Debug, Clone, PartialEq, Eq, BorshSerialize, BorshDeserialize)]
pub struct ClaimerOutput {
    /// Ledger identity of the claimer output.
    pub id: OutputId,

    /// Its locking script hash; must equal the message's destination.
    pub script_hash: ScriptHash,

    /// Value it carries into the claim.
    pub value: Amount,
}

impl From<&Output> for ClaimerOutput {
    fn from(output: &Output) -> Self {
        Self {
            id: output.id,
            script_hash: output.script_hash,
            value: output.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> PortalMessage {
        PortalMessage {
            source_chain: "eth".into(),
            nonce: Nonce::new(1337),
            source_address: b"0xsender".to_vec(),
            destination: ScriptHash::from_bytes([0xdd; 32]),
            payload: b"unlock 40 units".to_vec(),
        }
    }

    #[test]
    fn script_hash_is_unique_per_message_field() {
        let instance = OutputId::from_bytes([1; 32]);
        let base = MessageConnector::new(instance, &message());

        let mut altered = message();
        altered.nonce = Nonce::new(1338);
        assert_ne!(
            base.script_hash(),
            MessageConnector::new(instance, &altered).script_hash(),
        );

        let mut altered = message();
        altered.payload = b"other".to_vec();
        assert_ne!(
            base.script_hash(),
            MessageConnector::new(instance, &altered).script_hash(),
        );

        assert_ne!(
            base.script_hash(),
            MessageConnector::new(OutputId::from_bytes([2; 32]), &message()).script_hash(),
        );
    }

    #[test]
    fn evaluate_requires_destination_claimer() {
        let connector = MessageConnector::new(OutputId::from_bytes([1; 32]), &message());
        let artifact_id = OutputId::from_bytes([5; 32]);

        let wrong_claimer = ClaimSolution {
            artifact_id,
            claimer: ClaimerOutput {
                id: OutputId::from_bytes([6; 32]),
                script_hash: ScriptHash::from_bytes([0xee; 32]),
                value: Amount::from_units(1),
            },
        };
        let solution = borsh::to_vec(&wrong_claimer).unwrap();
        assert!(matches!(
            connector.evaluate(&solution),
            Err(EvalError::Unsatisfied(_)),
        ));

        let right_claimer = ClaimSolution {
            artifact_id,
            claimer: ClaimerOutput {
                id: OutputId::from_bytes([6; 32]),
                script_hash: message().destination,
                value: Amount::from_units(1),
            },
        };
        let solution = borsh::to_vec(&right_claimer).unwrap();
        let conditions = connector.evaluate(&solution).unwrap();

        assert_eq!(
            conditions[0],
            Condition::AssertSelfId { id: artifact_id },
        );
        assert!(matches!(
            conditions[1],
            Condition::AssertAnnouncement { .. },
        ));
    }

    #[test]
    fn evaluate_rejects_garbage_solutions() {
        let connector = MessageConnector::new(OutputId::from_bytes([1; 32]), &message());

        assert!(matches!(
            connector.evaluate(b"not borsh"),
            Err(EvalError::MalformedSolution(_)),
        ));
    }
}
