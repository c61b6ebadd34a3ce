//! End-to-end portal flow against the in-memory ledger: launch, relay a
//! quorum-signed message, claim it exactly once, then shut the portal down.

use std::collections::BTreeSet;

// These crates are dependencies of `portal-state` used by the library but not
// directly by this integration test; silence `unused_crate_dependencies`.
use borsh as _;
use portal_bls as _;
use rand as _;
use thiserror as _;
use tracing as _;

use portal_connectors::{claim, ClaimerResource, DelegatedConditions};
use portal_primitives::prelude::*;
use portal_state::{launch, SignedMessage};
use portal_test_utils::prelude::*;

const VALIDATOR_THRESHOLD: usize = 7;
const VALIDATOR_SIG_SWITCHES: [bool; 11] = [
    true, false, false, true, true, true, true, true, true, false, false,
];
const NONCE: u64 = 1337;

#[test]
fn receive_claim_and_shut_down() {
    let fixture = ValidatorFixture::generate(11, 0x0ff1ce);
    let mut ledger = MockLedger::new();

    // 1. Launch the portal by spending a genesis output into the version-0
    //    state output.
    let genesis = ledger.mint(DelegatedConditions.script_hash(), PORTAL_STATE_VALUE);
    let portal = launch(
        &genesis,
        fixture.public_keys(),
        VALIDATOR_THRESHOLD,
        BTreeSet::new(),
    )
    .unwrap();

    let launch_solution = DelegatedConditions::solution_for(&[Condition::CreateOutput {
        script_hash: portal.script_hash(),
        value: PORTAL_STATE_VALUE,
    }]);
    ledger
        .broadcast(SpendBundle::new(vec![Spend {
            output: genesis,
            script: std::sync::Arc::new(DelegatedConditions),
            solution: launch_solution,
        }]))
        .unwrap();
    assert_eq!(ledger.output_state(&portal.state_id()), OutputState::Unspent);

    // 1.5. Fund the claimer output that will later redeem the message.
    let claimer = ledger.mint(DelegatedConditions.script_hash(), Amount::from_units(100));

    // 2. Relay a message signed by 7 of the 11 validators.
    let message = PortalMessage {
        source_chain: "eth".into(),
        nonce: Nonce::new(NONCE),
        source_address: b"0xsender".to_vec(),
        destination: DelegatedConditions.script_hash(),
        payload: b"mint 250 tokens to 0xrecipient".to_vec(),
    };
    let commitment = commit_message(&portal.state_id(), &message);
    let bundle = fixture.sign_with_switches(commitment.as_bytes(), &VALIDATOR_SIG_SWITCHES);

    let transition = portal
        .relay(&[SignedMessage {
            message: message.clone(),
            bundle,
        }])
        .unwrap();
    ledger
        .broadcast(SpendBundle::new(vec![transition.spend.clone()]))
        .unwrap();

    let successor = transition.successor;
    let artifact = &transition.artifacts[0];
    assert_eq!(ledger.output_state(&portal.state_id()), OutputState::Spent);
    assert_eq!(
        ledger.output_state(&successor.state_id()),
        OutputState::Unspent,
    );
    assert_eq!(
        ledger.output_state(&artifact.output.id),
        OutputState::Unspent,
    );
    assert_eq!(successor.last_nonce(&"eth".into()), Some(Nonce::new(NONCE)));

    // Rebroadcasting the settled transition is a double-spend.
    assert_eq!(
        ledger
            .broadcast(SpendBundle::new(vec![transition.spend]))
            .unwrap_err(),
        LedgerError::AlreadySpent(portal.state_id()),
    );

    // 3. Claim the message: the artifact spend pairs with the claimer's
    //    announcement and the payload is delivered to the destination.
    let redeemed = claim(
        &artifact.output,
        &portal.instance_id(),
        &message,
        ClaimerResource {
            output: claimer.clone(),
        },
    )
    .unwrap();
    ledger.broadcast(redeemed.bundle.clone()).unwrap();

    assert_eq!(ledger.output_state(&artifact.output.id), OutputState::Spent);
    assert_eq!(
        ledger.output_state(&redeemed.delivery.id),
        OutputState::Unspent,
    );
    assert_eq!(redeemed.delivery.value, Amount::from_units(100));
    assert_eq!(redeemed.delivery.script_hash, message.destination);

    // A second claim against the same artifact fails structurally, even with
    // a fresh claimer resource.
    let second_claimer = ledger.mint(DelegatedConditions.script_hash(), Amount::from_units(100));
    let replay = claim(
        &artifact.output,
        &portal.instance_id(),
        &message,
        ClaimerResource {
            output: second_claimer,
        },
    )
    .unwrap();
    assert_eq!(
        ledger.broadcast(replay.bundle).unwrap_err(),
        LedgerError::AlreadySpent(artifact.output.id),
    );

    // 4. Shut the portal down, forfeiting the state output's value as the
    //    termination fee.
    let commitment = commit_termination(&successor.state_id(), PORTAL_STATE_VALUE);
    let bundle = fixture.sign_with_switches(commitment.as_bytes(), &VALIDATOR_SIG_SWITCHES);
    let terminated = successor.terminate(PORTAL_STATE_VALUE, bundle).unwrap();

    ledger
        .broadcast(SpendBundle::new(vec![terminated.spend]))
        .unwrap();
    assert_eq!(
        ledger.output_state(&successor.state_id()),
        OutputState::Spent,
    );
    assert_eq!(terminated.forfeited, PORTAL_STATE_VALUE);
    assert_eq!(terminated.final_version, 1);
}

#[test]
fn competing_successors_settle_at_most_once() {
    let fixture = ValidatorFixture::generate(11, 0xace);
    let mut ledger = MockLedger::new();

    let genesis = ledger.mint(DelegatedConditions.script_hash(), PORTAL_STATE_VALUE);
    let portal = launch(
        &genesis,
        fixture.public_keys(),
        VALIDATOR_THRESHOLD,
        BTreeSet::new(),
    )
    .unwrap();
    ledger
        .broadcast(SpendBundle::new(vec![Spend {
            output: genesis,
            script: std::sync::Arc::new(DelegatedConditions),
            solution: DelegatedConditions::solution_for(&[Condition::CreateOutput {
                script_hash: portal.script_hash(),
                value: PORTAL_STATE_VALUE,
            }]),
        }]))
        .unwrap();

    let signed = |message: &PortalMessage| {
        let commitment = commit_message(&portal.state_id(), message);

        SignedMessage {
            message: message.clone(),
            bundle: fixture.sign_first(commitment.as_bytes(), VALIDATOR_THRESHOLD),
        }
    };

    let message_a = PortalMessage {
        source_chain: "eth".into(),
        nonce: Nonce::new(1),
        source_address: b"0xa".to_vec(),
        destination: DelegatedConditions.script_hash(),
        payload: b"a".to_vec(),
    };
    // The rival batch records a different nonce table, so the two proposed
    // successors are distinct outputs.
    let mut message_b = message_a.clone();
    message_b.source_chain = "sol".into();
    message_b.nonce = Nonce::new(5);
    message_b.payload = b"b".to_vec();

    // Two relayers race with different batches for the same version.
    let first = portal.relay(&[signed(&message_a)]).unwrap();
    let second = portal.relay(&[signed(&message_b)]).unwrap();

    ledger
        .broadcast(SpendBundle::new(vec![first.spend]))
        .unwrap();
    assert_eq!(
        ledger
            .broadcast(SpendBundle::new(vec![second.spend]))
            .unwrap_err(),
        LedgerError::AlreadySpent(portal.state_id()),
    );

    // Only the winner's successor and artifact exist.
    assert_eq!(
        ledger.output_state(&first.successor.state_id()),
        OutputState::Unspent,
    );
    assert_eq!(
        ledger.output_state(&second.successor.state_id()),
        OutputState::Unknown,
    );
}
