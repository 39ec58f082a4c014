//! View-change recovery scenarios.
//!
//! A timed-out view rotates the primary with `(height - view) mod n` and
//! either discards or preserves in-flight round data depending on whether
//! the node had already broadcast its signature.

use dbft_round::{
    FixedIdentity, InMemoryLedger, MessageBody, PairwiseSha256, RoundState, SharedRoundContext,
};
use shared_types::Transaction;

use super::{init_tracing, validator_key};

fn four_validator_ledger() -> InMemoryLedger {
    let validators: Vec<_> = (0..4).map(validator_key).collect();
    InMemoryLedger::new([0xAA; 32], 9, validators.clone(), validators)
}

fn proposal(count: u64) -> Vec<Transaction> {
    (0..count)
        .map(|nonce| Transaction {
            version: 1,
            nonce,
            payload: vec![0x55],
        })
        .collect()
}

#[test]
fn test_timeout_rotates_primary_and_discards_data() {
    init_tracing();
    let ledger = four_validator_ledger();
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(0)), &ledger));

    shared.with(|cxt| {
        assert_eq!(cxt.primary_index, 2); // 10 mod 4
        cxt.state |= RoundState::BACKUP | RoundState::REQUEST_RECEIVED;
        cxt.transactions = Some(proposal(2));
        cxt.signatures[2] = Some([2u8; 64]);
    });

    // No signature broadcast before the timeout: the mask leaves nothing,
    // so the round restarts proposal collection under the new primary.
    shared.with(|cxt| cxt.change_view(1));
    shared.with(|cxt| {
        assert_eq!(cxt.view_number, 1);
        assert_eq!(cxt.primary_index, 1); // (10 - 1) mod 4
        assert!(cxt.state.is_initial());
        assert!(cxt.transactions.is_none());
        assert_eq!(cxt.signature_count(), 0);
        assert!(cxt.cached_header().is_none());
    });
}

#[test]
fn test_sent_signature_survives_view_change() {
    init_tracing();
    let ledger = four_validator_ledger();
    let merkle = PairwiseSha256;
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(1)), &ledger));

    shared.with(|cxt| {
        cxt.state |= RoundState::BACKUP | RoundState::SIGNATURE_SENT;
        cxt.transactions = Some(proposal(2));
        cxt.make_header(&ledger, &merkle).unwrap();
        cxt.signatures[1] = Some([1u8; 64]);
        cxt.signatures[2] = Some([2u8; 64]);
    });

    shared.with(|cxt| cxt.change_view(1));
    shared.with(|cxt| {
        // The broadcast hint survives, and so does the data it was over.
        assert_eq!(cxt.state, RoundState::SIGNATURE_SENT);
        assert!(cxt.transactions.is_some());
        assert_eq!(cxt.signature_count(), 2);
        assert!(cxt.cached_header().is_some());
    });
}

#[test]
fn test_change_view_envelope_declares_expected_view() {
    init_tracing();
    let ledger = four_validator_ledger();
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(3)), &ledger));

    let payload = shared.with(|cxt| {
        cxt.expected_view[3] = 2;
        cxt.make_change_view()
    });
    let payload = payload.expect("validator builds a change-view envelope");
    assert_eq!(payload.validator_index, 3);

    let message = payload.message().unwrap();
    assert_eq!(message.view_number, 0);
    assert_eq!(message.body, MessageBody::ChangeView { new_view: 2 });
}

#[test]
fn test_repeated_timeouts_keep_primary_in_range() {
    init_tracing();
    let ledger = four_validator_ledger();
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(0)), &ledger));

    // Views well past the height still produce a valid rotation.
    for view in 1..=30u8 {
        shared.with(|cxt| {
            cxt.change_view(view);
            assert!((cxt.primary_index as usize) < 4);
            assert_eq!(cxt.view_number, view);
        });
    }
}
