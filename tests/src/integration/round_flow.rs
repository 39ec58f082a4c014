//! Happy-path round flow: reset, proposal, signature collection, quorum.
//!
//! Four validators at head height 9 propose block 10. The primary for view 0
//! is validator `10 mod 4 == 2`; quorum is `4 - (4 - 1) / 3 == 3` matching
//! signatures.

use dbft_round::{
    quorum_threshold, FixedIdentity, InMemoryLedger, MerkleHasher, MessageBody, PairwiseSha256,
    RoundState, SharedRoundContext,
};
use shared_types::{Hash, Signature, Transaction};

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
            payload: vec![nonce as u8; 8],
        })
        .collect()
}

fn signature(tag: u8) -> Signature {
    [tag; 64]
}

#[test]
fn test_primary_round_reaches_quorum() {
    init_tracing();
    let ledger = four_validator_ledger();
    let merkle = PairwiseSha256;
    // Run as validator 2, the primary for height 10 view 0.
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(2)), &ledger));

    let quorum = shared.with(|cxt| {
        assert_eq!(cxt.height, 10);
        assert_eq!(cxt.primary_index, 2);
        assert!(cxt.is_primary());
        cxt.quorum()
    });
    assert_eq!(quorum, 3);

    // Primary proposes and builds the candidate header.
    let transactions = proposal(3);
    let tx_hashes: Vec<Hash> = transactions.iter().map(Transaction::hash).collect();
    let expected_root = merkle.compute_root(&tx_hashes).unwrap();

    let candidate = shared.with(|cxt| {
        cxt.timestamp = 1_700_000_000;
        cxt.nonce = 0xDEAD_BEEF;
        cxt.transactions = Some(transactions.clone());
        cxt.state |= RoundState::PRIMARY;
        cxt.make_header(&ledger, &merkle).cloned()
    });
    let candidate = candidate.expect("primary builds a candidate header");
    assert_eq!(candidate.header.transactions_root, expected_root);
    assert_eq!(candidate.header.height, 10);
    assert!(candidate.transactions.is_empty());

    // Own signature stored, prepare-request broadcast.
    let request = shared.with(|cxt| {
        cxt.signatures[2] = Some(signature(2));
        cxt.state |= RoundState::REQUEST_SENT;
        cxt.make_prepare_request()
    });
    let request = request.expect("primary builds a prepare-request");
    assert_eq!(request.height, 10);
    assert_eq!(request.validator_index, 2);
    match request.message().unwrap().body {
        MessageBody::PrepareRequest {
            transactions: sent,
            signature: own,
            ..
        } => {
            assert_eq!(sent, transactions);
            assert_eq!(own, signature(2));
        }
        other => panic!("unexpected body: {other:?}"),
    }

    // Backup responses arrive; the decision runs in one critical section.
    for backup in [0u8, 1] {
        shared.with(|cxt| cxt.signatures[backup as usize] = Some(signature(backup)));
    }
    let finalizable = shared.with(|cxt| {
        let reached = cxt.signature_count() >= cxt.quorum();
        if reached {
            cxt.state |= RoundState::BLOCK_GENERATED;
        }
        reached
    });
    assert!(finalizable);
    assert!(shared.with(|cxt| cxt.state.contains(RoundState::BLOCK_GENERATED)));
}

#[test]
fn test_backup_responds_to_request() {
    init_tracing();
    let ledger = four_validator_ledger();
    let merkle = PairwiseSha256;
    // Validator 0 is a backup for height 10 view 0.
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(0)), &ledger));

    let response = shared.with(|cxt| {
        assert!(!cxt.is_primary());
        cxt.state |= RoundState::BACKUP | RoundState::REQUEST_RECEIVED;
        // Proposal received from the primary.
        cxt.transactions = Some(proposal(3));
        cxt.make_header(&ledger, &merkle)
            .expect("backup rebuilds the candidate header");
        cxt.state |= RoundState::SIGNATURE_SENT;
        cxt.make_prepare_response(signature(0))
    });
    let response = response.expect("backup builds a prepare-response");
    assert_eq!(response.validator_index, 0);
    assert_eq!(response.owner, validator_key(0));
    match response.message().unwrap().body {
        MessageBody::PrepareResponse { signature: sig } => assert_eq!(sig, signature(0)),
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn test_observer_cannot_participate() {
    init_tracing();
    let ledger = four_validator_ledger();
    let shared = SharedRoundContext::new();
    // Identity 9 is not in the validator set.
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(9)), &ledger));

    shared.with(|cxt| {
        assert_eq!(cxt.local_index, None);
        cxt.transactions = Some(proposal(1));
        assert!(cxt.make_change_view().is_none());
        assert!(cxt.make_prepare_request().is_none());
        assert!(cxt.make_prepare_response(signature(9)).is_none());
        // Quorum math still works for the observer's bookkeeping.
        assert_eq!(cxt.quorum(), quorum_threshold(4));
    });
}

#[test]
fn test_new_height_replaces_round_state() {
    init_tracing();
    let ledger = four_validator_ledger();
    let shared = SharedRoundContext::new();
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(1)), &ledger));

    shared.with(|cxt| {
        cxt.transactions = Some(proposal(2));
        cxt.signatures[1] = Some(signature(1));
        cxt.state |= RoundState::BACKUP | RoundState::SIGNATURE_SENT;
    });

    // Block 10 persisted; the next round starts from the new head.
    ledger.advance_head([0xBB; 32], 10, [0xCC; 32]);
    shared.with(|cxt| cxt.reset(&FixedIdentity(validator_key(1)), &ledger));

    shared.with(|cxt| {
        assert_eq!(cxt.height, 11);
        assert_eq!(cxt.prev_hash, [0xBB; 32]);
        assert_eq!(cxt.primary_index, 3); // 11 mod 4
        assert!(cxt.state.is_initial());
        assert!(cxt.transactions.is_none());
        assert_eq!(cxt.signature_count(), 0);
        assert!(cxt.cached_header().is_none());
    });
}
