//! The per-round consensus state container and its operations.
//!
//! One `RoundContext` lives per node. The external round coordinator resets
//! it at each height, feeds it transactions and signatures received from
//! peers, rotates the view on timeout, asks it to build outbound envelopes,
//! and polls the signature count to detect quorum. The context itself never
//! touches the network, the VM or the trie store; it only reads head and
//! validator-set facts from the ledger collaborator.

use shared_types::{Address, Block, BlockHeader, Hash, PublicKey, Signature, Transaction};

use super::flags::RoundState;
use super::message::{ConsensusMessage, ConsensusPayload, MessageBody};
use crate::ports::{LedgerProvider, MerkleHasher, SigningIdentity};

/// Protocol version stamped into headers and envelopes.
pub const CONTEXT_VERSION: u32 = 0;

/// Minimum number of matching signatures required to finalize a block with
/// `n` validators: `n - (n - 1) / 3`, tolerating `(n - 1) / 3` faults.
pub fn quorum_threshold(n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    n - (n - 1) / 3
}

/// Mutable state of one consensus round.
///
/// `signatures` and `expected_view` are indexed 1:1 with `validators`; the
/// vectors are resized together on every reset so the correlation never
/// breaks. `header` caches the candidate block and is cleared whenever the
/// candidate transaction set is discarded or a fresh round begins.
pub struct RoundContext {
    pub state: RoundState,
    pub prev_hash: Hash,
    pub height: u32,
    pub view_number: u8,
    /// Ordered validator identities for this height. Order is authoritative:
    /// it defines the primary rotation and the signature slot of each
    /// validator.
    pub validators: Vec<PublicKey>,
    pub next_validators: Vec<PublicKey>,
    /// Sender identity stamped into outbound envelopes.
    pub owner: PublicKey,
    /// This node's slot in `validators`, `None` for a non-validating
    /// observer.
    pub local_index: Option<usize>,
    /// Index of this view's proposer. Always within `0..validators.len()`.
    pub primary_index: u32,
    pub timestamp: u32,
    pub nonce: u64,
    /// Commitment to `next_validators`, embedded in the header so the next
    /// height's validator set is self-certifying.
    pub next_validator_commitment: Address,
    /// Transactions proposed for this block. `None` until the primary
    /// proposes; distinct from an empty proposal.
    pub transactions: Option<Vec<Transaction>>,
    /// Slot `i` holds validator `i`'s signature over the candidate header.
    pub signatures: Vec<Option<Signature>>,
    /// Slot `i` holds the view validator `i` last declared wanting to move
    /// to.
    pub expected_view: Vec<u8>,
    header: Option<Block>,
}

impl RoundContext {
    pub fn new() -> Self {
        Self {
            state: RoundState::INITIAL,
            prev_hash: [0u8; 32],
            height: 0,
            view_number: 0,
            validators: Vec::new(),
            next_validators: Vec::new(),
            owner: [0u8; 33],
            local_index: None,
            primary_index: 0,
            timestamp: 0,
            nonce: 0,
            next_validator_commitment: Address::default(),
            transactions: None,
            signatures: Vec::new(),
            expected_view: Vec::new(),
            header: None,
        }
    }

    /// Quorum threshold M for the current validator set.
    pub fn quorum(&self) -> usize {
        quorum_threshold(self.validators.len())
    }

    /// Whether this node is the current view's proposer.
    pub fn is_primary(&self) -> bool {
        self.local_index
            .is_some_and(|index| index as u32 == self.primary_index)
    }

    /// Re-initialize the context for a new height.
    ///
    /// Every field is replaced from ledger state: head hash and height,
    /// current and next validator sets, the next-set commitment, and freshly
    /// sized signature and expected-view slots. The local signing identity is
    /// looked up in the new validator set; when absent the node observes the
    /// round without a slot.
    ///
    /// A commitment-derivation failure is logged and leaves the commitment
    /// zeroed; the round proceeds but no well-formed header can be produced
    /// until a later reset succeeds.
    pub fn reset(&mut self, identity: &dyn SigningIdentity, ledger: &dyn LedgerProvider) {
        self.state = RoundState::INITIAL;
        self.prev_hash = ledger.current_block_hash();
        self.height = ledger.block_height() + 1;
        self.view_number = 0;
        self.local_index = None;

        let (validators, next_validators) = ledger.validator_sets();
        self.validators = validators;
        self.next_validators = next_validators;
        tracing::info!(
            current = self.validators.len(),
            next = self.next_validators.len(),
            height = self.height,
            "validator sets loaded"
        );

        self.next_validator_commitment =
            match ledger.derive_validator_commitment(&self.next_validators) {
                Ok(commitment) => commitment,
                Err(e) => {
                    tracing::error!(error = %e, "next validator commitment derivation failed");
                    Address::default()
                }
            };

        let n = self.validators.len();
        self.owner = self.validators.first().copied().unwrap_or([0u8; 33]);
        if n > 0 {
            // View is zero at reset, so no view offset enters the rotation.
            self.primary_index = self.height % n as u32;
        } else {
            tracing::warn!(height = self.height, "ledger returned an empty validator set");
            self.primary_index = 0;
        }

        self.transactions = None;
        self.header = None;
        self.signatures = vec![None; n];
        self.expected_view = vec![0u8; n];

        let account = identity.default_account();
        if let Some(index) = self.validators.iter().position(|key| *key == account) {
            self.local_index = Some(index);
            self.owner = account;
        }
    }

    /// Move the round to `new_view` within the current height.
    ///
    /// The status mask is reduced to `SIGNATURE_SENT`; every other flag is
    /// cleared. When nothing survives the mask the in-flight round data
    /// (candidate transactions, collected signatures, cached header) is
    /// discarded and proposal collection restarts under the new primary.
    /// When `SIGNATURE_SENT` survives, the data it was gathered over is kept
    /// so the node can still observe quorum on signatures broadcast before
    /// the view changed.
    pub fn change_view(&mut self, new_view: u8) {
        self.state &= RoundState::SIGNATURE_SENT;
        self.view_number = new_view;

        // (height - new_view) underflows unsigned arithmetic once the view
        // count overtakes the height; rem_euclid keeps the index in range
        // for any pair of values.
        let n = self.validators.len();
        if n > 0 {
            self.primary_index =
                (i64::from(self.height) - i64::from(new_view)).rem_euclid(n as i64) as u32;
        }

        if self.state.is_initial() {
            self.transactions = None;
            self.signatures = vec![None; n];
            self.header = None;
        }
    }

    /// The cached candidate block, if one has been built this round.
    pub fn cached_header(&self) -> Option<&Block> {
        self.header.as_ref()
    }

    /// Build (or return the cached) candidate block for this round.
    ///
    /// Requires candidate transactions to be present. The transaction Merkle
    /// root is computed by the hashing collaborator and combined with the
    /// committed state by the ledger; a failure on either path yields `None`
    /// and caches nothing, so callers never finalize from a partial header.
    /// The candidate's transaction list stays empty: only the root
    /// commitments are fixed here, bodies are attached by finalization.
    pub fn make_header(
        &mut self,
        ledger: &dyn LedgerProvider,
        merkle: &dyn MerkleHasher,
    ) -> Option<&Block> {
        self.transactions.as_ref()?;

        if self.header.is_none() {
            let hashes: Vec<Hash> = self
                .transactions
                .as_ref()?
                .iter()
                .map(Transaction::hash)
                .collect();

            let transactions_root = match merkle.compute_root(&hashes) {
                Ok(root) => root,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        height = self.height,
                        "transaction root computation failed, no candidate header"
                    );
                    return None;
                }
            };

            let state_root = ledger.state_root_with_tx_root(transactions_root);
            self.header = Some(Block {
                header: BlockHeader {
                    version: CONTEXT_VERSION,
                    prev_hash: self.prev_hash,
                    transactions_root,
                    state_root,
                    timestamp: self.timestamp,
                    height: self.height,
                    consensus_data: self.nonce,
                    next_validator_commitment: self.next_validator_commitment,
                },
                transactions: Vec::new(),
            });
        }

        self.header.as_ref()
    }

    /// Wrap a message body in the transport envelope.
    ///
    /// Stamps the body with the current view number, then attaches version,
    /// chain position, sender slot and identity. Read-only with respect to
    /// round state. Returns `None` for a non-validating observer.
    pub fn make_payload(&self, body: MessageBody) -> Option<ConsensusPayload> {
        let index = self.local_index?;
        let message = ConsensusMessage {
            view_number: self.view_number,
            body,
        };
        let data = match bincode::serialize(&message) {
            Ok(data) => data,
            Err(e) => {
                tracing::warn!(error = %e, "consensus message encoding failed");
                return None;
            }
        };

        Some(ConsensusPayload {
            version: CONTEXT_VERSION,
            prev_hash: self.prev_hash,
            height: self.height,
            validator_index: index as u16,
            timestamp: self.timestamp,
            data,
            owner: self.owner,
        })
    }

    /// Build a change-view envelope declaring the view this node wants to
    /// move to (its own expected-view slot).
    pub fn make_change_view(&self) -> Option<ConsensusPayload> {
        let index = self.local_index?;
        let new_view = *self.expected_view.get(index)?;
        self.make_payload(MessageBody::ChangeView { new_view })
    }

    /// Build the primary's proposal envelope.
    ///
    /// Carries the round nonce, the next-set commitment, the full candidate
    /// transaction sequence in proposal order, and this node's own signature
    /// already stored in its slot. Intended to be called only when this node
    /// is the view's primary; that discipline is the coordinator's. Yields
    /// `None` when no proposal or no own signature exists.
    pub fn make_prepare_request(&self) -> Option<ConsensusPayload> {
        let index = self.local_index?;
        let transactions = self.transactions.clone()?;
        let signature = self.signatures.get(index).copied().flatten()?;

        self.make_payload(MessageBody::PrepareRequest {
            nonce: self.nonce,
            next_validator_commitment: self.next_validator_commitment,
            transactions,
            signature,
        })
    }

    /// Build a backup's response envelope carrying the given signature over
    /// the candidate header. Signing happens outside this core.
    pub fn make_prepare_response(&self, signature: Signature) -> Option<ConsensusPayload> {
        self.make_payload(MessageBody::PrepareResponse { signature })
    }

    /// Number of signature slots currently filled. The coordinator compares
    /// this against [`RoundContext::quorum`] to decide when to finalize.
    pub fn signature_count(&self) -> usize {
        self.signatures.iter().filter(|slot| slot.is_some()).count()
    }

    /// Human-readable flag summary for diagnostics.
    pub fn state_detail(&self) -> String {
        self.state.to_string()
    }
}

impl Default for RoundContext {
    fn default() -> Self {
        Self::new()
    }
}
