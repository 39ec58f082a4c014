//! # Core Domain Entities
//!
//! The chain's basic vocabulary: hashes, validator identities, transactions
//! and candidate block headers.
//!
//! ## Clusters
//!
//! - **Primitives**: `Hash`, `PublicKey`, `Signature`, `Address`
//! - **Chain**: `Transaction`, `BlockHeader`, `Block`
//! - **Consensus**: `Validator`

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

// =============================================================================
// PRIMITIVES
// =============================================================================

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// A 33-byte compressed secp256 public key identifying a validator.
pub type PublicKey = [u8; 33];

/// A 64-byte ECDSA signature (r || s).
pub type Signature = [u8; 64];

/// A 20-byte address. Used as the commitment binding a validator set into a
/// block header without embedding the full key list.
pub type Address = [u8; 20];

// =============================================================================
// CHAIN
// =============================================================================

/// A transaction as proposed for inclusion in a block.
///
/// The execution payload is opaque to consensus; only the hash matters for
/// round coordination and Merkle-root computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction format version.
    pub version: u8,
    /// Sender nonce, prevents replay.
    pub nonce: u64,
    /// Opaque execution payload (contract invocation, transfer, ...).
    pub payload: Vec<u8>,
}

impl Transaction {
    /// Compute the transaction hash (SHA-256 over the canonical fields).
    pub fn hash(&self) -> Hash {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update([self.version]);
        hasher.update(self.nonce.to_le_bytes());
        hasher.update(&self.payload);
        hasher.finalize().into()
    }
}

/// The header of a candidate or persisted block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockHeader {
    /// Protocol version for this block.
    pub version: u32,
    /// Hash of the parent block (creates the chain linkage).
    pub prev_hash: Hash,
    /// Merkle root over the transaction hashes, in proposal order.
    pub transactions_root: Hash,
    /// State-commitment root after combining the committed state with
    /// `transactions_root`.
    pub state_root: Hash,
    /// Unix timestamp chosen by the proposer.
    pub timestamp: u32,
    /// Block height in the chain.
    pub height: u32,
    /// Opaque consensus data; carries the round nonce chosen by the primary.
    pub consensus_data: u64,
    /// Commitment to the next height's validator set, making it
    /// self-certifying.
    pub next_validator_commitment: Address,
}

impl BlockHeader {
    /// Compute the hash of this header.
    pub fn hash(&self) -> Hash {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(self.version.to_le_bytes());
        hasher.update(self.prev_hash);
        hasher.update(self.transactions_root);
        hasher.update(self.state_root);
        hasher.update(self.timestamp.to_le_bytes());
        hasher.update(self.height.to_le_bytes());
        hasher.update(self.consensus_data.to_le_bytes());
        hasher.update(self.next_validator_commitment);
        hasher.finalize().into()
    }
}

/// A block: header plus transaction bodies.
///
/// A candidate block produced during a consensus round carries an empty
/// transaction list; only the root commitments in the header are fixed.
/// Bodies are attached by finalization, outside the round core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: BlockHeader,
    pub transactions: Vec<Transaction>,
}

impl Block {
    /// Get the hash of this block.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }
}

// =============================================================================
// CONSENSUS
// =============================================================================

/// A validator (bookkeeper) descriptor as stored by the ledger.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    /// The validator's public key (identity). Ordering of validators within
    /// a height is authoritative and assigned by the ledger.
    #[serde_as(as = "Bytes")]
    pub public_key: PublicKey,
    /// Whether this validator is currently active.
    pub active: bool,
}

impl Validator {
    pub fn new(public_key: PublicKey) -> Self {
        Self {
            public_key,
            active: true,
        }
    }
}
