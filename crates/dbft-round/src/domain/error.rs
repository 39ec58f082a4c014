//! Error types for the round core.
//!
//! Collaborator failures are non-fatal: the affected builder yields an empty
//! result and the round retries on the next message or timer tick. Nothing in
//! this crate aborts the process.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RoundError {
    #[error("empty transaction hash list")]
    EmptyHashList,

    #[error("Merkle root computation failed: {0}")]
    MerkleRoot(String),

    #[error("validator commitment derivation failed: {0}")]
    CommitmentDerivation(String),

    #[error("local node is not a validator this round")]
    NotValidator,

    #[error("no candidate transactions proposed")]
    NoCandidateTransactions,

    #[error("message encoding failed: {0}")]
    Encoding(String),

    #[error("ledger error: {0}")]
    Ledger(String),
}

/// Result type for round operations.
pub type RoundResult<T> = Result<T, RoundError>;
