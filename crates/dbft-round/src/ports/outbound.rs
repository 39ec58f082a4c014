//! Driven ports: the collaborator contracts the round core consumes.
//!
//! All calls are synchronous and bounded by in-memory work; the coordinator
//! treats them as the round's only latency and failure sources. Signing is
//! deliberately absent here: the coordinator obtains signatures from its own
//! signing collaborator and feeds them into the context.

use shared_types::{Address, Hash, PublicKey};

use crate::domain::RoundError;

/// Read access to chain head and validator-set facts.
pub trait LedgerProvider: Send + Sync {
    /// Hash of the current chain head.
    fn current_block_hash(&self) -> Hash;

    /// Height of the current chain head.
    fn block_height(&self) -> u32;

    /// Ordered current and next validator sets.
    fn validator_sets(&self) -> (Vec<PublicKey>, Vec<PublicKey>);

    /// Derive the address committing to a validator set.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::CommitmentDerivation` when the set cannot be
    /// reduced to a commitment (e.g. empty or malformed keys).
    fn derive_validator_commitment(&self, validators: &[PublicKey]) -> Result<Address, RoundError>;

    /// The state-commitment root resulting from combining the committed
    /// state with the given transaction root.
    fn state_root_with_tx_root(&self, tx_root: Hash) -> Hash;
}

/// The node's signing identity, used only to locate the local validator slot.
pub trait SigningIdentity: Send + Sync {
    /// Public key of the default account.
    fn default_account(&self) -> PublicKey;
}

/// Merkle root computation over an ordered hash sequence.
pub trait MerkleHasher: Send + Sync {
    /// Compute the root over `hashes` in their given order.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::EmptyHashList` for an empty sequence; other
    /// malformed input surfaces as `RoundError::MerkleRoot`.
    fn compute_root(&self, hashes: &[Hash]) -> Result<Hash, RoundError>;
}
