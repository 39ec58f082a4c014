//! In-memory ledger adapter.
//!
//! Backs the round core in tests and in embedders that keep chain facts in
//! memory rather than behind a persistent store.

use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared_types::{Address, Hash, PublicKey};

use crate::domain::RoundError;
use crate::ports::{LedgerProvider, SigningIdentity};

struct LedgerState {
    head_hash: Hash,
    head_height: u32,
    state_root: Hash,
    validators: Vec<PublicKey>,
    next_validators: Vec<PublicKey>,
    fail_commitment: bool,
}

/// Chain head and validator-set facts held behind a lock.
pub struct InMemoryLedger {
    inner: RwLock<LedgerState>,
}

impl InMemoryLedger {
    pub fn new(
        head_hash: Hash,
        head_height: u32,
        validators: Vec<PublicKey>,
        next_validators: Vec<PublicKey>,
    ) -> Self {
        Self {
            inner: RwLock::new(LedgerState {
                head_hash,
                head_height,
                state_root: [0u8; 32],
                validators,
                next_validators,
                fail_commitment: false,
            }),
        }
    }

    /// Force commitment derivation to fail (failure-path testing).
    pub fn with_failing_commitment(self) -> Self {
        self.inner.write().fail_commitment = true;
        self
    }

    /// Move the head forward after a block is persisted.
    pub fn advance_head(&self, head_hash: Hash, head_height: u32, state_root: Hash) {
        let mut state = self.inner.write();
        state.head_hash = head_hash;
        state.head_height = head_height;
        state.state_root = state_root;
    }
}

impl LedgerProvider for InMemoryLedger {
    fn current_block_hash(&self) -> Hash {
        self.inner.read().head_hash
    }

    fn block_height(&self) -> u32 {
        self.inner.read().head_height
    }

    fn validator_sets(&self) -> (Vec<PublicKey>, Vec<PublicKey>) {
        let state = self.inner.read();
        (state.validators.clone(), state.next_validators.clone())
    }

    fn derive_validator_commitment(&self, validators: &[PublicKey]) -> Result<Address, RoundError> {
        let state = self.inner.read();
        if state.fail_commitment {
            return Err(RoundError::CommitmentDerivation(
                "derivation disabled".into(),
            ));
        }
        if validators.is_empty() {
            return Err(RoundError::CommitmentDerivation(
                "empty validator set".into(),
            ));
        }

        // Commitment = first 20 bytes of SHA-256 over the ordered key list.
        let mut hasher = Sha256::new();
        hasher.update((validators.len() as u32).to_le_bytes());
        for key in validators {
            hasher.update(key);
        }
        let digest = hasher.finalize();
        let mut commitment = Address::default();
        commitment.copy_from_slice(&digest[..20]);
        Ok(commitment)
    }

    fn state_root_with_tx_root(&self, tx_root: Hash) -> Hash {
        let state = self.inner.read();
        let mut hasher = Sha256::new();
        hasher.update(state.state_root);
        hasher.update(tx_root);
        hasher.finalize().into()
    }
}

/// Signing identity fixed to one public key. Signing itself lives with the
/// coordinator's account client, not here.
pub struct FixedIdentity(pub PublicKey);

impl SigningIdentity for FixedIdentity {
    fn default_account(&self) -> PublicKey {
        self.0
    }
}
