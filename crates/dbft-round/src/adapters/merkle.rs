//! Pairwise SHA-256 Merkle root adapter.
//!
//! Levels are built bottom-up; an odd level duplicates its last node. The
//! empty sequence is outside the domain and is an error, never a root.

use sha2::{Digest, Sha256};
use shared_types::Hash;

use crate::domain::RoundError;
use crate::ports::MerkleHasher;

pub struct PairwiseSha256;

impl PairwiseSha256 {
    fn hash_pair(left: &Hash, right: &Hash) -> Hash {
        let mut hasher = Sha256::new();
        hasher.update(left);
        hasher.update(right);
        hasher.finalize().into()
    }
}

impl MerkleHasher for PairwiseSha256 {
    fn compute_root(&self, hashes: &[Hash]) -> Result<Hash, RoundError> {
        if hashes.is_empty() {
            return Err(RoundError::EmptyHashList);
        }

        let mut level = hashes.to_vec();
        while level.len() > 1 {
            if level.len() % 2 == 1 {
                let last = *level.last().expect("level is non-empty");
                level.push(last);
            }
            level = level
                .chunks(2)
                .map(|pair| Self::hash_pair(&pair[0], &pair[1]))
                .collect();
        }

        Ok(level[0])
    }
}
