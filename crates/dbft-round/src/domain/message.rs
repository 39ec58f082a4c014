//! Consensus messages and the payload envelope.
//!
//! Three message kinds drive a round: change-view, prepare-request and
//! prepare-response. Every message is stamped with the view it belongs to
//! and wrapped in a [`ConsensusPayload`] envelope identifying the sender,
//! height and chain position, so stale messages can be rejected by the
//! coordinator without touching round state.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use shared_types::{Address, Hash, PublicKey, Signature, Transaction};

use super::error::RoundError;

/// A consensus message: the current view number plus the kind-specific body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusMessage {
    /// View this message belongs to, stamped by the envelope builder.
    pub view_number: u8,
    pub body: MessageBody,
}

/// The kind-specific content of a consensus message.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageBody {
    /// Declares the view this node wants to move to.
    ChangeView { new_view: u8 },

    /// The primary's proposal: round nonce, next-set commitment, the full
    /// candidate transaction sequence and the primary's own signature over
    /// the candidate header.
    PrepareRequest {
        nonce: u64,
        next_validator_commitment: Address,
        transactions: Vec<Transaction>,
        #[serde_as(as = "Bytes")]
        signature: Signature,
    },

    /// A backup's signature over the candidate header.
    PrepareResponse {
        #[serde_as(as = "Bytes")]
        signature: Signature,
    },
}

/// The envelope wrapping a serialized consensus message for transport.
///
/// `validator_index` and `owner` identify the sender; `prev_hash` and
/// `height` pin the message to a chain position.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsensusPayload {
    pub version: u32,
    pub prev_hash: Hash,
    pub height: u32,
    pub validator_index: u16,
    pub timestamp: u32,
    /// bincode-serialized [`ConsensusMessage`].
    pub data: Vec<u8>,
    #[serde_as(as = "Bytes")]
    pub owner: PublicKey,
}

impl ConsensusPayload {
    /// Decode the enveloped message body.
    ///
    /// # Errors
    ///
    /// Returns `RoundError::Encoding` when the body is not a valid
    /// bincode-serialized [`ConsensusMessage`].
    pub fn message(&self) -> Result<ConsensusMessage, RoundError> {
        bincode::deserialize(&self.data).map_err(|e| RoundError::Encoding(e.to_string()))
    }
}
