//! # dbft-round
//!
//! Round-coordination core of the dBFT consensus engine.
//!
//! ## Architecture
//!
//! One [`RoundContext`] per node tracks a single consensus round for a fixed
//! validator set: it computes the view's primary, accumulates the candidate
//! block and its signatures, and builds the change-view / prepare-request /
//! prepare-response envelopes. An external round coordinator drives it:
//!
//! ```text
//! coordinator ──reset──────────→ RoundContext ──envelopes──→ transport
//!             ──change_view───→      │
//!             ──make_* ────────→      │ reads head / validator sets /
//!             ──signature_count→      ▼ state root
//!                                LedgerProvider
//! ```
//!
//! The context never sends or receives bytes, never executes transactions
//! and never signs; those live with out-of-scope collaborators reached
//! through the [`ports`] traits.
//!
//! ## Concurrency
//!
//! The context is shared between a message-handling path and a timer path.
//! [`SharedRoundContext`] wraps it in a single lock with scoped access so
//! read-decide-mutate sequences stay atomic.
//!
//! ## Failure policy
//!
//! Collaborator failures (Merkle root, commitment derivation) yield an
//! absent result and a log line, never a panic; the coordinator retries on
//! the next message or timer tick.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod state;

// Re-export main types
pub use adapters::{FixedIdentity, InMemoryLedger, PairwiseSha256};
pub use domain::{
    quorum_threshold, ConsensusMessage, ConsensusPayload, MessageBody, RoundContext, RoundError,
    RoundResult, RoundState, CONTEXT_VERSION,
};
pub use ports::{LedgerProvider, MerkleHasher, SigningIdentity};
pub use state::SharedRoundContext;
