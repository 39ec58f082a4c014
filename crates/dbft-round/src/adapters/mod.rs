//! Adapters implementing the outbound ports.

mod memory;
mod merkle;

pub use memory::{FixedIdentity, InMemoryLedger};
pub use merkle::PairwiseSha256;
