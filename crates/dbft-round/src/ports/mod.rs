//! Port definitions (collaborator contracts).

mod outbound;

pub use outbound::*;
