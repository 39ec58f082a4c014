//! Domain layer for the round core: status flags, the round context itself,
//! consensus messages and error types.

mod error;
mod flags;
mod message;
mod round;

pub use error::*;
pub use flags::*;
pub use message::*;
pub use round::*;
