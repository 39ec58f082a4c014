//! Error types for stack operations.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VmError {
    /// Push onto a full stack.
    #[error("stack overflow")]
    StackOverflow,

    /// Pop or peek on an empty stack (or past its depth).
    #[error("stack underflow")]
    StackUnderflow,

    /// A value of the wrong kind for the requested access.
    #[error("type mismatch: expected {expected}, got {got}")]
    TypeMismatch {
        expected: &'static str,
        got: &'static str,
    },
}
