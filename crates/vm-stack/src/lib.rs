//! # vm-stack
//!
//! Value wrapper and bounded evaluation stack for the bytecode execution
//! engine. Execution semantics live elsewhere; this crate only defines what
//! sits on the stack and how it is pushed and popped.

pub mod error;
pub mod item;
pub mod stack;

pub use error::VmError;
pub use item::{StackItem, StackValue};
pub use stack::{EvalStack, MAX_STACK_SIZE};
