//! The bounded evaluation stack.

use crate::error::VmError;
use crate::item::StackItem;

/// Maximum stack depth.
pub const MAX_STACK_SIZE: usize = 1024;

/// A LIFO stack of [`StackItem`]s, bounded at [`MAX_STACK_SIZE`].
#[derive(Clone, Debug, Default)]
pub struct EvalStack {
    data: Vec<StackItem>,
}

impl EvalStack {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(64),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Push an item onto the stack.
    ///
    /// # Errors
    ///
    /// Returns `StackOverflow` if the stack is full.
    pub fn push(&mut self, item: StackItem) -> Result<(), VmError> {
        if self.data.len() >= MAX_STACK_SIZE {
            return Err(VmError::StackOverflow);
        }
        self.data.push(item);
        Ok(())
    }

    /// Pop the top item.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn pop(&mut self) -> Result<StackItem, VmError> {
        self.data.pop().ok_or(VmError::StackUnderflow)
    }

    /// Peek at the top item without removing it.
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the stack is empty.
    pub fn peek(&self) -> Result<&StackItem, VmError> {
        self.data.last().ok_or(VmError::StackUnderflow)
    }

    /// Peek at a given depth (0 = top).
    ///
    /// # Errors
    ///
    /// Returns `StackUnderflow` if the depth exceeds the stack.
    pub fn peek_at(&self, depth: usize) -> Result<&StackItem, VmError> {
        if depth >= self.data.len() {
            return Err(VmError::StackUnderflow);
        }
        Ok(&self.data[self.data.len() - 1 - depth])
    }
}
