//! Shared round context under one lock.
//!
//! The context is mutated from at least two paths: the message handler
//! processing peer envelopes and the timer driving view changes. Every
//! multi-step decision (read signatures, decide quorum, mutate) must run as
//! one critical section, so the context is exposed only through a scoped
//! accessor rather than per-field locks.

use parking_lot::Mutex;

use crate::domain::RoundContext;

/// A `RoundContext` owned by one coordinator and shared across its message
/// and timer paths.
pub struct SharedRoundContext {
    inner: Mutex<RoundContext>,
}

impl SharedRoundContext {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RoundContext::new()),
        }
    }

    /// Run `f` with exclusive access to the context. The lock is held for
    /// the whole closure, so a decision and the mutation it justifies cannot
    /// be interleaved with a concurrent reset or view change.
    pub fn with<R>(&self, f: impl FnOnce(&mut RoundContext) -> R) -> R {
        let mut cxt = self.inner.lock();
        f(&mut cxt)
    }
}

impl Default for SharedRoundContext {
    fn default() -> Self {
        Self::new()
    }
}
