//! One-shot cancellation signal for value-stream subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable flag that, once fired, ends every subscription holding it.
///
/// Clones share state, so any owner may fire it. Firing is idempotent.
#[derive(Clone, Debug, Default)]
pub struct TeardownSignal {
    fired: Arc<AtomicBool>,
}

impl TeardownSignal {
    /// Creates an unfired signal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the signal. Returns true if this call fired it.
    pub fn fire(&self) -> bool {
        !self.fired.swap(true, Ordering::AcqRel)
    }

    /// Returns true once the signal has fired.
    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.fired.load(Ordering::Acquire)
    }
}
