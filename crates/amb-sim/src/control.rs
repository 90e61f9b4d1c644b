//! Cross-thread run control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Requests that a running simulation stop.
///
/// Cheap to clone and `Send`, so a UI thread can hold one while the tick
/// loop runs elsewhere.  The loop only checks it between ticks; a tick in
/// progress always completes.
#[derive(Clone, Debug, Default)]
pub struct StopHandle(Arc<AtomicBool>);

impl StopHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request_stop(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Withdraw a stop request so the next `run` proceeds.
    pub fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}
