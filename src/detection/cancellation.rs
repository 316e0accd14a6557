//! Cooperative cancellation shared between a caller and a running detection

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Polled cancellation flag
///
/// Clones share the same flag, so a watchdog thread can hold one clone and
/// cancel a detection running on another thread. Detectors only ever read
/// it; cancelling never raises, it makes the running detector return early
/// with whatever it has.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that is not cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of every detection observing this token
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
