//! In-flight guard for dialog actions
//!
//! A dialog's submit control is disabled while its request is in flight.
//! The flag is shared, so whoever renders the control can observe it while
//! the action awaits the endpoint.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Enabled/disabled state of a dialog's submit control
#[derive(Debug, Clone, Default)]
pub struct SubmitControl {
    in_flight: Arc<AtomicBool>,
}

impl SubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the control accepts a new submission
    pub fn is_enabled(&self) -> bool {
        !self.in_flight.load(Ordering::SeqCst)
    }

    /// Claim the control for one request; `None` while another is in flight
    pub fn try_begin(&self) -> Option<SubmitGuard> {
        self.in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| SubmitGuard {
                in_flight: Arc::clone(&self.in_flight),
            })
    }
}

/// Re-enables the control when dropped, whatever the request's outcome
#[derive(Debug)]
pub struct SubmitGuard {
    in_flight: Arc<AtomicBool>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::SeqCst);
    }
}
