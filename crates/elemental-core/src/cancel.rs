//! Cooperative cancellation
//!
//! Resolve tasks are blocking CPU work, so they poll a shared flag between
//! emitted plans instead of being aborted.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const RUNNING: u8 = 0;
const CANCELLED: u8 = 1;
const EXPIRED: u8 = 2;

/// Why a search stopped early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// Caller cancelled
    Cancelled,
    /// Deadline elapsed
    DeadlineExpired,
}

/// Shared cancellation flag, one per search
///
/// The first trip wins: a deadline expiring after the caller cancelled
/// still reports [`CancelReason::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicU8>);

impl CancelFlag {
    /// Create untripped flag
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel on behalf of the caller
    pub fn cancel(&self) {
        self.trip(CANCELLED);
    }

    /// Cancel because the deadline elapsed
    pub fn expire(&self) {
        self.trip(EXPIRED);
    }

    fn trip(&self, state: u8) {
        let _ = self
            .0
            .compare_exchange(RUNNING, state, Ordering::AcqRel, Ordering::Acquire);
    }

    /// Check if tripped for any reason
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire) != RUNNING
    }

    /// Reason, if tripped
    #[must_use]
    pub fn reason(&self) -> Option<CancelReason> {
        match self.0.load(Ordering::Acquire) {
            CANCELLED => Some(CancelReason::Cancelled),
            EXPIRED => Some(CancelReason::DeadlineExpired),
            _ => None,
        }
    }
}
