//! Logger metrics for observability
//!
//! Counts what happened to the events passed to a [`Logger`]:
//! suppressed by its threshold, dispatched to appenders, or failed in
//! at least one appender.
//!
//! [`Logger`]: crate::core::Logger

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use chihiro_log::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.appender_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Events rejected by the logger threshold
    suppressed: AtomicU64,

    /// Events passed on to the appender list
    dispatched: AtomicU64,

    /// Appender calls that returned an error or panicked
    appender_failures: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            suppressed: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            appender_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appender_failures(&self) -> u64 {
        self.appender_failures.load(Ordering::Relaxed)
    }

    /// Returns the previous count, like the other `record_*` methods
    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.appender_failures.fetch_add(1, Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.suppressed.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.appender_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            suppressed: AtomicU64::new(self.suppressed()),
            dispatched: AtomicU64::new(self.dispatched()),
            appender_failures: AtomicU64::new(self.appender_failures()),
        }
    }
}
