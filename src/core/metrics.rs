//! Logger metrics for observability
//!
//! Counters describing how records moved through the logger: buffered,
//! written synchronously, filtered by the threshold, and how often the
//! buffer was forced out. Usage errors and destination failures are counted
//! too, since they are otherwise only visible on stderr.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use rust_buffered_logger::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_buffered();
/// metrics.record_synchronous();
///
/// assert_eq!(metrics.total_emitted(), 2);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Records appended to the buffer
    buffered: AtomicU64,

    /// Records written straight to the destination
    synchronous: AtomicU64,

    /// Records dropped because they were below the threshold
    filtered: AtomicU64,

    /// Non-empty buffer flushes
    flushes: AtomicU64,

    /// Out-of-order lifecycle calls (double start, stop before start, ...)
    usage_errors: AtomicU64,

    /// Destination writes or flushes that failed
    write_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            buffered: AtomicU64::new(0),
            synchronous: AtomicU64::new(0),
            filtered: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
            usage_errors: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn buffered(&self) -> u64 {
        self.buffered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn synchronous(&self) -> u64 {
        self.synchronous.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered(&self) -> u64 {
        self.filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flushes(&self) -> u64 {
        self.flushes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn usage_errors(&self) -> u64 {
        self.usage_errors.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    /// Records that reached the buffer or the destination
    pub fn total_emitted(&self) -> u64 {
        self.buffered() + self.synchronous()
    }

    #[inline]
    pub fn record_buffered(&self) -> u64 {
        self.buffered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_synchronous(&self) -> u64 {
        self.synchronous.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush(&self) -> u64 {
        self.flushes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_usage_error(&self) -> u64 {
        self.usage_errors.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        self.buffered.store(0, Ordering::Relaxed);
        self.synchronous.store(0, Ordering::Relaxed);
        self.filtered.store(0, Ordering::Relaxed);
        self.flushes.store(0, Ordering::Relaxed);
        self.usage_errors.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
    }
}
