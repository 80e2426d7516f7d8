//! Logger metrics for observability
//!
//! Counters shared between a logger, its async engine and its failure
//! reporter.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use bufferlog::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_logged();
/// metrics.record_write_failure();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.write_failures(), 1);
/// ```
#[derive(Debug)]
pub struct LoggerMetrics {
    /// Records that passed the level gate and were rendered
    total_logged: AtomicU64,

    /// Records rejected by the level gate
    filtered_count: AtomicU64,

    /// Sink writes or flushes that failed
    write_failures: AtomicU64,

    /// Producer pushes that had to wait for buffer space
    block_events: AtomicU64,

    /// Production/consumption buffer exchanges
    buffer_swaps: AtomicU64,

    /// Bytes accepted by the async engine
    bytes_pushed: AtomicU64,

    /// Failure reports lost because the side channel was full
    dropped_reports: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            write_failures: AtomicU64::new(0),
            block_events: AtomicU64::new(0),
            buffer_swaps: AtomicU64::new(0),
            bytes_pushed: AtomicU64::new(0),
            dropped_reports: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn write_failures(&self) -> u64 {
        self.write_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn block_events(&self) -> u64 {
        self.block_events.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn buffer_swaps(&self) -> u64 {
        self.buffer_swaps.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn bytes_pushed(&self) -> u64 {
        self.bytes_pushed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_reports(&self) -> u64 {
        self.dropped_reports.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write_failure(&self) -> u64 {
        self.write_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_block(&self) -> u64 {
        self.block_events.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_swap(&self) -> u64 {
        self.buffer_swaps.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_bytes_pushed(&self, len: usize) -> u64 {
        self.bytes_pushed.fetch_add(len as u64, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped_report(&self) -> u64 {
        self.dropped_reports.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of rendered records whose delivery hit at least one sink failure,
    /// as a percentage (0.0 - 100.0)
    pub fn failure_rate(&self) -> f64 {
        let logged = self.total_logged() as f64;
        if logged == 0.0 {
            0.0
        } else {
            (self.write_failures() as f64 / logged * 100.0).min(100.0)
        }
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
        self.write_failures.store(0, Ordering::Relaxed);
        self.block_events.store(0, Ordering::Relaxed);
        self.buffer_swaps.store(0, Ordering::Relaxed);
        self.bytes_pushed.store(0, Ordering::Relaxed);
        self.dropped_reports.store(0, Ordering::Relaxed);
    }
}

impl Default for LoggerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LoggerMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            total_logged: AtomicU64::new(self.total_logged()),
            filtered_count: AtomicU64::new(self.filtered_count()),
            write_failures: AtomicU64::new(self.write_failures()),
            block_events: AtomicU64::new(self.block_events()),
            buffer_swaps: AtomicU64::new(self.buffer_swaps()),
            bytes_pushed: AtomicU64::new(self.bytes_pushed()),
            dropped_reports: AtomicU64::new(self.dropped_reports()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.write_failures(), 0);
        assert_eq!(metrics.block_events(), 0);
        assert_eq!(metrics.buffer_swaps(), 0);
        assert_eq!(metrics.bytes_pushed(), 0);
    }

    #[test]
    fn test_record_returns_previous_value() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_block(), 0);
        assert_eq!(metrics.record_block(), 1);
        assert_eq!(metrics.block_events(), 2);
    }

    #[test]
    fn test_bytes_pushed_accumulates() {
        let metrics = LoggerMetrics::new();
        metrics.record_bytes_pushed(100);
        metrics.record_bytes_pushed(28);
        assert_eq!(metrics.bytes_pushed(), 128);
    }

    #[test]
    fn test_failure_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.failure_rate(), 0.0);

        for _ in 0..100 {
            metrics.record_logged();
        }
        for _ in 0..10 {
            metrics.record_write_failure();
        }
        let rate = metrics.failure_rate();
        assert!((9.9..=10.1).contains(&rate), "Failure rate was {}", rate);
    }

    #[test]
    fn test_metrics_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_logged();
        metrics.record_swap();
        metrics.record_dropped_report();

        metrics.reset();

        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.buffer_swaps(), 0);
        assert_eq!(metrics.dropped_reports(), 0);
    }

    #[test]
    fn test_metrics_clone_is_snapshot() {
        let metrics = LoggerMetrics::new();
        metrics.record_logged();

        let snapshot = metrics.clone();
        metrics.record_logged();
        assert_eq!(metrics.total_logged(), 2);
        assert_eq!(snapshot.total_logged(), 1);
    }
}
