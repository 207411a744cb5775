// Performance metrics module
//
// Provides lightweight metrics tracking for monitoring calculator activity

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Session metrics
///
/// Uses atomic operations for thread-safe metric tracking without locks.
/// Counters are collected throughout the session and logged on shutdown when
/// stat logging is enabled.
#[derive(Debug)]
pub struct Metrics {
    /// Input events dispatched (keys and button presses)
    pub keys_dispatched: AtomicU64,

    /// Binary calculations completed successfully
    pub calculations_performed: AtomicUsize,

    /// Scientific functions applied successfully
    pub functions_applied: AtomicUsize,

    /// Calculations that failed with a math error
    pub errors_raised: AtomicUsize,

    /// History entries appended
    pub history_appends: AtomicU64,

    /// Session start time
    start_time: Instant,
}

impl Metrics {
    /// Create a new Metrics instance
    pub fn new() -> Self {
        Self {
            keys_dispatched: AtomicU64::new(0),
            calculations_performed: AtomicUsize::new(0),
            functions_applied: AtomicUsize::new(0),
            errors_raised: AtomicUsize::new(0),
            history_appends: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record a dispatched input event
    pub fn record_key_dispatched(&self) {
        self.keys_dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed binary calculation
    pub fn record_calculation(&self) {
        self.calculations_performed.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a completed scientific function application
    pub fn record_function_applied(&self) {
        self.functions_applied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a failed calculation
    pub fn record_error(&self) {
        self.errors_raised.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a history append
    pub fn record_history_append(&self) {
        self.history_appends.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Total successful operations (calculations plus functions)
    pub fn total_operations(&self) -> usize {
        self.calculations_performed.load(Ordering::Relaxed)
            + self.functions_applied.load(Ordering::Relaxed)
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        let uptime = self.uptime();
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", uptime.as_secs_f64());
        tracing::info!(
            "Input events dispatched: {}",
            self.keys_dispatched.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Operations: {} calculations, {} functions, {} errors",
            self.calculations_performed.load(Ordering::Relaxed),
            self.functions_applied.load(Ordering::Relaxed),
            self.errors_raised.load(Ordering::Relaxed)
        );
        tracing::info!(
            "History entries appended: {}",
            self.history_appends.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.keys_dispatched.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.total_operations(), 0);
    }

    #[test]
    fn test_record_operations() {
        let metrics = Metrics::new();

        metrics.record_calculation();
        metrics.record_calculation();
        metrics.record_function_applied();
        metrics.record_error();

        assert_eq!(metrics.calculations_performed.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.functions_applied.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.errors_raised.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.total_operations(), 3);
    }

    #[test]
    fn test_record_dispatch_and_history() {
        let metrics = Metrics::new();

        metrics.record_key_dispatched();
        metrics.record_key_dispatched();
        metrics.record_history_append();

        assert_eq!(metrics.keys_dispatched.load(Ordering::Relaxed), 2);
        assert_eq!(metrics.history_appends.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_uptime() {
        let metrics = Metrics::new();
        thread::sleep(Duration::from_millis(10));
        assert!(metrics.uptime().as_millis() >= 10);
    }
}
