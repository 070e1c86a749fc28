//! Backend health tracking
//!
//! Pure bookkeeping over fetch outcomes. The signal is advisory: nothing in
//! the fetch path reads it, it exists for external diagnostics and alerting.

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Consecutive failures at which the backend is reported unhealthy
pub const UNHEALTHY_THRESHOLD: u32 = 5;

/// Snapshot of backend reachability
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthState {
    /// Time of the last successful fetch
    pub last_success: DateTime<Utc>,

    /// Failures since the last success
    pub consecutive_failures: u32,

    /// `consecutive_failures < UNHEALTHY_THRESHOLD`, recomputed per mutation
    pub is_healthy: bool,
}

/// Single-instance monitor of backend health
///
/// One success or failure is recorded per completed fetch call, never per
/// attempt. Mutex-protected: fetches can complete concurrently on different
/// runtime worker threads.
#[derive(Debug)]
pub struct HealthMonitor {
    state: Mutex<HealthState>,
}

impl Default for HealthMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthMonitor {
    /// Create a monitor in the initial healthy state
    pub fn new() -> Self {
        Self {
            state: Mutex::new(HealthState {
                last_success: Utc::now(),
                consecutive_failures: 0,
                is_healthy: true,
            }),
        }
    }

    /// Record a successful fetch
    pub fn record_success(&self) {
        let mut state = self.state.lock();
        state.last_success = Utc::now();
        state.consecutive_failures = 0;
        state.is_healthy = true;
    }

    /// Record a failed fetch
    pub fn record_failure(&self) {
        let mut state = self.state.lock();
        state.consecutive_failures += 1;
        state.is_healthy = state.consecutive_failures < UNHEALTHY_THRESHOLD;
    }

    /// Immutable copy of the current state
    pub fn snapshot(&self) -> HealthState {
        self.state.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_healthy() {
        let monitor = HealthMonitor::new();
        let state = monitor.snapshot();
        assert!(state.is_healthy);
        assert_eq!(state.consecutive_failures, 0);
    }

    #[test]
    fn test_unhealthy_after_five_failures() {
        let monitor = HealthMonitor::new();
        for i in 1..=4 {
            monitor.record_failure();
            let state = monitor.snapshot();
            assert!(state.is_healthy, "still healthy at {} failures", i);
        }
        monitor.record_failure();
        assert!(!monitor.snapshot().is_healthy);
        assert_eq!(monitor.snapshot().consecutive_failures, 5);
    }

    #[test]
    fn test_success_resets() {
        let monitor = HealthMonitor::new();
        for _ in 0..7 {
            monitor.record_failure();
        }
        assert!(!monitor.snapshot().is_healthy);

        let before = monitor.snapshot().last_success;
        monitor.record_success();
        let state = monitor.snapshot();
        assert!(state.is_healthy);
        assert_eq!(state.consecutive_failures, 0);
        assert!(state.last_success >= before);
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let monitor = HealthMonitor::new();
        let snap = monitor.snapshot();
        monitor.record_failure();
        assert_eq!(snap.consecutive_failures, 0);
        assert_eq!(monitor.snapshot().consecutive_failures, 1);
    }
}
