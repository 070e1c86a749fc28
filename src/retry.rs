//! Retry timing with exponential backoff
//!
//! Timing only: the retry budget itself comes from the request (or the
//! client's configured base count), not from this struct.

use std::time::Duration;

/// Backoff timing configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Initial delay between retries (milliseconds)
    pub initial_delay_ms: u64,

    /// Multiplier for exponential backoff
    pub backoff_multiplier: f64,

    /// Maximum delay between retries (milliseconds)
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 100,
            backoff_multiplier: 2.0,
            max_delay_ms: 30_000,
        }
    }
}

impl RetryConfig {
    /// Calculate delay after a given failed attempt (0-indexed)
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let base_delay =
            self.initial_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);

        let capped_delay = base_delay.min(self.max_delay_ms as f64);

        Duration::from_millis(capped_delay as u64)
    }
}

/// Error classification for retry decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryClassification {
    /// Should retry (transient error)
    Retry,

    /// Should not retry (permanent error)
    NoRetry,
}

/// Trait for errors that can be classified for retry
pub trait RetryableError {
    fn classify(&self) -> RetryClassification;
}
