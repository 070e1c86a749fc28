//! Content client - the retry/backoff executor and its entry points
//!
//! One logical query per call. Attempts are strictly sequential; concurrent
//! probes would amplify load on a backend that is already struggling. The
//! health monitor sees one outcome per call, never one per attempt.

use crate::config::ClientConfig;
use crate::error::{FetchError, StoreError};
use crate::health::{HealthMonitor, HealthState};
use crate::http::HttpStore;
use crate::policy::{Priority, RevalidationPolicy};
use crate::request::{FetchRequest, Revalidate};
use crate::retry::{RetryClassification, RetryConfig, RetryableError};
use crate::store::{ContentStore, QueryOptions};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry budget for critical fetches
pub const CRITICAL_RETRIES: u32 = 5;

/// Retry budget for optional fetches
pub const OPTIONAL_RETRIES: u32 = 1;

/// Resilient fetch client over a content store
pub struct ContentClient {
    store: Arc<dyn ContentStore>,
    config: ClientConfig,
    policy: RevalidationPolicy,
    retry: RetryConfig,
    health: HealthMonitor,
}

impl ContentClient {
    /// Create a client over an arbitrary store implementation
    pub fn new(store: Arc<dyn ContentStore>, config: ClientConfig) -> Self {
        Self {
            store,
            config,
            policy: RevalidationPolicy::default(),
            retry: RetryConfig::default(),
            health: HealthMonitor::new(),
        }
    }

    /// Create an HTTP-backed client from environment configuration
    pub fn from_env() -> Self {
        let config = ClientConfig::from_env();
        let store = Arc::new(HttpStore::new(config.clone()));
        Self::new(store, config)
    }

    /// Replace the cache lifetime policy
    pub fn with_policy(mut self, policy: RevalidationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the retry timing configuration
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Snapshot of backend health (advisory, never gates fetches)
    pub fn health(&self) -> HealthState {
        self.health.snapshot()
    }

    /// Effective cache lifetime for a content type (seconds)
    pub fn resolve_duration(&self, content_type: &str, priority: Priority) -> u64 {
        self.policy.resolve_duration(content_type, priority)
    }

    /// Fetch with the request's own retry budget (or the configured base)
    ///
    /// Fails with a [`FetchError`] once the budget is spent or a
    /// non-retryable error occurs.
    pub async fn fetch<T: DeserializeOwned>(&self, request: FetchRequest) -> Result<T, FetchError> {
        let retries = request.retries.unwrap_or(self.config.base_retries);
        self.execute(&request, retries).await
    }

    /// Fetch data the caller cannot render without
    ///
    /// Always uses [`CRITICAL_RETRIES`], regardless of the request's own
    /// budget, and propagates the terminal error.
    pub async fn fetch_critical<T: DeserializeOwned>(
        &self,
        request: FetchRequest,
    ) -> Result<T, FetchError> {
        self.execute(&request, CRITICAL_RETRIES).await
    }

    /// Fetch data the caller can render around
    ///
    /// Always uses [`OPTIONAL_RETRIES`]. Never fails: on exhaustion the
    /// error is logged and the caller gets `None`.
    pub async fn fetch_optional<T: DeserializeOwned>(&self, request: FetchRequest) -> Option<T> {
        match self.execute(&request, OPTIONAL_RETRIES).await {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("optional fetch degraded to empty result: {}", e);
                None
            }
        }
    }

    /// Run the retry loop for one logical query
    async fn execute<T: DeserializeOwned>(
        &self,
        request: &FetchRequest,
        retries: u32,
    ) -> Result<T, FetchError> {
        let options = QueryOptions {
            revalidate: self.effective_revalidate(request),
            tags: request.tags.clone(),
        };

        let started = Instant::now();
        let mut attempts = 0;
        let mut last_err = StoreError::Unknown("no attempts made".to_string());

        for attempt in 0..=retries {
            attempts = attempt + 1;

            let outcome = self
                .store
                .execute(&request.query, &request.params, &options)
                .await
                .and_then(|value| {
                    serde_json::from_value::<T>(value)
                        .map_err(|e| StoreError::InvalidResponse(e.to_string()))
                });

            match outcome {
                Ok(value) => {
                    self.health.record_success();
                    if self.config.perf_logging {
                        debug!(
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            attempts, "fetch succeeded"
                        );
                    }
                    return Ok(value);
                }
                Err(e) => {
                    match e.classify() {
                        RetryClassification::NoRetry => {
                            debug!("non-retryable error on attempt {}: {}", attempts, e);
                            last_err = e;
                            break;
                        }
                        RetryClassification::Retry => {
                            if attempt == retries {
                                last_err = e;
                                break;
                            }
                            let delay = self.retry.delay_for_attempt(attempt);
                            debug!(
                                "attempt {} failed, retrying in {:?}: {}",
                                attempts, delay, e
                            );
                            last_err = e;
                            sleep(delay).await;
                        }
                    }
                }
            }
        }

        self.health.record_failure();
        warn!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            attempts, "fetch failed: {}", last_err
        );
        Err(FetchError::new(
            last_err,
            attempts,
            &request.query,
            &request.tags,
        ))
    }

    /// Resolve the cache lifetime per the first-tag convention
    ///
    /// `Auto` with at least one tag infers a lifetime from that tag at
    /// medium priority; everything else passes through verbatim.
    fn effective_revalidate(&self, request: &FetchRequest) -> Revalidate {
        match request.revalidate {
            Revalidate::Auto => match request.content_type() {
                Some(content_type) => Revalidate::After(
                    self.policy.resolve_duration(content_type, Priority::Medium),
                ),
                None => Revalidate::Auto,
            },
            explicit => explicit,
        }
    }
}
