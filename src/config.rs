//! Client configuration
//!
//! Resolved once at startup from environment variables with per-knob
//! defaults, then treated as immutable for the process lifetime.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Environment variable names
pub const ENV_ENDPOINT: &str = "STELA_ENDPOINT";
pub const ENV_TOKEN: &str = "STELA_TOKEN";
pub const ENV_USE_CDN: &str = "STELA_USE_CDN";
pub const ENV_TIMEOUT_SECS: &str = "STELA_TIMEOUT_SECS";
pub const ENV_RETRIES: &str = "STELA_RETRIES";
pub const ENV_PERF_LOG: &str = "STELA_PERF_LOG";

/// Fetch client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Content store query endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Bearer token for authenticated reads
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub token: Option<String>,

    /// Route reads through the CDN edge
    #[serde(default = "default_use_cdn")]
    pub use_cdn: bool,

    /// Per-request network timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base retry budget when a request does not set one
    #[serde(default = "default_base_retries")]
    pub base_retries: u32,

    /// Emit performance/health log lines
    #[serde(default = "default_perf_logging")]
    pub perf_logging: bool,
}

// Default value functions
fn default_endpoint() -> String {
    "http://localhost:3333/v1/query".to_string()
}
fn default_use_cdn() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_base_retries() -> u32 {
    3
}
fn default_perf_logging() -> bool {
    false
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: None,
            use_cdn: default_use_cdn(),
            timeout_secs: default_timeout_secs(),
            base_retries: default_base_retries(),
            perf_logging: default_perf_logging(),
        }
    }
}

impl ClientConfig {
    /// Load from environment variables, falling back to defaults
    ///
    /// Unparseable values fall back silently; a missing endpoint falls back
    /// to the local development store.
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var(ENV_ENDPOINT).unwrap_or_else(|_| default_endpoint()),
            token: std::env::var(ENV_TOKEN).ok().filter(|t| !t.is_empty()),
            use_cdn: env_parse(ENV_USE_CDN).unwrap_or_else(default_use_cdn),
            timeout_secs: env_parse(ENV_TIMEOUT_SECS).unwrap_or_else(default_timeout_secs),
            base_retries: env_parse(ENV_RETRIES).unwrap_or_else(default_base_retries),
            perf_logging: env_parse(ENV_PERF_LOG).unwrap_or_else(default_perf_logging),
        }
    }

    /// Network timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Parse an environment variable, `None` if unset or unparseable
fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
