//! # stela
//!
//! Resilient fetch client for headless content stores.
//!
//! ## Features
//! - Automatic retry with exponential backoff
//! - Non-retryable short-circuit for syntax and auth failures
//! - Cache lifetime inference from content-type tags
//! - Process-wide backend health tracking (advisory, never gates fetches)
//! - Critical / optional fetch conventions for page-level callers
//!
//! ```no_run
//! use stela::{ContentClient, FetchRequest};
//!
//! # async fn demo() {
//! let client = ContentClient::from_env();
//!
//! // Critical data: propagate the error to the page boundary
//! let posts: serde_json::Value = client
//!     .fetch_critical(FetchRequest::new("*[_type == \"post\"]").tag("post"))
//!     .await
//!     .expect("posts are required to render");
//!
//! // Optional data: render around a missing section
//! let banner: Option<serde_json::Value> = client
//!     .fetch_optional(FetchRequest::new("*[_type == \"banner\"][0]").tag("banner"))
//!     .await;
//! # let _ = (posts, banner);
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod health;
pub mod http;
pub mod policy;
pub mod query;
pub mod request;
pub mod retry;
pub mod store;

// Core client and request types
pub use client::{ContentClient, CRITICAL_RETRIES, OPTIONAL_RETRIES};
pub use request::{FetchRequest, Params, Revalidate};

// Policy and health
pub use health::{HealthMonitor, HealthState, UNHEALTHY_THRESHOLD};
pub use policy::{Priority, RevalidationPolicy};

// Error and retry
pub use error::{FetchError, Result, StoreError};
pub use retry::RetryConfig;

// Backend port
pub use config::ClientConfig;
pub use http::HttpStore;
pub use store::{ContentStore, QueryOptions};

// Query helpers
pub use query::{ensure_order, ensure_projection, ensure_slice};
