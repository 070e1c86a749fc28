//! Content store port
//!
//! The executor's only coupling to the backend. Adapters translate their
//! transport's failures into structured [`StoreError`] kinds; the executor
//! never inspects error text.

use crate::error::StoreError;
use crate::request::{Params, Revalidate};
use async_trait::async_trait;
use serde_json::Value;

/// Cache metadata attached to one query
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Resolved cache lifetime; [`Revalidate::Auto`] here means the request
    /// carried no tags and no explicit lifetime, so no hint is attached
    pub revalidate: Revalidate,

    /// Cache tags forwarded as request metadata
    pub tags: Vec<String>,
}

/// Query-execution port to the content store
///
/// Implement this to back the client with a real store (see
/// [`HttpStore`](crate::http::HttpStore)) or a test double.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Execute one query and return the parsed result
    async fn execute(
        &self,
        query: &str,
        params: &Params,
        options: &QueryOptions,
    ) -> Result<Value, StoreError>;
}
