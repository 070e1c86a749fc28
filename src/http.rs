//! HTTP adapter for the content store
//!
//! Speaks a Sanity-style query API: POST the query text and params as JSON,
//! read the result out of the response envelope. Cache lifetime and tags
//! travel as request headers so intermediary caches can honor them.

use crate::config::ClientConfig;
use crate::error::StoreError;
use crate::request::{Params, Revalidate};
use crate::store::{ContentStore, QueryOptions};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying the request's cache tags
pub const TAGS_HEADER: &str = "x-content-tags";

/// HTTP-backed content store
pub struct HttpStore {
    client: Client,
    config: ClientConfig,
}

impl HttpStore {
    /// Create a store from resolved configuration
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn cache_control(&self, revalidate: Revalidate) -> Option<String> {
        if !self.config.use_cdn {
            return Some("no-cache".to_string());
        }
        match revalidate {
            Revalidate::Auto => None,
            Revalidate::Disabled => Some("no-store".to_string()),
            Revalidate::After(secs) => Some(format!("max-age={}", secs)),
        }
    }
}

#[derive(Serialize)]
struct QueryBody<'a> {
    query: &'a str,
    params: &'a Params,
}

#[derive(Deserialize)]
struct QueryEnvelope {
    result: Value,
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn execute(
        &self,
        query: &str,
        params: &Params,
        options: &QueryOptions,
    ) -> Result<Value, StoreError> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .timeout(self.config.timeout())
            .json(&QueryBody { query, params });

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        if let Some(cache_control) = self.cache_control(options.revalidate) {
            request = request.header(reqwest::header::CACHE_CONTROL, cache_control);
        }
        if !options.tags.is_empty() {
            request = request.header(TAGS_HEADER, options.tags.join(","));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                StoreError::Timeout(e.to_string())
            } else {
                StoreError::Network(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::from_http_status(status, &body));
        }

        let envelope: QueryEnvelope = response
            .json()
            .await
            .map_err(|e| StoreError::InvalidResponse(e.to_string()))?;

        Ok(envelope.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(use_cdn: bool) -> HttpStore {
        HttpStore::new(ClientConfig {
            use_cdn,
            ..Default::default()
        })
    }

    #[test]
    fn test_cache_control_from_lifetime() {
        let s = store(true);
        assert_eq!(s.cache_control(Revalidate::Auto), None);
        assert_eq!(s.cache_control(Revalidate::Disabled), Some("no-store".into()));
        assert_eq!(
            s.cache_control(Revalidate::After(1800)),
            Some("max-age=1800".into())
        );
    }

    #[test]
    fn test_cdn_disabled_forces_revalidation() {
        let s = store(false);
        assert_eq!(s.cache_control(Revalidate::After(300)), Some("no-cache".into()));
        assert_eq!(s.cache_control(Revalidate::Auto), Some("no-cache".into()));
    }
}
