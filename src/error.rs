//! Error types for the fetch client
//!
//! `StoreError` is the structured form of whatever the backend raised; the
//! executor never inspects message text, only the kind. `FetchError` is the
//! terminal error handed to callers after the retry budget is spent.

use crate::retry::{RetryClassification, RetryableError};
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, FetchError>;

/// Maximum number of query characters preserved in a [`FetchError`]
pub const QUERY_SNIPPET_LEN: usize = 200;

/// Markers inspected in backend error text to detect non-retryable failures
const SYNTAX_MARKER: &str = "syntax error";
const UNAUTHORIZED_MARKER: &str = "Unauthorized";
const FORBIDDEN_MARKER: &str = "Forbidden";

/// Structured error raised by a content store adapter
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    /// Malformed query (backend rejected the query text)
    #[error("Query syntax error: {0}")]
    Syntax(String),

    /// Authentication failed (missing or invalid credentials)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authorization failed (valid credentials, insufficient access)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Request timed out
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Network error (connection failed, DNS, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// Backend server error (5xx)
    #[error("Server error: {0}")]
    Server(String),

    /// Response body did not match the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Unrecognized error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl RetryableError for StoreError {
    fn classify(&self) -> RetryClassification {
        match self {
            // Transient conditions get the full retry budget
            StoreError::Timeout(_) | StoreError::Network(_) | StoreError::Server(_) => {
                RetryClassification::Retry
            }

            // A malformed query or bad credentials cannot self-resolve
            StoreError::Syntax(_)
            | StoreError::Unauthorized(_)
            | StoreError::Forbidden(_)
            | StoreError::InvalidResponse(_) => RetryClassification::NoRetry,

            // Unrecognized errors default to retryable
            StoreError::Unknown(_) => RetryClassification::Retry,
        }
    }
}

impl StoreError {
    /// Create from HTTP status code and body
    pub fn from_http_status(status: u16, body: &str) -> Self {
        match status {
            400 => Self::from_message(format!("HTTP 400: {}", body)),
            401 => StoreError::Unauthorized(body.to_string()),
            403 => StoreError::Forbidden(body.to_string()),
            408 | 504 => StoreError::Timeout(body.to_string()),
            500..=599 => StoreError::Server(body.to_string()),
            _ => StoreError::Unknown(format!("HTTP {}: {}", status, body)),
        }
    }

    /// Classify a free-text error message
    ///
    /// Used for 400 bodies (which carry the failure kind as text) and by
    /// adapters whose backends expose no status code. Only three substrings
    /// mark a failure as non-retryable; everything else stays transient.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(SYNTAX_MARKER) {
            StoreError::Syntax(message)
        } else if message.contains(UNAUTHORIZED_MARKER) {
            StoreError::Unauthorized(message)
        } else if message.contains(FORBIDDEN_MARKER) {
            StoreError::Forbidden(message)
        } else {
            StoreError::Unknown(message)
        }
    }
}

/// Terminal fetch error: the retry budget is spent (or a non-retryable
/// condition cut the loop short)
#[derive(Error, Debug)]
#[error("Fetch failed after {attempts} attempt(s) for query `{query}`: {source}")]
pub struct FetchError {
    /// The last error raised by the store
    #[source]
    pub source: StoreError,

    /// Number of attempts actually made
    pub attempts: u32,

    /// Query text, truncated to [`QUERY_SNIPPET_LEN`] characters
    pub query: String,

    /// Cache tags the request carried
    pub tags: Vec<String>,
}

impl FetchError {
    pub(crate) fn new(source: StoreError, attempts: u32, query: &str, tags: &[String]) -> Self {
        Self {
            source,
            attempts,
            query: truncate(query, QUERY_SNIPPET_LEN),
            tags: tags.to_vec(),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    // Back off to a char boundary so multi-byte queries do not panic
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(
            StoreError::Timeout("t".into()).classify(),
            RetryClassification::Retry
        );
        assert_eq!(
            StoreError::Server("500".into()).classify(),
            RetryClassification::Retry
        );
        assert_eq!(
            StoreError::Unknown("?".into()).classify(),
            RetryClassification::Retry
        );
        assert_eq!(
            StoreError::Syntax("bad".into()).classify(),
            RetryClassification::NoRetry
        );
        assert_eq!(
            StoreError::Unauthorized("no".into()).classify(),
            RetryClassification::NoRetry
        );
        assert_eq!(
            StoreError::Forbidden("no".into()).classify(),
            RetryClassification::NoRetry
        );
    }

    #[test]
    fn test_from_http_status() {
        assert!(matches!(
            StoreError::from_http_status(400, "syntax error at line 1"),
            StoreError::Syntax(_)
        ));
        assert!(matches!(
            StoreError::from_http_status(401, ""),
            StoreError::Unauthorized(_)
        ));
        assert!(matches!(
            StoreError::from_http_status(403, ""),
            StoreError::Forbidden(_)
        ));
        assert!(matches!(
            StoreError::from_http_status(503, "down"),
            StoreError::Server(_)
        ));
        assert!(matches!(
            StoreError::from_http_status(418, "teapot"),
            StoreError::Unknown(_)
        ));
    }

    #[test]
    fn test_http_400_body_classified_by_marker() {
        assert!(matches!(
            StoreError::from_http_status(400, "Unauthorized - token expired"),
            StoreError::Unauthorized(_)
        ));
        assert!(matches!(
            StoreError::from_http_status(400, "Forbidden dataset"),
            StoreError::Forbidden(_)
        ));
        assert!(matches!(
            StoreError::from_http_status(400, "malformed JSON body"),
            StoreError::Unknown(_)
        ));
    }

    #[test]
    fn test_from_message_markers() {
        assert!(matches!(
            StoreError::from_message("GROQ syntax error: unexpected token"),
            StoreError::Syntax(_)
        ));
        assert!(matches!(
            StoreError::from_message("Unauthorized - Session not found"),
            StoreError::Unauthorized(_)
        ));
        assert!(matches!(
            StoreError::from_message("Forbidden dataset"),
            StoreError::Forbidden(_)
        ));
        assert!(matches!(
            StoreError::from_message("socket hang up"),
            StoreError::Unknown(_)
        ));
    }

    #[test]
    fn test_query_truncation() {
        let long = "x".repeat(500);
        let err = FetchError::new(StoreError::Server("boom".into()), 4, &long, &[]);
        assert_eq!(err.query.len(), QUERY_SNIPPET_LEN);
        assert_eq!(err.attempts, 4);
    }
}
