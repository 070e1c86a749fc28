//! Fetch request description

use serde_json::Value;
use std::collections::HashMap;

/// Query parameter map
pub type Params = HashMap<String, Value>;

/// Cache lifetime requested by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Revalidate {
    /// Infer from the request's first tag (content type) at medium priority;
    /// no tags means no caching hint is attached
    #[default]
    Auto,

    /// Never serve from cache
    Disabled,

    /// Revalidate after this many seconds
    After(u64),
}

/// One logical query against the content store
///
/// The first tag, if present, determines the inferred cache lifetime when
/// `revalidate` is [`Revalidate::Auto`] — order tags deliberately.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Query text, opaque to the client
    pub query: String,

    /// Named parameters substituted by the backend
    pub params: Params,

    /// Cache tags attached as request metadata
    pub tags: Vec<String>,

    /// Cache lifetime; `Auto` defers to the policy resolver
    pub revalidate: Revalidate,

    /// Retry budget; `None` uses the configured base count
    pub retries: Option<u32>,
}

impl FetchRequest {
    /// Create a request with defaults: empty params, no tags, auto lifetime,
    /// configured retry budget
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            params: Params::new(),
            tags: Vec::new(),
            revalidate: Revalidate::Auto,
            retries: None,
        }
    }

    /// Add a named parameter
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Append a cache tag
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Replace the tag list
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set an explicit cache lifetime
    pub fn revalidate(mut self, revalidate: Revalidate) -> Self {
        self.revalidate = revalidate;
        self
    }

    /// Override the retry budget
    pub fn retries(mut self, retries: u32) -> Self {
        self.retries = Some(retries);
        self
    }

    /// Content type inferred from the first tag
    pub fn content_type(&self) -> Option<&str> {
        self.tags.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let req = FetchRequest::new("*[_type == $type]");
        assert!(req.params.is_empty());
        assert!(req.tags.is_empty());
        assert_eq!(req.revalidate, Revalidate::Auto);
        assert_eq!(req.retries, None);
    }

    #[test]
    fn test_first_tag_is_content_type() {
        let req = FetchRequest::new("q").tag("blogPost").tag("author");
        assert_eq!(req.content_type(), Some("blogPost"));
    }

    #[test]
    fn test_param_values() {
        let req = FetchRequest::new("q").param("slug", "about-us").param("limit", 10);
        assert_eq!(req.params["slug"], Value::from("about-us"));
        assert_eq!(req.params["limit"], Value::from(10));
    }
}
