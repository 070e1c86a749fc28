//! Query string helpers
//!
//! Pure rewrites over GROQ-style query text, independent of the executor.
//! Each helper checks for its syntax marker first, so applying one twice is
//! the same as applying it once.

use std::borrow::Cow;

/// Append a field projection unless the query already has one
///
/// The marker is any `{` in the query text.
pub fn ensure_projection<'a>(query: &'a str, fields: &str) -> Cow<'a, str> {
    if query.contains('{') {
        return Cow::Borrowed(query);
    }
    Cow::Owned(format!("{} {{ {} }}", query.trim_end(), fields))
}

/// Append an ordering clause unless the query already has one
pub fn ensure_order<'a>(query: &'a str, clause: &str) -> Cow<'a, str> {
    if query.contains("| order(") {
        return Cow::Borrowed(query);
    }
    Cow::Owned(format!("{} | order({})", query.trim_end(), clause))
}

/// Append a pagination slice unless the query already has one
pub fn ensure_slice(query: &str, offset: usize, limit: usize) -> Cow<'_, str> {
    if has_slice(query) {
        return Cow::Borrowed(query);
    }
    Cow::Owned(format!(
        "{}[{}...{}]",
        query.trim_end(),
        offset,
        offset + limit
    ))
}

/// A slice looks like `[<digits>...`; the bare `...` spread inside a
/// projection does not count
fn has_slice(query: &str) -> bool {
    let bytes = query.as_bytes();
    let mut search_from = 0;
    while let Some(pos) = query[search_from..].find("...") {
        let pos = search_from + pos;
        let mut i = pos;
        while i > 0 && bytes[i - 1].is_ascii_digit() {
            i -= 1;
        }
        if i > 0 && i < pos && bytes[i - 1] == b'[' {
            return true;
        }
        search_from = pos + 3;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_added_once() {
        let q = "*[_type == \"post\"]";
        let once = ensure_projection(q, "title, slug");
        assert_eq!(once, "*[_type == \"post\"] { title, slug }");
        let twice = ensure_projection(&once, "title, slug");
        assert_eq!(twice, once);
    }

    #[test]
    fn test_existing_projection_untouched() {
        let q = "*[_type == \"post\"]{ title }";
        assert_eq!(ensure_projection(q, "slug"), q);
    }

    #[test]
    fn test_order_idempotent() {
        let q = "*[_type == \"post\"]";
        let once = ensure_order(q, "publishedAt desc");
        assert_eq!(once, "*[_type == \"post\"] | order(publishedAt desc)");
        assert_eq!(ensure_order(&once, "publishedAt desc"), once);
    }

    #[test]
    fn test_slice_idempotent() {
        let q = "*[_type == \"post\"]";
        let once = ensure_slice(q, 0, 10);
        assert_eq!(once, "*[_type == \"post\"][0...10]");
        assert_eq!(ensure_slice(&once, 0, 10), once);
        assert_eq!(ensure_slice(&once, 20, 10), once);
    }

    #[test]
    fn test_spread_is_not_a_slice() {
        let q = "*[_type == \"post\"]{...}";
        let sliced = ensure_slice(q, 0, 5);
        assert_eq!(sliced, "*[_type == \"post\"]{...}[0...5]");
    }

    #[test]
    fn test_helpers_compose() {
        let q = "*[_type == \"post\"]";
        let built = ensure_order(q, "publishedAt desc");
        let built = ensure_slice(&built, 0, 12);
        let built = ensure_projection(&built, "title, slug, excerpt");
        assert_eq!(
            built,
            "*[_type == \"post\"] | order(publishedAt desc)[0...12] { title, slug, excerpt }"
        );
    }
}
