/// Name of the URL query parameter holding the search term.
pub const QUERY_PARAM: &str = "q";

/// Drops absent and empty parameter values.
pub fn extract_query(value: Option<String>) -> Option<String> {
    value.filter(|q| !q.is_empty())
}

/// Turns raw `q` values into distinct search terms.
///
/// Only consecutive duplicates are suppressed: `a, a, b, a` yields `a, b, a`.
#[derive(Clone, Debug, Default)]
pub struct QueryListener {
    last: Option<String>,
}

impl QueryListener {
    pub fn observe(&mut self, value: Option<String>) -> Option<String> {
        let q = extract_query(value)?;
        if self.last.as_deref() == Some(q.as_str()) {
            return None;
        }
        self.last = Some(q.clone());
        Some(q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(values: &[Option<&str>]) -> Vec<String> {
        let mut listener = QueryListener::default();
        values
            .iter()
            .filter_map(|v| listener.observe(v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn test_absent_and_empty_are_ignored() {
        assert!(feed(&[None, Some(""), None]).is_empty());
    }

    #[test]
    fn test_consecutive_duplicates_suppressed() {
        assert_eq!(feed(&[Some("rust"), Some("rust"), Some("go")]), vec!["rust", "go"]);
    }

    #[test]
    fn test_only_consecutive_not_history() {
        assert_eq!(
            feed(&[Some("a"), Some("b"), Some("a")]),
            vec!["a", "b", "a"]
        );
    }

    #[test]
    fn test_empty_between_duplicates_does_not_reset() {
        // An empty value is filtered before the distinct check.
        assert_eq!(feed(&[Some("nginx"), Some(""), Some("nginx")]), vec!["nginx"]);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        assert_eq!(feed(&[Some("Rust"), Some("rust")]), vec!["Rust", "rust"]);
    }
}
