/// Request path utilities
///
/// Helpers that turn what the server received into the form the route
/// table matches against.

/// Normalize a request path for matching
///
/// Strips every leading and trailing `/` so that `/post/5/`, `post/5` and
/// `/post/5` compare equal. Inner separators are left untouched. The root
/// path `/` normalizes to the empty string.
///
/// Zero-copy: returns a slice of the input.
///
/// # Examples
///
/// ```
/// use hive_router::path::normalize_request_path;
///
/// assert_eq!(normalize_request_path("/post/5/"), "post/5");
/// assert_eq!(normalize_request_path("post/5"), "post/5");
/// assert_eq!(normalize_request_path("/"), "");
/// ```
pub fn normalize_request_path(path: &str) -> &str {
    path.trim_matches('/')
}

/// Builds a request path from an optional path override
///
/// `None` means the override was absent and yields `/`. A present value is
/// prefixed with `/` the same way a rewritten `?uri=post/5` becomes `/post/5`.
///
/// # Examples
///
/// ```
/// use hive_router::path::request_path_from_override;
///
/// assert_eq!(request_path_from_override(None), "/");
/// assert_eq!(request_path_from_override(Some("post/5")), "/post/5");
/// assert_eq!(request_path_from_override(Some("/post/5")), "/post/5");
/// ```
pub fn request_path_from_override(value: Option<&str>) -> String {
    match value {
        Some(v) => format!("/{}", v.trim_start_matches('/')),
        None => "/".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_repeated_separators_at_edges() {
        assert_eq!(normalize_request_path("//a/b//"), "a/b");
    }

    #[test]
    fn test_normalize_keeps_inner_separators() {
        assert_eq!(normalize_request_path("/a//b/"), "a//b");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_request_path(""), "");
    }

    #[test]
    fn test_override_empty_value() {
        assert_eq!(request_path_from_override(Some("")), "/");
    }
}
