/// Template compilation
///
/// Turns a route template such as `/post/:action/#id` into an anchored
/// regex plus the ordered list of variable names it captures.

use regex::Regex;
use tracing::debug;

use super::pattern::classify_segment;
use crate::{RouteError, RouteVars};

/// A route template compiled into a full-string matcher
///
/// `vars` lists variable names in the order they appear in the template.
/// Capture group N always corresponds to `vars[N]`.
#[derive(Debug, Clone)]
pub struct CompiledRoute {
    /// Handler the route dispatches to
    pub key: String,
    /// Uncompiled template, kept for diagnostics and ordering
    pub template: String,
    /// Anchored matcher (`^...$`)
    pub matcher: Regex,
    /// Variable names, left to right
    pub vars: Vec<String>,
}

impl CompiledRoute {
    /// Matches an already-normalized path (no leading or trailing `/`)
    ///
    /// Returns the captured variables zipped positionally with `vars`, or
    /// `None` when the path does not match the whole pattern.
    ///
    /// # Examples
    ///
    /// ```
    /// use hive_router::compile_route;
    ///
    /// let route = compile_route("post", "/post/:action/#id").unwrap();
    /// let vars = route.captures("post/edit/42").unwrap();
    /// assert_eq!(vars.get("action"), Some("edit"));
    /// assert_eq!(vars.get("id"), Some("42"));
    ///
    /// assert!(route.captures("post/edit/abc").is_none());
    /// ```
    pub fn captures(&self, normalized: &str) -> Option<RouteVars> {
        let caps = self.matcher.captures(normalized)?;

        // Group 0 is the whole match; the rest line up with `vars`
        let values = caps
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str()).unwrap_or_default());

        Some(self.vars.iter().map(String::as_str).zip(values).collect())
    }

    /// Returns true if the normalized path matches this route
    pub fn is_match(&self, normalized: &str) -> bool {
        self.matcher.is_match(normalized)
    }
}

/// Compiles a template into a [`CompiledRoute`]
///
/// The template is split on `/` after dropping its outer separators, the
/// same way request paths are normalized, so `/post/` and `/post` compile
/// to the same matcher. Each segment becomes a digits group (`#name`), a
/// letters group (`:name`) or an escaped literal; tokens are joined with
/// `/` and anchored at both ends.
///
/// # Examples
///
/// ```
/// use hive_router::compile_route;
///
/// let route = compile_route("about", "/about/team").unwrap();
/// assert!(route.vars.is_empty());
/// assert!(route.is_match("about/team"));
/// assert!(!route.is_match("about/team/extra"));
/// ```
pub fn compile_route(key: &str, template: &str) -> Result<CompiledRoute, RouteError> {
    let body = template.trim_matches('/');

    let (tokens, vars) = body.split('/').map(classify_segment).fold(
        (Vec::new(), Vec::new()),
        |(mut tokens, mut vars), kind| {
            if let Some(name) = kind.var_name() {
                vars.push(name.to_string());
            }
            tokens.push(kind.to_regex_token());
            (tokens, vars)
        },
    );

    let source = format!("^{}$", tokens.join("/"));
    debug!(key, template, pattern = %source, "compiled route");

    let matcher = Regex::new(&source).map_err(|source| RouteError::InvalidTemplate {
        key: key.to_string(),
        template: template.to_string(),
        source,
    })?;

    Ok(CompiledRoute {
        key: key.to_string(),
        template: template.to_string(),
        matcher,
        vars,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_literal() {
        let route = compile_route("home", "/post").unwrap();
        assert_eq!(route.matcher.as_str(), "^post$");
        assert!(route.vars.is_empty());
    }

    #[test]
    fn test_compile_variables_in_order() {
        let route = compile_route("post", "/post/:action/#id").unwrap();
        assert_eq!(route.matcher.as_str(), "^post/([a-zA-Z]+)/([0-9]+)$");
        assert_eq!(route.vars, vec!["action", "id"]);
    }

    #[test]
    fn test_compile_root() {
        let route = compile_route("index", "/").unwrap();
        assert_eq!(route.matcher.as_str(), "^$");
        assert!(route.is_match(""));
        assert!(!route.is_match("x"));
    }

    #[test]
    fn test_literal_metacharacters_match_exactly() {
        let route = compile_route("feed", "/feed.xml").unwrap();
        assert!(route.is_match("feed.xml"));
        assert!(!route.is_match("feedxxml"));
    }

    #[test]
    fn test_alpha_rejects_digits() {
        let route = compile_route("tag", "/tag/:name").unwrap();
        assert!(route.captures("tag/rust").is_some());
        assert!(route.captures("tag/rust2").is_none());
    }

    #[test]
    fn test_trailing_separator_is_dropped() {
        let route = compile_route("list", "/post/").unwrap();
        assert_eq!(route.matcher.as_str(), "^post$");
        assert!(route.is_match("post"));
    }

    #[test]
    fn test_template_without_leading_slash() {
        let route = compile_route("docs", "docs/#page").unwrap();
        assert_eq!(route.vars, vec!["page"]);
        assert!(route.is_match("docs/3"));
    }
}
