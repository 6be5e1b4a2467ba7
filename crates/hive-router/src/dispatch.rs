/// Request dispatch over a [`RouteTable`]

use tracing::debug;

use crate::path::normalize_request_path;
use crate::{RouteTable, RouteVars};

/// Outcome of dispatching a request path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchResult {
    /// A route matched the whole path
    Matched {
        /// Handler id of the winning route
        key: String,
        /// Captured variables in template order
        vars: RouteVars,
    },
    /// No route matched
    NoMatch,
}

impl MatchResult {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    /// Handler id of the winning route, if any
    pub fn key(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { key, .. } => Some(key),
            MatchResult::NoMatch => None,
        }
    }

    /// Converts into `(key, vars)`, or `None` on a miss
    pub fn into_matched(self) -> Option<(String, RouteVars)> {
        match self {
            MatchResult::Matched { key, vars } => Some((key, vars)),
            MatchResult::NoMatch => None,
        }
    }
}

impl RouteTable {
    /// Matches a raw request path against the table
    ///
    /// The path is normalized first (leading and trailing `/` stripped).
    /// Routes are tried in table order and the first full match wins; no
    /// further tie-breaking happens here because the table is already
    /// ordered longest first.
    ///
    /// # Examples
    ///
    /// ```
    /// use hive_router::{MatchResult, RouteSet, RouteTable};
    ///
    /// let table = RouteTable::build(
    ///     &RouteSet::new()
    ///         .route("list", "/post")
    ///         .route("show", "/post/:action/#id"),
    /// )
    /// .unwrap();
    ///
    /// let result = table.dispatch("/post/edit/42/");
    /// assert_eq!(result.key(), Some("show"));
    ///
    /// assert_eq!(table.dispatch("/missing"), MatchResult::NoMatch);
    /// ```
    pub fn dispatch(&self, path: &str) -> MatchResult {
        let normalized = normalize_request_path(path);

        self.iter()
            .find_map(|route| {
                route.captures(normalized).map(|vars| {
                    debug!(path, key = %route.key, template = %route.template, "route matched");
                    MatchResult::Matched {
                        key: route.key.clone(),
                        vars,
                    }
                })
            })
            .unwrap_or_else(|| {
                debug!(path, "no route matched");
                MatchResult::NoMatch
            })
    }
}
