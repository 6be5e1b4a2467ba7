use thiserror::Error;

/// Errors raised while building a route table
#[derive(Debug, Error)]
pub enum RouteError {
    /// A template produced a pattern the regex engine rejected.
    #[error("invalid route template '{template}' for '{key}': {source}")]
    InvalidTemplate {
        key: String,
        template: String,
        #[source]
        source: regex::Error,
    },
}
