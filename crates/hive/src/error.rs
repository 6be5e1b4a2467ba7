// File: src/error.rs
// Purpose: Error taxonomy for routing, composition and asset lookup

use hive_router::RouteError;
use maud::html;
use thiserror::Error;

/// Which asset listing an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Style,
    Script,
}

impl AssetKind {
    /// Noun used in user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            AssetKind::Style => "style",
            AssetKind::Script => "javascript",
        }
    }

    /// File extension indexed for this kind
    pub fn extension(&self) -> &'static str {
        match self {
            AssetKind::Style => "css",
            AssetKind::Script => "js",
        }
    }
}

/// Errors raised while registering or rendering components
#[derive(Debug, Error)]
pub enum HiveError {
    /// A component declares neither a route table nor a view, or both.
    #[error("Either implement routing or add a view to component ({component}): {reason}")]
    Configuration { component: String, reason: String },

    /// A registered component was asked to act in a role it does not declare.
    #[error("Component {component} cannot be used as a {expected}")]
    WrongCapability { component: String, expected: &'static str },

    /// No declared route matches the request path.
    #[error("Route is not set for {path}")]
    RouteNotFound { path: String },

    /// Style or script listing requested before discovery populated it.
    #[error("No {} files were found", .kind.label())]
    MissingManifest { kind: AssetKind },

    /// A specific style or script is not in the manifest.
    #[error("{} file '{name}' could not be found", .kind.label())]
    MissingAsset { kind: AssetKind, name: String },

    /// A handler id has no registered factory.
    #[error("Component {handler} could not be found")]
    ComponentNotFound { handler: String },

    /// Includes nested deeper than the configured limit.
    #[error("Include depth limit of {limit} exceeded while including {handler}")]
    IncludeDepthExceeded { handler: String, limit: usize },

    /// A route template failed to compile.
    #[error(transparent)]
    Route(#[from] RouteError),

    /// User code inside a component's data or view step failed.
    #[error("Component {handler} failed: {source}")]
    Component {
        handler: String,
        #[source]
        source: anyhow::Error,
    },
}

impl HiveError {
    /// HTTP status the server layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            HiveError::RouteNotFound { .. } => 404,
            _ => 500,
        }
    }

    /// Visible error block
    ///
    /// Styled inline since no stylesheet can be assumed to have loaded when
    /// rendering failed.
    pub fn to_html(&self) -> String {
        html! {
            div style="font-size:1.3rem; font-weight: bold; text-align:center; padding: 1.3rem;" {
                (self.to_string())
            }
        }
        .into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_not_found_message() {
        let err = HiveError::RouteNotFound { path: "/nope".to_string() };
        assert_eq!(err.to_string(), "Route is not set for /nope");
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_missing_manifest_message() {
        let err = HiveError::MissingManifest { kind: AssetKind::Script };
        assert_eq!(err.to_string(), "No javascript files were found");
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_wrong_capability_message() {
        let err = HiveError::WrongCapability {
            component: "app".to_string(),
            expected: "view",
        };
        assert_eq!(err.to_string(), "Component app cannot be used as a view");
    }

    #[test]
    fn test_html_is_escaped() {
        let err = HiveError::RouteNotFound { path: "/<script>".to_string() };
        let html = err.to_html();
        assert!(html.starts_with("<div style="));
        assert!(html.contains("/&lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }
}
