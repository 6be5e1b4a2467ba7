// File: src/context.rs
// Purpose: Immutable per-component context derived from the instantiating component

use hive_router::RouteVars;
use serde::Serialize;
use std::sync::Arc;

use crate::component::StateValue;
use crate::error::{AssetKind, HiveError};
use crate::manifest::AssetManifest;
use crate::options::BaseOptions;

/// Snapshot a component receives when it is instantiated
///
/// Contexts are never shared mutably: a child gets a fresh value derived
/// from its parent's, so nothing a child does is visible to the parent. The
/// manifest is the only shared piece and it is read-only.
#[derive(Debug, Clone)]
pub struct ComponentContext {
    handler: String,
    base_options: BaseOptions,
    request_path: String,
    manifest: Option<Arc<AssetManifest>>,
    route_vars: RouteVars,
    prev_state: Option<StateValue>,
    depth: usize,
}

/// Location details for the current component
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathInfo {
    pub dir_path: String,
    pub request_path: String,
    pub handler: String,
    pub base_url: String,
}

impl ComponentContext {
    /// Context for the entry component of a request
    ///
    /// The entry component has no caller, so it starts without route
    /// variables or a previous state.
    pub fn root(
        handler: impl Into<String>,
        base_options: BaseOptions,
        request_path: impl Into<String>,
        manifest: Option<Arc<AssetManifest>>,
    ) -> Self {
        Self {
            handler: handler.into(),
            base_options,
            request_path: request_path.into(),
            manifest,
            route_vars: RouteVars::new(),
            prev_state: None,
            depth: 0,
        }
    }

    /// Context for the handler a router dispatched to
    ///
    /// `prev_state` is the router's own state.
    pub fn for_route(
        &self,
        handler: impl Into<String>,
        route_vars: RouteVars,
        prev_state: Option<StateValue>,
    ) -> Self {
        Self {
            handler: handler.into(),
            route_vars,
            prev_state,
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Context for a component included by this one
    ///
    /// `prev_state` is the including component's own state. Route variables
    /// are copied along with the rest of the configuration.
    pub fn for_include(&self, handler: impl Into<String>, prev_state: Option<StateValue>) -> Self {
        Self {
            handler: handler.into(),
            prev_state,
            depth: self.depth + 1,
            ..self.clone()
        }
    }

    /// Handler id this context was built for
    pub fn handler(&self) -> &str {
        &self.handler
    }

    pub fn base_options(&self) -> &BaseOptions {
        &self.base_options
    }

    pub fn option(&self, key: &str) -> Option<&str> {
        self.base_options.get(key)
    }

    pub fn base_url(&self) -> &str {
        self.base_options.base_url()
    }

    /// Request path as received, before normalization
    pub fn request_path(&self) -> &str {
        &self.request_path
    }

    pub fn route_vars(&self) -> &RouteVars {
        &self.route_vars
    }

    pub fn route_var(&self, name: &str) -> Option<&str> {
        self.route_vars.get(name)
    }

    /// State handed down by the instantiating component
    pub fn prev_state(&self) -> Option<&StateValue> {
        self.prev_state.as_ref()
    }

    /// Number of instantiation hops from the entry component
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn manifest(&self) -> Option<&AssetManifest> {
        self.manifest.as_deref()
    }

    pub fn path_info(&self) -> PathInfo {
        PathInfo {
            dir_path: self.base_options.dir_path().to_string(),
            request_path: self.request_path.clone(),
            handler: self.handler.clone(),
            base_url: self.base_url().to_string(),
        }
    }

    /// `<link>` tags for every discovered style
    pub fn style_tags(&self) -> Result<Vec<String>, HiveError> {
        self.require_manifest(AssetKind::Style)?
            .style_tags(self.base_url())
    }

    /// `<script>` tags for the named scripts, or all of them when `names`
    /// is empty
    pub fn script_tags(&self, names: &[&str]) -> Result<Vec<String>, HiveError> {
        self.require_manifest(AssetKind::Script)?
            .script_tags(self.base_url(), names)
    }

    fn require_manifest(&self, kind: AssetKind) -> Result<&AssetManifest, HiveError> {
        self.manifest()
            .ok_or(HiveError::MissingManifest { kind })
    }
}
