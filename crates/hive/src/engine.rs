// File: src/engine.rs
// Purpose: Composition engine: resolve, instantiate, contextualize, render, recurse

use anyhow::Result as AnyResult;
use hive_router::{RouteTable, RouteVars};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::component::{Capability, Component, StateValue};
use crate::config::Config;
use crate::context::ComponentContext;
use crate::environment::RequestEnvironment;
use crate::error::HiveError;
use crate::manifest::AssetManifest;
use crate::options::BaseOptions;
use crate::registry::Registry;

/// Renders requests by composing registered components
///
/// Immutable after construction; share it behind an `Arc` to serve
/// concurrent requests. Each render builds its own route table and context
/// graph.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    config: Config,
    manifest: Option<Arc<AssetManifest>>,
}

impl Engine {
    /// Creates an engine without an asset manifest
    pub fn new(registry: Registry, config: Config) -> Self {
        Self {
            registry,
            config,
            manifest: None,
        }
    }

    /// Creates an engine, scanning `assets.root_dir` when discovery is enabled
    pub fn from_config(registry: Registry, config: Config) -> AnyResult<Self> {
        let manifest = if config.assets.discover {
            Some(AssetManifest::discover(&config.assets.root_dir)?)
        } else {
            None
        };

        let engine = Self::new(registry, config);
        Ok(match manifest {
            Some(manifest) => engine.with_manifest(manifest),
            None => engine,
        })
    }

    /// Attaches an asset manifest (functional builder)
    pub fn with_manifest(mut self, manifest: AssetManifest) -> Self {
        self.manifest = Some(Arc::new(manifest));
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reports route handlers that no registered component answers to
    ///
    /// Unresolved handlers are logged, not fatal: other routes keep working
    /// and a request reaching one fails with [`HiveError::ComponentNotFound`].
    pub fn validate(&self) -> Vec<String> {
        let mut missing = BTreeSet::new();

        for router in self.registry.handlers() {
            if self.registry.capability(router) != Some(Capability::Router) {
                continue;
            }
            let Ok((_, component)) = self.registry.instantiate(router) else {
                continue;
            };
            let Some(routing) = component.as_router() else {
                continue;
            };

            for handler in routing.routes().keys() {
                if !self.registry.contains(handler) {
                    warn!(router, handler, "route handler is not registered");
                    missing.insert(handler.to_string());
                }
            }
        }

        missing.into_iter().collect()
    }

    /// Renders a request starting at the `entry` component
    ///
    /// A router entry dispatches the request path to a view; a view entry is
    /// rendered directly with no previous state. Fatal errors are logged once
    /// and returned; nothing is partially rendered.
    pub fn render(&self, entry: &str, env: &RequestEnvironment) -> Result<String, HiveError> {
        self.compose(entry, env).map_err(|err| {
            error!(entry, path = %env.path, "{}", err);
            err
        })
    }

    fn compose(&self, entry: &str, env: &RequestEnvironment) -> Result<String, HiveError> {
        let (capability, component) = self.registry.instantiate(entry)?;

        match capability {
            Capability::Router => self.dispatch(entry, component.as_ref(), env),
            Capability::View => {
                let options = BaseOptions::resolve(&self.config, env, &BTreeMap::new());
                let cx = self.root_context(entry, options, env);
                self.render_instance(component.as_ref(), cx)
            }
        }
    }

    fn dispatch(
        &self,
        entry: &str,
        component: &dyn Component,
        env: &RequestEnvironment,
    ) -> Result<String, HiveError> {
        let routing = component
            .as_router()
            .ok_or_else(|| not_a(entry, "router"))?;

        let options = BaseOptions::resolve(&self.config, env, &routing.options());
        let cx = self.root_context(entry, options, env);

        let data = component
            .data(&cx)
            .map_err(|e| component_error(entry, e))?;
        let state = component.state(&cx, data.as_ref());

        let table = RouteTable::build(&routing.routes())?;
        let (handler, vars) = table
            .dispatch(&env.path)
            .into_matched()
            .ok_or_else(|| HiveError::RouteNotFound {
                path: env.path.clone(),
            })?;

        info!(entry, path = %env.path, handler = %handler, "dispatching");
        self.render_handler(&handler, cx.for_route(&handler, vars, state))
    }

    fn root_context(&self, entry: &str, options: BaseOptions, env: &RequestEnvironment) -> ComponentContext {
        ComponentContext::root(entry, options, env.path.clone(), self.manifest.clone())
    }

    /// Instantiates a view by handler id and renders it in `cx`
    fn render_handler(&self, handler: &str, cx: ComponentContext) -> Result<String, HiveError> {
        let (capability, component) = self.registry.instantiate(handler)?;
        if capability != Capability::View {
            return Err(not_a(handler, "view"));
        }
        self.render_instance(component.as_ref(), cx)
    }

    /// Runs data → state → view for one instance
    fn render_instance(&self, component: &dyn Component, cx: ComponentContext) -> Result<String, HiveError> {
        let handler = cx.handler();
        let view = component
            .as_view()
            .ok_or_else(|| not_a(handler, "view"))?;

        let data = component
            .data(&cx)
            .map_err(|e| component_error(handler, e))?;
        let state = component.state(&cx, data.as_ref());

        debug!(
            handler,
            depth = cx.depth(),
            has_data = data.is_some(),
            has_state = state.is_some(),
            "rendering view"
        );

        let mut scope = Scope::new(self, &cx, state);
        view.view(&mut scope, cx.prev_state(), data.as_ref())
            .map_err(|e| component_error(handler, e))
    }

    fn max_include_depth(&self) -> usize {
        self.config.routing.max_include_depth
    }
}

/// Render-time handle passed to a view
///
/// Gives access to the component's own context and lets the view include
/// other components. Each included output is kept under the included
/// handler id until the view returns.
pub struct Scope<'a> {
    engine: &'a Engine,
    context: &'a ComponentContext,
    state: Option<StateValue>,
    partials: BTreeMap<String, String>,
}

impl<'a> Scope<'a> {
    fn new(engine: &'a Engine, context: &'a ComponentContext, state: Option<StateValue>) -> Self {
        Self {
            engine,
            context,
            state,
            partials: BTreeMap::new(),
        }
    }

    /// This component's context
    pub fn context(&self) -> &ComponentContext {
        self.context
    }

    /// This component's own state, as handed to its includes
    pub fn state(&self) -> Option<&StateValue> {
        self.state.as_ref()
    }

    pub fn route_vars(&self) -> &RouteVars {
        self.context.route_vars()
    }

    pub fn route_var(&self, name: &str) -> Option<&str> {
        self.context.route_var(name)
    }

    /// Renders each handler with this component's state as its previous
    /// state, storing the outputs under the handler ids
    ///
    /// Handlers are rendered independently: none of them sees another's
    /// output. Including an id again replaces its stored output.
    pub fn include(&mut self, handlers: &[&str]) -> Result<(), HiveError> {
        for handler in handlers {
            let html = self.render_include(handler)?;
            self.partials.insert(handler.to_string(), html);
        }
        Ok(())
    }

    /// Output of a previous [`include`](Self::include)
    pub fn partial(&self, handler: &str) -> Option<&str> {
        self.partials.get(handler).map(String::as_str)
    }

    /// Output of a previous include, or an empty string
    pub fn partial_or_empty(&self, handler: &str) -> &str {
        self.partial(handler).unwrap_or_default()
    }

    /// All included outputs, keyed by handler id
    pub fn partials(&self) -> &BTreeMap<String, String> {
        &self.partials
    }

    /// `<link>` tags for every discovered style
    pub fn style_tags(&self) -> Result<Vec<String>, HiveError> {
        self.context.style_tags()
    }

    /// `<script>` tags for the named scripts, or all of them
    pub fn script_tags(&self, names: &[&str]) -> Result<Vec<String>, HiveError> {
        self.context.script_tags(names)
    }

    fn render_include(&self, handler: &str) -> Result<String, HiveError> {
        let limit = self.engine.max_include_depth();
        if self.context.depth() >= limit {
            return Err(HiveError::IncludeDepthExceeded {
                handler: handler.to_string(),
                limit,
            });
        }

        let child = self.context.for_include(handler, self.state.clone());
        self.engine.render_handler(handler, child)
    }
}

fn not_a(handler: &str, expected: &'static str) -> HiveError {
    HiveError::WrongCapability {
        component: handler.to_string(),
        expected,
    }
}

/// Wraps user errors, passing engine errors raised inside a view through
fn component_error(handler: &str, err: anyhow::Error) -> HiveError {
    match err.downcast::<HiveError>() {
        Ok(inner) => inner,
        Err(source) => HiveError::Component {
            handler: handler.to_string(),
            source,
        },
    }
}

