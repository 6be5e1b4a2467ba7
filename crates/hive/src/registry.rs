// File: src/registry.rs
// Purpose: Handler id → factory registry, checked at registration time

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

use crate::component::{Capability, Component};
use crate::error::HiveError;

/// Builds a fresh component instance
pub type Factory = Arc<dyn Fn() -> Box<dyn Component> + Send + Sync>;

#[derive(Clone)]
struct Registration {
    capability: Capability,
    factory: Factory,
}

/// Registry of component factories
///
/// Populated at startup; read-only afterwards. Every lookup builds a new
/// instance, so no component state survives a render.
///
/// # Examples
///
/// ```
/// use hive::{Capability, Component, Registry};
///
/// struct Empty;
/// impl Component for Empty {}
///
/// let mut registry = Registry::new();
/// // Neither a router nor a view: rejected up front
/// assert!(registry.register("empty", || Empty).is_err());
/// assert!(!registry.contains("empty"));
/// ```
#[derive(Clone, Default)]
pub struct Registry {
    components: HashMap<String, Registration>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component factory
    ///
    /// The factory is invoked once to classify the component; registration
    /// fails with [`HiveError::Configuration`] if it is neither a router nor
    /// a view (or claims to be both). Registering an existing id replaces it.
    pub fn register<C, F>(&mut self, handler: impl Into<String>, factory: F) -> Result<Capability, HiveError>
    where
        C: Component + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        let handler = handler.into();
        let capability = Capability::of(&handler, &factory())?;

        debug!(handler = %handler, ?capability, "registered component");

        let factory: Factory = Arc::new(move || Box::new(factory()) as Box<dyn Component>);
        self.components
            .insert(handler, Registration { capability, factory });

        Ok(capability)
    }

    /// Registers a component (functional builder)
    pub fn with<C, F>(mut self, handler: impl Into<String>, factory: F) -> Result<Self, HiveError>
    where
        C: Component + 'static,
        F: Fn() -> C + Send + Sync + 'static,
    {
        self.register(handler, factory)?;
        Ok(self)
    }

    /// Builds a new instance of a registered component
    pub fn instantiate(&self, handler: &str) -> Result<(Capability, Box<dyn Component>), HiveError> {
        let registration = self
            .components
            .get(handler)
            .ok_or_else(|| HiveError::ComponentNotFound {
                handler: handler.to_string(),
            })?;

        Ok((registration.capability, (registration.factory)()))
    }

    pub fn capability(&self, handler: &str) -> Option<Capability> {
        self.components.get(handler).map(|r| r.capability)
    }

    pub fn contains(&self, handler: &str) -> bool {
        self.components.contains_key(handler)
    }

    /// Registered handler ids (unordered)
    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut handlers: Vec<&str> = self.handlers().collect();
        handlers.sort_unstable();
        f.debug_struct("Registry").field("handlers", &handlers).finish()
    }
}
