// File: src/component.rs
// Purpose: Component contract: optional data/state steps plus an explicit router or view capability

use hive_router::RouteSet;
use std::collections::BTreeMap;

use crate::context::ComponentContext;
use crate::engine::Scope;
use crate::error::HiveError;

/// Value produced by a component's data step
pub type Data = serde_json::Value;

/// Opaque state a component computes from its data and hands to children
pub type StateValue = serde_json::Value;

/// A unit of request handling or view rendering
///
/// Every component declares exactly one capability: it is either a router
/// (`as_router`) or a view (`as_view`). The registry checks this when the
/// component is registered, so a component offering neither, or both, never
/// reaches rendering.
///
/// # Examples
///
/// ```
/// use hive::{Component, Data, Scope, StateValue, View};
///
/// struct Hello;
///
/// impl Component for Hello {
///     fn as_view(&self) -> Option<&dyn View> {
///         Some(self)
///     }
/// }
///
/// impl View for Hello {
///     fn view(
///         &self,
///         _scope: &mut Scope<'_>,
///         _prev_state: Option<&StateValue>,
///         _data: Option<&Data>,
///     ) -> anyhow::Result<String> {
///         Ok("<p>Hello</p>".to_string())
///     }
/// }
/// ```
pub trait Component {
    /// Optional data step; `None` means the component has no data
    fn data(&self, _cx: &ComponentContext) -> anyhow::Result<Option<Data>> {
        Ok(None)
    }

    /// Optional state step, evaluated with this component's own data
    fn state(&self, _cx: &ComponentContext, _data: Option<&Data>) -> Option<StateValue> {
        None
    }

    /// Router capability
    fn as_router(&self) -> Option<&dyn Routing> {
        None
    }

    /// View capability
    fn as_view(&self) -> Option<&dyn View> {
        None
    }
}

/// Capability of a component that selects a handler by request path
pub trait Routing {
    /// Route declarations, handler id → template
    fn routes(&self) -> RouteSet;

    /// Overrides merged over the resolved base options
    fn options(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }
}

/// Capability of a component that renders output
pub trait View {
    /// Renders this component
    ///
    /// `prev_state` is the state of whoever instantiated this component (the
    /// router for a routed handler, the including component for an include,
    /// `None` for a stand-alone entry view). `data` is this component's own
    /// data. Includes are requested through `scope`.
    fn view(
        &self,
        scope: &mut Scope<'_>,
        prev_state: Option<&StateValue>,
        data: Option<&Data>,
    ) -> anyhow::Result<String>;
}

/// Declared capability, resolved once at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Router,
    View,
}

impl Capability {
    /// Classifies a component, rejecting ambiguous or absent declarations
    pub fn of(handler: &str, component: &dyn Component) -> Result<Self, HiveError> {
        match (component.as_router().is_some(), component.as_view().is_some()) {
            (true, false) => Ok(Capability::Router),
            (false, true) => Ok(Capability::View),
            (true, true) => Err(HiveError::Configuration {
                component: handler.to_string(),
                reason: "it declares both a route table and a view".to_string(),
            }),
            (false, false) => Err(HiveError::Configuration {
                component: handler.to_string(),
                reason: "it declares neither a route table nor a view".to_string(),
            }),
        }
    }
}
