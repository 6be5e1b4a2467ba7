// Hiveframe - route-driven component composition
// Request path → route table → handler component → composed HTML

pub mod component;
pub mod config;
pub mod context;
pub mod engine;
pub mod environment;
pub mod error;
pub mod manifest;
pub mod options;
pub mod registry;

// Re-export framework types
pub use component::{Capability, Component, Data, Routing, StateValue, View};
pub use config::Config;
pub use context::{ComponentContext, PathInfo};
pub use engine::{Engine, Scope};
pub use environment::{RequestEnvironment, Scheme};
pub use error::{AssetKind, HiveError};
pub use manifest::AssetManifest;
pub use options::BaseOptions;
pub use registry::{Factory, Registry};

// Re-export routing types components declare routes with
pub use hive_router::{RouteEntry, RouteSet, RouteVars};
