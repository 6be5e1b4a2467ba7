//! # Hive Router
//!
//! Route template compiler and dispatcher for Hiveframe.
//!
//! ## Template Language
//!
//! Templates are `/`-separated segments:
//! - `#name`: captures one or more decimal digits
//! - `:name`: captures one or more ASCII letters
//! - anything else: literal text that must match exactly
//!
//! ## Specificity
//!
//! Routes are ordered by the character length of their raw template, longest
//! first, so `/post/:action/#id` is always tried before `/post`. Equal
//! lengths keep declaration order. The first full match wins.
//!
//! ## Path Normalization
//!
//! Leading and trailing separators are stripped before matching:
//! `/post/5/`, `post/5` and `/post/5` are the same request.
//!
//! ## Example
//!
//! ```
//! use hive_router::{RouteSet, RouteTable};
//!
//! let routes = RouteSet::new()
//!     .route("home", "/")
//!     .route("post", "/post/:action/#id");
//!
//! let table = RouteTable::build(&routes).unwrap();
//! let (key, vars) = table.dispatch("/post/edit/42").into_matched().unwrap();
//!
//! assert_eq!(key, "post");
//! assert_eq!(vars.get("action"), Some("edit"));
//! assert_eq!(vars.get("id"), Some("42"));
//! ```

// ============================================================================
// Module Declarations
// ============================================================================

mod dispatch;
mod error;
pub mod path;
pub mod route;
mod table;
mod vars;

pub use dispatch::MatchResult;
pub use error::RouteError;
pub use path::{normalize_request_path, request_path_from_override};
pub use route::{classify_segment, compile_route, CompiledRoute, SegmentKind};
pub use table::{RouteEntry, RouteSet, RouteTable};
pub use vars::RouteVars;
