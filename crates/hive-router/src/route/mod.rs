/// Route module for template compilation
///
/// Contains pure functional components for turning route templates into
/// anchored matchers:
/// - `pattern`: classifies a single segment (`#id`, `:name`, literal)
/// - `compiler`: assembles classified segments into a [`CompiledRoute`]

pub mod compiler;
pub mod pattern;

// Re-export commonly used types
pub use compiler::{compile_route, CompiledRoute};
pub use pattern::{classify_segment, SegmentKind};
