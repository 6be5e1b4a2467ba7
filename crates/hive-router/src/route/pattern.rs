/// Segment classification for route templates
///
/// One segment at a time: `#id`, `:name` or literal text.

/// Represents the kind of a single template segment
///
/// Each variable variant carries the bare parameter name (marker removed).
///
/// # Examples
///
/// ```
/// use hive_router::route::pattern::{classify_segment, SegmentKind};
///
/// // Literal segment
/// let seg = classify_segment("post");
/// assert!(matches!(seg, SegmentKind::Literal(_)));
///
/// // Digits-only variable
/// let seg = classify_segment("#id");
/// assert_eq!(seg, SegmentKind::Numeric("id".to_string()));
///
/// // Letters-only variable
/// let seg = classify_segment(":action");
/// assert_eq!(seg, SegmentKind::Alpha("action".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// `#name`: one or more decimal digits
    Numeric(String),
    /// `:name`: one or more ASCII letters
    Alpha(String),
    /// Any other text, matched exactly
    Literal(String),
}

impl SegmentKind {
    /// Returns the variable name, or `None` for literal segments
    pub fn var_name(&self) -> Option<&str> {
        match self {
            SegmentKind::Numeric(name) | SegmentKind::Alpha(name) => Some(name),
            SegmentKind::Literal(_) => None,
        }
    }

    /// Regex token matching this segment
    ///
    /// Variables become capture groups; literals are escaped so they only
    /// ever match themselves.
    pub fn to_regex_token(&self) -> String {
        match self {
            SegmentKind::Numeric(_) => "([0-9]+)".to_string(),
            SegmentKind::Alpha(_) => "([a-zA-Z]+)".to_string(),
            SegmentKind::Literal(text) => regex::escape(text),
        }
    }
}

/// Classifies a segment into a [`SegmentKind`] (pure function)
///
/// # Parsing Rules (evaluated in order)
///
/// 1. **Numeric**: segment contains `#` → every `#` removed gives the name
/// 2. **Alpha**: segment contains `:` → every `:` removed gives the name
/// 3. **Literal**: any other text
///
/// The marker is detected anywhere in the segment, not only as a prefix, so
/// `post#` still declares a numeric variable named `post`.
pub fn classify_segment(segment: &str) -> SegmentKind {
    if segment.contains('#') {
        SegmentKind::Numeric(segment.replace('#', ""))
    } else if segment.contains(':') {
        SegmentKind::Alpha(segment.replace(':', ""))
    } else {
        SegmentKind::Literal(segment.to_string())
    }
}
