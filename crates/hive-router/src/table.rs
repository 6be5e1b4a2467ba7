/// Route declarations and the ordered route table
///
/// A [`RouteSet`] is what a router component declares: handler ids mapped to
/// templates, in declaration order. A [`RouteTable`] is the compiled form,
/// ordered longest template first so that a short pattern never shadows a
/// more specific one.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::debug;

use crate::route::{compile_route, CompiledRoute};
use crate::RouteError;

/// A single route declaration
///
/// Either a bare template string or a structured value exposing a `route`
/// field. Deserializes from both shapes:
///
/// ```
/// use hive_router::RouteEntry;
///
/// let bare: RouteEntry = serde_json::from_str(r#""/post""#).unwrap();
/// let full: RouteEntry =
///     serde_json::from_str(r#"{ "route": "/post/#id", "title": "Post" }"#).unwrap();
///
/// assert_eq!(bare.template(), "/post");
/// assert_eq!(full.template(), "/post/#id");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RouteEntry {
    /// `"/post/:action"`
    Template(String),
    /// `{ route = "/post/:action", ... }`; fields besides `route` and `meta`
    /// are ignored
    Detailed {
        route: String,
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        meta: BTreeMap<String, String>,
    },
}

impl RouteEntry {
    /// The raw, uncompiled template
    pub fn template(&self) -> &str {
        match self {
            RouteEntry::Template(template) => template,
            RouteEntry::Detailed { route, .. } => route,
        }
    }

    /// Metadata attached to a structured declaration
    pub fn meta(&self, key: &str) -> Option<&str> {
        match self {
            RouteEntry::Template(_) => None,
            RouteEntry::Detailed { meta, .. } => meta.get(key).map(String::as_str),
        }
    }
}

impl From<&str> for RouteEntry {
    fn from(template: &str) -> Self {
        RouteEntry::Template(template.to_string())
    }
}

impl From<String> for RouteEntry {
    fn from(template: String) -> Self {
        RouteEntry::Template(template)
    }
}

/// Ordered mapping of handler id → route declaration
///
/// Keys are unique: declaring an existing key again replaces its entry but
/// keeps its original position.
///
/// # Examples
///
/// ```
/// use hive_router::RouteSet;
///
/// let routes = RouteSet::new()
///     .route("home", "/")
///     .route("post", "/post/:action/#id");
///
/// assert_eq!(routes.len(), 2);
/// assert_eq!(routes.get("post").unwrap().template(), "/post/:action/#id");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteSet {
    entries: Vec<(String, RouteEntry)>,
}

impl RouteSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a route (functional builder)
    pub fn route(mut self, key: impl Into<String>, entry: impl Into<RouteEntry>) -> Self {
        self.insert(key, entry);
        self
    }

    /// Declares a route
    pub fn insert(&mut self, key: impl Into<String>, entry: impl Into<RouteEntry>) {
        let key = key.into();
        let entry = entry.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&RouteEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Declarations in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RouteEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Handler ids in declaration order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, E: Into<RouteEntry>> FromIterator<(K, E)> for RouteSet {
    fn from_iter<I: IntoIterator<Item = (K, E)>>(iter: I) -> Self {
        let mut set = RouteSet::new();
        for (key, entry) in iter {
            set.insert(key, entry);
        }
        set
    }
}

impl Serialize for RouteSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

// Deserializes from a map, keeping the order the document lists entries in.
impl<'de> Deserialize<'de> for RouteSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RouteSetVisitor;

        impl<'de> Visitor<'de> for RouteSetVisitor {
            type Value = RouteSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of handler ids to route templates")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RouteSet, A::Error> {
                let mut set = RouteSet::new();
                while let Some((key, entry)) = access.next_entry::<String, RouteEntry>()? {
                    set.insert(key, entry);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(RouteSetVisitor)
    }
}

/// Compiled routes in match-attempt order
///
/// Sorted by raw template length (characters), longest first. Templates of
/// equal length keep their declaration order. Immutable once built.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<CompiledRoute>,
}

impl RouteTable {
    /// Sorts and compiles a route set
    ///
    /// # Examples
    ///
    /// ```
    /// use hive_router::{RouteSet, RouteTable};
    ///
    /// let routes = RouteSet::new()
    ///     .route("list", "/post")
    ///     .route("show", "/post/:action");
    ///
    /// let table = RouteTable::build(&routes).unwrap();
    /// let order: Vec<&str> = table.iter().map(|r| r.key.as_str()).collect();
    /// assert_eq!(order, vec!["show", "list"]);
    /// ```
    pub fn build(routes: &RouteSet) -> Result<Self, RouteError> {
        let mut ordered: Vec<(usize, &str, &str)> = routes
            .iter()
            .enumerate()
            .map(|(index, (key, entry))| (index, key, entry.template()))
            .collect();

        // Longest template first; declaration index breaks ties explicitly
        ordered.sort_by(|a, b| {
            b.2.chars()
                .count()
                .cmp(&a.2.chars().count())
                .then(a.0.cmp(&b.0))
        });

        let routes = ordered
            .into_iter()
            .map(|(_, key, template)| compile_route(key, template))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(count = routes.len(), "built route table");
        Ok(Self { routes })
    }

    /// Compiled routes in match-attempt order
    pub fn iter(&self) -> impl Iterator<Item = &CompiledRoute> {
        self.routes.iter()
    }

    pub fn routes(&self) -> &[CompiledRoute] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
