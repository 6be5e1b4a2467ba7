use serde::{Deserialize, Serialize};

/// Variables extracted from a matched path
///
/// Keeps the left-to-right order in which the template declared them.
/// Inserting an existing name overwrites its value in place, so a template
/// that repeats a name yields one entry holding the last captured value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteVars {
    entries: Vec<(String, String)>,
}

impl RouteVars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites a variable
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Get a variable value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Get a variable parsed as a specific type
    pub fn get_as<T: std::str::FromStr>(&self, name: &str) -> Option<T> {
        self.get(name)?.parse().ok()
    }

    /// Variable names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// `(name, value)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for RouteVars {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut vars = RouteVars::new();
        for (name, value) in iter {
            vars.insert(name, value);
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_preserved() {
        let vars: RouteVars = [("b", "2"), ("a", "1")].into_iter().collect();
        assert_eq!(vars.names().collect::<Vec<_>>(), vec!["b", "a"]);
    }

    #[test]
    fn test_repeated_name_overwrites_in_place() {
        let vars: RouteVars = [("x", "1"), ("y", "2"), ("x", "3")].into_iter().collect();
        assert_eq!(vars.len(), 2);
        assert_eq!(vars.get("x"), Some("3"));
        assert_eq!(vars.names().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_get_as() {
        let vars: RouteVars = [("id", "42")].into_iter().collect();
        assert_eq!(vars.get_as::<u32>("id"), Some(42));
        assert_eq!(vars.get_as::<u32>("missing"), None);
    }
}
