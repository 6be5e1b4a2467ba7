// File: src/options.rs
// Purpose: Resolved base options shared by every component of a request

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Config;
use crate::environment::RequestEnvironment;

pub const BASE_URL: &str = "base_url";
pub const DIR_PATH: &str = "dir_path";

/// Base configuration visible to components
///
/// Always carries `base_url` and `dir_path`; anything else comes from the
/// `[options]` table of the config file or from the entry router's
/// `options()` overrides, applied in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseOptions {
    values: BTreeMap<String, String>,
}

impl BaseOptions {
    /// Resolves options for one request
    ///
    /// ```
    /// use hive::{BaseOptions, Config, RequestEnvironment, Scheme};
    /// use std::collections::BTreeMap;
    ///
    /// let env = RequestEnvironment::new("/", "example.com", Scheme::Http);
    /// let overrides = BTreeMap::from([("title".to_string(), "Blog".to_string())]);
    ///
    /// let options = BaseOptions::resolve(&Config::default(), &env, &overrides);
    /// assert_eq!(options.base_url(), "http://example.com");
    /// assert_eq!(options.get("title"), Some("Blog"));
    /// ```
    pub fn resolve(
        config: &Config,
        env: &RequestEnvironment,
        overrides: &BTreeMap<String, String>,
    ) -> Self {
        let mut values = BTreeMap::new();
        values.insert(
            BASE_URL.to_string(),
            env.base_url(config.routing.base_path.as_deref()),
        );
        values.insert(DIR_PATH.to_string(), display_dir(&config.assets.root_dir));

        values.extend(config.options.clone());
        values.extend(overrides.clone());

        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn base_url(&self) -> &str {
        self.get(BASE_URL).unwrap_or_default()
    }

    pub fn dir_path(&self) -> &str {
        self.get(DIR_PATH).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BaseOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

fn display_dir(dir: &Path) -> String {
    dir.canonicalize()
        .unwrap_or_else(|_| dir.to_path_buf())
        .display()
        .to_string()
}
