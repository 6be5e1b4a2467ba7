// File: src/environment.rs
// Purpose: Explicit request environment handed to the engine by the server layer

use hive_router::request_path_from_override;
use serde::{Deserialize, Serialize};
use std::fmt;

/// URL scheme of the incoming request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    /// Detects the scheme from an HTTPS indicator and the server port
    ///
    /// HTTPS when the indicator is present, non-empty and not `off`, or when
    /// the port is 443.
    ///
    /// ```
    /// use hive::Scheme;
    ///
    /// assert_eq!(Scheme::detect(Some("on"), Some(80)), Scheme::Https);
    /// assert_eq!(Scheme::detect(Some("off"), Some(443)), Scheme::Https);
    /// assert_eq!(Scheme::detect(Some("off"), Some(80)), Scheme::Http);
    /// assert_eq!(Scheme::detect(None, None), Scheme::Http);
    /// ```
    pub fn detect(https: Option<&str>, port: Option<u16>) -> Self {
        let flagged = https
            .map(|v| !v.is_empty() && !v.eq_ignore_ascii_case("off"))
            .unwrap_or(false);

        if flagged || port == Some(443) {
            Scheme::Https
        } else {
            Scheme::Http
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the core needs to know about the current request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestEnvironment {
    /// Request path, not yet normalized
    pub path: String,
    /// Host (and optional port) the request was addressed to
    pub host: String,
    pub scheme: Scheme,
}

impl RequestEnvironment {
    pub fn new(path: impl Into<String>, host: impl Into<String>, scheme: Scheme) -> Self {
        Self {
            path: path.into(),
            host: host.into(),
            scheme,
        }
    }

    /// Builds the environment from a path override parameter
    ///
    /// An absent parameter means the root path `/`.
    pub fn from_uri_param(uri: Option<&str>, host: impl Into<String>, scheme: Scheme) -> Self {
        Self::new(request_path_from_override(uri), host, scheme)
    }

    /// `scheme://host` followed by the optional mount path
    ///
    /// ```
    /// use hive::{RequestEnvironment, Scheme};
    ///
    /// let env = RequestEnvironment::new("/", "example.com", Scheme::Https);
    /// assert_eq!(env.base_url(None), "https://example.com");
    /// assert_eq!(env.base_url(Some("/blog/")), "https://example.com/blog");
    /// ```
    pub fn base_url(&self, base_path: Option<&str>) -> String {
        let mount = base_path
            .map(|p| p.trim_matches('/'))
            .filter(|p| !p.is_empty());

        match mount {
            Some(mount) => format!("{}://{}/{}", self.scheme, self.host, mount),
            None => format!("{}://{}", self.scheme, self.host),
        }
    }
}
