// File: src/config.rs
// Purpose: Configuration parsing from hive.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub routing: RoutingConfig,

    /// Free-form overrides merged into every component's base options
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_version")]
    pub version: String,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,
}

/// Asset discovery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Directory scanned for style and script files; also exposed to
    /// components as the `dir_path` option (default: "public")
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Whether to scan `root_dir` at startup (default: true)
    #[serde(default = "default_true")]
    pub discover: bool,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Query parameter carrying the request path override (default: "uri")
    #[serde(default = "default_uri_param")]
    pub uri_param: String,

    /// Mount path appended to the base URL (e.g., "/blog")
    #[serde(default)]
    pub base_path: Option<String>,

    /// Maximum nesting of includes before rendering aborts (default: 32)
    #[serde(default = "default_max_include_depth")]
    pub max_include_depth: usize,
}

// Default values
fn default_name() -> String {
    "hive-app".to_string()
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_root_dir() -> PathBuf {
    PathBuf::from("public")
}

fn default_uri_param() -> String {
    "uri".to_string()
}

fn default_max_include_depth() -> usize {
    32
}

fn default_true() -> bool {
    true
}

// Default implementations
impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
        }
    }
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            discover: true,
        }
    }
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            uri_param: default_uri_param(),
            base_path: None,
            max_include_depth: default_max_include_depth(),
        }
    }
}

impl Config {
    /// Load configuration from hive.toml
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        Ok(config)
    }

    /// Load configuration from default path (./hive.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("hive.toml")
    }
}
