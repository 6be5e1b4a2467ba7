// File: src/manifest.rs
// Purpose: Style and script listings discovered under the asset root

use anyhow::{bail, Result};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{AssetKind, HiveError};

/// Style and script files keyed by file name
///
/// Values are paths relative to the discovery root, always `/`-separated so
/// they can be appended to a base URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetManifest {
    styles: BTreeMap<String, String>,
    scripts: BTreeMap<String, String>,
}

impl AssetManifest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Walks `root` recursively and indexes every `.css` and `.js` file
    ///
    /// Unreadable entries are skipped. Two files sharing a name in different
    /// directories collapse to the one visited last.
    pub fn discover(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            bail!("Asset root {:?} is not a directory", root);
        }

        let mut manifest = Self::new();

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();
            let kind = match path.extension().and_then(|s| s.to_str()) {
                Some("css") => AssetKind::Style,
                Some("js") => AssetKind::Script,
                _ => continue,
            };

            let Some(name) = path.file_name().and_then(|s| s.to_str()) else {
                continue;
            };

            let relative = path
                .strip_prefix(root)
                .unwrap_or(path)
                .components()
                .filter_map(|c| c.as_os_str().to_str())
                .collect::<Vec<_>>()
                .join("/");

            debug!(name, path = %relative, "discovered {} file", kind.label());
            manifest.insert(kind, name, relative);
        }

        info!(
            styles = manifest.styles.len(),
            scripts = manifest.scripts.len(),
            "asset discovery finished under {:?}",
            root
        );
        Ok(manifest)
    }

    /// Registers an asset by file name (functional builder)
    pub fn with(mut self, kind: AssetKind, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.insert(kind, name, path);
        self
    }

    pub fn insert(&mut self, kind: AssetKind, name: impl Into<String>, path: impl Into<String>) {
        self.listing_mut(kind).insert(name.into(), path.into());
    }

    /// Listing for one asset kind
    pub fn listing(&self, kind: AssetKind) -> &BTreeMap<String, String> {
        match kind {
            AssetKind::Style => &self.styles,
            AssetKind::Script => &self.scripts,
        }
    }

    fn listing_mut(&mut self, kind: AssetKind) -> &mut BTreeMap<String, String> {
        match kind {
            AssetKind::Style => &mut self.styles,
            AssetKind::Script => &mut self.scripts,
        }
    }

    pub fn styles(&self) -> &BTreeMap<String, String> {
        &self.styles
    }

    pub fn scripts(&self) -> &BTreeMap<String, String> {
        &self.scripts
    }

    /// `<link>` tags for every style, in file name order
    ///
    /// Fails with [`HiveError::MissingManifest`] when no style was found.
    pub fn style_tags(&self, base_url: &str) -> Result<Vec<String>, HiveError> {
        let styles = self.non_empty(AssetKind::Style)?;

        Ok(styles
            .values()
            .map(|path| {
                format!(
                    "<link rel=\"stylesheet\" type=\"text/css\" href=\"{}/{}\">",
                    base_url, path
                )
            })
            .collect())
    }

    /// `<script>` tags for the named scripts, or for every script when
    /// `names` is empty
    ///
    /// Names are given without the `.js` extension.
    pub fn script_tags(&self, base_url: &str, names: &[&str]) -> Result<Vec<String>, HiveError> {
        let scripts = self.non_empty(AssetKind::Script)?;
        let tag = |path: &str| format!("<script src=\"{}/{}\"></script>", base_url, path);

        if names.is_empty() {
            return Ok(scripts.values().map(|p| tag(p.as_str())).collect());
        }

        names
            .iter()
            .map(|name| {
                scripts
                    .get(&format!("{}.js", name))
                    .map(|p| tag(p.as_str()))
                    .ok_or_else(|| HiveError::MissingAsset {
                        kind: AssetKind::Script,
                        name: name.to_string(),
                    })
            })
            .collect()
    }

    fn non_empty(&self, kind: AssetKind) -> Result<&BTreeMap<String, String>, HiveError> {
        let listing = self.listing(kind);
        if listing.is_empty() {
            return Err(HiveError::MissingManifest { kind });
        }
        Ok(listing)
    }
}
