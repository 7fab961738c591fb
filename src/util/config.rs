//! Configuration file support.
//!
//! An optional `oma-import.toml` next to the manifest overrides the
//! defaults:
//!
//! ```toml
//! manifest = "MODULE.bazel"
//! namespace = "oma"
//! bazel = "/usr/local/bin/bazel"
//! ```
//!
//! A missing file means all defaults apply.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::util::process::find_executable;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "oma-import.toml";

/// Default manifest file name.
pub const DEFAULT_MANIFEST: &str = "MODULE.bazel";

/// Default package namespace for generated purls.
pub const DEFAULT_NAMESPACE: &str = "oma";

/// Tool configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the manifest document, relative to the working directory.
    pub manifest: Option<PathBuf>,

    /// Default package namespace offered at the namespace prompt.
    pub namespace: Option<String>,

    /// Bazel program used for the license catalog query.
    pub bazel: Option<PathBuf>,
}

impl Config {
    /// Load configuration from `dir/oma-import.toml`, if present.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Config::default());
        }

        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Resolve the manifest path against the working directory.
    pub fn manifest_path(&self, dir: &Path) -> PathBuf {
        match &self.manifest {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => dir.join(p),
            None => dir.join(DEFAULT_MANIFEST),
        }
    }

    /// Default namespace offered at the namespace prompt.
    pub fn default_namespace(&self) -> &str {
        self.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE)
    }

    /// Bazel program for the catalog query: explicit override, then
    /// PATH lookup, then a bare `bazel` left to the OS to resolve.
    pub fn bazel_program(&self) -> PathBuf {
        if let Some(p) = &self.bazel {
            return p.clone();
        }
        find_executable("bazel").unwrap_or_else(|| PathBuf::from("bazel"))
    }
}
