//! Project-level configuration support
//!
//! Loads per-project configuration from `gofuncount.toml` or
//! `.gofuncountrc.json` in the directory being counted.
//!
//! # Configuration Format
//!
//! ```toml
//! # gofuncount.toml
//!
//! [defaults]
//! format = "csv"
//! group_by = "package"
//! include_tests = true
//! stats = true
//! workers = 4
//!
//! [exclude]
//! paths = ["internal/generated/", "*.pb.go"]
//! respect_gitignore = false
//! ```

use super::GroupBy;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// File names searched for, in order
pub const CONFIG_FILE_NAMES: &[&str] = &["gofuncount.toml", ".gofuncountrc.json"];

/// Built-in exclusion patterns for vendored code.
/// Applied unless `skip_defaults = true` in config.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &["vendor/"];

/// Contents of a project config file
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub defaults: CliDefaults,

    #[serde(default)]
    pub exclude: ExcludeConfig,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (json, csv, text)
    #[serde(default)]
    pub format: Option<String>,

    #[serde(default)]
    pub group_by: Option<GroupBy>,

    #[serde(default)]
    pub include_tests: Option<bool>,

    /// Print per-group statistics instead of raw records
    #[serde(default)]
    pub stats: Option<bool>,

    #[serde(default)]
    pub workers: Option<usize>,
}

/// Path exclusion configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExcludeConfig {
    /// Gitignore-style patterns to exclude from counting
    #[serde(default)]
    pub paths: Vec<String>,

    /// If true, disable built-in default exclusion patterns
    #[serde(default)]
    pub skip_defaults: bool,

    #[serde(default = "default_true")]
    pub respect_gitignore: bool,
}

fn default_true() -> bool {
    true
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            skip_defaults: false,
            respect_gitignore: true,
        }
    }
}

impl ExcludeConfig {
    /// Returns effective exclusion patterns (defaults + user patterns).
    /// If `skip_defaults` is true, only user patterns are returned.
    pub fn effective_patterns(&self) -> Vec<String> {
        let mut patterns = Vec::new();

        if !self.skip_defaults {
            patterns.extend(DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()));
        }

        for p in &self.paths {
            if !patterns.contains(p) {
                patterns.push(p.clone());
            }
        }

        patterns
    }
}

/// Load project configuration for a counting root.
///
/// A directory root is searched directly; a file root is searched in its
/// parent directory. Unreadable or malformed files are logged and skipped.
pub fn load_project_config(root: &Path) -> ProjectConfig {
    let dir = if root.is_file() {
        root.parent().unwrap_or_else(|| Path::new("."))
    } else {
        root
    };

    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        let loaded = if name.ends_with(".json") {
            load_json_config(&path)
        } else {
            load_toml_config(&path)
        };
        match loaded {
            Ok(config) => {
                debug!("Loaded project config from {}", path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
