//! Configuration module for gofuncount
//!
//! This module handles:
//! - Run settings passed to the [`Runner`](crate::runner::Runner)
//! - Project-level configuration (gofuncount.toml)
//! - CLI defaults

mod project_config;

pub use project_config::{
    load_project_config, CliDefaults, ExcludeConfig, ProjectConfig, CONFIG_FILE_NAMES,
    DEFAULT_EXCLUDE_PATTERNS,
};

use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::str::FromStr;

/// How function counts are grouped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// Parent directory of each file, as reached from the root
    #[default]
    Directory,
    /// Name in each file's `package` clause
    Package,
}

impl FromStr for GroupBy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "directory" | "dir" => Ok(GroupBy::Directory),
            "package" | "pkg" => Ok(GroupBy::Package),
            _ => Err(anyhow!(
                "Unknown grouping '{}'. Valid values: directory, package",
                s
            )),
        }
    }
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::Directory => write!(f, "directory"),
            GroupBy::Package => write!(f, "package"),
        }
    }
}

/// Settings for one counting run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Count `_test.go` files found while walking a directory
    pub include_tests: bool,
    pub group_by: GroupBy,
    /// Gitignore-style patterns excluded from the walk
    pub exclude: Vec<String>,
    pub respect_gitignore: bool,
    /// Parser threads
    pub workers: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            include_tests: false,
            group_by: GroupBy::Directory,
            exclude: DEFAULT_EXCLUDE_PATTERNS.iter().map(|s| s.to_string()).collect(),
            respect_gitignore: true,
            workers: 8,
        }
    }
}

impl RunConfig {
    /// Settings from a project file, before CLI overrides
    pub fn from_project(project: &ProjectConfig) -> Self {
        let defaults = RunConfig::default();
        Self {
            include_tests: project.defaults.include_tests.unwrap_or(defaults.include_tests),
            group_by: project.defaults.group_by.unwrap_or(defaults.group_by),
            exclude: project.exclude.effective_patterns(),
            respect_gitignore: project.exclude.respect_gitignore,
            workers: project.defaults.workers.unwrap_or(defaults.workers),
        }
    }
}
