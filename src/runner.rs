//! Source tree traversal
//!
//! Walks a file or directory, parses every Go file that passes the filters,
//! and groups the resulting function spans into [`Counts`]. Any failure
//! aborts the whole run.

use crate::config::{GroupBy, RunConfig};
use crate::error::{RunError, RunResult};
use crate::models::{Counts, FunctionCount};
use crate::parsers::{self, ParsedFile};
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;
use rayon::prelude::*;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Directory name Go tooling reserves for test fixtures
const TESTDATA_DIR: &str = "testdata";

/// Counts function spans under a root path
#[derive(Debug, Clone, Default)]
pub struct Runner {
    config: RunConfig,
}

impl Runner {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Count every function declared under `root`.
    ///
    /// A file root is parsed on its own (test files included); a directory
    /// root is walked recursively.
    pub fn run(&self, root: &Path) -> RunResult<Counts> {
        let metadata = std::fs::metadata(root).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                RunError::NotFound(root.to_path_buf())
            } else {
                RunError::Read {
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;

        if metadata.is_file() {
            self.run_file(root)
        } else {
            self.run_dir(root)
        }
    }

    fn run_file(&self, root: &Path) -> RunResult<Counts> {
        if !parsers::is_go_source(root) {
            return Err(RunError::NotAGoFile(root.to_path_buf()));
        }

        let root = clean_path(root);
        let parsed = parsers::parse_file(&root)?;
        let mut counts = Counts::new();
        self.record(&mut counts, &root, parsed);
        Ok(counts)
    }

    fn run_dir(&self, root: &Path) -> RunResult<Counts> {
        let files = self.collect_files(root)?;
        debug!(
            "Parsing {} Go files with {} workers",
            files.len(),
            self.config.workers
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.max(1))
            .build()?;

        // Parse in parallel, insert sequentially in walk order
        let parsed: Vec<ParsedFile> = pool.install(|| {
            files
                .par_iter()
                .map(|path| parsers::parse_file(path))
                .collect::<RunResult<Vec<_>>>()
        })?;

        let mut counts = Counts::new();
        for (path, file) in files.iter().zip(parsed) {
            self.record(&mut counts, path, file);
        }

        info!(
            "Counted {} functions in {} groups under {}",
            counts.total_functions(),
            counts.len(),
            root.display()
        );

        Ok(counts)
    }

    /// Go files under `root` that pass the test, testdata and exclusion filters
    fn collect_files(&self, root: &Path) -> RunResult<Vec<PathBuf>> {
        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.config.exclude {
            overrides
                .add(&format!("!{}", pattern))
                .map_err(|source| RunError::Exclude {
                    pattern: pattern.clone(),
                    source,
                })?;
        }
        let overrides = overrides.build().map_err(|source| RunError::Exclude {
            pattern: self.config.exclude.join(", "),
            source,
        })?;

        let respect = self.config.respect_gitignore;
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(true)
            .ignore(respect)
            .parents(respect)
            .git_ignore(respect)
            .git_global(respect)
            .git_exclude(respect)
            .require_git(false)
            .overrides(overrides)
            .sort_by_file_name(|a, b| a.cmp(b))
            .filter_entry(|entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                !(entry.depth() > 0 && is_dir && entry.file_name() == TESTDATA_DIR)
            });

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry?;
            let path = entry.path();

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }
            if !parsers::is_go_source(path) {
                continue;
            }
            if !self.config.include_tests && parsers::is_test_file(path) {
                debug!("Skipping test file {}", path.display());
                continue;
            }

            files.push(clean_path(path));
        }

        Ok(files)
    }

    /// Insert one parsed file's declarations under its group
    fn record(&self, counts: &mut Counts, path: &Path, file: ParsedFile) {
        let group = match self.config.group_by {
            GroupBy::Directory => directory_key(path),
            GroupBy::Package => file.package.clone(),
        };

        counts.ensure_group(&group);
        for func in file.functions {
            counts.insert(FunctionCount {
                group: group.clone(),
                package: file.package.clone(),
                name: func.name,
                file_name: func.file_name,
                starts_at: func.starts_at,
                ends_at: func.ends_at,
            });
        }
    }
}

/// Count the functions under `root` with the given settings
pub fn run(root: &Path, config: RunConfig) -> RunResult<Counts> {
    Runner::new(config).run(root)
}

/// `path` without `.` components, so `./pkg/a.go` and `pkg/a.go` agree
fn clean_path(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

/// Parent directory of `path` as a group key (`"."` for a bare file name)
fn directory_key(path: &Path) -> String {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    }
}
