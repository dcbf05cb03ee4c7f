//! Errors raised while collecting function counts

use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a counting run.
///
/// The statistics layer never fails; these all come from walking and
/// parsing the source tree.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("no such file or directory: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a go file: {}", .0.display())]
    NotAGoFile(PathBuf),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}:{column}: syntax error", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
    },

    #[error("failed to walk source tree: {0}")]
    Walk(#[from] ignore::Error),

    #[error("invalid exclude pattern '{pattern}': {source}")]
    Exclude {
        pattern: String,
        #[source]
        source: ignore::Error,
    },

    #[error("Go grammar error: {0}")]
    Grammar(String),

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

pub type RunResult<T> = Result<T, RunError>;
