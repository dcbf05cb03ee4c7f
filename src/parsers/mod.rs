//! Source code parsers using tree-sitter
//!
//! Locates function boundaries in Go source files. The rest of the crate
//! only sees [`ParsedFile`] values.

pub mod go;

use crate::error::RunResult;
use std::path::{Path, PathBuf};

/// A function or method declaration and its 1-based line span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpan {
    pub name: String,
    pub file_name: PathBuf,
    pub starts_at: u32,
    pub ends_at: u32,
}

/// Result of parsing a source file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedFile {
    /// Name from the package clause
    pub package: String,

    /// Top-level declarations in source order
    pub functions: Vec<FunctionSpan>,
}

/// Parse a Go file and extract its function declarations
pub fn parse_file(path: &Path) -> RunResult<ParsedFile> {
    go::parse(path)
}

/// Whether `path` names a Go source file
pub fn is_go_source(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("go")
}

/// Whether `path` names a Go test file (`*_test.go`)
pub fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with("_test.go"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_go_source() {
        assert!(is_go_source(Path::new("src/x/x.go")));
        assert!(is_go_source(Path::new("x_test.go")));
        assert!(!is_go_source(Path::new("x.rs")));
        assert!(!is_go_source(Path::new("go")));
    }

    #[test]
    fn test_is_test_file() {
        assert!(is_test_file(Path::new("pkg/x_test.go")));
        assert!(!is_test_file(Path::new("pkg/x.go")));
        assert!(!is_test_file(Path::new("pkg/test.go")));
    }
}
