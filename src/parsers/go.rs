//! Go parser using tree-sitter
//!
//! Extracts the package name and every top-level function and method
//! declaration with its line span.

use super::{FunctionSpan, ParsedFile};
use crate::error::{RunError, RunResult};
use std::path::Path;
use tree_sitter::{Language, Node, Parser, Query, QueryCursor, StreamingIterator};

const FUNC_QUERY: &str = r#"
    [
        (function_declaration name: (identifier) @func_name)
        (method_declaration name: (field_identifier) @func_name)
    ] @func
"#;

/// Parse a Go file and extract its function declarations
pub fn parse(path: &Path) -> RunResult<ParsedFile> {
    let source = std::fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_source(&source, path)
}

/// Parse Go source code directly (useful for testing)
pub fn parse_source(source: &str, path: &Path) -> RunResult<ParsedFile> {
    let language: Language = tree_sitter_go::LANGUAGE.into();
    let mut parser = Parser::new();
    parser
        .set_language(&language)
        .map_err(|e| RunError::Grammar(e.to_string()))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| RunError::Grammar("parser returned no tree".to_string()))?;

    let root = tree.root_node();
    if root.has_error() {
        let (line, column) = first_error_position(&root).unwrap_or((1, 1));
        return Err(RunError::Parse {
            path: path.to_path_buf(),
            line,
            column,
        });
    }

    let source_bytes = source.as_bytes();
    // Go rejects files without a package clause
    let package = extract_package(&root, source_bytes).ok_or_else(|| RunError::Parse {
        path: path.to_path_buf(),
        line: 1,
        column: 1,
    })?;

    let mut functions = extract_functions(&root, source_bytes, path)?;
    functions.sort_by_key(|f| f.starts_at);

    Ok(ParsedFile { package, functions })
}

/// Extract function and method declarations from the AST
fn extract_functions(root: &Node, source: &[u8], path: &Path) -> RunResult<Vec<FunctionSpan>> {
    let language: Language = tree_sitter_go::LANGUAGE.into();
    let query = Query::new(&language, FUNC_QUERY).map_err(|e| RunError::Grammar(e.to_string()))?;

    let mut functions = Vec::new();
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(&query, *root, source);

    while let Some(m) = matches.next() {
        let mut func_node = None;
        let mut name = String::new();

        for capture in m.captures.iter() {
            match query.capture_names()[capture.index as usize] {
                "func" => func_node = Some(capture.node),
                "func_name" => {
                    name = capture.node.utf8_text(source).unwrap_or("").to_string();
                }
                _ => {}
            }
        }

        if let Some(node) = func_node {
            functions.push(FunctionSpan {
                name,
                file_name: path.to_path_buf(),
                starts_at: node.start_position().row as u32 + 1,
                ends_at: node.end_position().row as u32 + 1,
            });
        }
    }

    Ok(functions)
}

/// Name from the `package` clause, if the file has one
fn extract_package(root: &Node, source: &[u8]) -> Option<String> {
    let clause = root
        .children(&mut root.walk())
        .find(|n| n.kind() == "package_clause")?;
    let ident = clause
        .children(&mut clause.walk())
        .find(|n| n.kind() == "package_identifier")?;
    ident.utf8_text(source).ok().map(str::to_string)
}

/// 1-based (line, column) of the first ERROR or MISSING node
fn first_error_position(node: &Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .find_map(|child| first_error_position(&child));
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_str(source: &str) -> ParsedFile {
        parse_source(source, &PathBuf::from("test.go")).expect("should parse Go source")
    }

    #[test]
    fn test_parse_simple_function() {
        let source = r#"package main

import "fmt"

func init() {
	fmt.Println("init")
}

func main() {
	fmt.Println("a")
	fmt.Println("b")
}
"#;
        let result = parse_str(source);

        assert_eq!(result.package, "main");
        let spans: Vec<(&str, u32, u32)> = result
            .functions
            .iter()
            .map(|f| (f.name.as_str(), f.starts_at, f.ends_at))
            .collect();
        assert_eq!(spans, vec![("init", 5, 7), ("main", 9, 12)]);
    }

    #[test]
    fn test_parse_method() {
        let source = r#"package shapes

type Square struct {
	side int
}

// Area returns the area.
func (s *Square) Area() int {
	return s.side * s.side
}
"#;
        let result = parse_str(source);

        assert_eq!(result.package, "shapes");
        assert_eq!(result.functions.len(), 1);
        let area = &result.functions[0];
        assert_eq!(area.name, "Area");
        assert_eq!((area.starts_at, area.ends_at), (8, 10));
    }

    #[test]
    fn test_function_literals_not_counted() {
        let source = r#"package main

var handler = func() {}

func run() {
	f := func() int {
		return 1
	}
	_ = f
}
"#;
        let result = parse_str(source);
        let names: Vec<&str> = result.functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["run"]);
    }

    #[test]
    fn test_single_line_function() {
        let result = parse_str("package p\n\nfunc id(x int) int { return x }\n");
        assert_eq!(result.functions[0].starts_at, 3);
        assert_eq!(result.functions[0].ends_at, 3);
    }

    #[test]
    fn test_file_without_functions() {
        let result = parse_str("package types\n\ntype ID string\n");
        assert_eq!(result.package, "types");
        assert!(result.functions.is_empty());
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let source = "package main\n\nfunc broken( {\n";
        let err = parse_source(source, &PathBuf::from("broken.go")).unwrap_err();
        match err {
            RunError::Parse { path, line, .. } => {
                assert_eq!(path, PathBuf::from("broken.go"));
                assert!(line >= 3);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_package_clause() {
        let err = parse_source("func main() {}\n", &PathBuf::from("nopkg.go")).unwrap_err();
        assert!(matches!(err, RunError::Parse { line: 1, column: 1, .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = parse(&PathBuf::from("does/not/exist.go")).unwrap_err();
        assert!(matches!(err, RunError::Read { .. }));
    }
}
