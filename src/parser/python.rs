// Python parser using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::path::PathBuf;
use tree_sitter::{Node, Parser};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse Python source into a FileRecord.
    ///
    /// Only root-level statements contribute imports and definitions;
    /// nested and conditional imports are deliberately ignored.
    pub fn parse_source(&mut self, source: &str, path: PathBuf) -> FileRecord {
        let total_lines = source.lines().count();

        let tree = match self.parser.parse(source, None) {
            Some(tree) => tree,
            None => return FileRecord::syntax_error(path, Language::Python, total_lines),
        };

        let root = tree.root_node();
        if root.has_error() {
            return FileRecord::syntax_error(path, Language::Python, total_lines);
        }

        let mut record = FileRecord::new(path, Language::Python);
        record.total_lines = total_lines;

        if let Some(docstring) = extract_module_docstring(&root, source.as_bytes()) {
            let line = first_line(&docstring);
            if !line.is_empty() {
                record.description = Some(line);
            }
        }

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            match child.kind() {
                "import_statement" => {
                    if let Some(import) = parse_import(&child, source.as_bytes()) {
                        record.imports.push(import);
                    }
                }
                "import_from_statement" => {
                    if let Some(import) = parse_import_from(&child, source.as_bytes()) {
                        record.imports.push(import);
                    }
                }
                "function_definition" | "class_definition" | "decorated_definition" => {
                    if let Some(def) = parse_definition(&child, source.as_bytes()) {
                        record.definitions.push(def);
                    }
                }
                "if_statement" => {
                    if is_main_guard(&child, source.as_bytes()) {
                        record.has_main_guard = true;
                    }
                }
                _ => {}
            }
        }

        record
    }
}

/// Truncate a docstring to its first non-empty line
fn first_line(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or("")
        .to_string()
}

/// Extract the module docstring (first expression statement that's a string)
fn extract_module_docstring(root: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "expression_statement" {
            let mut inner_cursor = child.walk();
            for inner in child.children(&mut inner_cursor) {
                if inner.kind() == "string" {
                    return extract_string_content(&inner, source);
                }
            }
            return None;
        } else if child.kind() != "comment" {
            // First real statement isn't a docstring
            return None;
        }
    }
    None
}

/// Extract string content, handling triple-quoted strings
fn extract_string_content(node: &Node, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;

    let s = if text.starts_with("\"\"\"") || text.starts_with("'''") {
        &text[3..text.len().saturating_sub(3)]
    } else if text.starts_with('"') || text.starts_with('\'') {
        &text[1..text.len().saturating_sub(1)]
    } else {
        text
    };

    Some(s.trim().to_string())
}

/// Detect `if __name__ == "__main__":` at the top level
fn is_main_guard(node: &Node, source: &[u8]) -> bool {
    if let Some(condition) = node.child_by_field_name("condition") {
        if condition.kind() == "comparison_operator" {
            if let Some(first) = condition.child(0) {
                if first.kind() == "identifier" {
                    return first.utf8_text(source).map(|t| t == "__name__").unwrap_or(false);
                }
            }
        }
    }
    false
}

/// Parse an import statement: `import x` or `import x as y`
fn parse_import(node: &Node, source: &[u8]) -> Option<Import> {
    let line = node.start_position().row + 1;
    let mut names = Vec::new();
    let mut module = String::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "dotted_name" => {
                module = child.utf8_text(source).ok()?.to_string();
                names.push(ImportedName::new(&module));
            }
            "aliased_import" => {
                let mut inner_cursor = child.walk();
                let mut name = String::new();
                let mut alias = None;

                for inner in child.children(&mut inner_cursor) {
                    match inner.kind() {
                        "dotted_name" => {
                            name = inner.utf8_text(source).ok()?.to_string();
                        }
                        "identifier" => {
                            alias = Some(inner.utf8_text(source).ok()?.to_string());
                        }
                        _ => {}
                    }
                }

                if !name.is_empty() {
                    if module.is_empty() {
                        module = name.clone();
                    }
                    if let Some(a) = alias {
                        names.push(ImportedName::with_alias(&name, &a));
                    } else {
                        names.push(ImportedName::new(&name));
                    }
                }
            }
            _ => {}
        }
    }

    if module.is_empty() {
        return None;
    }

    Some(Import {
        module,
        names,
        kind: ImportKind::Direct,
        line,
    })
}

/// Parse an import-from statement: `from x import y`, `from ..x import y`
fn parse_import_from(node: &Node, source: &[u8]) -> Option<Import> {
    let line = node.start_position().row + 1;
    let mut module = String::new();
    let mut names = Vec::new();
    let mut relative_level = 0;
    let mut seen_import_keyword = false;

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "relative_import" => {
                let mut inner_cursor = child.walk();
                for inner in child.children(&mut inner_cursor) {
                    match inner.kind() {
                        "import_prefix" => {
                            relative_level = inner
                                .utf8_text(source)
                                .ok()?
                                .chars()
                                .filter(|c| *c == '.')
                                .count();
                        }
                        "dotted_name" => {
                            module = inner.utf8_text(source).ok()?.to_string();
                        }
                        _ => {}
                    }
                }
            }
            "dotted_name" => {
                let text = child.utf8_text(source).ok()?;
                if !seen_import_keyword {
                    module = text.to_string();
                } else {
                    names.push(ImportedName::new(text));
                }
            }
            "import" => {
                seen_import_keyword = true;
            }
            "wildcard_import" => {
                names.push(ImportedName::new("*"));
            }
            "aliased_import" => {
                let mut inner_cursor = child.walk();
                let mut name = String::new();
                let mut alias = None;

                for inner in child.children(&mut inner_cursor) {
                    match inner.kind() {
                        "identifier" | "dotted_name" => {
                            if name.is_empty() {
                                name = inner.utf8_text(source).ok()?.to_string();
                            } else {
                                alias = Some(inner.utf8_text(source).ok()?.to_string());
                            }
                        }
                        _ => {}
                    }
                }

                if !name.is_empty() {
                    if let Some(a) = alias {
                        names.push(ImportedName::with_alias(&name, &a));
                    } else {
                        names.push(ImportedName::new(&name));
                    }
                }
            }
            _ => {}
        }
    }

    if module.is_empty() && relative_level == 0 {
        return None;
    }

    let kind = if relative_level > 0 {
        ImportKind::Relative {
            level: relative_level,
        }
    } else {
        ImportKind::From
    };

    Some(Import {
        module,
        names,
        kind,
        line,
    })
}

/// Extract the name of a top-level function or class definition
fn parse_definition(node: &Node, source: &[u8]) -> Option<Definition> {
    let line = node.start_position().row + 1;

    // Unwrap decorated definitions to the inner def/class
    let target = if node.kind() == "decorated_definition" {
        let mut cursor = node.walk();
        let inner = node
            .children(&mut cursor)
            .find(|c| c.kind() == "function_definition" || c.kind() == "class_definition")?;
        inner
    } else {
        *node
    };

    let name = target
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    match target.kind() {
        "function_definition" => Some(Definition::function(&name, line)),
        "class_definition" => Some(Definition::class(&name, line)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse(source: &str) -> FileRecord {
        let mut parser = PythonParser::new().unwrap();
        parser.parse_source(source, PathBuf::from("test.py"))
    }

    #[test]
    fn test_simple_import() {
        let record = parse("import os\n");
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "os");
        assert_eq!(record.imports[0].kind, ImportKind::Direct);
    }

    #[test]
    fn test_aliased_import() {
        let record = parse("import numpy as np\n");
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "numpy");
        assert_eq!(record.imports[0].names[0].used_name(), "np");
    }

    #[test]
    fn test_from_import() {
        let record = parse("from os.path import join, exists\n");
        assert_eq!(record.imports.len(), 1);
        let imp = &record.imports[0];
        assert_eq!(imp.module, "os.path");
        assert_eq!(imp.kind, ImportKind::From);
        assert_eq!(imp.names.len(), 2);
    }

    #[test]
    fn test_relative_import() {
        let record = parse("from ..utils import helper\n");
        assert_eq!(record.imports.len(), 1);
        let imp = &record.imports[0];
        assert_eq!(imp.module, "utils");
        assert_eq!(imp.kind, ImportKind::Relative { level: 2 });
    }

    #[test]
    fn test_bare_relative_import() {
        let record = parse("from . import sibling\n");
        let imp = &record.imports[0];
        assert_eq!(imp.module, "");
        assert_eq!(imp.kind, ImportKind::Relative { level: 1 });
        assert_eq!(imp.names[0].name, "sibling");
    }

    #[test]
    fn test_nested_imports_excluded() {
        let record = parse("def f():\n    import os\n    return os\n");
        assert!(record.imports.is_empty());
        assert_eq!(record.definitions.len(), 1);
    }

    #[test]
    fn test_docstring_first_line() {
        let record = parse("\"\"\"Utility helpers.\n\nMore detail here.\n\"\"\"\n");
        assert_eq!(record.description.as_deref(), Some("Utility helpers."));
    }

    #[test]
    fn test_no_docstring() {
        let record = parse("x = 1\n");
        assert!(record.description.is_none());
    }

    #[test]
    fn test_definitions() {
        let source = "class Config:\n    pass\n\ndef load():\n    pass\n\n@cached\ndef helper():\n    pass\n";
        let record = parse(source);
        let names: Vec<&str> = record.definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["Config", "load", "helper"]);
        assert_eq!(record.definitions[0].kind, DefKind::Class);
        assert_eq!(record.definitions[1].kind, DefKind::Function);
    }

    #[test]
    fn test_main_guard() {
        let record = parse("if __name__ == \"__main__\":\n    main()\n");
        assert!(record.has_main_guard);
    }

    #[test]
    fn test_no_main_guard() {
        let record = parse("if True:\n    main()\n");
        assert!(!record.has_main_guard);
    }

    #[test]
    fn test_syntax_error_status() {
        let record = parse("def broken(:\n");
        assert_eq!(record.status, ParseStatus::SyntaxError);
        assert!(record.imports.is_empty());
        assert!(record.definitions.is_empty());
    }

    #[test]
    fn test_line_numbers() {
        let record = parse("import os\n\nimport sys\n");
        assert_eq!(record.imports[0].line, 1);
        assert_eq!(record.imports[1].line, 3);
        assert_eq!(record.total_lines, 3);
    }
}
