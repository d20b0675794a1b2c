// JavaScript/TypeScript parser using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::*;
use std::path::PathBuf;
use tree_sitter::{Node, Parser};

/// Supported JavaScript variants
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsVariant {
    JavaScript,
    TypeScript,
    Tsx,
}

impl JsVariant {
    /// Detect variant from a file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "mts" | "cts" => Some(Self::TypeScript),
            "tsx" => Some(Self::Tsx),
            _ => None,
        }
    }

    fn language(&self) -> Language {
        match self {
            Self::JavaScript => Language::JavaScript,
            Self::TypeScript | Self::Tsx => Language::TypeScript,
        }
    }
}

/// Parser for JavaScript/TypeScript source files
pub struct JavaScriptParser {
    js_parser: Parser,
    ts_parser: Parser,
    tsx_parser: Parser,
}

impl JavaScriptParser {
    /// Create a new JavaScript/TypeScript parser
    pub fn new() -> Result<Self> {
        let mut js_parser = Parser::new();
        let js_language = tree_sitter_javascript::language();
        js_parser
            .set_language(&js_language)
            .map_err(|e| Error::Parser(format!("Failed to set JavaScript language: {}", e)))?;

        let mut ts_parser = Parser::new();
        let ts_language = tree_sitter_typescript::language_typescript();
        ts_parser
            .set_language(&ts_language)
            .map_err(|e| Error::Parser(format!("Failed to set TypeScript language: {}", e)))?;

        let mut tsx_parser = Parser::new();
        let tsx_language = tree_sitter_typescript::language_tsx();
        tsx_parser
            .set_language(&tsx_language)
            .map_err(|e| Error::Parser(format!("Failed to set TSX language: {}", e)))?;

        Ok(Self {
            js_parser,
            ts_parser,
            tsx_parser,
        })
    }

    /// Parse JavaScript/TypeScript source into a FileRecord.
    ///
    /// Only root-level statements contribute imports and definitions.
    pub fn parse_source(&mut self, source: &str, path: PathBuf, variant: JsVariant) -> FileRecord {
        let total_lines = source.lines().count();
        let language = variant.language();

        let parser = match variant {
            JsVariant::JavaScript => &mut self.js_parser,
            JsVariant::TypeScript => &mut self.ts_parser,
            JsVariant::Tsx => &mut self.tsx_parser,
        };

        let tree = match parser.parse(source, None) {
            Some(tree) => tree,
            None => return FileRecord::syntax_error(path, language, total_lines),
        };

        let root = tree.root_node();
        if root.has_error() {
            return FileRecord::syntax_error(path, language, total_lines);
        }

        let mut record = FileRecord::new(path, language);
        record.total_lines = total_lines;
        record.description = extract_leading_comment(&root, source.as_bytes());

        let mut cursor = root.walk();
        for child in root.children(&mut cursor) {
            visit_top_level(&child, source.as_bytes(), &mut record);
        }

        record
    }
}

/// Handle one root-level statement
fn visit_top_level(node: &Node, source: &[u8], record: &mut FileRecord) {
    match node.kind() {
        "import_statement" => {
            if let Some(import) = parse_import(node, source) {
                record.imports.push(import);
            }
        }
        "export_statement" => {
            // Re-exports (`export { x } from "./y"`) carry a source module;
            // exported declarations unwrap to the inner statement.
            if let Some(import) = parse_reexport(node, source) {
                record.imports.push(import);
            } else {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    visit_top_level(&child, source, record);
                }
            }
        }
        "class_declaration" | "abstract_class_declaration" => {
            if let Some(name) = field_text(node, "name", source) {
                record
                    .definitions
                    .push(Definition::class(&name, node.start_position().row + 1));
            }
        }
        "function_declaration" | "generator_function_declaration" => {
            if let Some(name) = field_text(node, "name", source) {
                record
                    .definitions
                    .push(Definition::function(&name, node.start_position().row + 1));
            }
        }
        "lexical_declaration" | "variable_declaration" => {
            // `const x = require("y")` counts as an import; arrow/function
            // initializers count as definitions.
            if let Some(import) = parse_require(node, source) {
                record.imports.push(import);
            } else if let Some(def) = parse_arrow_definition(node, source) {
                record.definitions.push(def);
            }
        }
        _ => {}
    }
}

/// Read a named field's text from a node
fn field_text(node: &Node, field: &str, source: &[u8]) -> Option<String> {
    node.child_by_field_name(field)
        .and_then(|n| n.utf8_text(source).ok())
        .map(|s| s.to_string())
}

fn get_text<'a>(node: &Node, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// First comment before any code, reduced to one line
fn extract_leading_comment(root: &Node, source: &[u8]) -> Option<String> {
    let mut cursor = root.walk();
    for child in root.children(&mut cursor) {
        if child.kind() == "comment" {
            let text = get_text(&child, source);
            let cleaned = clean_comment_line(text);
            if !cleaned.is_empty() {
                return Some(cleaned);
            }
        } else {
            break;
        }
    }
    None
}

/// Strip comment markers and return the first meaningful line
fn clean_comment_line(text: &str) -> String {
    let body = text
        .trim_start_matches("/**")
        .trim_start_matches("/*")
        .trim_end_matches("*/");

    for line in body.lines() {
        let stripped = line
            .trim()
            .trim_start_matches("//")
            .trim_start_matches('*')
            .trim();
        if !stripped.is_empty() && !stripped.starts_with('!') && !stripped.starts_with('@') {
            return stripped.to_string();
        }
    }
    String::new()
}

/// Parse an ES import statement
fn parse_import(node: &Node, source: &[u8]) -> Option<Import> {
    let mut module = String::new();
    let mut names: Vec<ImportedName> = Vec::new();

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        match child.kind() {
            "string" => {
                module = get_text(&child, source)
                    .trim_matches(|c| c == '"' || c == '\'' || c == '`')
                    .to_string();
            }
            "import_clause" => {
                collect_import_clause(&child, source, &mut names);
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
        line: node.start_position().row + 1,
    })
}

/// Walk an import clause: default, namespace, and named imports
fn collect_import_clause(clause: &Node, source: &[u8], names: &mut Vec<ImportedName>) {
    let mut cursor = clause.walk();
    for child in clause.children(&mut cursor) {
        match child.kind() {
            "identifier" => {
                names.push(ImportedName::new(get_text(&child, source)));
            }
            "namespace_import" => {
                let mut inner = child.walk();
                for ns_child in child.children(&mut inner) {
                    if ns_child.kind() == "identifier" {
                        names.push(ImportedName::with_alias("*", get_text(&ns_child, source)));
                    }
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for named in child.children(&mut inner) {
                    if named.kind() == "import_specifier" {
                        if let Some(name_node) = named.child_by_field_name("name") {
                            let name = get_text(&name_node, source);
                            if let Some(alias_node) = named.child_by_field_name("alias") {
                                names.push(ImportedName::with_alias(
                                    name,
                                    get_text(&alias_node, source),
                                ));
                            } else {
                                names.push(ImportedName::new(name));
                            }
                        }
                    }
                }
            }
            _ => {}
        }
    }
}

/// Parse `export ... from "module"` as an import edge
fn parse_reexport(node: &Node, source: &[u8]) -> Option<Import> {
    let source_node = node.child_by_field_name("source")?;
    let module = get_text(&source_node, source)
        .trim_matches(|c| c == '"' || c == '\'' || c == '`')
        .to_string();

    if module.is_empty() {
        return None;
    }

    Some(Import {
        module,
        names: Vec::new(),
        kind: ImportKind::Direct,
        line: node.start_position().row + 1,
    })
}

/// Parse `const x = require("y")` style CommonJS imports
fn parse_require(node: &Node, source: &[u8]) -> Option<Import> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        let value = match child.child_by_field_name("value") {
            Some(v) => v,
            None => continue,
        };
        if value.kind() != "call_expression" {
            continue;
        }
        let callee = match value.child_by_field_name("function") {
            Some(c) => c,
            None => continue,
        };
        if get_text(&callee, source) != "require" {
            continue;
        }
        let args = value.child_by_field_name("arguments")?;
        let mut args_cursor = args.walk();
        for arg in args.children(&mut args_cursor) {
            if arg.kind() == "string" {
                let module = get_text(&arg, source)
                    .trim_matches(|c| c == '"' || c == '\'' || c == '`')
                    .to_string();
                let binding = field_text(&child, "name", source).unwrap_or_default();
                let names = if binding.is_empty() {
                    Vec::new()
                } else {
                    vec![ImportedName::new(&binding)]
                };
                return Some(Import {
                    module,
                    names,
                    kind: ImportKind::Direct,
                    line: node.start_position().row + 1,
                });
            }
        }
    }
    None
}

/// Treat `const f = () => ...` / `const f = function ...` as a definition
fn parse_arrow_definition(node: &Node, source: &[u8]) -> Option<Definition> {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "variable_declarator" {
            continue;
        }
        let value = child.child_by_field_name("value")?;
        if matches!(
            value.kind(),
            "arrow_function" | "function_expression" | "function" | "generator_function"
        ) {
            let name = field_text(&child, "name", source)?;
            return Some(Definition::function(&name, node.start_position().row + 1));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn parse_js(source: &str) -> FileRecord {
        let mut parser = JavaScriptParser::new().unwrap();
        parser.parse_source(source, PathBuf::from("test.js"), JsVariant::JavaScript)
    }

    fn parse_ts(source: &str) -> FileRecord {
        let mut parser = JavaScriptParser::new().unwrap();
        parser.parse_source(source, PathBuf::from("test.ts"), JsVariant::TypeScript)
    }

    #[test]
    fn test_variant_from_extension() {
        assert_eq!(JsVariant::from_extension("js"), Some(JsVariant::JavaScript));
        assert_eq!(JsVariant::from_extension("mjs"), Some(JsVariant::JavaScript));
        assert_eq!(JsVariant::from_extension("ts"), Some(JsVariant::TypeScript));
        assert_eq!(JsVariant::from_extension("tsx"), Some(JsVariant::Tsx));
        assert_eq!(JsVariant::from_extension("py"), None);
    }

    #[test]
    fn test_default_import() {
        let record = parse_js("import fs from \"fs\";\n");
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "fs");
        assert_eq!(record.imports[0].names[0].name, "fs");
    }

    #[test]
    fn test_named_imports() {
        let record = parse_js("import { join, resolve as r } from \"path\";\n");
        let imp = &record.imports[0];
        assert_eq!(imp.module, "path");
        assert_eq!(imp.names.len(), 2);
        assert_eq!(imp.names[1].used_name(), "r");
    }

    #[test]
    fn test_namespace_import() {
        let record = parse_js("import * as util from \"./util\";\n");
        let imp = &record.imports[0];
        assert_eq!(imp.module, "./util");
        assert_eq!(imp.names[0].used_name(), "util");
    }

    #[test]
    fn test_reexport() {
        let record = parse_js("export { helper } from \"./helpers\";\n");
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "./helpers");
    }

    #[test]
    fn test_require() {
        let record = parse_js("const express = require(\"express\");\n");
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "express");
        assert_eq!(record.imports[0].names[0].name, "express");
    }

    #[test]
    fn test_definitions() {
        let source =
            "function main() {}\nclass Server {}\nconst handler = () => {};\nexport function run() {}\n";
        let record = parse_js(source);
        let names: Vec<&str> = record.definitions.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["main", "Server", "handler", "run"]);
    }

    #[test]
    fn test_leading_comment_description() {
        let record = parse_js("// Server bootstrap and routing.\nconst x = 1;\n");
        assert_eq!(
            record.description.as_deref(),
            Some("Server bootstrap and routing.")
        );
    }

    #[test]
    fn test_block_comment_description() {
        let record = parse_js("/**\n * Shared validation helpers.\n */\nconst x = 1;\n");
        assert_eq!(
            record.description.as_deref(),
            Some("Shared validation helpers.")
        );
    }

    #[test]
    fn test_no_description_after_code() {
        let record = parse_js("const x = 1;\n// not a header\n");
        assert!(record.description.is_none());
    }

    #[test]
    fn test_typescript_import() {
        let record = parse_ts("import type { Config } from \"./config\";\nconst a: number = 1;\n");
        assert_eq!(record.imports.len(), 1);
        assert_eq!(record.imports[0].module, "./config");
        assert_eq!(record.language, Language::TypeScript);
    }

    #[test]
    fn test_nested_import_excluded() {
        let record = parse_js("function f() {\n  const m = require(\"inner\");\n}\n");
        assert!(record.imports.is_empty());
    }

    #[test]
    fn test_syntax_error_status() {
        let record = parse_js("import { from ;;;\n");
        assert_eq!(record.status, ParseStatus::SyntaxError);
        assert!(record.imports.is_empty());
    }
}
