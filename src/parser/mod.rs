// Parser module for extracting symbolic summaries from source files

pub mod ast;
mod javascript;
mod python;

pub use ast::*;
pub use javascript::{JavaScriptParser, JsVariant};
pub use python::PythonParser;

use crate::config::ScanConfig;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// One parser per supported language, dispatched by extension.
///
/// `parse` is total: read failures and syntax errors are captured in the
/// returned record's status instead of aborting the scan.
pub struct SourceParsers {
    python: PythonParser,
    javascript: JavaScriptParser,
}

impl SourceParsers {
    pub fn new() -> Result<Self> {
        Ok(Self {
            python: PythonParser::new()?,
            javascript: JavaScriptParser::new()?,
        })
    }

    /// Parse one discovered file into a FileRecord
    pub fn parse(&mut self, root: &Path, rel_path: &Path, scan: &ScanConfig) -> FileRecord {
        let ext = rel_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("");
        // Discovery only admits allow-listed extensions; unknown ones are
        // treated as unreadable rather than panicking.
        let language = match Language::from_extension(ext) {
            Some(lang) => lang,
            None => return FileRecord::unreadable(rel_path.to_path_buf(), Language::Python),
        };

        let abs = root.join(rel_path);

        match std::fs::metadata(&abs) {
            Ok(meta) if meta.len() > scan.max_file_size => {
                return FileRecord::unreadable(rel_path.to_path_buf(), language);
            }
            Err(_) => return FileRecord::unreadable(rel_path.to_path_buf(), language),
            _ => {}
        }

        let source = match std::fs::read_to_string(&abs) {
            Ok(source) => source,
            Err(_) => return FileRecord::unreadable(rel_path.to_path_buf(), language),
        };

        self.parse_str(&source, rel_path.to_path_buf(), ext)
    }

    /// Parse source text directly (used by tests and by `parse`)
    pub fn parse_str(&mut self, source: &str, rel_path: PathBuf, ext: &str) -> FileRecord {
        match Language::from_extension(ext) {
            Some(Language::Python) => self.python.parse_source(source, rel_path),
            Some(_) => {
                let variant = JsVariant::from_extension(ext).unwrap_or(JsVariant::JavaScript);
                self.javascript.parse_source(source, rel_path, variant)
            }
            None => FileRecord::unreadable(rel_path, Language::Python),
        }
    }
}
