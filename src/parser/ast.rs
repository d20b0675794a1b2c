// Symbolic summaries extracted from source files
//
// These types represent the per-file summary the parsers produce: top-level
// imports, top-level definitions, and a best-effort one-line description.
// They are serializable for debugging and downstream tooling.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source language detected from a file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
}

impl Language {
    /// Detect language from a file extension (no leading dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "py" => Some(Self::Python),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            "ts" | "tsx" | "mts" | "cts" => Some(Self::TypeScript),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Python => "Python",
            Self::JavaScript => "JavaScript",
            Self::TypeScript => "TypeScript",
        }
    }
}

/// Outcome of parsing one file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParseStatus {
    /// Parsed cleanly
    Ok,
    /// Source contained syntax errors; no imports or definitions captured
    SyntaxError,
    /// File could not be read (missing, permission, binary, oversized)
    Unreadable,
}

/// A parsed source file summary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileRecord {
    /// File path relative to project root
    pub path: PathBuf,
    /// Detected language
    pub language: Language,
    /// Parse outcome
    pub status: ParseStatus,
    /// One-line description from the leading doc comment/docstring
    pub description: Option<String>,
    /// Top-level imports, in source order
    pub imports: Vec<Import>,
    /// Top-level definitions, in source order
    pub definitions: Vec<Definition>,
    /// File contains a Python `if __name__ == "__main__"` guard
    pub has_main_guard: bool,
    /// Total lines in the file
    pub total_lines: usize,
}

impl FileRecord {
    /// Create an empty record with status `Ok`
    pub fn new(path: PathBuf, language: Language) -> Self {
        Self {
            path,
            language,
            status: ParseStatus::Ok,
            description: None,
            imports: Vec::new(),
            definitions: Vec::new(),
            has_main_guard: false,
            total_lines: 0,
        }
    }

    /// Create a record for a file that could not be read
    pub fn unreadable(path: PathBuf, language: Language) -> Self {
        Self {
            status: ParseStatus::Unreadable,
            ..Self::new(path, language)
        }
    }

    /// Create a record for a file that failed to parse
    pub fn syntax_error(path: PathBuf, language: Language, total_lines: usize) -> Self {
        Self {
            status: ParseStatus::SyntaxError,
            total_lines,
            ..Self::new(path, language)
        }
    }

    /// True when the record carries usable imports/definitions
    pub fn is_parsed(&self) -> bool {
        self.status == ParseStatus::Ok
    }
}

/// An import statement as it appeared in source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Import {
    /// The module reference (dotted path for Python, raw specifier for JS/TS)
    pub module: String,
    /// Specific names imported (for `from x import y` / `import { y } from "x"`)
    pub names: Vec<ImportedName>,
    /// Import kind
    pub kind: ImportKind,
    /// Line number
    pub line: usize,
}

impl Import {
    /// Create a simple `import x` style import
    pub fn simple(module: &str, line: usize) -> Self {
        Self {
            module: module.to_string(),
            names: Vec::new(),
            kind: ImportKind::Direct,
            line,
        }
    }

    /// Create a `from x import y` style import
    pub fn from_import(module: &str, names: Vec<ImportedName>, line: usize) -> Self {
        Self {
            module: module.to_string(),
            names,
            kind: ImportKind::From,
            line,
        }
    }

    /// Create a relative import with the given dot-level
    pub fn relative(module: &str, names: Vec<ImportedName>, level: usize, line: usize) -> Self {
        Self {
            module: module.to_string(),
            names,
            kind: ImportKind::Relative { level },
            line,
        }
    }

    /// Reconstruct the reference roughly as written, for reporting
    pub fn display_name(&self) -> String {
        match self.kind {
            ImportKind::Relative { level } => {
                format!("{}{}", ".".repeat(level), self.module)
            }
            _ => self.module.clone(),
        }
    }
}

/// A single imported name with optional alias
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImportedName {
    /// Original name
    pub name: String,
    /// Alias (from `as` clause)
    pub alias: Option<String>,
}

impl ImportedName {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: None,
        }
    }

    pub fn with_alias(name: &str, alias: &str) -> Self {
        Self {
            name: name.to_string(),
            alias: Some(alias.to_string()),
        }
    }

    /// Get the name as used in code (alias if present, otherwise original)
    pub fn used_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }
}

/// Kind of import statement
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum ImportKind {
    /// `import x`, `import x as y`, or a JS/TS specifier
    Direct,
    /// `from x import y`
    From,
    /// `from . import y` or `from ..x import y`
    Relative { level: usize },
}

impl ImportKind {
    pub fn is_relative(&self) -> bool {
        matches!(self, ImportKind::Relative { .. })
    }
}

/// Kind of top-level definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefKind {
    Function,
    Class,
}

/// A top-level definition (function or class)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Definition {
    /// Definition name
    pub name: String,
    /// Kind of definition
    pub kind: DefKind,
    /// Line number
    pub line: usize,
}

impl Definition {
    pub fn function(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            kind: DefKind::Function,
            line,
        }
    }

    pub fn class(name: &str, line: usize) -> Self {
        Self {
            name: name.to_string(),
            kind: DefKind::Class,
            line,
        }
    }
}
