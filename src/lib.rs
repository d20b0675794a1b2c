//! Codemap - Generate a structured markdown map of a codebase
//!
//! Scans a project directory and emits one markdown report with a file
//! tree, per-module descriptions, entry points, and an import dependency
//! graph. Designed to quickly orient a reader (or coding agent) in an
//! unfamiliar repo.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod discover;
pub mod error;
pub mod parser;
pub mod report;

// Re-export main types
pub use analysis::{AnalysisResult, Analyzer, ProjectGraph};
pub use config::Config;
pub use error::{Error, Result};
pub use report::ReportRenderer;
