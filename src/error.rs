use std::path::PathBuf;
use thiserror::Error;

/// Codemap error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation error: {0}")]
    ConfigValidation(String),

    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Glob pattern error: {0}")]
    GlobPattern(#[from] glob::PatternError),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parser error: {0}")]
    Parser(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for codemap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a config validation error
    pub fn config_validation(msg: impl Into<String>) -> Self {
        Error::ConfigValidation(msg.into())
    }

    /// Create a parser error
    pub fn parser(msg: impl Into<String>) -> Self {
        Error::Parser(msg.into())
    }

    /// Create a generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// True when this error should abort the run before any scanning
    /// happens (invalid root or configuration); everything else is
    /// recoverable and reported inside the run.
    pub fn is_fatal_config(&self) -> bool {
        matches!(
            self,
            Error::PathNotFound(_)
                | Error::NotADirectory(_)
                | Error::ConfigValidation(_)
                | Error::ConfigParse(_)
                | Error::GlobPattern(_)
        )
    }
}
