use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub project: ProjectConfig,
    pub scan: ScanConfig,
    pub output: OutputConfig,
}

/// Project metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Scan settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Extension allow-list (no leading dot)
    pub extensions: Vec<String>,
    /// Ignore-glob patterns matched against relative paths
    pub exclude: Vec<String>,
    /// Maximum directory depth below the root
    pub max_depth: usize,
    /// Files larger than this many bytes are recorded as unreadable
    pub max_file_size: u64,
    /// Relative paths to treat as entry points regardless of detection
    pub entry_points: Vec<String>,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Destination file; stdout when absent
    pub path: Option<PathBuf>,
    /// Include a Mermaid diagram in the dependency section
    pub mermaid: bool,
    /// Render the dependency graph section at all
    pub include_deps: bool,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            name: None,
            description: None,
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec![
                "py".to_string(),
                "js".to_string(),
                "jsx".to_string(),
                "mjs".to_string(),
                "cjs".to_string(),
                "ts".to_string(),
                "tsx".to_string(),
            ],
            exclude: Vec::new(),
            max_depth: 16,
            max_file_size: 1_048_576,
            entry_points: Vec::new(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: None,
            mermaid: false,
            include_deps: true,
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(
        &mut self,
        output: Option<PathBuf>,
        exclude: Vec<String>,
        extensions: Vec<String>,
        entry_points: Vec<String>,
        max_depth: Option<usize>,
        max_file_size: Option<u64>,
        mermaid: bool,
        no_deps: bool,
    ) {
        if let Some(out) = output {
            self.output.path = Some(out);
        }

        if !exclude.is_empty() {
            self.scan.exclude.extend(exclude);
        }

        if !entry_points.is_empty() {
            self.scan.entry_points.extend(entry_points);
        }

        if !extensions.is_empty() {
            self.scan.extensions = extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }

        if let Some(d) = max_depth {
            self.scan.max_depth = d;
        }

        if let Some(s) = max_file_size {
            self.scan.max_file_size = s;
        }

        if mermaid {
            self.output.mermaid = true;
        }

        if no_deps {
            self.output.include_deps = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.scan.max_depth == 0 {
            return Err(Error::config_validation("max_depth must be at least 1"));
        }

        if self.scan.max_depth > 100 {
            return Err(Error::config_validation("max_depth cannot exceed 100"));
        }

        if self.scan.extensions.is_empty() {
            return Err(Error::config_validation(
                "at least one extension required in the allow-list",
            ));
        }

        if self.scan.max_file_size == 0 {
            return Err(Error::config_validation("max_file_size must be positive"));
        }

        for pattern in &self.scan.exclude {
            glob::Pattern::new(pattern)?;
        }

        Ok(())
    }
}
