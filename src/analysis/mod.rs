// Analysis module: the discover -> parse -> resolve pipeline

pub mod entries;
pub mod graph;
pub mod resolver;

pub use entries::*;
pub use graph::*;
pub use resolver::*;

use crate::config::Config;
use crate::discover;
use crate::error::{Error, Result};
use crate::parser::{FileRecord, Language, SourceParsers};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Result of analyzing a codebase
#[derive(Debug)]
pub struct AnalysisResult {
    /// Canonicalized project root
    pub root: PathBuf,
    /// Display name for the report title
    pub project_name: String,
    /// File records plus dependency edges
    pub graph: ProjectGraph,
    /// Detected entry points
    pub entry_points: Vec<EntryPoint>,
    /// Leading lines of a root README, when present
    pub readme_excerpt: Option<String>,
}

/// Orchestrates the strictly forward pipeline:
/// Discoverer -> Parser -> Resolver -> entry-point detection.
pub struct Analyzer {
    config: Config,
    verbose: bool,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        // Fail fast if the grammars cannot be loaded at all
        SourceParsers::new()?;

        Ok(Self {
            config,
            verbose: false,
        })
    }

    /// Create analyzer with verbose output
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Analyze the codebase at `root`.
    ///
    /// A readable root with zero matching files succeeds with an empty
    /// graph; only a nonexistent or non-directory root is an error.
    pub fn analyze(&self, root: &Path) -> Result<AnalysisResult> {
        if !root.exists() {
            return Err(Error::PathNotFound(root.to_path_buf()));
        }
        let root = root.canonicalize()?;
        if !root.is_dir() {
            return Err(Error::NotADirectory(root));
        }

        let files = discover::discover(&root, &self.config.scan)?;
        let records = self.parse_files(&root, &files);

        let mut resolver = ImportResolver::build(&records);
        resolver.add_third_party(ImportResolver::declared_dependencies(&root));
        let edges = resolver.resolve_all(&records);

        let mut graph = ProjectGraph::new(records);
        graph.set_edges(edges);

        let entry_points = detect_entry_points(&root, &graph, &self.config.scan.entry_points);

        let project_name = self
            .config
            .project
            .name
            .clone()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| {
                root.file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("project")
                    .to_string()
            });

        Ok(AnalysisResult {
            readme_excerpt: readme_excerpt(&root),
            root,
            project_name,
            graph,
            entry_points,
        })
    }

    /// Parse all discovered files. Parsing runs in parallel purely as an
    /// optimization; the records are re-sorted into path order so the
    /// resolver always sees the same deterministic view.
    fn parse_files(&self, root: &Path, files: &[PathBuf]) -> Vec<FileRecord> {
        let progress = if self.verbose && !files.is_empty() {
            let pb = ProgressBar::new(files.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        let scan = &self.config.scan;
        let mut records: Vec<FileRecord> = files
            .par_iter()
            .map_init(SourceParsers::new, |parsers, rel| {
                let record = match parsers.as_mut() {
                    Ok(parsers) => parsers.parse(root, rel, scan),
                    Err(_) => FileRecord::unreadable(rel.clone(), Language::Python),
                };
                if let Some(pb) = &progress {
                    pb.inc(1);
                }
                record
            })
            .collect();

        if let Some(pb) = progress {
            pb.finish_with_message("Parsing complete");
        }

        records.sort_by(|a, b| a.path.cmp(&b.path));
        records
    }
}

/// First lines of a root README file, for the report header
fn readme_excerpt(root: &Path) -> Option<String> {
    for name in ["README.md", "README.rst", "README.txt", "README"] {
        let candidate = root.join(name);
        if !candidate.is_file() {
            continue;
        }
        let text = std::fs::read_to_string(&candidate).ok()?;
        let excerpt: Vec<&str> = text.lines().take(20).collect();
        let excerpt = excerpt.join("\n").trim().to_string();
        if excerpt.is_empty() {
            return None;
        }
        return Some(excerpt);
    }
    None
}
