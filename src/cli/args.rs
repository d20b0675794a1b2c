//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Generate a structured markdown map of a codebase
#[derive(Parser, Debug)]
#[command(name = "codemap")]
#[command(about = "Generate a structured markdown map of a codebase")]
#[command(version)]
pub struct Args {
    /// Project directory to scan
    #[arg(default_value = ".")]
    pub root: PathBuf,

    /// Write the report to FILE instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Config file path (default: codemap.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Glob patterns to exclude (can be repeated)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Extension allow-list override (can be repeated)
    #[arg(long, value_name = "EXT")]
    pub ext: Vec<String>,

    /// Treat PATH (relative to the root) as an entry point (can be repeated)
    #[arg(long = "entry-point", value_name = "PATH")]
    pub entry_points: Vec<String>,

    /// Maximum directory depth for the scan
    #[arg(short = 'd', long, value_name = "N")]
    pub max_depth: Option<usize>,

    /// Maximum file size to parse, in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Include a Mermaid diagram in the dependency graph section
    #[arg(long)]
    pub mermaid: bool,

    /// Skip dependency graph analysis
    #[arg(long)]
    pub no_deps: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
