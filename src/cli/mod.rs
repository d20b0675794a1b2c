//! CLI module for codemap

mod args;

pub use args::Args;

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::error::Result;
use crate::report::ReportRenderer;
use std::path::Path;
use std::process::ExitCode;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Execute a parsed invocation: load config, analyze, render, write.
pub fn execute(args: Args) -> Result<()> {
    // Load config file if given, otherwise pick up codemap.toml when present
    let mut config = if let Some(config_path) = &args.config {
        Config::load(config_path)?
    } else {
        Config::load_or_default(Path::new("codemap.toml"))
    };

    config.merge_cli(
        args.output.clone(),
        args.exclude,
        args.ext,
        args.entry_points,
        args.max_depth,
        args.max_file_size,
        args.mermaid,
        args.no_deps,
    );
    config.validate()?;

    if args.verbose {
        eprintln!("Scanning: {}", args.root.display());
        eprintln!("Extensions: {:?}", config.scan.extensions);
        if !config.scan.exclude.is_empty() {
            eprintln!("Excludes: {:?}", config.scan.exclude);
        }
    }

    let output_path = config.output.path.clone();
    let renderer = ReportRenderer::new(&config.output);

    let analyzer = Analyzer::new(config)?.with_verbose(args.verbose);
    let analysis = analyzer.analyze(&args.root)?;

    if args.verbose {
        let stats = analysis.graph.stats();
        eprintln!(
            "Analyzed {} files ({} parsed, {} syntax errors, {} unreadable)",
            stats.files, stats.parsed_ok, stats.syntax_errors, stats.unreadable
        );
        eprintln!(
            "Edges: {} resolved, {} external, {} unresolved",
            stats.resolved_edges, stats.external_edges, stats.unresolved_edges
        );
    }

    let report = renderer.render(&analysis);

    match output_path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)?;
                }
            }
            std::fs::write(&path, &report)?;
            eprintln!("Map written to: {}", path.display());
        }
        None => {
            print!("{}", report);
        }
    }

    Ok(())
}
