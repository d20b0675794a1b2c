// File discovery: walk the project root and collect candidate source files
//
// Output order is deterministic (lexicographic on the relative path) so the
// rest of the pipeline never depends on filesystem iteration order.

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use glob::Pattern;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directory names never worth scanning (dependency, build, and cache dirs)
const SKIP_DIRS: &[&str] = &[
    ".git",
    "__pycache__",
    "node_modules",
    ".venv",
    "venv",
    "env",
    "dist",
    "build",
    "target",
    "vendor",
    ".tox",
    ".mypy_cache",
    ".pytest_cache",
    "htmlcov",
    ".eggs",
    ".idea",
    ".vscode",
    "coverage",
    ".ruff_cache",
    "site-packages",
    "__pypackages__",
    ".nx",
];

/// Walk `root` and return the sorted relative paths of all files matching
/// the extension allow-list and not excluded by skip rules or ignore globs.
///
/// Unreadable subdirectories and symlink loops are logged to stderr and
/// skipped; only a nonexistent or non-directory root is fatal.
pub fn discover(root: &Path, scan: &ScanConfig) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(Error::NotADirectory(root.to_path_buf()));
    }

    let patterns: Vec<Pattern> = scan
        .exclude
        .iter()
        .map(|p| Pattern::new(p))
        .collect::<std::result::Result<_, _>>()?;

    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .max_depth(scan.max_depth)
        .into_iter()
        .filter_entry(|entry| keep_entry(entry, root, &patterns));

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                eprintln!("warning: skipping unreadable path: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let ext = match entry.path().extension().and_then(|e| e.to_str()) {
            Some(ext) => ext.to_lowercase(),
            None => continue,
        };
        if !scan.extensions.iter().any(|allowed| *allowed == ext) {
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_path_buf();

        if matches_any(&rel, &patterns) {
            continue;
        }

        files.push(rel);
    }

    files.sort();
    Ok(files)
}

/// Directory-level filtering: prune skip-list dirs, hidden entries, and
/// directories matched by an ignore glob.
fn keep_entry(entry: &DirEntry, root: &Path, patterns: &[Pattern]) -> bool {
    if entry.depth() == 0 {
        return true;
    }

    let name = entry.file_name().to_string_lossy();

    if name.starts_with('.') {
        return false;
    }

    if entry.file_type().is_dir() {
        if SKIP_DIRS.contains(&name.as_ref()) {
            return false;
        }
        let rel = entry.path().strip_prefix(root).unwrap_or(entry.path());
        if matches_any(rel, patterns) {
            return false;
        }
    }

    true
}

fn matches_any(rel: &Path, patterns: &[Pattern]) -> bool {
    let rel_str = rel.to_string_lossy();
    patterns.iter().any(|p| p.matches(&rel_str))
}
