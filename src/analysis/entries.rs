// Entry point detection
//
// An entry point is a file identified as directly executable rather than
// purely library code: a Python main guard, a canonical entry filename,
// a package.json main/bin target, or a path declared in configuration.

use crate::analysis::graph::ProjectGraph;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Filenames that conventionally mark an executable entry point
const ENTRY_POINT_NAMES: &[&str] = &[
    "main.py",
    "__main__.py",
    "app.py",
    "run.py",
    "cli.py",
    "manage.py",
    "server.py",
    "wsgi.py",
    "asgi.py",
    "index.js",
    "index.ts",
    "app.js",
    "server.js",
    "main.js",
    "main.ts",
];

/// How an entry point was identified
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    /// Declared in configuration
    Declared,
    /// Python file with a `__main__` guard
    Script,
    /// Canonical entry-point filename
    Named,
    /// package.json `main` target
    NodeMain,
    /// package.json `bin` target
    CliBinary,
}

impl EntryKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Declared => "declared",
            Self::Script => "script",
            Self::Named => "named",
            Self::NodeMain => "node-main",
            Self::CliBinary => "cli-binary",
        }
    }
}

/// A detected entry point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPoint {
    /// Path relative to project root
    pub path: PathBuf,
    /// How it was identified
    pub kind: EntryKind,
    /// Human-readable justification for the report
    pub reason: String,
}

/// Detect entry points over the scanned files, deterministically ordered
/// by (kind, path). The first detection of a path wins.
pub fn detect_entry_points(
    root: &Path,
    graph: &ProjectGraph,
    declared: &[String],
) -> Vec<EntryPoint> {
    let mut seen: HashSet<PathBuf> = HashSet::new();
    let mut entries = Vec::new();

    let mut add = |path: PathBuf, kind: EntryKind, reason: String, entries: &mut Vec<EntryPoint>| {
        if seen.insert(path.clone()) {
            entries.push(EntryPoint { path, kind, reason });
        }
    };

    // Explicitly declared paths take precedence over any detection
    for declared_path in declared {
        let path = PathBuf::from(declared_path);
        add(
            path,
            EntryKind::Declared,
            "listed in scan.entry_points".to_string(),
            &mut entries,
        );
    }

    for (_, record) in graph.files() {
        if record.has_main_guard {
            add(
                record.path.clone(),
                EntryKind::Script,
                "contains `if __name__ == \"__main__\"` guard".to_string(),
                &mut entries,
            );
        }

        if let Some(name) = record.path.file_name().and_then(|n| n.to_str()) {
            if ENTRY_POINT_NAMES.contains(&name) {
                add(
                    record.path.clone(),
                    EntryKind::Named,
                    format!("canonical entry-point filename `{}`", name),
                    &mut entries,
                );
            }
        }
    }

    for (path, kind, reason) in package_json_entries(root, graph) {
        add(path, kind, reason, &mut entries);
    }

    entries.sort_by(|a, b| (a.kind, &a.path).cmp(&(b.kind, &b.path)));
    entries
}

/// Entry points declared by a root package.json (`main` and `bin` fields);
/// only targets that were actually scanned are reported.
fn package_json_entries(
    root: &Path,
    graph: &ProjectGraph,
) -> Vec<(PathBuf, EntryKind, String)> {
    let mut out = Vec::new();

    let text = match std::fs::read_to_string(root.join("package.json")) {
        Ok(text) => text,
        Err(_) => return out,
    };
    let value: serde_json::Value = match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(_) => return out,
    };

    if let Some(main) = value.get("main").and_then(|m| m.as_str()) {
        let path = PathBuf::from(main.trim_start_matches("./"));
        if graph.file_by_path(&path).is_some() {
            out.push((
                path,
                EntryKind::NodeMain,
                "referenced as `main` in package.json".to_string(),
            ));
        }
    }

    match value.get("bin") {
        Some(serde_json::Value::Object(bins)) => {
            for (bin_name, bin_path) in bins {
                if let Some(bin_path) = bin_path.as_str() {
                    let path = PathBuf::from(bin_path.trim_start_matches("./"));
                    if graph.file_by_path(&path).is_some() {
                        out.push((
                            path,
                            EntryKind::CliBinary,
                            format!("npm bin `{}`", bin_name),
                        ));
                    }
                }
            }
        }
        Some(serde_json::Value::String(bin_path)) => {
            let path = PathBuf::from(bin_path.trim_start_matches("./"));
            if graph.file_by_path(&path).is_some() {
                out.push((
                    path,
                    EntryKind::CliBinary,
                    "npm bin target".to_string(),
                ));
            }
        }
        _ => {}
    }

    out
}
