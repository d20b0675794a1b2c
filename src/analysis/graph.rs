// Project graph: file records plus resolved dependency edges

use crate::parser::{FileRecord, ParseStatus};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Unique identifier for a file in the graph (index into the sorted record list)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// Confidence of a dependency edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Target is a project file, identified with certainty
    Resolved,
    /// Target is a known standard-library or third-party name
    External,
    /// Syntactically an import, but no matching project file or known
    /// external name was found
    Unresolved,
}

/// A dependency edge from an importing file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DepEdge {
    /// Importing file
    pub source: FileId,
    /// Target file; present exactly when confidence is `Resolved`
    pub target: Option<FileId>,
    /// The importable name as matched (resolved) or classified
    /// (external/unresolved)
    pub name: String,
    /// Edge confidence
    pub confidence: Confidence,
}

impl DepEdge {
    pub fn resolved(source: FileId, target: FileId, name: &str) -> Self {
        Self {
            source,
            target: Some(target),
            name: name.to_string(),
            confidence: Confidence::Resolved,
        }
    }

    pub fn external(source: FileId, name: &str) -> Self {
        Self {
            source,
            target: None,
            name: name.to_string(),
            confidence: Confidence::External,
        }
    }

    pub fn unresolved(source: FileId, name: &str) -> Self {
        Self {
            source,
            target: None,
            name: name.to_string(),
            confidence: Confidence::Unresolved,
        }
    }
}

/// The project graph: all file records plus deduplicated dependency edges.
///
/// Records are stored in deterministic path order; `FileId` is the index
/// into that order. Cycles between files are valid and preserved.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ProjectGraph {
    files: Vec<FileRecord>,
    edges: Vec<DepEdge>,
    #[serde(skip)]
    path_index: HashMap<PathBuf, FileId>,
}

impl ProjectGraph {
    /// Build a graph from records already sorted by path
    pub fn new(files: Vec<FileRecord>) -> Self {
        let path_index = files
            .iter()
            .enumerate()
            .map(|(i, record)| (record.path.clone(), FileId(i)))
            .collect();
        Self {
            files,
            edges: Vec::new(),
            path_index,
        }
    }

    /// Attach resolved edges (already deduplicated by the resolver)
    pub fn set_edges(&mut self, edges: Vec<DepEdge>) {
        self.edges = edges;
    }

    pub fn file(&self, id: FileId) -> Option<&FileRecord> {
        self.files.get(id.0)
    }

    pub fn file_by_path(&self, path: &Path) -> Option<FileId> {
        self.path_index.get(path).copied()
    }

    pub fn files(&self) -> impl Iterator<Item = (FileId, &FileRecord)> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, record)| (FileId(i), record))
    }

    pub fn edges(&self) -> &[DepEdge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Files that `id` imports via resolved edges
    pub fn imports_of(&self, id: FileId) -> Vec<FileId> {
        self.edges
            .iter()
            .filter(|e| e.source == id && e.confidence == Confidence::Resolved)
            .filter_map(|e| e.target)
            .collect()
    }

    /// Files that import `id` via resolved edges
    pub fn imported_by(&self, id: FileId) -> Vec<FileId> {
        self.edges
            .iter()
            .filter(|e| e.target == Some(id) && e.confidence == Confidence::Resolved)
            .map(|e| e.source)
            .collect()
    }

    /// Summary counts over records and edges
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            files: self.files.len(),
            ..GraphStats::default()
        };
        for record in &self.files {
            match record.status {
                ParseStatus::Ok => stats.parsed_ok += 1,
                ParseStatus::SyntaxError => stats.syntax_errors += 1,
                ParseStatus::Unreadable => stats.unreadable += 1,
            }
        }
        for edge in &self.edges {
            match edge.confidence {
                Confidence::Resolved => stats.resolved_edges += 1,
                Confidence::External => stats.external_edges += 1,
                Confidence::Unresolved => stats.unresolved_edges += 1,
            }
        }
        stats
    }
}

/// Statistics about the project graph
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub files: usize,
    pub parsed_ok: usize,
    pub syntax_errors: usize,
    pub unreadable: usize,
    pub resolved_edges: usize,
    pub external_edges: usize,
    pub unresolved_edges: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Language;
    use std::path::PathBuf;

    fn record(path: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(path), Language::Python)
    }

    #[test]
    fn test_empty_graph() {
        let graph = ProjectGraph::default();
        assert!(graph.is_empty());
        assert_eq!(graph.stats().files, 0);
    }

    #[test]
    fn test_file_lookup() {
        let graph = ProjectGraph::new(vec![record("a.py"), record("b.py")]);
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.file_by_path(Path::new("b.py")), Some(FileId(1)));
        assert_eq!(graph.file(FileId(0)).unwrap().path, PathBuf::from("a.py"));
        assert_eq!(graph.file_by_path(Path::new("c.py")), None);
    }

    #[test]
    fn test_imports_of_and_imported_by() {
        let mut graph = ProjectGraph::new(vec![record("a.py"), record("b.py")]);
        graph.set_edges(vec![DepEdge::resolved(FileId(0), FileId(1), "b")]);

        assert_eq!(graph.imports_of(FileId(0)), vec![FileId(1)]);
        assert_eq!(graph.imported_by(FileId(1)), vec![FileId(0)]);
        assert!(graph.imports_of(FileId(1)).is_empty());
    }

    #[test]
    fn test_cycle_preserved() {
        let mut graph = ProjectGraph::new(vec![record("a.py"), record("b.py")]);
        graph.set_edges(vec![
            DepEdge::resolved(FileId(0), FileId(1), "b"),
            DepEdge::resolved(FileId(1), FileId(0), "a"),
        ]);

        assert_eq!(graph.imports_of(FileId(0)), vec![FileId(1)]);
        assert_eq!(graph.imports_of(FileId(1)), vec![FileId(0)]);
        assert_eq!(graph.stats().resolved_edges, 2);
    }

    #[test]
    fn test_stats_by_status() {
        let mut bad = record("bad.py");
        bad.status = ParseStatus::SyntaxError;
        let mut bin = record("bin.py");
        bin.status = ParseStatus::Unreadable;

        let mut graph = ProjectGraph::new(vec![record("a.py"), bad, bin]);
        graph.set_edges(vec![
            DepEdge::external(FileId(0), "os"),
            DepEdge::unresolved(FileId(0), "ghost"),
        ]);

        let stats = graph.stats();
        assert_eq!(stats.files, 3);
        assert_eq!(stats.parsed_ok, 1);
        assert_eq!(stats.syntax_errors, 1);
        assert_eq!(stats.unreadable, 1);
        assert_eq!(stats.external_edges, 1);
        assert_eq!(stats.unresolved_edges, 1);
    }

    #[test]
    fn test_edge_constructors() {
        let edge = DepEdge::resolved(FileId(0), FileId(1), "pkg.mod");
        assert_eq!(edge.confidence, Confidence::Resolved);
        assert_eq!(edge.target, Some(FileId(1)));

        let ext = DepEdge::external(FileId(0), "os");
        assert_eq!(ext.confidence, Confidence::External);
        assert!(ext.target.is_none());
    }
}
