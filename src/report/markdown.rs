// Markdown report assembly
//
// Section order is fixed: Title, File Tree, Module Descriptions,
// Entry Points, Dependency Graph. Every list is sorted so that the same
// input data always renders byte-identical output.

use crate::analysis::{AnalysisResult, Confidence, ProjectGraph};
use crate::config::OutputConfig;
use crate::parser::ParseStatus;
use crate::report::{mermaid, tree};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Renders one AnalysisResult into a markdown document
pub struct ReportRenderer {
    mermaid: bool,
    include_deps: bool,
}

impl ReportRenderer {
    pub fn new(output: &OutputConfig) -> Self {
        Self {
            mermaid: output.mermaid,
            include_deps: output.include_deps,
        }
    }

    /// Produce the full report
    pub fn render(&self, analysis: &AnalysisResult) -> String {
        let mut lines: Vec<String> = Vec::new();

        self.render_title(analysis, &mut lines);
        self.render_file_tree(analysis, &mut lines);
        self.render_module_descriptions(analysis, &mut lines);
        self.render_entry_points(analysis, &mut lines);
        if self.include_deps {
            self.render_dependency_graph(&analysis.graph, &mut lines);
        }

        let mut report = lines.join("\n");
        report.push('\n');
        report
    }

    fn render_title(&self, analysis: &AnalysisResult, lines: &mut Vec<String>) {
        let stats = analysis.graph.stats();
        let failures = stats.syntax_errors + stats.unreadable;

        lines.push(format!("# Codebase Map: `{}`", analysis.project_name));
        lines.push(String::new());
        lines.push(format!(
            "> Generated by codemap | Files scanned: {} | Parse failures: {}",
            stats.files, failures
        ));
        lines.push(String::new());

        if let Some(excerpt) = &analysis.readme_excerpt {
            lines.push("### README Excerpt".to_string());
            lines.push(String::new());
            lines.push("```".to_string());
            lines.push(excerpt.clone());
            lines.push("```".to_string());
            lines.push(String::new());
        }
    }

    fn render_file_tree(&self, analysis: &AnalysisResult, lines: &mut Vec<String>) {
        lines.push("## File Tree".to_string());
        lines.push(String::new());
        lines.push("```".to_string());
        lines.extend(tree::render_tree(
            &analysis.project_name,
            analysis.graph.files().map(|(_, r)| r.path.as_path()),
        ));
        lines.push("```".to_string());
        lines.push(String::new());
    }

    fn render_module_descriptions(&self, analysis: &AnalysisResult, lines: &mut Vec<String>) {
        lines.push("## Module Descriptions".to_string());
        lines.push(String::new());

        if analysis.graph.is_empty() {
            lines.push("_No files scanned._".to_string());
            lines.push(String::new());
            return;
        }

        // Group files by parent directory; BTreeMap keeps groups sorted
        let mut by_dir: BTreeMap<PathBuf, Vec<&crate::parser::FileRecord>> = BTreeMap::new();
        for (_, record) in analysis.graph.files() {
            let parent = record.path.parent().unwrap_or(Path::new("")).to_path_buf();
            by_dir.entry(parent).or_default().push(record);
        }

        for (dir, records) in by_dir {
            let label = if dir.as_os_str().is_empty() {
                format!("{}/", analysis.project_name)
            } else {
                format!("{}/", dir.display())
            };
            lines.push(format!("### `{}`", label));
            lines.push(String::new());

            for record in records {
                let name = record
                    .path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| record.path.display().to_string());
                let line = match (record.status, &record.description) {
                    (ParseStatus::SyntaxError, _) => format!(
                        "- **`{}`** - _syntax error: imports and definitions unavailable_",
                        name
                    ),
                    (ParseStatus::Unreadable, _) => {
                        format!("- **`{}`** - _unreadable or binary file_", name)
                    }
                    (ParseStatus::Ok, Some(description)) => {
                        format!("- **`{}`** - {}", name, description)
                    }
                    (ParseStatus::Ok, None) => format!("- **`{}`**", name),
                };
                lines.push(line);
            }
            lines.push(String::new());
        }
    }

    fn render_entry_points(&self, analysis: &AnalysisResult, lines: &mut Vec<String>) {
        lines.push("## Entry Points".to_string());
        lines.push(String::new());

        if analysis.entry_points.is_empty() {
            lines.push("_No entry points detected._".to_string());
        } else {
            for entry in &analysis.entry_points {
                lines.push(format!(
                    "- **`{}`** `[{}]` - {}",
                    entry.path.display(),
                    entry.kind.label(),
                    entry.reason
                ));
            }
        }
        lines.push(String::new());
    }

    fn render_dependency_graph(&self, graph: &ProjectGraph, lines: &mut Vec<String>) {
        lines.push("## Dependency Graph".to_string());
        lines.push(String::new());

        if graph.edges().is_empty() {
            lines.push("_No dependency information extracted._".to_string());
            lines.push(String::new());
            return;
        }

        self.render_external(graph, lines);
        self.render_internal(graph, lines);
        self.render_unresolved(graph, lines);

        if self.mermaid {
            if let Some(diagram) = mermaid::dependency_diagram(graph) {
                lines.push("### Dependency Diagram".to_string());
                lines.push(String::new());
                lines.push("```mermaid".to_string());
                lines.push(diagram);
                lines.push("```".to_string());
                lines.push(String::new());
            }
        }
    }

    fn render_external(&self, graph: &ProjectGraph, lines: &mut Vec<String>) {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for edge in graph.edges() {
            if edge.confidence == Confidence::External {
                *counts.entry(edge.name.as_str()).or_default() += 1;
            }
        }
        if counts.is_empty() {
            return;
        }

        lines.push("### External Dependencies".to_string());
        lines.push(String::new());

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

        for (name, count) in ranked {
            let plural = if count == 1 { "file" } else { "files" };
            lines.push(format!("- `{}` (imported in {} {})", name, count, plural));
        }
        lines.push(String::new());
    }

    fn render_internal(&self, graph: &ProjectGraph, lines: &mut Vec<String>) {
        lines.push("### Internal Dependencies".to_string());
        lines.push(String::new());

        // source path -> sorted target paths
        let mut by_source: BTreeMap<PathBuf, Vec<String>> = BTreeMap::new();
        for edge in graph.edges() {
            if edge.confidence != Confidence::Resolved {
                continue;
            }
            let (Some(source), Some(target)) =
                (graph.file(edge.source), edge.target.and_then(|t| graph.file(t)))
            else {
                continue;
            };
            by_source
                .entry(source.path.clone())
                .or_default()
                .push(format!("`{}`", target.path.display()));
        }

        if by_source.is_empty() {
            lines.push("_No internal dependencies detected._".to_string());
            lines.push(String::new());
            return;
        }

        for (source, mut targets) in by_source {
            targets.sort();
            lines.push(format!(
                "- **`{}`** imports: {}",
                source.display(),
                targets.join(", ")
            ));
        }
        lines.push(String::new());
    }

    fn render_unresolved(&self, graph: &ProjectGraph, lines: &mut Vec<String>) {
        let mut gaps: Vec<(PathBuf, &str)> = graph
            .edges()
            .iter()
            .filter(|e| e.confidence == Confidence::Unresolved)
            .filter_map(|e| {
                graph
                    .file(e.source)
                    .map(|record| (record.path.clone(), e.name.as_str()))
            })
            .collect();
        if gaps.is_empty() {
            return;
        }
        gaps.sort();

        lines.push("### Unresolved Imports".to_string());
        lines.push(String::new());
        lines.push(
            "These imports match no project file and no known external \
             package; imports constructed at runtime are statically \
             unresolvable and always land here."
                .to_string(),
        );
        lines.push(String::new());

        for (source, name) in gaps {
            lines.push(format!("- **`{}`** - `{}`", source.display(), name));
        }
        lines.push(String::new());
    }
}
