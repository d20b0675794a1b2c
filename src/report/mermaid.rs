// Mermaid diagram generation for the dependency section

use crate::analysis::{Confidence, ProjectGraph};

/// Generate a Mermaid flowchart of resolved edges, or None when the graph
/// has no internal dependencies to draw.
pub fn dependency_diagram(graph: &ProjectGraph) -> Option<String> {
    let mut pairs: Vec<(String, String)> = graph
        .edges()
        .iter()
        .filter(|e| e.confidence == Confidence::Resolved)
        .filter_map(|e| {
            let source = graph.file(e.source)?;
            let target = graph.file(e.target?)?;
            Some((
                source.path.to_string_lossy().to_string(),
                target.path.to_string_lossy().to_string(),
            ))
        })
        .collect();

    if pairs.is_empty() {
        return None;
    }

    pairs.sort();
    pairs.dedup();

    let mut lines = vec!["graph TD".to_string()];
    for (source, target) in &pairs {
        lines.push(format!(
            "    {}[\"{}\"] --> {}[\"{}\"]",
            sanitize_id(source),
            stem_of(source),
            sanitize_id(target),
            stem_of(target)
        ));
    }

    Some(lines.join("\n"))
}

/// Sanitize a path for use as a Mermaid node ID
fn sanitize_id(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}

/// Short display label: file name without extension
fn stem_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.')
        .map(|(stem, _)| stem.to_string())
        .unwrap_or_else(|| name.to_string())
}
