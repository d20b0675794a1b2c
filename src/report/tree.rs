// ASCII file tree rendering
//
// Directories sort before files; both sort alphabetically
// (case-insensitive, raw name as tiebreak) for stable output.

use std::collections::BTreeMap;
use std::path::Path;

#[derive(Default)]
struct TreeNode {
    dirs: BTreeMap<String, TreeNode>,
    files: Vec<String>,
}

impl TreeNode {
    fn insert(&mut self, components: &[String]) {
        match components {
            [] => {}
            [file] => self.files.push(file.clone()),
            [dir, rest @ ..] => self
                .dirs
                .entry(dir.clone())
                .or_default()
                .insert(rest),
        }
    }
}

/// Render the discovered files as an ASCII tree rooted at the project name
pub fn render_tree<'a>(project_name: &str, paths: impl Iterator<Item = &'a Path>) -> Vec<String> {
    let mut root = TreeNode::default();
    for path in paths {
        let components: Vec<String> = path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .map(|s| s.to_string())
            .collect();
        root.insert(&components);
    }

    let mut lines = vec![format!("{}/", project_name)];
    render_node(&root, "", &mut lines);
    lines
}

fn render_node(node: &TreeNode, prefix: &str, lines: &mut Vec<String>) {
    let mut dir_names: Vec<&String> = node.dirs.keys().collect();
    dir_names.sort_by_key(|name| (name.to_lowercase(), (*name).clone()));

    let mut file_names: Vec<&String> = node.files.iter().collect();
    file_names.sort_by_key(|name| (name.to_lowercase(), (*name).clone()));

    let total = dir_names.len() + file_names.len();
    let mut index = 0;

    for name in &dir_names {
        let is_last = index == total - 1;
        let connector = if is_last { "└── " } else { "├── " };
        let extension = if is_last { "    " } else { "│   " };

        lines.push(format!("{}{}{}", prefix, connector, name));
        if let Some(child) = node.dirs.get(*name) {
            render_node(child, &format!("{}{}", prefix, extension), lines);
        }
        index += 1;
    }

    for name in &file_names {
        let is_last = index == total - 1;
        let connector = if is_last { "└── " } else { "├── " };

        lines.push(format!("{}{}{}", prefix, connector, name));
        index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn render(paths: &[&str]) -> Vec<String> {
        let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
        render_tree("demo", paths.iter().map(|p| p.as_path()))
    }

    #[test]
    fn test_empty_tree() {
        let lines = render(&[]);
        assert_eq!(lines, vec!["demo/"]);
    }

    #[test]
    fn test_flat_files() {
        let lines = render(&["b.py", "a.py"]);
        assert_eq!(lines, vec!["demo/", "├── a.py", "└── b.py"]);
    }

    #[test]
    fn test_dirs_before_files() {
        let lines = render(&["zz.py", "aaa/x.py"]);
        assert_eq!(
            lines,
            vec!["demo/", "├── aaa", "│   └── x.py", "└── zz.py"]
        );
    }

    #[test]
    fn test_nested_prefixes() {
        let lines = render(&["pkg/sub/deep.py", "pkg/top.py", "main.py"]);
        assert_eq!(
            lines,
            vec![
                "demo/",
                "├── pkg",
                "│   ├── sub",
                "│   │   └── deep.py",
                "│   └── top.py",
                "└── main.py",
            ]
        );
    }

    #[test]
    fn test_case_insensitive_order() {
        let lines = render(&["Beta.py", "alpha.py"]);
        assert_eq!(lines, vec!["demo/", "├── alpha.py", "└── Beta.py"]);
    }

    #[test]
    fn test_deterministic() {
        let first = render(&["a.py", "b/c.py", "b/d.py"]);
        let second = render(&["b/d.py", "a.py", "b/c.py"]);
        assert_eq!(first, second);
    }
}
