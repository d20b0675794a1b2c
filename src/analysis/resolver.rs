// Import resolution: turn raw import statements into dependency edges
//
// The resolver builds a lookup index of every importable name a project
// file could be referred to by, then classifies each import as
// resolved (project-internal), external (stdlib/declared third-party),
// or unresolved. The index is consulted before external patterns, so a
// project file named like a stdlib module shadows it.
//
// Collision policy: when two files claim the same importable name, the
// shallower path wins; ties break by lexicographic relative-path order.

use crate::analysis::graph::{DepEdge, FileId};
use crate::parser::{FileRecord, Import, ImportKind, Language};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Extensions probed when a JS/TS specifier omits one
const JS_EXTENSIONS: &[&str] = &["js", "jsx", "mjs", "cjs", "ts", "tsx"];

/// Resolves import statements against the discovered project files
pub struct ImportResolver {
    /// Dotted importable name -> file (Python modules, incl. suffix aliases)
    module_index: HashMap<String, FileId>,
    /// Exact relative path (slash-joined, with extension) -> file
    path_index: HashMap<String, FileId>,
    /// Extension-less relative path and `index.*` directory aliases -> file
    js_index: HashMap<String, FileId>,
    /// Python standard-library top-level module names
    python_stdlib: HashSet<&'static str>,
    /// Node.js built-in module names
    node_builtins: HashSet<&'static str>,
    /// Third-party names declared in project manifests
    third_party: HashSet<String>,
}

impl ImportResolver {
    /// Build the lookup index from records sorted by path.
    ///
    /// Every record is indexed regardless of parse status: a file with a
    /// syntax error is still a real import target.
    pub fn build(files: &[FileRecord]) -> Self {
        let mut resolver = Self {
            module_index: HashMap::new(),
            path_index: HashMap::new(),
            js_index: HashMap::new(),
            python_stdlib: python_stdlib_modules(),
            node_builtins: node_builtin_modules(),
            third_party: HashSet::new(),
        };

        for (i, record) in files.iter().enumerate() {
            let id = FileId(i);
            let slash_path = slash_join(&record.path);
            insert_preferring(&mut resolver.path_index, slash_path.clone(), id, files);

            match record.language {
                Language::Python => {
                    if let Some(parts) = python_module_parts(&record.path) {
                        // Register every dotted suffix so imports resolve
                        // even when the import root is a subdirectory.
                        for start in 0..parts.len() {
                            let name = parts[start..].join(".");
                            insert_preferring(&mut resolver.module_index, name, id, files);
                        }
                    }
                }
                Language::JavaScript | Language::TypeScript => {
                    if let Some(stem_path) = strip_known_extension(&slash_path) {
                        insert_preferring(&mut resolver.js_index, stem_path.clone(), id, files);
                        if let Some(dir) = stem_path.strip_suffix("/index") {
                            insert_preferring(&mut resolver.js_index, dir.to_string(), id, files);
                        }
                    }
                }
            }
        }

        resolver
    }

    /// Add third-party names (from manifests or callers)
    pub fn add_third_party(&mut self, modules: impl IntoIterator<Item = String>) {
        for module in modules {
            let lower = module.to_lowercase();
            self.third_party.insert(lower.replace('-', "_"));
            self.third_party.insert(lower);
        }
    }

    /// Collect dependency names declared in `requirements.txt`,
    /// `pyproject.toml`, and `package.json` at the project root.
    /// Best-effort: unreadable or malformed manifests contribute nothing.
    pub fn declared_dependencies(root: &Path) -> Vec<String> {
        let mut deps = Vec::new();

        if let Ok(text) = std::fs::read_to_string(root.join("requirements.txt")) {
            for line in text.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
                    continue;
                }
                if let Some(name) = requirement_name(line) {
                    deps.push(name);
                }
            }
        }

        if let Ok(text) = std::fs::read_to_string(root.join("pyproject.toml")) {
            if let Ok(value) = text.parse::<toml::Value>() {
                let listed = value
                    .get("project")
                    .and_then(|p| p.get("dependencies"))
                    .and_then(|d| d.as_array());
                if let Some(listed) = listed {
                    for dep in listed {
                        if let Some(name) = dep.as_str().and_then(requirement_name) {
                            deps.push(name);
                        }
                    }
                }
            }
        }

        if let Ok(text) = std::fs::read_to_string(root.join("package.json")) {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) {
                for section in ["dependencies", "devDependencies"] {
                    if let Some(map) = value.get(section).and_then(|d| d.as_object()) {
                        deps.extend(map.keys().cloned());
                    }
                }
            }
        }

        deps
    }

    /// Resolve every import of every record into deduplicated edges.
    ///
    /// Edges are deduplicated per (source, target file) for resolved
    /// imports and per (source, name) otherwise; self-edges are dropped.
    pub fn resolve_all(&self, files: &[FileRecord]) -> Vec<DepEdge> {
        let mut edges = Vec::new();
        let mut seen: HashSet<(FileId, EdgeKey)> = HashSet::new();

        for (i, record) in files.iter().enumerate() {
            let source = FileId(i);
            for import in &record.imports {
                for edge in self.resolve_import(source, record, import) {
                    if edge.target == Some(source) {
                        continue;
                    }
                    let key = match edge.target {
                        Some(target) => EdgeKey::File(target),
                        None => EdgeKey::Name(edge.name.clone()),
                    };
                    if seen.insert((source, key)) {
                        edges.push(edge);
                    }
                }
            }
        }

        edges
    }

    /// Resolve one import statement (may yield several edges for
    /// `from . import a, b`)
    fn resolve_import(&self, source: FileId, record: &FileRecord, import: &Import) -> Vec<DepEdge> {
        match record.language {
            Language::Python => match import.kind {
                ImportKind::Relative { level } => {
                    self.resolve_python_relative(source, record, import, level)
                }
                _ => vec![self.resolve_python_absolute(source, &import.module)],
            },
            Language::JavaScript | Language::TypeScript => {
                vec![self.resolve_js(source, record, &import.module)]
            }
        }
    }

    /// Absolute Python import: longest-dotted-prefix lookup, then external
    /// classification, then unresolved.
    fn resolve_python_absolute(&self, source: FileId, name: &str) -> DepEdge {
        let parts: Vec<&str> = name.split('.').filter(|p| !p.is_empty()).collect();
        if parts.is_empty() {
            return DepEdge::unresolved(source, name);
        }

        for end in (1..=parts.len()).rev() {
            let candidate = parts[..end].join(".");
            if let Some(&id) = self.module_index.get(&candidate) {
                return DepEdge::resolved(source, id, &candidate);
            }
        }

        let top = parts[0];
        if self.python_stdlib.contains(top) || self.is_declared(top) {
            return DepEdge::external(source, top);
        }

        DepEdge::unresolved(source, name)
    }

    /// Relative Python import, anchored at the importing file's package
    fn resolve_python_relative(
        &self,
        source: FileId,
        record: &FileRecord,
        import: &Import,
        level: usize,
    ) -> Vec<DepEdge> {
        let mut base: Vec<String> = record
            .path
            .parent()
            .map(|p| {
                p.components()
                    .filter_map(|c| c.as_os_str().to_str())
                    .map(|s| s.to_string())
                    .collect()
            })
            .unwrap_or_default();

        // level 1 is the current package; each extra dot walks one up
        let ups = level.saturating_sub(1);
        if ups > base.len() {
            return vec![DepEdge::unresolved(source, &import.display_name())];
        }
        base.truncate(base.len() - ups);

        if import.module.is_empty() {
            // `from . import a, b`: each name may be a sibling module
            let mut out = Vec::new();
            for name in &import.names {
                let mut candidate = base.clone();
                candidate.push(name.name.clone());
                let dotted = candidate.join(".");
                if let Some(&id) = self.module_index.get(&dotted) {
                    out.push(DepEdge::resolved(source, id, &dotted));
                }
            }
            if out.is_empty() {
                let dotted = base.join(".");
                if let Some(&id) = self.module_index.get(&dotted) {
                    out.push(DepEdge::resolved(source, id, &dotted));
                } else {
                    out.push(DepEdge::unresolved(source, &import.display_name()));
                }
            }
            return out;
        }

        let mut candidate: Vec<String> = base.clone();
        candidate.extend(import.module.split('.').map(|s| s.to_string()));

        // Longest prefix, but never shorter than the anchored package plus
        // one component: a relative import cannot leave its anchor.
        let min_len = base.len() + 1;
        for end in (min_len..=candidate.len()).rev() {
            let dotted = candidate[..end].join(".");
            if let Some(&id) = self.module_index.get(&dotted) {
                return vec![DepEdge::resolved(source, id, &dotted)];
            }
        }

        vec![DepEdge::unresolved(source, &import.display_name())]
    }

    /// JS/TS specifier: relative specifiers resolve path-wise; bare
    /// specifiers are classified against builtins and declared packages.
    fn resolve_js(&self, source: FileId, record: &FileRecord, spec: &str) -> DepEdge {
        if spec.starts_with('.') {
            let dir: Vec<String> = record
                .path
                .parent()
                .map(|p| {
                    p.components()
                        .filter_map(|c| c.as_os_str().to_str())
                        .map(|s| s.to_string())
                        .collect()
                })
                .unwrap_or_default();

            return match normalize_path(&dir, spec) {
                Some(normalized) => match self.lookup_js(&normalized) {
                    Some(id) => DepEdge::resolved(source, id, &normalized),
                    None => DepEdge::unresolved(source, spec),
                },
                None => DepEdge::unresolved(source, spec),
            };
        }

        let bare = spec.strip_prefix("node:").unwrap_or(spec);
        let package = bare_package_name(bare);

        if spec.starts_with("node:") || self.node_builtins.contains(package.as_str()) {
            return DepEdge::external(source, &package);
        }
        if self.is_declared(&package) || package.starts_with('@') {
            return DepEdge::external(source, &package);
        }

        // tsconfig-style root-relative imports
        if let Some(id) = self.lookup_js(bare) {
            return DepEdge::resolved(source, id, bare);
        }

        DepEdge::unresolved(source, spec)
    }

    /// Probe a normalized project-relative path: exact, extension-less,
    /// then with a misdirected source extension stripped.
    fn lookup_js(&self, path: &str) -> Option<FileId> {
        if let Some(&id) = self.path_index.get(path) {
            return Some(id);
        }
        if let Some(&id) = self.js_index.get(path) {
            return Some(id);
        }
        if let Some(stripped) = strip_known_extension(path) {
            if let Some(&id) = self.js_index.get(&stripped) {
                return Some(id);
            }
        }
        None
    }

    fn is_declared(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.third_party.contains(&lower) || self.third_party.contains(&lower.replace('-', "_"))
    }
}

/// Dedup key: resolved edges collapse per target file, the rest per name
#[derive(PartialEq, Eq, Hash)]
enum EdgeKey {
    File(FileId),
    Name(String),
}

/// Insert under the collision policy: shallower path wins, lexicographic
/// relative-path order breaks ties.
fn insert_preferring(
    index: &mut HashMap<String, FileId>,
    name: String,
    id: FileId,
    files: &[FileRecord],
) {
    if name.is_empty() {
        return;
    }
    match index.get(&name) {
        Some(&existing) => {
            if prefers(&files[id.0], &files[existing.0]) {
                index.insert(name, id);
            }
        }
        None => {
            index.insert(name, id);
        }
    }
}

/// True when `a` should win an importable-name collision against `b`
fn prefers(a: &FileRecord, b: &FileRecord) -> bool {
    let depth_a = a.path.components().count();
    let depth_b = b.path.components().count();
    depth_a < depth_b || (depth_a == depth_b && a.path < b.path)
}

/// Dotted module parts for a Python file (`a/b/c.py` -> [a, b, c];
/// `a/b/__init__.py` -> [a, b])
fn python_module_parts(path: &Path) -> Option<Vec<String>> {
    if path.extension().and_then(|e| e.to_str()) != Some("py") {
        return None;
    }
    let mut parts: Vec<String> = path
        .components()
        .filter_map(|c| c.as_os_str().to_str())
        .map(|s| s.to_string())
        .collect();
    let last = parts.last_mut()?;
    *last = last.trim_end_matches(".py").to_string();
    if parts.last().map(|s| s.as_str()) == Some("__init__") {
        parts.pop();
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts)
    }
}

/// Join path components with forward slashes (stable across platforms)
fn slash_join(path: &Path) -> String {
    path.components()
        .filter_map(|c| c.as_os_str().to_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Strip a known JS/TS source extension, if present
fn strip_known_extension(path: &str) -> Option<String> {
    for ext in JS_EXTENSIONS {
        if let Some(stripped) = path.strip_suffix(&format!(".{}", ext)) {
            return Some(stripped.to_string());
        }
    }
    None
}

/// Resolve `./`/`../` segments of `spec` against `dir`; None when the
/// specifier escapes the project root.
fn normalize_path(dir: &[String], spec: &str) -> Option<String> {
    let mut parts: Vec<String> = dir.to_vec();
    for segment in spec.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other.to_string()),
        }
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Top-level package name of a bare specifier (`lodash/fp` -> `lodash`,
/// `@scope/pkg/util` -> `@scope/pkg`)
fn bare_package_name(spec: &str) -> String {
    let mut segments = spec.split('/');
    match segments.next() {
        Some(scope) if scope.starts_with('@') => match segments.next() {
            Some(name) => format!("{}/{}", scope, name),
            None => scope.to_string(),
        },
        Some(first) => first.to_string(),
        None => spec.to_string(),
    }
}

/// Python 3 standard-library top-level module names
fn python_stdlib_modules() -> HashSet<&'static str> {
    [
        "abc", "aifc", "argparse", "array", "ast", "asynchat", "asyncio", "asyncore", "atexit",
        "audioop", "base64", "bdb", "binascii", "binhex", "bisect", "builtins", "bz2", "calendar",
        "cgi", "cgitb", "chunk", "cmath", "cmd", "code", "codecs", "codeop", "collections",
        "colorsys", "compileall", "concurrent", "configparser", "contextlib", "contextvars",
        "copy", "copyreg", "cProfile", "crypt", "csv", "ctypes", "curses", "dataclasses",
        "datetime", "dbm", "decimal", "difflib", "dis", "distutils", "doctest", "email",
        "encodings", "enum", "errno", "faulthandler", "fcntl", "filecmp", "fileinput", "fnmatch",
        "fractions", "ftplib", "functools", "gc", "getopt", "getpass", "gettext", "glob",
        "graphlib", "grp", "gzip", "hashlib", "heapq", "hmac", "html", "http", "idlelib",
        "imaplib", "imghdr", "imp", "importlib", "inspect", "io", "ipaddress", "itertools",
        "json", "keyword", "lib2to3", "linecache", "locale", "logging", "lzma", "mailbox",
        "mailcap", "marshal", "math", "mimetypes", "mmap", "modulefinder", "multiprocessing",
        "netrc", "nis", "nntplib", "numbers", "operator", "optparse", "os", "ossaudiodev",
        "pathlib", "pdb", "pickle", "pickletools", "pipes", "pkgutil", "platform", "plistlib",
        "poplib", "posix", "posixpath", "pprint", "profile", "pstats", "pty", "pwd", "py_compile",
        "pyclbr", "pydoc", "queue", "quopri", "random", "re", "readline", "reprlib", "resource",
        "rlcompleter", "runpy", "sched", "secrets", "select", "selectors", "shelve", "shlex",
        "shutil", "signal", "site", "smtpd", "smtplib", "sndhdr", "socket", "socketserver",
        "spwd", "sqlite3", "ssl", "stat", "statistics", "string", "stringprep", "struct",
        "subprocess", "sunau", "symtable", "sys", "sysconfig", "syslog", "tabnanny", "tarfile",
        "telnetlib", "tempfile", "termios", "test", "textwrap", "threading", "time", "timeit",
        "tkinter", "token", "tokenize", "tomllib", "trace", "traceback", "tracemalloc", "tty",
        "turtle", "turtledemo", "types", "typing", "unicodedata", "unittest", "urllib", "uu",
        "uuid", "venv", "warnings", "wave", "weakref", "webbrowser", "winreg", "winsound",
        "wsgiref", "xdrlib", "xml", "xmlrpc", "zipapp", "zipfile", "zipimport", "zlib",
        "typing_extensions", "_thread", "__future__",
    ]
    .into_iter()
    .collect()
}

/// Node.js built-in module names
fn node_builtin_modules() -> HashSet<&'static str> {
    [
        "assert", "async_hooks", "buffer", "child_process", "cluster", "console", "constants",
        "crypto", "dgram", "diagnostics_channel", "dns", "domain", "events", "fs", "http",
        "http2", "https", "inspector", "module", "net", "os", "path", "perf_hooks", "process",
        "punycode", "querystring", "readline", "repl", "stream", "string_decoder", "timers",
        "tls", "trace_events", "tty", "url", "util", "v8", "vm", "worker_threads", "zlib",
    ]
    .into_iter()
    .collect()
}

/// Extract the distribution name from a PEP 508 requirement line
fn requirement_name(line: &str) -> Option<String> {
    let name: String = line
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '-' || *c == '_' || *c == '.')
        .collect();
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::graph::Confidence;
    use crate::parser::{Import, ImportedName};
    use std::path::PathBuf;

    fn py_record(path: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(path), Language::Python)
    }

    fn js_record(path: &str) -> FileRecord {
        FileRecord::new(PathBuf::from(path), Language::JavaScript)
    }

    fn sorted(mut files: Vec<FileRecord>) -> Vec<FileRecord> {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        files
    }

    #[test]
    fn test_absolute_resolution() {
        let files = sorted(vec![py_record("app.py"), py_record("util.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(0), "util");
        assert_eq!(edge.confidence, Confidence::Resolved);
        assert_eq!(files[edge.target.unwrap().0].path, PathBuf::from("util.py"));
    }

    #[test]
    fn test_longest_prefix_match() {
        // `from pkg.util import helper` names a symbol inside pkg/util.py
        let files = sorted(vec![py_record("pkg/__init__.py"), py_record("pkg/util.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(0), "pkg.util.helper");
        assert_eq!(edge.confidence, Confidence::Resolved);
        assert_eq!(edge.name, "pkg.util");
    }

    #[test]
    fn test_suffix_alias_resolution() {
        // import root is src/: `import util` should reach src/util.py
        let files = sorted(vec![py_record("src/app.py"), py_record("src/util.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(0), "util");
        assert_eq!(edge.confidence, Confidence::Resolved);
    }

    #[test]
    fn test_stdlib_external() {
        let files = sorted(vec![py_record("app.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(0), "os.path");
        assert_eq!(edge.confidence, Confidence::External);
        assert_eq!(edge.name, "os");
    }

    #[test]
    fn test_project_shadows_stdlib() {
        let files = sorted(vec![py_record("app.py"), py_record("json.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(0), "json");
        assert_eq!(edge.confidence, Confidence::Resolved);
    }

    #[test]
    fn test_declared_third_party_external() {
        let files = sorted(vec![py_record("app.py")]);
        let mut resolver = ImportResolver::build(&files);
        resolver.add_third_party(vec!["PyYAML".to_string(), "requests".to_string()]);

        let edge = resolver.resolve_python_absolute(FileId(0), "requests");
        assert_eq!(edge.confidence, Confidence::External);
    }

    #[test]
    fn test_unknown_name_unresolved() {
        let files = sorted(vec![py_record("app.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(0), "zzz_missing");
        assert_eq!(edge.confidence, Confidence::Unresolved);
        assert_eq!(edge.name, "zzz_missing");
    }

    #[test]
    fn test_collision_prefers_shallower_path() {
        let files = sorted(vec![py_record("util.py"), py_record("vendorized/util.py")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_python_absolute(FileId(1), "util");
        assert_eq!(files[edge.target.unwrap().0].path, PathBuf::from("util.py"));
    }

    #[test]
    fn test_collision_tie_breaks_lexicographic() {
        let files = sorted(vec![py_record("alpha/util.py"), py_record("beta/util.py")]);
        let resolver = ImportResolver::build(&files);

        // both claim the suffix name "util" at equal depth
        let edge = resolver.resolve_python_absolute(FileId(1), "util");
        assert_eq!(
            files[edge.target.unwrap().0].path,
            PathBuf::from("alpha/util.py")
        );
    }

    #[test]
    fn test_relative_same_package() {
        let files = sorted(vec![py_record("pkg/main.py"), py_record("pkg/util.py")]);
        let resolver = ImportResolver::build(&files);

        let import = Import::relative("util", vec![ImportedName::new("helper")], 1, 1);
        let edges = resolver.resolve_python_relative(FileId(0), &files[0], &import, 1);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].confidence, Confidence::Resolved);
        assert_eq!(
            files[edges[0].target.unwrap().0].path,
            PathBuf::from("pkg/util.py")
        );
    }

    #[test]
    fn test_relative_parent_package() {
        let files = sorted(vec![py_record("pkg/sub/deep.py"), py_record("pkg/util.py")]);
        let resolver = ImportResolver::build(&files);

        // from ..util import helper (inside pkg/sub/deep.py)
        let import = Import::relative("util", vec![ImportedName::new("helper")], 2, 1);
        let edges = resolver.resolve_python_relative(FileId(0), &files[0], &import, 2);
        assert_eq!(edges[0].confidence, Confidence::Resolved);
        assert_eq!(
            files[edges[0].target.unwrap().0].path,
            PathBuf::from("pkg/util.py")
        );
    }

    #[test]
    fn test_relative_bare_import_names() {
        let files = sorted(vec![
            py_record("pkg/__init__.py"),
            py_record("pkg/a.py"),
            py_record("pkg/b.py"),
        ]);
        let resolver = ImportResolver::build(&files);

        // from . import a, b (inside pkg/b.py)
        let b_id = FileId(2);
        let import = Import::relative(
            "",
            vec![ImportedName::new("a"), ImportedName::new("b")],
            1,
            1,
        );
        let edges = resolver.resolve_python_relative(b_id, &files[2], &import, 1);
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.confidence == Confidence::Resolved));
    }

    #[test]
    fn test_relative_escapes_root() {
        let files = sorted(vec![py_record("top.py")]);
        let resolver = ImportResolver::build(&files);

        let import = Import::relative("ghost", vec![], 3, 1);
        let edges = resolver.resolve_python_relative(FileId(0), &files[0], &import, 3);
        assert_eq!(edges[0].confidence, Confidence::Unresolved);
        assert_eq!(edges[0].name, "...ghost");
    }

    #[test]
    fn test_js_relative_resolution() {
        let files = sorted(vec![js_record("src/app.js"), js_record("src/util.js")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_js(FileId(0), &files[0], "./util");
        assert_eq!(edge.confidence, Confidence::Resolved);
        assert_eq!(edge.name, "src/util");
    }

    #[test]
    fn test_js_index_alias() {
        let files = sorted(vec![js_record("src/app.js"), js_record("src/lib/index.js")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_js(FileId(0), &files[0], "./lib");
        assert_eq!(edge.confidence, Confidence::Resolved);
    }

    #[test]
    fn test_js_extension_mismatch() {
        // TS ESM style: import "./util.js" resolving to util.ts
        let files = sorted(vec![js_record("src/app.ts"), {
            FileRecord::new(PathBuf::from("src/util.ts"), Language::TypeScript)
        }]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_js(FileId(0), &files[0], "./util.js");
        assert_eq!(edge.confidence, Confidence::Resolved);
    }

    #[test]
    fn test_js_builtin_external() {
        let files = sorted(vec![js_record("app.js")]);
        let resolver = ImportResolver::build(&files);

        assert_eq!(
            resolver.resolve_js(FileId(0), &files[0], "fs").confidence,
            Confidence::External
        );
        assert_eq!(
            resolver
                .resolve_js(FileId(0), &files[0], "node:path")
                .confidence,
            Confidence::External
        );
    }

    #[test]
    fn test_js_scoped_package_external() {
        let files = sorted(vec![js_record("app.js")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_js(FileId(0), &files[0], "@scope/pkg/util");
        assert_eq!(edge.confidence, Confidence::External);
        assert_eq!(edge.name, "@scope/pkg");
    }

    #[test]
    fn test_js_relative_escape_unresolved() {
        let files = sorted(vec![js_record("app.js")]);
        let resolver = ImportResolver::build(&files);

        let edge = resolver.resolve_js(FileId(0), &files[0], "../outside");
        assert_eq!(edge.confidence, Confidence::Unresolved);
    }

    #[test]
    fn test_resolve_all_dedup_and_self_edges() {
        let mut a = py_record("a.py");
        a.imports.push(Import::simple("b", 1));
        a.imports.push(Import::from_import(
            "b",
            vec![ImportedName::new("thing")],
            2,
        ));
        a.imports.push(Import::simple("a", 3));
        let b = py_record("b.py");

        let files = sorted(vec![a, b]);
        let resolver = ImportResolver::build(&files);
        let edges = resolver.resolve_all(&files);

        // two imports of b collapse to one edge; the self-import vanishes
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].confidence, Confidence::Resolved);
    }

    #[test]
    fn test_resolve_all_cycle() {
        let mut a = py_record("a.py");
        a.imports.push(Import::simple("b", 1));
        let mut b = py_record("b.py");
        b.imports.push(Import::simple("a", 1));

        let files = sorted(vec![a, b]);
        let resolver = ImportResolver::build(&files);
        let edges = resolver.resolve_all(&files);

        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.confidence == Confidence::Resolved));
    }

    #[test]
    fn test_requirement_name() {
        assert_eq!(requirement_name("requests>=2.0"), Some("requests".into()));
        assert_eq!(
            requirement_name("python-dateutil==2.8.2"),
            Some("python-dateutil".into())
        );
        assert_eq!(requirement_name("pkg[extra]; os_name"), Some("pkg".into()));
        assert_eq!(requirement_name(""), None);
    }

    #[test]
    fn test_declared_dependencies_manifests() {
        use std::fs;
        let dir = tempfile::TempDir::new().unwrap();
        fs::write(
            dir.path().join("requirements.txt"),
            "# comment\nrequests>=2.0\nnumpy\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"express": "^4"}, "devDependencies": {"jest": "^29"}}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("pyproject.toml"),
            "[project]\ndependencies = [\"click>=8\"]\n",
        )
        .unwrap();

        let deps = ImportResolver::declared_dependencies(dir.path());
        assert!(deps.contains(&"requests".to_string()));
        assert!(deps.contains(&"numpy".to_string()));
        assert!(deps.contains(&"express".to_string()));
        assert!(deps.contains(&"jest".to_string()));
        assert!(deps.contains(&"click".to_string()));
    }

    #[test]
    fn test_bare_package_name() {
        assert_eq!(bare_package_name("lodash"), "lodash");
        assert_eq!(bare_package_name("lodash/fp"), "lodash");
        assert_eq!(bare_package_name("@scope/pkg/deep"), "@scope/pkg");
    }

    #[test]
    fn test_normalize_path() {
        let dir = vec!["src".to_string(), "lib".to_string()];
        assert_eq!(
            normalize_path(&dir, "./util"),
            Some("src/lib/util".to_string())
        );
        assert_eq!(normalize_path(&dir, "../util"), Some("src/util".to_string()));
        assert_eq!(normalize_path(&dir, "../../../x"), None);
    }
}
