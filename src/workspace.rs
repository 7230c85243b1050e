//! Workspace roots: the named top-level directories all profile paths are
//! relative to.

use std::path::{Path, PathBuf};

/// A top-level directory the tool operates on. File references always name a
/// root and a path relative to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRoot {
    pub name: String,
    pub path: PathBuf,
}

impl WorkspaceRoot {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        WorkspaceRoot {
            name: name.into(),
            path: path.into(),
        }
    }

    /// Root named after the final path component, e.g. `/home/u/proj` becomes
    /// root "proj".
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "root".to_string());
        WorkspaceRoot { name, path }
    }
}

/// Look up a root by name.
pub fn find_root<'a>(roots: &'a [WorkspaceRoot], name: &str) -> Option<&'a WorkspaceRoot> {
    roots.iter().find(|r| r.name == name)
}

/// The root whose directory contains `path`. When roots nest, the longest
/// (most specific) match wins.
pub fn containing_root<'a>(
    roots: &'a [WorkspaceRoot],
    path: &Path,
) -> Option<&'a WorkspaceRoot> {
    roots
        .iter()
        .filter(|r| path.starts_with(&r.path))
        .max_by_key(|r| r.path.as_os_str().len())
}

/// Path relative to `root` as a `/`-separated string, regardless of platform.
/// Returns `None` when `path` is not under `root`.
pub fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let mut out = String::new();
    for component in rel.components() {
        if !out.is_empty() {
            out.push('/');
        }
        out.push_str(&component.as_os_str().to_string_lossy());
    }
    Some(out)
}
