//! Profiles: pinned files plus pattern rules, resolved against the live
//! filesystem into a deduplicated file list.

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::scanner;
use crate::workspace::{find_root, WorkspaceRoot};

/// One file identified by workspace root name and root-relative path.
///
/// Equality and hashing are by the pair; that is the deduplication key for
/// resolution results. Serialized field names are fixed by the profile
/// config format (`workspaceFolderName`, `path`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileRef {
    #[serde(rename = "workspaceFolderName")]
    pub root_name: String,
    #[serde(rename = "path")]
    pub relative_path: String,
}

impl FileRef {
    pub fn new(root_name: impl Into<String>, relative_path: impl Into<String>) -> Self {
        FileRef {
            root_name: root_name.into(),
            relative_path: relative_path.into(),
        }
    }

    /// Absolute path of this file, or `RootNotFound` when no open root
    /// carries this reference's root name.
    pub fn abs_path(&self, roots: &[WorkspaceRoot]) -> Result<PathBuf> {
        let root = find_root(roots, &self.root_name)
            .ok_or_else(|| Error::RootNotFound(self.root_name.clone()))?;
        Ok(root.path.join(&self.relative_path))
    }
}

/// Include/exclude regular expressions over root-relative paths.
///
/// A rule with an empty include list selects nothing: explicit inclusion is
/// required, the exclude lists only refine it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PatternRule {
    pub include_files: Vec<String>,
    pub exclude_files: Vec<String>,
    pub exclude_dirs: Vec<String>,
}

/// A named, user-defined selection of files: pinned references plus pattern
/// rules.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    pinned_files: Vec<FileRef>,
    patterns: Vec<PatternRule>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Profile {
            name: name.into(),
            pinned_files: Vec::new(),
            patterns: Vec::new(),
        }
    }

    pub fn with_parts(
        name: impl Into<String>,
        pinned_files: Vec<FileRef>,
        patterns: Vec<PatternRule>,
    ) -> Self {
        Profile {
            name: name.into(),
            pinned_files,
            patterns,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pinned_files(&self) -> &[FileRef] {
        &self.pinned_files
    }

    pub fn patterns(&self) -> &[PatternRule] {
        &self.patterns
    }

    pub fn add_pattern(&mut self, rule: PatternRule) {
        self.patterns.push(rule);
    }

    /// Pin a file. Adding a relative path that is already pinned is a no-op,
    /// keyed by the relative path alone.
    pub fn add_pinned_file(
        &mut self,
        root_name: impl Into<String>,
        relative_path: impl Into<String>,
    ) {
        let relative_path = relative_path.into();
        if self
            .pinned_files
            .iter()
            .any(|f| f.relative_path == relative_path)
        {
            return;
        }
        self.pinned_files.push(FileRef::new(root_name, relative_path));
    }

    /// Resolve this profile into the concrete files it currently selects.
    ///
    /// Runs the pinned pass (existence-checked pins) and the pattern pass
    /// (one traversal per root x rule combination), then deduplicates by
    /// `(root_name, relative_path)`. Callers must treat the result as a set;
    /// the element order carries no meaning.
    ///
    /// The profile is not mutated: pins whose file is gone stay in the
    /// definition and simply drop out of the result.
    pub fn resolve(&self, roots: &[WorkspaceRoot]) -> Result<Vec<FileRef>> {
        let mut seen: HashSet<FileRef> = HashSet::new();
        let mut files = Vec::new();

        // Pinned pass. A pin naming a root that is not open counts as absent
        // rather than failing the whole scan.
        for file in &self.pinned_files {
            match file.abs_path(roots) {
                Ok(path) if path.exists() => {
                    if seen.insert(file.clone()) {
                        files.push(file.clone());
                    }
                }
                Ok(path) => {
                    debug!(path = %path.display(), "pinned file missing, dropped from result");
                }
                Err(Error::RootNotFound(name)) => {
                    debug!(
                        root = %name,
                        path = %file.relative_path,
                        "pinned file's root is not open, dropped from result"
                    );
                }
                Err(err) => return Err(err),
            }
        }

        // Pattern pass: every (root, rule) combination gets its own traversal.
        for root in roots {
            for rule in &self.patterns {
                for file in scanner::scan_rule(root, rule)? {
                    if seen.insert(file.clone()) {
                        files.push(file);
                    }
                }
            }
        }

        Ok(files)
    }
}
