//! Pattern-pass traversal: one recursive walk per (root, rule) combination
//! with early directory pruning.

use ignore::WalkBuilder;
use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::profile::{FileRef, PatternRule};
use crate::workspace::{relative_str, WorkspaceRoot};

struct CompiledRule {
    include_files: Vec<Regex>,
    exclude_files: Vec<Regex>,
    exclude_dirs: Vec<Regex>,
}

impl CompiledRule {
    fn new(rule: &PatternRule) -> Result<Self> {
        Ok(CompiledRule {
            include_files: compile(&rule.include_files)?,
            exclude_files: compile(&rule.exclude_files)?,
            exclude_dirs: compile(&rule.exclude_dirs)?,
        })
    }
}

fn compile(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p).map_err(|source| Error::Pattern {
                pattern: p.clone(),
                source,
            })
        })
        .collect()
}

/// Collect every file under `root` selected by `rule`.
///
/// A directory whose root-relative path matches an exclude-dirs expression is
/// pruned without being descended. A file matching an exclude-files
/// expression is skipped; otherwise it is kept iff it matches at least one
/// include-files expression, so a rule with an empty include list selects
/// nothing. Traversal order within a directory is not guaranteed. An
/// unreadable entry aborts the scan with a `Traversal` error.
pub fn scan_rule(root: &WorkspaceRoot, rule: &PatternRule) -> Result<Vec<FileRef>> {
    if rule.include_files.is_empty() {
        return Ok(Vec::new());
    }

    let compiled = CompiledRule::new(rule)?;
    let mut files = Vec::new();

    let root_path = root.path.clone();
    let exclude_dirs = compiled.exclude_dirs;
    let walker = WalkBuilder::new(&root.path)
        .hidden(false)
        // Only this rule's own expressions decide what is scanned; ignore
        // files never participate.
        .git_ignore(false)
        .ignore(false)
        .git_global(false)
        .git_exclude(false)
        .filter_entry(move |entry| {
            if !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            match relative_str(&root_path, entry.path()) {
                // The walk root itself has an empty relative path; never
                // prune it.
                Some(rel) if !rel.is_empty() => {
                    if exclude_dirs.iter().any(|re| re.is_match(&rel)) {
                        debug!(dir = %rel, "directory pruned by exclude rule");
                        false
                    } else {
                        true
                    }
                }
                _ => true,
            }
        })
        .build();

    for result in walker {
        let entry = result.map_err(|source| Error::Traversal {
            root: root.path.clone(),
            source,
        })?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let Some(rel) = relative_str(&root.path, entry.path()) else {
            continue;
        };
        if compiled.exclude_files.iter().any(|re| re.is_match(&rel)) {
            continue;
        }
        if compiled.include_files.iter().any(|re| re.is_match(&rel)) {
            files.push(FileRef::new(root.name.clone(), rel));
        }
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(include: &[&str], exclude_files: &[&str], exclude_dirs: &[&str]) -> PatternRule {
        PatternRule {
            include_files: include.iter().map(|s| s.to_string()).collect(),
            exclude_files: exclude_files.iter().map(|s| s.to_string()).collect(),
            exclude_dirs: exclude_dirs.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_invalid_regex_is_a_pattern_error() {
        let root = WorkspaceRoot::new("proj", "/nonexistent");
        let result = scan_rule(&root, &rule(&["["], &[], &[]));
        match result {
            Err(Error::Pattern { pattern, .. }) => assert_eq!(pattern, "["),
            other => panic!("expected Pattern error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_include_list_selects_nothing_without_touching_disk() {
        // The root does not even exist; the vacuous-include short-circuit
        // must still return an empty result rather than a traversal error.
        let root = WorkspaceRoot::new("proj", "/nonexistent");
        let files = scan_rule(&root, &rule(&[], &[], &[])).unwrap();
        assert!(files.is_empty());
    }
}
