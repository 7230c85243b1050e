use std::fs;
use std::path::Path;

use tempfile::{tempdir, TempDir};
use treescope::{PatternRule, Profile, WorkspaceRoot};

fn touch(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"x").unwrap();
}

// One workspace root with a small mixed tree:
//
//   src/main.rs  src/lib.rs  src/deep/util.rs
//   docs/guide.md  target/out.rs  notes.txt
fn fixture() -> (TempDir, Vec<WorkspaceRoot>) {
    let dir = tempdir().unwrap();
    for rel in [
        "src/main.rs",
        "src/lib.rs",
        "src/deep/util.rs",
        "docs/guide.md",
        "target/out.rs",
        "notes.txt",
    ] {
        touch(&dir.path().join(rel));
    }
    let roots = vec![WorkspaceRoot::new("proj", dir.path())];
    (dir, roots)
}

fn rust_rule() -> PatternRule {
    PatternRule {
        include_files: vec![String::from(r"\.rs$")],
        exclude_files: vec![],
        exclude_dirs: vec![String::from("^target$")],
    }
}

fn resolved_paths(profile: &Profile, roots: &[WorkspaceRoot]) -> Vec<String> {
    let mut paths: Vec<String> = profile
        .resolve(roots)
        .unwrap()
        .into_iter()
        .map(|f| f.relative_path)
        .collect();
    paths.sort();
    paths
}

#[test]
fn test_pattern_pass_includes_and_prunes() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pattern(rust_rule());

    // target/out.rs matches the include expression but sits in a pruned
    // directory, so it must not appear.
    assert_eq!(
        resolved_paths(&profile, &roots),
        ["src/deep/util.rs", "src/lib.rs", "src/main.rs"]
    );
}

#[test]
fn test_exclude_files_refine_the_include_set() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pattern(PatternRule {
        include_files: vec![String::from(r"\.rs$")],
        exclude_files: vec![String::from(r"lib\.rs$")],
        exclude_dirs: vec![String::from("^target$")],
    });

    assert_eq!(
        resolved_paths(&profile, &roots),
        ["src/deep/util.rs", "src/main.rs"]
    );
}

#[test]
fn test_vacuous_include_yields_no_pattern_files() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pinned_file("proj", "notes.txt");
    profile.add_pattern(PatternRule {
        include_files: vec![],
        exclude_files: vec![],
        exclude_dirs: vec![],
    });

    // Only the pin survives; an include-less rule selects nothing even
    // though every file would pass its (empty) exclude lists.
    assert_eq!(resolved_paths(&profile, &roots), ["notes.txt"]);
}

#[test]
fn test_missing_pinned_file_is_dropped_but_stays_pinned() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pinned_file("proj", "notes.txt");
    profile.add_pinned_file("proj", "ghost.txt");

    assert_eq!(resolved_paths(&profile, &roots), ["notes.txt"]);
    // The definition itself is untouched by resolution.
    assert_eq!(profile.pinned_files().len(), 2);
}

#[test]
fn test_pin_under_unopened_root_counts_as_absent() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pinned_file("elsewhere", "notes.txt");
    profile.add_pattern(rust_rule());

    // The bad pin is filtered, not propagated: the pattern pass still runs.
    assert_eq!(
        resolved_paths(&profile, &roots),
        ["src/deep/util.rs", "src/lib.rs", "src/main.rs"]
    );
}

#[test]
fn test_overlapping_pin_and_pattern_dedupe() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pinned_file("proj", "src/main.rs");
    profile.add_pattern(rust_rule());
    // Two rules matching the same files must not duplicate them either.
    profile.add_pattern(rust_rule());

    assert_eq!(
        resolved_paths(&profile, &roots),
        ["src/deep/util.rs", "src/lib.rs", "src/main.rs"]
    );
}

#[test]
fn test_multiple_roots_scan_independently() {
    let (_dir_a, mut roots) = fixture();
    let dir_b = tempdir().unwrap();
    touch(&dir_b.path().join("extra.rs"));
    touch(&dir_b.path().join("skip.md"));
    roots.push(WorkspaceRoot::new("other", dir_b.path()));

    let mut profile = Profile::new("default");
    profile.add_pattern(rust_rule());

    let mut files: Vec<(String, String)> = profile
        .resolve(&roots)
        .unwrap()
        .into_iter()
        .map(|f| (f.root_name, f.relative_path))
        .collect();
    files.sort();
    assert_eq!(
        files,
        [
            ("other".to_string(), "extra.rs".to_string()),
            ("proj".to_string(), "src/deep/util.rs".to_string()),
            ("proj".to_string(), "src/lib.rs".to_string()),
            ("proj".to_string(), "src/main.rs".to_string()),
        ]
    );
}

#[test]
fn test_resolve_is_deterministic_as_a_set() {
    let (_dir, roots) = fixture();
    let mut profile = Profile::new("default");
    profile.add_pinned_file("proj", "docs/guide.md");
    profile.add_pattern(rust_rule());

    let first = resolved_paths(&profile, &roots);
    let second = resolved_paths(&profile, &roots);
    assert_eq!(first, second);
}
