//! treescope - profile-scoped views of a larger file tree.
//!
//! A profile names a curated subset of one or more workspace roots: files
//! pinned explicitly, plus pattern rules (include/exclude regular expressions
//! over root-relative paths, with directory exclusion). Resolving a profile
//! scans the filesystem and yields a deduplicated, existence-checked file
//! list; the tree builder turns that flat list into a sorted folder/file
//! hierarchy for rendering.
//!
//! The library is stateless per call: `Profile::resolve` and `tree::build`
//! are functions of (profile, roots, filesystem snapshot) with no ambient
//! reads, so any external change notification can simply trigger a fresh
//! resolve-and-build pass.

pub mod error;
pub mod profile;
pub mod scanner;
pub mod store;
pub mod tree;
pub mod workspace;

// Re-export commonly used items
pub use error::{Error, Result};
pub use profile::{FileRef, PatternRule, Profile};
pub use store::{ProfileData, ProfileStore, DEFAULT_PROFILE};
pub use tree::TreeNode;
pub use workspace::WorkspaceRoot;
