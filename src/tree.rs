//! Tree materialization: a flat list of file references becomes a sorted
//! folder/file hierarchy.
//!
//! The whole tree is rebuilt from scratch on every refresh; there is no
//! incremental diffing.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::debug;

use crate::profile::FileRef;
use crate::workspace::WorkspaceRoot;

/// One node in the rendered hierarchy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// One per workspace root. Present at the top level only when several
    /// roots are open; with a single root its children are returned directly.
    Root {
        name: String,
        children: Vec<TreeNode>,
    },
    Dir {
        label: String,
        children: Vec<TreeNode>,
    },
    /// A leaf; never has children.
    File {
        label: String,
        root_name: String,
        relative_path: String,
    },
}

impl TreeNode {
    pub fn label(&self) -> &str {
        match self {
            TreeNode::Root { name, .. } => name,
            TreeNode::Dir { label, .. } => label,
            TreeNode::File { label, .. } => label,
        }
    }

    pub fn children(&self) -> &[TreeNode] {
        match self {
            TreeNode::Root { children, .. } => children,
            TreeNode::Dir { children, .. } => children,
            TreeNode::File { .. } => &[],
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, TreeNode::Dir { .. })
    }

    pub fn is_file(&self) -> bool {
        matches!(self, TreeNode::File { .. })
    }
}

/// Intermediate node during construction. Children are keyed by path segment
/// so a segment shared by several files maps onto one node.
#[derive(Default)]
struct BuildNode {
    children: HashMap<String, BuildNode>,
    /// Set when some file reference terminates exactly at this node.
    file: Option<FileRef>,
}

impl BuildNode {
    fn insert(&mut self, file: &FileRef, segments: &[&str]) {
        let Some((first, rest)) = segments.split_first() else {
            return;
        };
        let child = self.children.entry((*first).to_string()).or_default();
        if rest.is_empty() {
            child.file = Some(file.clone());
        } else {
            child.insert(file, rest);
        }
    }

    fn into_children(self) -> Vec<TreeNode> {
        self.children
            .into_iter()
            .map(|(label, node)| node.into_node(label))
            .collect()
    }

    fn into_node(self, label: String) -> TreeNode {
        // Any node another path passes through is a directory, whatever order
        // the files arrived in. Only a genuinely terminal segment is a file.
        if self.children.is_empty() {
            return match self.file {
                Some(file) => TreeNode::File {
                    label,
                    root_name: file.root_name,
                    relative_path: file.relative_path,
                },
                None => TreeNode::Dir {
                    label,
                    children: Vec::new(),
                },
            };
        }
        TreeNode::Dir {
            label,
            children: self.into_children(),
        }
    }
}

/// Build the sorted hierarchy for `files` under the given roots.
///
/// Pure function of its inputs. With exactly one root the wrapper node is
/// dropped and its children are returned directly; with several roots the
/// root nodes form the top level, in the order the roots were given. A file
/// under a root name that is not open is silently dropped.
pub fn build(files: &[FileRef], roots: &[WorkspaceRoot]) -> Vec<TreeNode> {
    let mut root_nodes: Vec<(String, BuildNode)> = roots
        .iter()
        .map(|r| (r.name.clone(), BuildNode::default()))
        .collect();
    let index: HashMap<&str, usize> = roots
        .iter()
        .enumerate()
        .map(|(i, r)| (r.name.as_str(), i))
        .collect();

    for file in files {
        let Some(&i) = index.get(file.root_name.as_str()) else {
            debug!(
                root = %file.root_name,
                path = %file.relative_path,
                "file dropped from tree: root is not open"
            );
            continue;
        };
        let segments: Vec<&str> = file
            .relative_path
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() {
            continue;
        }
        root_nodes[i].1.insert(file, &segments);
    }

    let mut top: Vec<TreeNode> = if root_nodes.len() == 1 {
        root_nodes.remove(0).1.into_children()
    } else {
        root_nodes
            .into_iter()
            .map(|(name, node)| TreeNode::Root {
                name,
                children: node.into_children(),
            })
            .collect()
    };
    sort(&mut top);
    top
}

/// Sort depth-first: directories before files, case-sensitive label order
/// within each kind. Root siblings keep their relative order (the sort is
/// stable and the comparator treats them as equal).
pub fn sort(nodes: &mut [TreeNode]) {
    for node in nodes.iter_mut() {
        match node {
            TreeNode::Root { children, .. } | TreeNode::Dir { children, .. } => sort(children),
            TreeNode::File { .. } => {}
        }
    }
    nodes.sort_by(order);
}

fn order(a: &TreeNode, b: &TreeNode) -> Ordering {
    use TreeNode::*;
    match (a, b) {
        (Root { .. }, Root { .. }) => Ordering::Equal,
        (Dir { label: a, .. }, Dir { label: b, .. }) => a.cmp(b),
        (File { label: a, .. }, File { label: b, .. }) => a.cmp(b),
        (Dir { .. }, File { .. }) => Ordering::Less,
        (File { .. }, Dir { .. }) => Ordering::Greater,
        // Root nodes only ever sit next to other roots at the top level.
        _ => panic!("tree sort: root node compared against a path node"),
    }
}
