//! Structure tree types for a surveyed repository.

use serde::{Deserialize, Serialize};

/// Whether a tree entry is a file or a directory.
///
/// Serialized as `"file"` / `"dir"`, matching the shape the hosting API
/// reports for content entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntryKind {
    /// A regular file (or anything the hosting API does not call a directory).
    #[serde(rename = "file")]
    File,
    /// A directory.
    #[serde(rename = "dir")]
    Directory,
}

/// A node in the repository structure tree.
///
/// The tree is rooted at the repository itself: the root node carries the
/// repository name, an empty `path`, and the repository's canonical URL.
/// Directory children are populated only up to the file-count ceiling
/// enforced during traversal; a file never has children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeNode {
    /// Entry name (final path segment; repository name for the root).
    pub name: String,

    /// Path relative to the repository root; empty for the root itself.
    pub path: String,

    /// File or directory.
    #[serde(rename = "type")]
    pub kind: EntryKind,

    /// Browser URL of the entry on the hosting site.
    pub url: String,

    /// Child entries, in the order the hosting API listed them.
    #[serde(default)]
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Create a directory node with no children yet.
    pub fn directory(
        name: impl Into<String>,
        path: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::Directory,
            url: url.into(),
            children: Vec::new(),
        }
    }

    /// Create a file node.
    pub fn file(
        name: impl Into<String>,
        path: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            kind: EntryKind::File,
            url: url.into(),
            children: Vec::new(),
        }
    }

    /// Whether this entry is a directory.
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Identifier used when this entry becomes a graph node: the path, or
    /// the name for the root (whose path is empty).
    pub fn graph_id(&self) -> &str {
        if self.path.is_empty() {
            &self.name
        } else {
            &self.path
        }
    }

    /// Total number of file entries in this subtree.
    pub fn file_count(&self) -> usize {
        let own = usize::from(!self.is_dir());
        own + self
            .children
            .iter()
            .map(TreeNode::file_count)
            .sum::<usize>()
    }
}
