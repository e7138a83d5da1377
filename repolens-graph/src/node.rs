//! Graph node types derived from the structure tree.

use crate::tree::{EntryKind, TreeNode};
use serde::{Deserialize, Serialize};

/// Visual node category in the dependency graph.
///
/// Serialized as `"directory"` / `"file"` for the front-end renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Directory,
    File,
}

impl From<EntryKind> for NodeKind {
    fn from(kind: EntryKind) -> Self {
        match kind {
            EntryKind::Directory => NodeKind::Directory,
            EntryKind::File => NodeKind::File,
        }
    }
}

/// Base display size for directory nodes; grows with child count up to +10.
const DIRECTORY_BASE_SIZE: u32 = 10;

/// Fixed display size for file nodes.
const FILE_SIZE: u32 = 5;

/// A node in the dependency graph.
///
/// Derived one-to-one from a [`TreeNode`]; the `size` field is a layout
/// hint for the force-directed renderer, nothing more.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Unique identifier: the entry path, or the name for the root.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Directory or file.
    #[serde(rename = "type")]
    pub kind: NodeKind,

    /// Browser URL of the entry.
    pub url: String,

    /// Display size hint.
    pub size: u32,
}

impl GraphNode {
    /// Derive a graph node from a structure tree entry.
    pub fn from_tree(node: &TreeNode) -> Self {
        let size = match node.kind {
            EntryKind::Directory => {
                DIRECTORY_BASE_SIZE + node.children.len().min(10) as u32
            }
            EntryKind::File => FILE_SIZE,
        };

        Self {
            id: node.graph_id().to_string(),
            name: node.name.clone(),
            kind: node.kind.into(),
            url: node.url.clone(),
            size,
        }
    }

    /// Lowercased extension of the node name, if the name has one.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        Some(ext.to_ascii_lowercase())
    }

    /// Whether this node represents a file.
    pub fn is_file(&self) -> bool {
        self.kind == NodeKind::File
    }
}
