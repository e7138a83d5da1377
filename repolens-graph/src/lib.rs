//! # repolens-graph
//!
//! Structure tree and dependency graph data structures for Repolens.
//!
//! This crate holds the data model shared by the survey and server crates:
//!
//! - **Structure tree**: [`TreeNode`] / [`EntryKind`], the hierarchical
//!   listing of a repository fetched from the hosting API
//! - **Graph types**: [`GraphNode`] / [`GraphLink`], the flat node/link
//!   form consumed by the front-end force-directed renderer
//! - **StructureGraph**: the graph container with id-based deduplication
//!   and append-only links
//!
//! ## Example
//!
//! ```rust
//! use repolens_graph::{GraphNode, StructureGraph, TreeNode};
//!
//! let mut graph = StructureGraph::new();
//!
//! let root = TreeNode::directory("repo", "", "https://github.com/acme/repo");
//! graph.insert_node(GraphNode::from_tree(&root));
//!
//! let file = TreeNode::file("main.rs", "src/main.rs", "https://github.com/acme/repo/blob/main/src/main.rs");
//! graph.insert_node(GraphNode::from_tree(&file));
//!
//! graph.add_link("repo", "src/main.rs", 1).unwrap();
//!
//! let snapshot = graph.snapshot();
//! assert_eq!(snapshot.nodes.len(), 2);
//! assert_eq!(snapshot.links.len(), 1);
//! ```

pub mod edge;
pub mod error;
pub mod graph;
pub mod node;
pub mod tree;

// Re-exports for convenient access
pub use edge::{GraphLink, MANIFEST_WEIGHT, SIMILAR_NAME_WEIGHT, STRUCTURAL_WEIGHT};
pub use error::GraphError;
pub use graph::{GraphSnapshot, StructureGraph};
pub use node::{GraphNode, NodeKind};
pub use tree::{EntryKind, TreeNode};
