//! StructureGraph - the dependency graph container.

use crate::edge::GraphLink;
use crate::error::GraphError;
use crate::node::GraphNode;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// JSON-serializable representation of the graph, in the shape the
/// front-end force-directed renderer consumes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphSnapshot {
    /// All nodes, in insertion order.
    pub nodes: Vec<GraphNode>,

    /// All links, in insertion order.
    pub links: Vec<GraphLink>,
}

/// The dependency graph container.
///
/// Wraps a petgraph directed graph with an id index for O(1) lookup.
/// Nodes are deduplicated by id (first occurrence wins); links are
/// append-only and parallel links between the same pair are allowed.
pub struct StructureGraph {
    /// Underlying directed graph from petgraph
    inner: DiGraph<GraphNode, u32>,

    /// Index from node id to petgraph NodeIndex
    node_index: HashMap<String, NodeIndex>,
}

impl Default for StructureGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl StructureGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self {
            inner: DiGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Insert a node unless one with the same id already exists.
    ///
    /// Returns `true` if the node was inserted, `false` if the id was
    /// already present (the existing node is kept unchanged).
    pub fn insert_node(&mut self, node: GraphNode) -> bool {
        if self.node_index.contains_key(&node.id) {
            return false;
        }

        let id = node.id.clone();
        let idx = self.inner.add_node(node);
        self.node_index.insert(id, idx);
        true
    }

    /// Append a directed link between two existing nodes.
    ///
    /// Parallel links are allowed; there is no deduplication.
    pub fn add_link(&mut self, source: &str, target: &str, value: u32) -> Result<(), GraphError> {
        let src = *self
            .node_index
            .get(source)
            .ok_or_else(|| GraphError::NodeNotFound(source.to_string()))?;
        let tgt = *self
            .node_index
            .get(target)
            .ok_or_else(|| GraphError::NodeNotFound(target.to_string()))?;

        self.inner.add_edge(src, tgt, value);
        Ok(())
    }

    /// Whether a node with this id exists.
    pub fn contains(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Get a node by id.
    pub fn get_node(&self, id: &str) -> Option<&GraphNode> {
        self.node_index.get(id).map(|&idx| &self.inner[idx])
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Number of links.
    pub fn link_count(&self) -> usize {
        self.inner.edge_count()
    }

    /// Iterate over nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.inner.node_weights()
    }

    /// Iterate over links in insertion order.
    pub fn links(&self) -> impl Iterator<Item = GraphLink> + '_ {
        self.inner.edge_references().map(|edge| {
            GraphLink::new(
                self.inner[edge.source()].id.clone(),
                self.inner[edge.target()].id.clone(),
                *edge.weight(),
            )
        })
    }

    /// Produce the serializable snapshot consumed by the front end.
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes().cloned().collect(),
            links: self.links().collect(),
        }
    }
}
