//! Error types for the repolens-graph crate.

use thiserror::Error;

/// Errors related to graph operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A link referenced a node id that is not in the graph.
    #[error("Node not found: {0}")]
    NodeNotFound(String),
}
