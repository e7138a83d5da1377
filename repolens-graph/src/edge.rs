//! Graph link types.

use serde::{Deserialize, Serialize};

/// Weight of a structural (parent to child) link.
pub const STRUCTURAL_WEIGHT: u32 = 1;

/// Weight of a link to a manifest file inferred from a file's extension.
pub const MANIFEST_WEIGHT: u32 = 1;

/// Weight of a link inferred from similar file names.
pub const SIMILAR_NAME_WEIGHT: u32 = 2;

/// A directed link between two graph nodes.
///
/// Links come from two origins: structural containment (parent directory
/// to child entry) and naming heuristics. The list is append-only and
/// duplicates across the two origins are permitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphLink {
    /// Source node id.
    pub source: String,

    /// Target node id.
    pub target: String,

    /// Display weight.
    pub value: u32,
}

impl GraphLink {
    /// Create a new link.
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: u32) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }
}
