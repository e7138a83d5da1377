//! Deterministic Mermaid flowchart renderer.
//!
//! The local fallback used when the chat model cannot produce a diagram.
//! Renders a bounded view of the structure tree: at most three levels
//! below the root and ten children per directory, in preorder.
//!
//! ## Output Format
//!
//! One label line, one click line, and one style line per visited node,
//! plus one parent edge line per non-root node:
//!
//! ```text
//! flowchart TD
//! node1["repo (directory)"]
//! click node1 href "https://github.com/acme/repo" _blank
//! style node1 fill:#f9f,stroke:#333,stroke-width:1px
//! node2["src (directory)"]
//! ...
//! node1 --> node2
//! ```

use repolens_graph::TreeNode;
use std::fmt::Write;

/// Directory node palette.
const DIRECTORY_STYLE: &str = "fill:#f9f,stroke:#333,stroke-width:1px";

/// File node palette.
const FILE_STYLE: &str = "fill:#bbf,stroke:#333,stroke-width:1px";

/// Renders a structure tree as Mermaid flowchart markup.
#[derive(Debug, Clone)]
pub struct FlowchartRenderer {
    /// Levels rendered below the root.
    max_depth: usize,

    /// Children rendered per directory.
    max_children: usize,
}

impl Default for FlowchartRenderer {
    fn default() -> Self {
        Self {
            max_depth: 3,
            max_children: 10,
        }
    }
}

impl FlowchartRenderer {
    /// Create a renderer with the default bounds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the tree as a top-down flowchart.
    ///
    /// Node ids are sequential (`node1`, `node2`, ...) in visit order, so
    /// the output is deterministic for a given tree.
    pub fn render(&self, tree: &TreeNode) -> String {
        let mut output = String::from("flowchart TD\n");
        let mut counter = 1usize;
        self.write_node(&mut output, tree, None, 0, &mut counter);
        output
    }

    fn write_node(
        &self,
        output: &mut String,
        node: &TreeNode,
        parent_id: Option<&str>,
        level: usize,
        counter: &mut usize,
    ) {
        if level > self.max_depth {
            return;
        }

        let id = format!("node{counter}");
        *counter += 1;

        let label = if node.is_dir() {
            format!("{} (directory)", node.name)
        } else {
            node.name.clone()
        };
        let style = if node.is_dir() {
            DIRECTORY_STYLE
        } else {
            FILE_STYLE
        };

        writeln!(output, "{id}[\"{label}\"]").unwrap();
        writeln!(output, "click {id} href \"{}\" _blank", node.url).unwrap();
        writeln!(output, "style {id} {style}").unwrap();

        if let Some(parent) = parent_id {
            writeln!(output, "{parent} --> {id}").unwrap();
        }

        for child in node.children.iter().take(self.max_children) {
            self.write_node(output, child, Some(&id), level + 1, counter);
        }
    }
}
