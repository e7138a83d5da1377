//! Structure diagram generation.
//!
//! The primary path asks the chat model to lay out the tree as a Mermaid
//! flowchart under a strict format contract. Any provider failure falls
//! back to the local [`FlowchartRenderer`], so a diagram string is always
//! produced.

use crate::mermaid::FlowchartRenderer;
use repolens_graph::TreeNode;
use repolens_llm::{ChatOptions, ChatProvider};
use std::sync::Arc;

/// Children listed per directory in the prompt's tree description.
const DESCRIBE_CHILD_LIMIT: usize = 20;

const DIAGRAM_SYSTEM_PROMPT: &str =
    "You are an expert in visualizing GitHub repositories, fluent in Mermaid diagrams.";

/// Generates Mermaid diagrams for structure trees.
pub struct DiagramGenerator {
    provider: Arc<dyn ChatProvider>,
    fallback: FlowchartRenderer,
}

impl DiagramGenerator {
    /// Create a generator backed by the given chat provider.
    pub fn new(provider: Arc<dyn ChatProvider>) -> Self {
        Self {
            provider,
            fallback: FlowchartRenderer::new(),
        }
    }

    /// Produce flowchart markup for the tree.
    ///
    /// Asks the chat model first; any provider error is logged and the
    /// local renderer takes over, so this always returns markup.
    pub async fn generate(&self, tree: &TreeNode) -> String {
        let prompt = build_prompt(tree);
        let options = ChatOptions::with_extra(serde_json::json!({ "enable_thinking": false }));

        match self
            .provider
            .prompt_with_options(DIAGRAM_SYSTEM_PROMPT, &prompt, &options)
            .await
        {
            Ok(reply) => strip_code_fence(&reply),
            Err(err) => {
                tracing::error!(error = %err, "chat diagram generation failed, using local renderer");
                self.fallback.render(tree)
            }
        }
    }
}

/// Indented textual description of the tree, listing at most
/// [`DESCRIBE_CHILD_LIMIT`] children per directory.
fn describe_tree(tree: &TreeNode) -> String {
    let mut description = String::from("The repository file structure is:\n");
    describe_node(&mut description, tree, 0);
    description
}

fn describe_node(description: &mut String, node: &TreeNode, level: usize) {
    let indent = "  ".repeat(level);
    let kind = if node.is_dir() { "directory" } else { "file" };
    description.push_str(&format!("{indent}- {} ({kind})\n", node.name));

    for child in node.children.iter().take(DESCRIBE_CHILD_LIMIT) {
        describe_node(description, child, level + 1);
    }
}

fn build_prompt(tree: &TreeNode) -> String {
    format!(
        r#"Convert the following GitHub repository structure into a Mermaid flowchart.
Follow these rules strictly to avoid syntax errors:
1.  Use the `flowchart TD` (top-down) format.
2.  Node ids must be unique alphanumeric strings without special characters (e.g. `node1`, `node2`).
3.  Every displayed node label must be wrapped in double quotes (e.g. `node1["src/component.js"]`).
4.  Use `-->` for parent-child relationships (e.g. `node1 --> node2`).
5.  Add a click directive for every node, with the URL wrapped in double quotes (e.g. `click node1 "https://github.com/..." _blank`).
6.  Style directory nodes with: `style nodeId fill:#f9f,stroke:#333,stroke-width:2px`.
7.  Style file nodes with: `style nodeId fill:#bbf,stroke:#333,stroke-width:2px`.
8.  For readability, omit overly deep levels or directories with too many files.

Repository structure:
{structure}

Return only the complete, directly renderable Mermaid chart code, without any explanation or "mermaid" markers."#,
        structure = describe_tree(tree)
    )
}

/// Strip Markdown code-fence markers from a model reply, if present.
fn strip_code_fence(reply: &str) -> String {
    let trimmed = reply.trim();
    if trimmed.starts_with("```mermaid") {
        trimmed
            .replace("```mermaid", "")
            .replace("```", "")
            .trim()
            .to_string()
    } else if trimmed.starts_with("```") {
        trimmed.replace("```", "").trim().to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use repolens_llm::{ChatError, ChatResult};

    struct StubProvider {
        reply: Option<String>,
    }

    #[async_trait]
    impl ChatProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn prompt_with_options(
            &self,
            _system: &str,
            _user: &str,
            _options: &ChatOptions,
        ) -> ChatResult<String> {
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(ChatError::Transport("connection refused".to_string())),
            }
        }
    }

    fn sample_tree() -> TreeNode {
        let mut root = TreeNode::directory("repo", "", "https://github.com/o/repo");
        root.children
            .push(TreeNode::file("main.rs", "main.rs", "u"));
        root
    }

    #[tokio::test]
    async fn test_model_reply_is_used() {
        let generator = DiagramGenerator::new(Arc::new(StubProvider {
            reply: Some("flowchart TD\nnode1[\"repo\"]".to_string()),
        }));

        let output = generator.generate(&sample_tree()).await;
        assert_eq!(output, "flowchart TD\nnode1[\"repo\"]");
    }

    #[tokio::test]
    async fn test_fenced_reply_is_stripped() {
        let generator = DiagramGenerator::new(Arc::new(StubProvider {
            reply: Some("```mermaid\nflowchart TD\nnode1[\"repo\"]\n```".to_string()),
        }));

        let output = generator.generate(&sample_tree()).await;
        assert!(output.starts_with("flowchart TD"));
        assert!(!output.contains("```"));
    }

    #[tokio::test]
    async fn test_provider_failure_falls_back_to_local_renderer() {
        let generator = DiagramGenerator::new(Arc::new(StubProvider { reply: None }));

        let output = generator.generate(&sample_tree()).await;
        assert!(!output.is_empty());
        assert!(output.starts_with("flowchart TD"));
        assert!(output.contains("node1[\"repo (directory)\"]"));
        assert!(output.contains("node1 --> node2"));
    }

    #[test]
    fn test_describe_tree_limits_children() {
        let mut root = TreeNode::directory("repo", "", "u");
        for i in 0..25 {
            root.children
                .push(TreeNode::file(format!("f{i:02}.txt"), format!("f{i:02}.txt"), "u"));
        }

        let description = describe_tree(&root);
        assert!(description.contains("- f19.txt (file)"));
        assert!(!description.contains("- f20.txt (file)"));
    }

    #[test]
    fn test_describe_tree_indents_by_level() {
        let mut src = TreeNode::directory("src", "src", "u");
        src.children.push(TreeNode::file("a.js", "src/a.js", "u"));
        let mut root = TreeNode::directory("repo", "", "u");
        root.children.push(src);

        let description = describe_tree(&root);
        assert!(description.contains("- repo (directory)"));
        assert!(description.contains("\n  - src (directory)"));
        assert!(description.contains("\n    - a.js (file)"));
    }

    #[test]
    fn test_strip_code_fence_variants() {
        assert_eq!(
            strip_code_fence("```mermaid\nflowchart TD\n```"),
            "flowchart TD"
        );
        assert_eq!(strip_code_fence("```\nflowchart TD\n```"), "flowchart TD");
        assert_eq!(strip_code_fence("flowchart TD"), "flowchart TD");
        assert_eq!(strip_code_fence("  flowchart TD\n"), "flowchart TD");
    }

    #[test]
    fn test_prompt_embeds_structure_and_rules() {
        let prompt = build_prompt(&sample_tree());
        assert!(prompt.contains("flowchart TD"));
        assert!(prompt.contains("- repo (directory)"));
        assert!(prompt.contains("- main.rs (file)"));
        assert!(prompt.contains("click node1"));
    }
}
