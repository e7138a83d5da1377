//! End-to-end tests for the analysis pipeline.
//!
//! These tests run the full `/analyze` data path - traversal, graph
//! construction, quality summary, and diagram generation - against an
//! in-memory content provider and a deterministic chat stub, with no
//! network access.
//!
//! Covered behavior:
//! - file-count ceiling across flat and nested listings
//! - graph node id uniqueness and structural link completeness
//! - inferred manifest links for JavaScript repositories
//! - language percentage law
//! - diagram fallback when the chat provider fails

use async_trait::async_trait;
use repolens_graph::EntryKind;
use repolens_llm::{ChatError, ChatOptions, ChatProvider, ChatResult};
use repolens_server::diagram::DiagramGenerator;
use repolens_survey::{
    ContentEntry, ContentProvider, GitHubError, StructureWalker, build_dependency_graph, summarize,
};
use std::collections::HashMap;
use std::sync::Arc;

/// In-memory content provider backed by a path -> listing map.
struct FakeRepo {
    dirs: HashMap<String, Vec<ContentEntry>>,
}

impl FakeRepo {
    fn new() -> Self {
        Self {
            dirs: HashMap::new(),
        }
    }

    fn dir(mut self, path: &str, entries: Vec<ContentEntry>) -> Self {
        self.dirs.insert(path.to_string(), entries);
        self
    }
}

#[async_trait]
impl ContentProvider for FakeRepo {
    async fn list_dir(&self, path: &str) -> Result<Vec<ContentEntry>, GitHubError> {
        self.dirs
            .get(path)
            .cloned()
            .ok_or_else(|| GitHubError::PathNotFound(path.to_string()))
    }
}

/// Chat provider that always fails, forcing the diagram fallback.
struct DownProvider;

#[async_trait]
impl ChatProvider for DownProvider {
    fn name(&self) -> &str {
        "down"
    }

    async fn prompt_with_options(
        &self,
        _system: &str,
        _user: &str,
        _options: &ChatOptions,
    ) -> ChatResult<String> {
        Err(ChatError::Transport("connection reset".to_string()))
    }
}

fn file(name: &str, path: &str) -> ContentEntry {
    ContentEntry {
        name: name.to_string(),
        path: path.to_string(),
        kind: EntryKind::File,
        url: format!("https://github.com/acme/widget/blob/main/{path}"),
        size: 64,
    }
}

fn dir(name: &str, path: &str) -> ContentEntry {
    ContentEntry {
        name: name.to_string(),
        path: path.to_string(),
        kind: EntryKind::Directory,
        url: format!("https://github.com/acme/widget/tree/main/{path}"),
        size: 0,
    }
}

/// A small JavaScript repository: src/a.js plus a root package.json.
fn js_repo() -> FakeRepo {
    FakeRepo::new()
        .dir(
            "",
            vec![dir("src", "src"), file("package.json", "package.json")],
        )
        .dir("src", vec![file("a.js", "src/a.js")])
}

#[tokio::test]
async fn test_js_repo_graph_has_structural_and_inferred_links() {
    let walker = StructureWalker::new(100);
    let tree = walker
        .walk(&js_repo(), "widget", "https://github.com/acme/widget")
        .await;

    let snapshot = build_dependency_graph(&tree).snapshot();

    let ids: Vec<_> = snapshot.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["widget", "src", "src/a.js", "package.json"]);

    let pairs: Vec<(&str, &str, u32)> = snapshot
        .links
        .iter()
        .map(|l| (l.source.as_str(), l.target.as_str(), l.value))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("widget", "src", 1),
            ("src", "src/a.js", 1),
            ("widget", "package.json", 1),
            ("src/a.js", "package.json", 1),
        ]
    );
}

#[tokio::test]
async fn test_node_ids_are_unique() {
    let walker = StructureWalker::new(100);
    let tree = walker
        .walk(&js_repo(), "widget", "https://github.com/acme/widget")
        .await;

    let snapshot = build_dependency_graph(&tree).snapshot();
    let mut ids: Vec<_> = snapshot.nodes.iter().map(|n| n.id.clone()).collect();
    let before = ids.len();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), before);
}

#[tokio::test]
async fn test_flat_repo_ceiling_keeps_first_hundred() {
    let entries: Vec<ContentEntry> = (0..150)
        .map(|i| file(&format!("f{i:03}.js"), &format!("f{i:03}.js")))
        .collect();
    let repo = FakeRepo::new().dir("", entries);

    let walker = StructureWalker::new(100);
    let tree = walker
        .walk(&repo, "widget", "https://github.com/acme/widget")
        .await;

    assert_eq!(tree.file_count(), 100);
    assert_eq!(tree.children[0].name, "f000.js");
    assert_eq!(tree.children[99].name, "f099.js");
}

#[tokio::test]
async fn test_language_percentages_sum_to_one_hundred() {
    let repo = FakeRepo::new().dir(
        "",
        vec![
            file("a.js", "a.js"),
            file("b.py", "b.py"),
            file("c.rs", "c.rs"),
            file("notes.xyz", "notes.xyz"),
        ],
    );

    let walker = StructureWalker::new(100);
    let tree = walker
        .walk(&repo, "widget", "https://github.com/acme/widget")
        .await;

    let report = summarize(&tree);
    assert_eq!(report.language_distribution.len(), 3);

    let sum: f64 = report
        .language_distribution
        .iter()
        .map(|s| s.percentage)
        .sum();
    assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
}

#[tokio::test]
async fn test_diagram_falls_back_when_provider_is_down() {
    let walker = StructureWalker::new(100);
    let tree = walker
        .walk(&js_repo(), "widget", "https://github.com/acme/widget")
        .await;

    let generator = DiagramGenerator::new(Arc::new(DownProvider));
    let chart = generator.generate(&tree).await;

    assert!(!chart.is_empty());
    assert!(chart.starts_with("flowchart TD"));
    assert!(chart.contains("node1[\"widget (directory)\"]"));
    assert!(chart.contains("click node1 href \"https://github.com/acme/widget\" _blank"));
    assert!(chart.contains("node1 --> node2"));
}
