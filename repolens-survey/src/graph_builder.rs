//! Converts a structure tree into the dependency graph.
//!
//! Two passes over the tree:
//!
//! - a structural pass that mirrors directory containment as links, and
//! - an inference pass that applies a small rule set of naming patterns
//!   over the flat node list.
//!
//! The inferred links are visualization suggestions derived from file
//! names alone, not the result of parsing source code.

use repolens_graph::{
    GraphNode, MANIFEST_WEIGHT, SIMILAR_NAME_WEIGHT, STRUCTURAL_WEIGHT, StructureGraph, TreeNode,
};
use std::collections::HashMap;

/// A rule linking every file of one extension to every node bearing a
/// well-known manifest file name.
#[derive(Debug, Clone, Copy)]
struct ManifestRule {
    extension: &'static str,
    manifest: &'static str,
    weight: u32,
}

/// Manifest rules, applied in table order over the flat node list.
const MANIFEST_RULES: &[ManifestRule] = &[
    ManifestRule {
        extension: "js",
        manifest: "package.json",
        weight: MANIFEST_WEIGHT,
    },
    ManifestRule {
        extension: "py",
        manifest: "requirements.txt",
        weight: MANIFEST_WEIGHT,
    },
];

/// Extension whose files are additionally linked pairwise by name
/// similarity.
const SIMILAR_NAME_EXTENSION: &str = "js";

/// Build the dependency graph for a structure tree.
///
/// Structural links mirror directory containment; inferred links are
/// appended afterwards. A failing link insertion is logged and skipped,
/// keeping whatever was already appended.
pub fn build_dependency_graph(tree: &TreeNode) -> StructureGraph {
    let mut graph = StructureGraph::new();
    add_structure(&mut graph, tree, None);
    add_inferred_links(&mut graph);
    graph
}

/// Preorder insertion of nodes and parent links.
///
/// A duplicate id is dropped entirely: the first occurrence keeps its
/// node and structural link, and the duplicate's children are not
/// re-walked.
fn add_structure(graph: &mut StructureGraph, node: &TreeNode, parent_id: Option<&str>) {
    let graph_node = GraphNode::from_tree(node);
    let id = graph_node.id.clone();

    if !graph.insert_node(graph_node) {
        return;
    }

    if let Some(parent) = parent_id {
        if let Err(err) = graph.add_link(parent, &id, STRUCTURAL_WEIGHT) {
            tracing::warn!(error = %err, "failed to add structural link");
        }
    }

    for child in &node.children {
        add_structure(graph, child, Some(&id));
    }
}

/// Apply the naming-pattern rules over the flat node list.
pub fn add_inferred_links(graph: &mut StructureGraph) {
    let by_extension = extension_index(graph);

    for rule in MANIFEST_RULES {
        apply_manifest_rule(graph, &by_extension, rule);
        if rule.extension == SIMILAR_NAME_EXTENSION {
            apply_similar_name_rule(graph, &by_extension);
        }
    }
}

/// Map from lowercase file extension to the ids of file nodes sharing
/// it, in node insertion order.
fn extension_index(graph: &StructureGraph) -> HashMap<String, Vec<String>> {
    let mut index: HashMap<String, Vec<String>> = HashMap::new();

    for node in graph.nodes() {
        if !node.is_file() {
            continue;
        }
        if let Some(ext) = node.extension() {
            index.entry(ext).or_default().push(node.id.clone());
        }
    }

    index
}

/// Link every file of the rule's extension to every node carrying the
/// manifest name (full cross product).
fn apply_manifest_rule(
    graph: &mut StructureGraph,
    by_extension: &HashMap<String, Vec<String>>,
    rule: &ManifestRule,
) {
    let Some(sources) = by_extension.get(rule.extension) else {
        return;
    };

    let manifests: Vec<String> = graph
        .nodes()
        .filter(|node| node.name == rule.manifest)
        .map(|node| node.id.clone())
        .collect();

    for source in sources {
        for manifest in &manifests {
            if let Err(err) = graph.add_link(source, manifest, rule.weight) {
                tracing::warn!(error = %err, "failed to add manifest link");
            }
        }
    }
}

/// Pairwise similar-name links between files of the similar-name
/// extension.
///
/// For each pair `i < j` in node order, one `i -> j` link is added when
/// either file's name stem is a substring of the other's full name. Only
/// that one direction per pair is checked, so a reordered node list can
/// yield a different link set; that asymmetry is intentional behavior.
fn apply_similar_name_rule(
    graph: &mut StructureGraph,
    by_extension: &HashMap<String, Vec<String>>,
) {
    let Some(ids) = by_extension.get(SIMILAR_NAME_EXTENSION) else {
        return;
    };
    if ids.len() < 2 {
        return;
    }

    let names: Vec<(String, String)> = ids
        .iter()
        .filter_map(|id| {
            graph
                .get_node(id)
                .map(|node| (id.clone(), node.name.to_ascii_lowercase()))
        })
        .collect();

    for (i, (source_id, source_name)) in names.iter().enumerate() {
        let source_stem = stem(source_name);

        for (target_id, target_name) in &names[i + 1..] {
            let target_stem = stem(target_name);

            if target_name.contains(source_stem) || source_name.contains(target_stem) {
                if let Err(err) = graph.add_link(source_id, target_id, SIMILAR_NAME_WEIGHT) {
                    tracing::warn!(error = %err, "failed to add similar-name link");
                }
            }
        }
    }
}

/// Substring before the first `.`.
fn stem(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}
