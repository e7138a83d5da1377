//! Language distribution and synthetic complexity summaries.
//!
//! The language histogram is real: it counts files by extension using a
//! fixed lookup table. The complexity figures are not - they are drawn
//! from a uniform random distribution so the front-end review panel has
//! something to render. They are placeholder data and are documented as
//! such wherever they surface.

use rand::Rng;
use repolens_graph::TreeNode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Share of one language among the classified files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageShare {
    /// Language label from the extension table
    pub language: String,

    /// Percentage of classified files, 0-100
    pub percentage: f64,
}

/// Synthetic per-file complexity sample.
///
/// `complexity` and `lines` are uniform random draws, not measurements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplexityEntry {
    /// File name (not path)
    pub file: String,

    /// Synthetic complexity score in [5, 30]
    pub complexity: u32,

    /// Synthetic line count in [50, 500]
    pub lines: u32,
}

/// Code-quality payload for one repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityReport {
    /// Language shares, highest percentage first
    pub language_distribution: Vec<LanguageShare>,

    /// Top synthetic complexity samples, highest first
    pub complexity: Vec<ComplexityEntry>,
}

/// Extensions that receive a synthetic complexity sample.
const CODE_EXTENSIONS: &[&str] = &["js", "py", "java", "c", "cpp", "cs", "go", "rb", "php"];

/// Number of complexity entries kept after sorting.
const COMPLEXITY_LIMIT: usize = 10;

/// Map a lowercase file extension to its language label.
pub fn language_for_extension(ext: &str) -> Option<&'static str> {
    let language = match ext {
        "js" => "JavaScript",
        "ts" => "TypeScript",
        "jsx" => "React",
        "tsx" => "React/TypeScript",
        "py" => "Python",
        "java" => "Java",
        "c" => "C",
        "cpp" => "C++",
        "cs" => "C#",
        "go" => "Go",
        "rb" => "Ruby",
        "php" => "PHP",
        "html" => "HTML",
        "css" => "CSS",
        "scss" => "SCSS",
        "less" => "Less",
        "json" => "JSON",
        "md" => "Markdown",
        "sql" => "SQL",
        "sh" => "Shell",
        "bat" => "Batch",
        "ps1" => "PowerShell",
        "swift" => "Swift",
        "kt" => "Kotlin",
        "rs" => "Rust",
        "dart" => "Dart",
        "vue" => "Vue",
        "svelte" => "Svelte",
        _ => return None,
    };
    Some(language)
}

/// Summarize language distribution and synthetic complexity for a tree.
///
/// Percentages are computed only over files whose extension maps to a
/// known language; unmapped extensions stay out of the denominator. The
/// summary never fails: a tree with no classifiable files yields empty
/// lists.
pub fn summarize(tree: &TreeNode) -> QualityReport {
    let mut counts: HashMap<&'static str, usize> = HashMap::new();
    let mut complexity = Vec::new();
    let mut rng = rand::rng();

    collect(tree, &mut counts, &mut complexity, &mut rng);

    let total: usize = counts.values().sum();
    let mut language_distribution: Vec<LanguageShare> = counts
        .into_iter()
        .map(|(language, count)| LanguageShare {
            language: language.to_string(),
            percentage: count as f64 / total as f64 * 100.0,
        })
        .collect();
    language_distribution.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));

    complexity.sort_by(|a, b| b.complexity.cmp(&a.complexity));
    complexity.truncate(COMPLEXITY_LIMIT);

    QualityReport {
        language_distribution,
        complexity,
    }
}

fn collect<R: Rng>(
    node: &TreeNode,
    counts: &mut HashMap<&'static str, usize>,
    complexity: &mut Vec<ComplexityEntry>,
    rng: &mut R,
) {
    if !node.is_dir() {
        if let Some((_, ext)) = node.name.rsplit_once('.') {
            let ext = ext.to_ascii_lowercase();

            if let Some(language) = language_for_extension(&ext) {
                *counts.entry(language).or_insert(0) += 1;
            }

            if CODE_EXTENSIONS.contains(&ext.as_str()) {
                complexity.push(ComplexityEntry {
                    file: node.name.clone(),
                    complexity: rng.random_range(5..=30),
                    lines: rng.random_range(50..=500),
                });
            }
        }
    }

    for child in &node.children {
        collect(child, counts, complexity, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tree_with_files(names: &[&str]) -> TreeNode {
        let mut root = TreeNode::directory("repo", "", "u");
        for name in names {
            root.children.push(TreeNode::file(*name, *name, "u"));
        }
        root
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let tree = tree_with_files(&["a.js", "b.js", "c.py", "d.rs", "readme.md"]);
        let report = summarize(&tree);

        let sum: f64 = report
            .language_distribution
            .iter()
            .map(|s| s.percentage)
            .sum();
        assert!((sum - 100.0).abs() < 1e-9, "sum was {sum}");
    }

    #[test]
    fn test_unmapped_extensions_excluded_from_denominator() {
        let tree = tree_with_files(&["a.js", "weird.xyz"]);
        let report = summarize(&tree);

        assert_eq!(report.language_distribution.len(), 1);
        assert_eq!(report.language_distribution[0].language, "JavaScript");
        assert_eq!(report.language_distribution[0].percentage, 100.0);
    }

    #[test]
    fn test_distribution_sorted_descending() {
        let tree = tree_with_files(&["a.js", "b.js", "c.py"]);
        let report = summarize(&tree);

        assert_eq!(report.language_distribution[0].language, "JavaScript");
        assert!(
            report.language_distribution[0].percentage
                >= report.language_distribution[1].percentage
        );
    }

    #[test]
    fn test_complexity_only_for_code_extensions() {
        let tree = tree_with_files(&["a.js", "style.css", "readme.md", "app.py"]);
        let report = summarize(&tree);

        let files: Vec<_> = report.complexity.iter().map(|c| c.file.as_str()).collect();
        assert_eq!(files.len(), 2);
        assert!(files.contains(&"a.js"));
        assert!(files.contains(&"app.py"));
    }

    #[test]
    fn test_complexity_values_within_documented_ranges() {
        let tree = tree_with_files(&["a.js", "b.py", "c.go", "d.rb"]);
        let report = summarize(&tree);

        for entry in &report.complexity {
            assert!((5..=30).contains(&entry.complexity));
            assert!((50..=500).contains(&entry.lines));
        }
    }

    #[test]
    fn test_complexity_sorted_and_truncated() {
        let names: Vec<String> = (0..15).map(|i| format!("f{i}.js")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let tree = tree_with_files(&refs);

        let report = summarize(&tree);
        assert_eq!(report.complexity.len(), 10);
        for pair in report.complexity.windows(2) {
            assert!(pair[0].complexity >= pair[1].complexity);
        }
    }

    #[test]
    fn test_empty_tree_yields_empty_report() {
        let tree = TreeNode::directory("repo", "", "u");
        let report = summarize(&tree);

        assert!(report.language_distribution.is_empty());
        assert!(report.complexity.is_empty());
    }

    #[test]
    fn test_files_without_extension_ignored() {
        let tree = tree_with_files(&["Makefile", "LICENSE"]);
        let report = summarize(&tree);

        assert!(report.language_distribution.is_empty());
        assert!(report.complexity.is_empty());
    }

    #[test]
    fn test_report_serialization_field_names() {
        let tree = tree_with_files(&["a.js"]);
        let json = serde_json::to_value(summarize(&tree)).unwrap();

        assert!(json["languageDistribution"].is_array());
        assert!(json["complexity"].is_array());
    }
}
