//! `POST /analyze` - full repository analysis.

use crate::error::ApiError;
use crate::state::SharedState;
use axum::Json;
use axum::extract::State;
use repolens_graph::{GraphSnapshot, TreeNode};
use repolens_survey::{
    QualityReport, RepoContents, RepoRef, RepoSummary, StructureWalker, build_dependency_graph,
    summarize,
};
use serde::{Deserialize, Serialize};

/// Request body for `/analyze`.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    /// Browser URL of the repository to analyze.
    pub url: Option<String>,
}

/// Response body for `/analyze`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    /// Repository metadata.
    pub repo_info: RepoSummary,

    /// Structure tree, bounded by the file-count ceiling.
    pub file_structure: TreeNode,

    /// Dependency graph (structural plus inferred links).
    pub dependency_data: GraphSnapshot,

    /// Language distribution and synthetic complexity samples.
    pub code_quality: QualityReport,

    /// Mermaid flowchart markup.
    pub mermaid_chart: String,
}

/// Analyze a repository: metadata, structure tree, dependency graph,
/// quality summary, and a Mermaid diagram of the layout.
pub async fn analyze(
    State(state): State<SharedState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let url = request
        .url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| ApiError::Validation("Missing repository URL".to_string()))?;

    let repo = RepoRef::parse_url(&url)
        .map_err(|_| ApiError::Validation("Invalid GitHub repository URL".to_string()))?;

    tracing::info!(repo = %repo.full_name(), "analyzing repository");

    let overview = state.github.repo_overview(&repo).await.map_err(|err| {
        ApiError::Upstream(format!("Failed to fetch repository information: {err}"))
    })?;

    let provider = RepoContents::new(&state.github, &repo, &overview.default_branch);
    let walker = StructureWalker::new(state.config.max_files);
    let file_structure = walker
        .walk(&provider, &repo.name, &overview.summary.url)
        .await;

    let dependency_data = build_dependency_graph(&file_structure).snapshot();
    let code_quality = summarize(&file_structure);
    let mermaid_chart = state.diagram.generate(&file_structure).await;

    Ok(Json(AnalyzeResponse {
        repo_info: overview.summary,
        file_structure,
        dependency_data,
        code_quality,
        mermaid_chart,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_deserialization() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"url": "https://github.com/acme/widget"}"#).unwrap();
        assert_eq!(request.url.as_deref(), Some("https://github.com/acme/widget"));

        let request: AnalyzeRequest = serde_json::from_str("{}").unwrap();
        assert!(request.url.is_none());
    }

    #[test]
    fn test_response_field_names() {
        let response = AnalyzeResponse {
            repo_info: RepoSummary {
                name: "widget".to_string(),
                full_name: "acme/widget".to_string(),
                description: None,
                language: None,
                stars: 0,
                forks: 0,
                created_at: None,
                updated_at: None,
                url: "https://github.com/acme/widget".to_string(),
            },
            file_structure: TreeNode::directory("widget", "", "u"),
            dependency_data: GraphSnapshot {
                nodes: vec![],
                links: vec![],
            },
            code_quality: QualityReport {
                language_distribution: vec![],
                complexity: vec![],
            },
            mermaid_chart: "flowchart TD".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("repoInfo").is_some());
        assert!(json.get("fileStructure").is_some());
        assert!(json.get("dependencyData").is_some());
        assert!(json.get("codeQuality").is_some());
        assert!(json.get("mermaidChart").is_some());
    }
}
