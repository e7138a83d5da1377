//! `POST /api/explain-code` - single-file explanation.

use crate::error::ApiError;
use crate::state::SharedState;
use axum::Json;
use axum::extract::State;
use repolens_survey::RepoRef;
use serde::{Deserialize, Serialize};

/// Request body for `/api/explain-code`.
#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    /// Browser URL of the repository.
    pub repo_url: Option<String>,

    /// Path of the file to explain, relative to the repository root.
    pub file_path: Option<String>,
}

/// Response body for `/api/explain-code`.
#[derive(Debug, Serialize)]
pub struct ExplainResponse {
    /// The model's free-text explanation, Markdown formatted.
    pub explanation: String,
}

/// Explain one file of a repository via the chat model.
pub async fn explain_code(
    State(state): State<SharedState>,
    Json(request): Json<ExplainRequest>,
) -> Result<Json<ExplainResponse>, ApiError> {
    let url = request.repo_url.filter(|u| !u.is_empty());
    let file_path = request.file_path.filter(|p| !p.is_empty());

    let (Some(url), Some(file_path)) = (url, file_path) else {
        return Err(ApiError::Validation(
            "Missing repository URL or file path".to_string(),
        ));
    };

    let repo = RepoRef::parse_url(&url)
        .map_err(|_| ApiError::Validation("Invalid GitHub repository URL".to_string()))?;

    tracing::info!(repo = %repo.full_name(), file = %file_path, "explaining file");

    let explanation = state
        .explainer
        .explain(&state.github, &repo, &file_path)
        .await?;

    Ok(Json(ExplainResponse { explanation }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_deserialization() {
        let request: ExplainRequest = serde_json::from_str(
            r#"{"repo_url": "https://github.com/acme/widget", "file_path": "src/main.rs"}"#,
        )
        .unwrap();
        assert_eq!(request.file_path.as_deref(), Some("src/main.rs"));

        let request: ExplainRequest =
            serde_json::from_str(r#"{"repo_url": "https://github.com/acme/widget"}"#).unwrap();
        assert!(request.file_path.is_none());
    }

    #[test]
    fn test_response_serialization() {
        let response = ExplainResponse {
            explanation: "This file does things.".to_string(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["explanation"], "This file does things.");
    }
}
