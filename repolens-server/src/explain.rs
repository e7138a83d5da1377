//! Single-file code explanation.
//!
//! Fetches one file from the repository, embeds it in a fixed
//! instructional template, and returns the model's free-text reply.
//! Oversized files are rejected before any model call.

use crate::error::ApiError;
use repolens_llm::ChatProvider;
use repolens_survey::{GitHubClient, RemoteFile, RepoRef};
use std::sync::Arc;

const EXPLAIN_SYSTEM_PROMPT: &str =
    "You are a senior software engineer who excels at code explanation and review.";

/// Explains single files via the chat provider.
pub struct CodeExplainer {
    provider: Arc<dyn ChatProvider>,
    size_limit: u64,
}

impl CodeExplainer {
    /// Create an explainer with the given per-file byte ceiling.
    pub fn new(provider: Arc<dyn ChatProvider>, size_limit: u64) -> Self {
        Self {
            provider,
            size_limit,
        }
    }

    /// Fetch a file from the repository and explain it.
    pub async fn explain(
        &self,
        github: &GitHubClient,
        repo: &RepoRef,
        file_path: &str,
    ) -> Result<String, ApiError> {
        let file = github.fetch_file(repo, file_path).await.map_err(|err| {
            if err.is_not_found() {
                ApiError::NotFound(format!("File '{file_path}' not found or inaccessible"))
            } else {
                ApiError::Upstream(format!("Failed to fetch file '{file_path}': {err}"))
            }
        })?;

        self.explain_file(&file).await
    }

    /// Explain an already-fetched file.
    ///
    /// Rejects files above the size ceiling before any model call.
    pub async fn explain_file(&self, file: &RemoteFile) -> Result<String, ApiError> {
        if file.size > self.size_limit {
            return Err(ApiError::PayloadTooLarge(format!(
                "File size exceeds the limit ({} MB)",
                self.size_limit as f64 / 1024.0 / 1024.0
            )));
        }

        let code = file
            .content
            .as_deref()
            .ok_or_else(|| ApiError::Upstream(format!("No content returned for '{}'", file.path)))?;

        let prompt = build_prompt(&file.path, code);

        self.provider
            .prompt(EXPLAIN_SYSTEM_PROMPT, &prompt)
            .await
            .map_err(|err| ApiError::Upstream(format!("Failed to explain code: {err}")))
    }
}

fn build_prompt(file_path: &str, code: &str) -> String {
    format!(
        r#"You are a senior software engineer and code review expert. Your task is to explain the given code file clearly and concisely.
Analyze the following code file and provide a detailed explanation.

File path: `{file_path}`

Code content:
```
{code}
```

Cover the following points in your explanation:
1.  **Overall purpose**: What is the main role and functionality of this file?
2.  **Key parts**: Identify and explain the key functions, classes, or logic blocks.
3.  **Code structure**: Describe how the code is organized and structured.
4.  **Potential improvements**: (Optional) If anything could be improved (performance, readability, best practices), point it out.

Reply in Markdown format so the explanation is easy to read."#
    )
}
