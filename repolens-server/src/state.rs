//! Shared application state.

use crate::config::ServerConfig;
use crate::diagram::DiagramGenerator;
use crate::explain::CodeExplainer;
use repolens_llm::ChatProvider;
use repolens_survey::GitHubClient;
use std::sync::Arc;

/// State shared by all request handlers.
///
/// Built once at startup; everything inside is read-only for the life of
/// the process.
pub struct AppState {
    /// Process configuration.
    pub config: ServerConfig,

    /// GitHub API client.
    pub github: GitHubClient,

    /// Diagram generator (chat model with local fallback).
    pub diagram: DiagramGenerator,

    /// Single-file explanation service.
    pub explainer: CodeExplainer,
}

/// Handler-facing alias for the shared state.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Assemble the application state from its parts.
    pub fn new(config: ServerConfig, github: GitHubClient, chat: Arc<dyn ChatProvider>) -> Self {
        let diagram = DiagramGenerator::new(chat.clone());
        let explainer = CodeExplainer::new(chat, config.file_size_limit);

        Self {
            config,
            github,
            diagram,
            explainer,
        }
    }
}
