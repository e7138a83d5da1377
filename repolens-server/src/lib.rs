//! Repolens server library - routing and request orchestration.
//!
//! The server exposes a small JSON API over the survey, graph, and chat
//! components, plus the static front end:
//!
//! - `POST /analyze`: repository metadata, structure tree, dependency
//!   graph, quality summary, and a Mermaid diagram
//! - `POST /api/explain-code`: chat-model explanation of a single file
//! - `GET /` and other paths: static assets
//!
//! # Modules
//!
//! - [`config`]: process-wide configuration from the environment
//! - [`error`]: the API error type and its HTTP status mapping
//! - [`handlers`]: the request handlers
//! - [`diagram`]: Mermaid generation with the chat model and fallback
//! - [`mermaid`]: the deterministic local flowchart renderer
//! - [`explain`]: the single-file explanation service
//! - [`state`]: shared application state

pub mod config;
pub mod diagram;
pub mod error;
pub mod explain;
pub mod handlers;
pub mod mermaid;
pub mod state;

// Re-export commonly used types for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::ApiError;
pub use state::{AppState, SharedState};

use axum::Router;
use axum::routing::post;
use tower_http::services::ServeDir;

/// Build the application router.
///
/// Serves the JSON API and falls back to static assets from the
/// configured directory (with `index.html` at `/`).
pub fn router(state: SharedState) -> Router {
    let static_dir = state.config.static_dir.clone();

    Router::new()
        .route("/analyze", post(handlers::analyze))
        .route("/api/explain-code", post(handlers::explain_code))
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .with_state(state)
}
