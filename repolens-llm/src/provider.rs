//! Chat-completion provider trait and error types.
//!
//! This module defines the capability interface for chat-completion
//! backends. The server depends only on the trait, so the live HTTP
//! client and deterministic test stubs are interchangeable.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during chat-completion operations.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Transport-level failure reaching the API.
    #[error("Chat API request failed: {0}")]
    Transport(String),

    /// The API returned a non-success status.
    #[error("Chat API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message extracted from the error body, or the raw body
        message: String,
    },

    /// The response body could not be parsed.
    #[error("Invalid response from chat API: {0}")]
    InvalidResponse(String),

    /// The response carried no message content.
    #[error("Chat API returned an empty response")]
    EmptyResponse,

    /// Provider misconfiguration (bad proxy, missing key).
    #[error("Chat provider not configured: {0}")]
    NotConfigured(String),
}

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Role of a message sender in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions establishing the assistant's behavior.
    System,
    /// User/human message.
    User,
    /// Assistant/model message.
    Assistant,
}

/// A message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender.
    pub role: Role,
    /// The content of the message.
    pub content: String,
}

impl Message {
    /// Create a new system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create a new assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Per-request options.
#[derive(Debug, Clone, Default)]
pub struct ChatOptions {
    /// Provider-specific extra body parameters, merged into the request
    /// at the top level (e.g. `{"enable_thinking": false}`).
    pub extra: Option<serde_json::Value>,
}

impl ChatOptions {
    /// Options carrying extra body parameters.
    pub fn with_extra(extra: serde_json::Value) -> Self {
        Self { extra: Some(extra) }
    }
}

/// Trait for chat-completion providers.
///
/// # Example
///
/// ```rust,ignore
/// use repolens_llm::{ChatProvider, ChatResult};
///
/// async fn example(provider: &dyn ChatProvider) -> ChatResult<String> {
///     provider
///         .prompt("You are a helpful assistant.", "What is Rust?")
///         .await
/// }
/// ```
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Get the provider name (e.g., "openai-compatible").
    fn name(&self) -> &str;

    /// Send a system + user prompt and return the reply text.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success API status,
    /// or an unparseable/empty response.
    async fn prompt(&self, system: &str, user: &str) -> ChatResult<String> {
        self.prompt_with_options(system, user, &ChatOptions::default())
            .await
    }

    /// Send a prompt with provider-specific options.
    async fn prompt_with_options(
        &self,
        system: &str,
        user: &str,
        options: &ChatOptions,
    ) -> ChatResult<String>;
}
