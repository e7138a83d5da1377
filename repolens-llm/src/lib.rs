//! Chat-completion capability layer for Repolens.
//!
//! This crate isolates everything that talks to a language model behind
//! the [`ChatProvider`] trait:
//!
//! - [`provider`]: the trait, message/role types, options, and errors
//! - [`openai`]: the live client for OpenAI-compatible endpoints
//!
//! The server depends only on the trait, so the diagram and explanation
//! paths are testable with deterministic stubs and no network access.

pub mod openai;
pub mod provider;

// Re-export main types for convenience
pub use openai::{OpenAiChatClient, OpenAiConfig};
pub use provider::{ChatError, ChatOptions, ChatProvider, ChatResult, Message, Role};
