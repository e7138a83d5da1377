//! Process-wide configuration for the Repolens server.
//!
//! Configuration is read once at startup from the environment (after
//! `.env` loading) and treated as read-only for the life of the process.
//!
//! # Environment Variables
//!
//! - `GITHUB_TOKEN`: GitHub personal access token (optional; anonymous
//!   access without it)
//! - `CHAT_API_KEY`: credential for the chat-completion API
//! - `CHAT_API_BASE_URL`: OpenAI-compatible base URL
//! - `CHAT_MODEL`: model id to request
//! - `HTTP_PROXY` / `HTTPS_PROXY`: outbound proxy for the chat client;
//!   both must be set for the proxy to take effect
//! - `REPOLENS_MAX_FILES`: file-count ceiling for traversal
//! - `REPOLENS_FILE_SIZE_LIMIT`: per-file byte ceiling for explanation
//! - `REPOLENS_STATIC_DIR`: static asset directory

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Default base URL for the chat-completion API.
const DEFAULT_CHAT_BASE_URL: &str = "https://dashscope.aliyuncs.com/compatible-mode/v1";

/// Default chat model id.
const DEFAULT_CHAT_MODEL: &str = "qwen-turbo-latest";

/// Default file-count ceiling for structure traversal.
const DEFAULT_MAX_FILES: usize = 100;

/// Default per-file size ceiling in bytes (1 MiB).
const DEFAULT_FILE_SIZE_LIMIT: u64 = 1024 * 1024;

/// Default static asset directory.
const DEFAULT_STATIC_DIR: &str = "frontend";

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be parsed.
    #[error("Invalid value for {var}: {value}")]
    InvalidValue {
        /// Variable name
        var: String,
        /// Offending value
        value: String,
    },
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// GitHub personal access token; anonymous access without it.
    pub github_token: Option<String>,

    /// Chat API credential.
    pub chat_api_key: String,

    /// Chat API base URL (OpenAI-compatible).
    pub chat_base_url: String,

    /// Chat model id.
    pub chat_model: String,

    /// Outbound proxy for the chat client, when configured.
    pub chat_proxy: Option<String>,

    /// File-count ceiling for structure traversal.
    pub max_files: usize,

    /// Per-file size ceiling in bytes for code explanation.
    pub file_size_limit: u64,

    /// Static asset directory served at `/`.
    pub static_dir: PathBuf,
}

impl ServerConfig {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let github_token = read_optional("GITHUB_TOKEN");
        let chat_api_key = read_optional("CHAT_API_KEY").unwrap_or_default();

        let chat_base_url = read_optional("CHAT_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_CHAT_BASE_URL.to_string());
        let chat_model =
            read_optional("CHAT_MODEL").unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string());

        // The proxy applies only when both variables are present.
        let chat_proxy = match (read_optional("HTTP_PROXY"), read_optional("HTTPS_PROXY")) {
            (Some(_), Some(https)) => Some(https),
            _ => None,
        };

        let max_files = parse_var("REPOLENS_MAX_FILES", DEFAULT_MAX_FILES)?;
        let file_size_limit = parse_var("REPOLENS_FILE_SIZE_LIMIT", DEFAULT_FILE_SIZE_LIMIT)?;
        let static_dir = read_optional("REPOLENS_STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        Ok(Self {
            github_token,
            chat_api_key,
            chat_base_url,
            chat_model,
            chat_proxy,
            max_files,
            file_size_limit,
            static_dir,
        })
    }

    /// Check if a GitHub token is configured.
    pub fn has_github_token(&self) -> bool {
        self.github_token.is_some()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            github_token: None,
            chat_api_key: String::new(),
            chat_base_url: DEFAULT_CHAT_BASE_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            chat_proxy: None,
            max_files: DEFAULT_MAX_FILES,
            file_size_limit: DEFAULT_FILE_SIZE_LIMIT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

fn read_optional(var: &str) -> Option<String> {
    env::var(var).ok().filter(|value| !value.is_empty())
}

fn parse_var<T: FromStr>(var: &str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: var.to_string(),
            value,
        }),
        Err(_) => Ok(default),
    }
}
