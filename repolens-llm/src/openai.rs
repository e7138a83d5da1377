//! Live chat client for OpenAI-compatible endpoints.
//!
//! Speaks the `/chat/completions` protocol: a model id, an ordered list
//! of role/content messages, a streaming flag, and optional extra body
//! parameters. The reply is the first choice's message content.

use crate::provider::{ChatError, ChatOptions, ChatProvider, ChatResult, Message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Settings for an OpenAI-compatible endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API credential, sent as a bearer token.
    pub api_key: String,

    /// Base URL up to (not including) `/chat/completions`.
    pub base_url: String,

    /// Model id to request.
    pub model: String,

    /// Optional outbound proxy URL applied to all requests.
    pub proxy: Option<String>,
}

/// Chat client for OpenAI-compatible endpoints.
pub struct OpenAiChatClient {
    client: reqwest::Client,
    config: OpenAiConfig,
}

/// Request body sent to the chat-completions endpoint.
#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
    #[serde(flatten)]
    extra: Option<&'a serde_json::Map<String, serde_json::Value>>,
}

/// Top-level response from the chat-completions endpoint.
#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

/// One completion choice.
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// The message inside a completion choice.
#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error response body.
#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

/// Detail inside an error response.
#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiChatClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::NotConfigured`] if the proxy URL is invalid
    /// or the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> ChatResult<Self> {
        let mut builder = reqwest::Client::builder();

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| ChatError::NotConfigured(format!("invalid proxy URL: {e}")))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| ChatError::NotConfigured(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatProvider for OpenAiChatClient {
    fn name(&self) -> &str {
        "openai-compatible"
    }

    async fn prompt_with_options(
        &self,
        system: &str,
        user: &str,
        options: &ChatOptions,
    ) -> ChatResult<String> {
        let messages = [Message::system(system), Message::user(user)];
        let extra = options.extra.as_ref().and_then(|v| v.as_object());
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: &messages,
            stream: false,
            extra,
        };

        tracing::debug!(model = %self.config.model, "sending chat completion request");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(ChatError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ChatError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ChatError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config() -> OpenAiConfig {
        OpenAiConfig {
            api_key: "test-key".to_string(),
            base_url: "https://example.com/v1/".to_string(),
            model: "test-model".to_string(),
            proxy: None,
        }
    }

    #[test]
    fn test_completions_url_trims_trailing_slash() {
        let client = OpenAiChatClient::new(config()).unwrap();
        assert_eq!(
            client.completions_url(),
            "https://example.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_invalid_proxy_rejected() {
        let mut cfg = config();
        cfg.proxy = Some("::not a proxy::".to_string());
        let result = OpenAiChatClient::new(cfg);
        assert!(matches!(result, Err(ChatError::NotConfigured(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let messages = [Message::system("sys"), Message::user("usr")];
        let body = ChatCompletionRequest {
            model: "m",
            messages: &messages,
            stream: false,
            extra: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["stream"], false);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "usr");
        assert!(json.get("enable_thinking").is_none());
    }

    #[test]
    fn test_request_body_merges_extra_parameters() {
        let extra_value = serde_json::json!({"enable_thinking": false});
        let extra = extra_value.as_object();
        let messages = [Message::system("sys"), Message::user("usr")];
        let body = ChatCompletionRequest {
            model: "m",
            messages: &messages,
            stream: false,
            extra,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["enable_thinking"], false);
        assert_eq!(json["model"], "m");
    }

    #[test]
    fn test_response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "flowchart TD"}}
            ]
        }"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("flowchart TD")
        );
    }

    #[test]
    fn test_error_body_parsing() {
        let json = r#"{"error": {"message": "invalid api key", "type": "auth"}}"#;
        let parsed: ApiErrorBody = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.error.message, "invalid api key");
    }
}
