//! OpenAI client struct, request building, and response parsing.

use crate::{AiError, Message};

use super::config::OpenAiConfig;

/// OpenAI chat-completions client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    /// Build the JSON request body for the chat completions API.
    /// The conversation is sent verbatim, in transcript order.
    pub(crate) fn build_request_body(&self, messages: &[Message]) -> serde_json::Value {
        serde_json::json!({
            "model": self.config.model,
            "messages": messages,
            "max_tokens": self.config.max_tokens,
        })
    }

    /// Extract the first choice's message content from a 2xx payload.
    /// Anything without that shape classifies as `MalformedResponse`.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<String, AiError> {
        json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .and_then(|choice| choice["message"]["content"].as_str())
            .map(|content| content.trim().to_string())
            .ok_or(AiError::MalformedResponse)
    }

    /// Best-effort extraction of the endpoint's own error message from a
    /// non-2xx body (`{"error": {"message": ...}}`).
    pub(crate) fn extract_error_message(json: &serde_json::Value) -> String {
        json["error"]["message"].as_str().unwrap_or("").to_string()
    }
}
