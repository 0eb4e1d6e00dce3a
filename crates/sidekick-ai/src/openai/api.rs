//! CompletionClient trait implementation for OpenAiClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, CompletionClient, Message};

use super::client::OpenAiClient;

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, AiError> {
        // Credential gate: no key, no network call.
        let Some(key) = self.config.credential() else {
            return Err(AiError::MissingCredential);
        };
        let authorization = format!("Bearer {key}");

        let body = self.build_request_body(messages);

        debug!(model = %self.config.model, messages = messages.len(), "completion request");

        let response = self
            .http
            .post(&self.config.api_url)
            .header("Authorization", authorization)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let json = response
                .json::<serde_json::Value>()
                .await
                .unwrap_or(serde_json::Value::Null);
            return Err(AiError::Remote {
                status: status.as_u16(),
                message: OpenAiClient::extract_error_message(&json),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|_| AiError::MalformedResponse)?;

        self.parse_response(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpenAiConfig;

    #[tokio::test]
    async fn missing_key_short_circuits_before_network() {
        // The URL is unroutable; reaching it would fail with Network, so a
        // MissingCredential result proves no request was attempted.
        let config = OpenAiConfig::new(None).with_api_url("http://127.0.0.1:1/v1/chat/completions");
        let client = OpenAiClient::new(config);

        let result = client.complete(&[Message::user("hi")]).await;
        assert!(matches!(result, Err(AiError::MissingCredential)));
    }

    #[tokio::test]
    async fn empty_key_short_circuits_too() {
        let config = OpenAiConfig::new(Some(String::new()))
            .with_api_url("http://127.0.0.1:1/v1/chat/completions");
        let client = OpenAiClient::new(config);

        let result = client.complete(&[Message::user("hi")]).await;
        assert!(matches!(result, Err(AiError::MissingCredential)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_failure() {
        let config = OpenAiConfig::new(Some("sk-test".into()))
            .with_api_url("http://127.0.0.1:1/v1/chat/completions");
        let client = OpenAiClient::new(config);

        let result = client.complete(&[Message::user("hi")]).await;
        assert!(matches!(result, Err(AiError::Network(_))));
    }
}
