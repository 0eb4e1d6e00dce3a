//! AI engine for the Sidekick panel.
//!
//! Provides the OpenAI chat-completions client and the conversation
//! session layer:
//! - Outcome classification for every completion request
//! - Bounded conversation history persisted to workspace storage
//! - A controller that sequences panel commands through the
//!   request/response cycle
//!
//! One request is in flight at a time; there is no streaming and no retry.

pub mod openai;
pub mod session;

use async_trait::async_trait;

pub use openai::{OpenAiClient, OpenAiConfig};
pub use session::{ConversationStore, SessionController};

pub use sidekick_common::{Message, Role};

#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one completion request carrying the full conversation, in
    /// transcript order, and classify the outcome.
    async fn complete(&self, messages: &[Message]) -> Result<String, AiError>;
}

/// Classified failure outcomes of a completion request.
///
/// Closed set: every failed turn lands on exactly one variant, and every
/// variant has exactly one rendering via [`AiError::user_message`].
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key configured. Detected before any network call.
    #[error("no API key configured")]
    MissingCredential,

    /// The endpoint answered with a non-success status.
    #[error("API error {status}: {message}")]
    Remote { status: u16, message: String },

    /// The request went out but no response came back (timeout, DNS
    /// failure, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// Transport succeeded but the payload lacks the expected
    /// choice/message shape.
    #[error("unexpected response shape")]
    MalformedResponse,

    /// Anything not covered above.
    #[error("{0}")]
    Other(String),
}

impl AiError {
    /// The text shown to the user for this outcome.
    ///
    /// The controller appends this as the assistant message of the turn,
    /// so failures are part of the durable transcript. UI strings are
    /// Japanese, matching the shipped panel.
    pub fn user_message(&self) -> String {
        match self {
            AiError::MissingCredential => {
                "APIキーが設定されていません。設定からOpenAIのAPIキーを入力してください。".to_string()
            }
            AiError::Remote { status, message } => format!("エラー: {status} - {message}"),
            AiError::Network(_) => {
                "エラー: レスポンスが受信できませんでした。ネットワークを確認してください。".to_string()
            }
            AiError::MalformedResponse => "予期しないレスポンス形式です。".to_string(),
            AiError::Other(description) => format!("エラーが発生しました: {description}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_text_includes_status_and_message() {
        let err = AiError::Remote {
            status: 500,
            message: "boom".into(),
        };
        assert_eq!(err.user_message(), "エラー: 500 - boom");
    }

    #[test]
    fn remote_error_with_empty_message_still_renders() {
        let err = AiError::Remote {
            status: 429,
            message: String::new(),
        };
        assert_eq!(err.user_message(), "エラー: 429 - ");
    }

    #[test]
    fn fixed_texts_are_stable() {
        assert_eq!(
            AiError::MissingCredential.user_message(),
            "APIキーが設定されていません。設定からOpenAIのAPIキーを入力してください。"
        );
        assert_eq!(
            AiError::Network("connection reset".into()).user_message(),
            "エラー: レスポンスが受信できませんでした。ネットワークを確認してください。"
        );
        assert_eq!(
            AiError::MalformedResponse.user_message(),
            "予期しないレスポンス形式です。"
        );
    }

    #[test]
    fn other_text_carries_description() {
        let err = AiError::Other("channel closed".into());
        assert_eq!(err.user_message(), "エラーが発生しました: channel closed");
    }
}
