//! OpenAI chat-completions client.
//!
//! Implements the `CompletionClient` trait against the chat completions
//! API (https://api.openai.com/v1/chat/completions) with Bearer auth.

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
