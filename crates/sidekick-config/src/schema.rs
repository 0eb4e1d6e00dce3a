//! Configuration schema types for Sidekick.
//!
//! All structs use `serde(default)` so partial configs work correctly.
//! Missing fields are filled with defaults matching the shipped panel.

use serde::{Deserialize, Serialize};

/// Root configuration for the Sidekick panel host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SidekickConfig {
    pub api: ApiConfig,
    pub history: HistoryConfig,
    pub logging: LoggingConfig,
}

/// Completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// OpenAI API key. Absent by default; the panel starts without it and
    /// reports the missing key per submission.
    pub key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            key: None,
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 2048,
        }
    }
}

/// Conversation history settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum retained conversation messages; older ones are evicted first.
    pub max_messages: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self { max_messages: 20 }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing filter directive, overridable per run.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "sidekick=info".to_string(),
        }
    }
}
