//! Typed IPC envelopes exchanged with the panel UI.
//!
//! The wire shape is one JSON object per message with a `command`
//! discriminator, e.g. `{"command": "sendMessage", "text": "hi"}`.
//! Unknown commands are tolerated on the inbound side so newer UI
//! builds can talk to an older core without breaking the panel.

use serde::{Deserialize, Serialize};

use sidekick_common::Message;

/// A command from the panel UI to the session core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelCommand {
    /// The user submitted text from the input box.
    SendMessage { text: String },
    /// The user asked to wipe the conversation.
    ClearConversation,
    /// Any command tag this build does not recognize.
    #[serde(other)]
    Unknown,
}

impl PanelCommand {
    /// Parse a command from a raw JSON string (from the UI's postMessage).
    pub fn from_json(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

/// An event from the session core to the panel UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelEvent {
    /// A completion request is in flight; show the loading affordance.
    Loading,
    /// The turn settled; `text` is the assistant reply or mapped error text.
    Response { text: String },
    /// The conversation was reset.
    ConversationCleared,
    /// Full transcript replay, sent on panel (re)attachment.
    LoadHistory { history: Vec<Message> },
}

impl PanelEvent {
    /// Serialize for the wire. Falls back to a null payload if the event
    /// cannot be serialized, which keeps the UI side parsing.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "null".to_string())
    }
}
