//! Bounded conversation history with workspace persistence.

use std::sync::Arc;

use tracing::{error, warn};

use sidekick_common::{Message, WorkspaceState};

/// Storage key for the conversation, stable across releases.
pub const HISTORY_KEY: &str = "conversationHistory";

/// Maximum retained messages. The conversation is also the literal
/// request payload, so this bounds per-call API cost and latency.
pub const MAX_HISTORY_LEN: usize = 20;

/// The bounded, ordered conversation log.
///
/// Owned exclusively by one `SessionController`; after every mutation
/// the length invariant `len <= max_len` holds, with the oldest
/// messages evicted first.
pub struct ConversationStore {
    state: Arc<dyn WorkspaceState>,
    messages: Vec<Message>,
    max_len: usize,
}

impl ConversationStore {
    /// Load the conversation from workspace storage. A missing value is
    /// an empty conversation; an unreadable one is dropped with a warning.
    pub fn load(state: Arc<dyn WorkspaceState>) -> Self {
        let messages = match state.get(HISTORY_KEY) {
            None => Vec::new(),
            Some(value) => serde_json::from_value(value).unwrap_or_else(|e| {
                warn!("stored conversation history unreadable, starting empty: {e}");
                Vec::new()
            }),
        };
        Self {
            state,
            messages,
            max_len: MAX_HISTORY_LEN,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self.enforce_bound();
        self
    }

    /// Append one message, then evict from the front until the bound holds.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
        self.enforce_bound();
    }

    fn enforce_bound(&mut self) {
        if self.messages.len() > self.max_len {
            let excess = self.messages.len() - self.max_len;
            self.messages.drain(..excess);
        }
    }

    /// Reset to an empty conversation.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Write the conversation to workspace storage, replacing the prior
    /// value. Storage failures are logged, not surfaced: the in-memory
    /// transcript stays authoritative for the rest of the session.
    pub fn persist(&self) {
        let value = match serde_json::to_value(&self.messages) {
            Ok(value) => value,
            Err(e) => {
                error!("failed to serialize conversation history: {e}");
                return;
            }
        };
        if let Err(e) = self.state.set(HISTORY_KEY, value) {
            error!("failed to persist conversation history: {e}");
        }
    }

    /// The full conversation in transcript order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
