//! Conversation session management.
//!
//! A `ConversationStore` owns the bounded message history and its
//! persistence to workspace storage; a `SessionController` sequences
//! each panel command through the request/response cycle.

mod controller;
mod store;
mod types;

pub use controller::SessionController;
pub use store::{ConversationStore, HISTORY_KEY, MAX_HISTORY_LEN};
