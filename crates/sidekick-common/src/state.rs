//! Host-provided durable storage port.
//!
//! The host application owns where state actually lives (a file, a
//! database, an editor workspace-state API). The core only sees a
//! key/value scope tied to the current workspace.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::errors::StateError;

/// A key/value scope backed by durable, workspace-local storage.
///
/// `get` treats absence as a normal condition, never an error. `set`
/// replaces the prior value for the key wholesale.
pub trait WorkspaceState: Send + Sync {
    fn get(&self, key: &str) -> Option<serde_json::Value>;

    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StateError>;
}

/// In-memory state scope. Used in tests and as a fallback when the host
/// has no writable storage location.
#[derive(Default)]
pub struct MemoryState {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl WorkspaceState for MemoryState {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StateError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StateError::Write("state lock poisoned".into()))?;
        values.insert(key.to_string(), value);
        Ok(())
    }
}
