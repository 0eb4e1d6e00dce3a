//! File-backed workspace state.
//!
//! The host keeps one JSON object per workspace under the platform data
//! directory, e.g. `~/.local/share/sidekick/state/<workspace>.json`.
//! Every `set` rewrites the file whole; the stored state is one bounded
//! conversation, so the files stay small.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing::warn;

use sidekick_common::{StateError, WorkspaceState};

pub struct FileWorkspaceState {
    path: PathBuf,
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl FileWorkspaceState {
    /// Open the state scope backed by `path`. A missing file is an empty
    /// scope; an unreadable one is dropped with a warning.
    pub fn open(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!(
                    "workspace state at {} unreadable, starting empty: {e}",
                    path.display()
                );
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            values: Mutex::new(values),
        }
    }

    /// Default state file path for a workspace identifier.
    pub fn default_path(workspace: &str) -> Option<PathBuf> {
        let data_dir = dirs::data_dir()?;
        Some(
            data_dir
                .join("sidekick")
                .join("state")
                .join(format!("{}.json", sanitize(workspace))),
        )
    }

    fn write_out(&self, values: &HashMap<String, serde_json::Value>) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StateError::Write(e.to_string()))?;
        }
        let json = serde_json::to_string_pretty(values)
            .map_err(|e| StateError::Serialize(e.to_string()))?;
        std::fs::write(&self.path, json).map_err(|e| StateError::Write(e.to_string()))
    }
}

/// Map a workspace identifier to a safe file stem.
fn sanitize(workspace: &str) -> String {
    workspace
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

impl WorkspaceState for FileWorkspaceState {
    fn get(&self, key: &str) -> Option<serde_json::Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StateError> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| StateError::Write("state lock poisoned".into()))?;
        values.insert(key.to_string(), value);
        self.write_out(&values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("default.json");

        let state = FileWorkspaceState::open(&path);
        state
            .set("conversationHistory", serde_json::json!([{"role": "user", "content": "hi"}]))
            .unwrap();

        let reopened = FileWorkspaceState::open(&path);
        assert_eq!(
            reopened.get("conversationHistory"),
            Some(serde_json::json!([{"role": "user", "content": "hi"}]))
        );
    }

    #[test]
    fn missing_file_is_empty_scope() {
        let dir = tempfile::tempdir().unwrap();
        let state = FileWorkspaceState::open(dir.path().join("nope.json"));
        assert!(state.get("conversationHistory").is_none());
    }

    #[test]
    fn corrupt_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let state = FileWorkspaceState::open(&path);
        assert!(state.get("anything").is_none());
    }

    #[test]
    fn sanitize_keeps_filenames_safe() {
        assert_eq!(sanitize("my-project_2"), "my-project_2");
        assert_eq!(sanitize("/etc/passwd"), "-etc-passwd");
        assert_eq!(sanitize("a b/c"), "a-b-c");
    }
}
