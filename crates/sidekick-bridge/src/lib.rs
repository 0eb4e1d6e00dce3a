//! Message-passing boundary between the chat core and the rendering surface.
//!
//! Messages flow in both directions as JSON envelopes discriminated by a
//! `command` field:
//! - **UI -> core**: user submissions and conversation management requests.
//! - **core -> UI**: loading/response lifecycle and transcript replay.
//!
//! The rendering surface itself (markup, DOM, styling) lives on the other
//! side of this boundary and is not part of this workspace.

pub mod ipc;

pub use ipc::{PanelCommand, PanelEvent};
