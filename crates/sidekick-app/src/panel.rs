//! Stdio bridge between the session core and the panel surface.
//!
//! The rendering surface speaks newline-delimited JSON: one
//! `PanelCommand` per stdin line, one `PanelEvent` per stdout line.
//! History is replayed once at startup so the surface rebuilds its
//! transcript from durable state.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::warn;

use sidekick_ai::SessionController;
use sidekick_bridge::{PanelCommand, PanelEvent};

pub async fn run(
    mut controller: SessionController,
    mut events: UnboundedReceiver<PanelEvent>,
) -> sidekick_common::Result<()> {
    let writer = tokio::spawn(async move {
        let mut stdout = tokio::io::stdout();
        while let Some(event) = events.recv().await {
            let mut line = event.to_json();
            line.push('\n');
            if stdout.write_all(line.as_bytes()).await.is_err() {
                break;
            }
            let _ = stdout.flush().await;
        }
    });

    controller.replay_history();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match PanelCommand::from_json(line) {
            Some(command) => controller.handle_command(command).await,
            None => warn!(body_len = line.len(), "panel message rejected: invalid JSON"),
        }
    }

    // Dropping the controller closes the event channel and ends the writer.
    drop(controller);
    let _ = writer.await;
    Ok(())
}
