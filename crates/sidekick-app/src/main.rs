mod cli;
mod panel;
mod state;

use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use sidekick_ai::{ConversationStore, OpenAiClient, OpenAiConfig, SessionController};
use sidekick_common::{MemoryState, WorkspaceState};
use sidekick_config::SidekickConfig;

use state::FileWorkspaceState;

/// Load environment variables from a .env file (KEY=VALUE lines).
fn load_dotenv() {
    let mut candidates = vec![std::path::PathBuf::from(".env")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("sidekick").join(".env"));
    }

    for path in &candidates {
        if let Ok(contents) = std::fs::read_to_string(path) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"').trim_matches('\'');
                    if std::env::var(key).is_err() {
                        std::env::set_var(key, value);
                    }
                }
            }
            return;
        }
    }
}

fn load_panel_config(args: &cli::Args) -> SidekickConfig {
    let result = match args.config.as_deref() {
        Some(path) => sidekick_config::toml_loader::load_from_path(Path::new(path))
            .and_then(|config| sidekick_config::toml_loader::validate(&config).map(|()| config)),
        None => sidekick_config::load_config(),
    };

    match result {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sidekick: config error: {e}; falling back to defaults");
            SidekickConfig::default()
        }
    }
}

#[tokio::main]
async fn main() {
    // Load .env file before anything else
    load_dotenv();

    // Parse CLI arguments
    let args = cli::parse();

    let config = load_panel_config(&args);

    // Initialize logging
    let log_directive = args
        .log_level
        .as_deref()
        .unwrap_or(&config.logging.level)
        .to_string();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "sidekick=info".parse().unwrap()),
            ),
        )
        .init();

    // API key resolution: host config first, then OPENAI_API_KEY.
    let client_config = match config.api.key.clone() {
        Some(key) => OpenAiConfig::new(Some(key)),
        None => OpenAiConfig::from_env(),
    }
    .with_model(config.api.model.clone())
    .with_max_tokens(config.api.max_tokens);

    if client_config.credential().is_none() {
        tracing::warn!("no API key configured; submissions will be answered with setup guidance");
    }

    let client = OpenAiClient::new(client_config);

    let workspace_state: Arc<dyn WorkspaceState> =
        match FileWorkspaceState::default_path(&args.workspace) {
            Some(path) => {
                tracing::info!(workspace = %args.workspace, path = %path.display(), "workspace state");
                Arc::new(FileWorkspaceState::open(path))
            }
            None => {
                tracing::warn!("no data directory available; conversation will not survive restarts");
                Arc::new(MemoryState::new())
            }
        };

    let store =
        ConversationStore::load(workspace_state).with_max_len(config.history.max_messages);

    let (event_tx, event_rx) = tokio::sync::mpsc::unbounded_channel();
    let controller = SessionController::new(Arc::new(client), store, event_tx);

    if let Err(e) = panel::run(controller, event_rx).await {
        tracing::error!("panel bridge terminated: {e}");
    }
}
