//! TOML config loading: read from path or platform default.

use std::path::Path;

use tracing::info;

use sidekick_common::ConfigError;

use crate::schema::SidekickConfig;

/// Default config file contents written on first run.
const DEFAULT_CONFIG_TOML: &str = r#"# Sidekick panel configuration.
# Every setting is optional; remove a line to fall back to the default.

[api]
# key = "sk-..."
model = "gpt-3.5-turbo"
max_tokens = 2048

[history]
max_messages = 20

[logging]
level = "sidekick=info"
"#;

/// Load config from a specific TOML file path.
///
/// Deserializes the file using serde defaults for any missing fields.
pub fn load_from_path(path: &Path) -> Result<SidekickConfig, ConfigError> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| ConfigError::FileNotFound(path.to_path_buf()))?;

    let config: SidekickConfig = toml::from_str(&content)
        .map_err(|e| ConfigError::ParseError(format!("failed to parse TOML: {e}")))?;

    info!("loaded config from {}", path.display());
    Ok(config)
}

/// Load config from the platform-specific default path.
///
/// On macOS: `~/Library/Application Support/sidekick/config.toml`
/// On Linux: `~/.config/sidekick/config.toml`
///
/// If the file does not exist, creates a default config file and returns
/// defaults.
pub fn load_default() -> Result<SidekickConfig, ConfigError> {
    let path = default_config_path()?;

    match load_from_path(&path) {
        Ok(config) => Ok(config),
        Err(ConfigError::FileNotFound(_)) => {
            info!("no config found at {}, creating default", path.display());
            create_default_config(&path)?;
            Ok(SidekickConfig::default())
        }
        Err(e) => Err(e),
    }
}

/// Get the platform-specific default config file path.
pub fn default_config_path() -> Result<std::path::PathBuf, ConfigError> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::ParseError("could not determine config directory".into()))?;
    Ok(config_dir.join("sidekick").join("config.toml"))
}

/// Create a default TOML config file with documentation comments.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConfigError::ParseError(format!(
                "failed to create config directory {}: {e}",
                parent.display()
            ))
        })?;
    }

    std::fs::write(path, DEFAULT_CONFIG_TOML).map_err(|e| {
        ConfigError::ParseError(format!(
            "failed to write default config to {}: {e}",
            path.display()
        ))
    })?;

    info!("created default config at {}", path.display());
    Ok(())
}

/// Reject configs that cannot drive the panel at all.
pub fn validate(config: &SidekickConfig) -> Result<(), ConfigError> {
    if config.api.model.is_empty() {
        return Err(ConfigError::ValidationError("api.model is empty".into()));
    }
    if config.api.max_tokens == 0 {
        return Err(ConfigError::ValidationError("api.max_tokens is zero".into()));
    }
    if config.history.max_messages == 0 {
        return Err(ConfigError::ValidationError(
            "history.max_messages is zero".into(),
        ));
    }
    Ok(())
}
