//! Sidekick configuration system.
//!
//! TOML-based configuration for the panel host. All sections use
//! sensible defaults so a partial (or absent) config works out of the
//! box — in particular, a missing API key is a valid configuration.

pub mod schema;
pub mod toml_loader;

pub use schema::{ApiConfig, HistoryConfig, LoggingConfig, SidekickConfig};

use sidekick_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a default
/// file if none exists, and validates the result.
pub fn load_config() -> Result<SidekickConfig, ConfigError> {
    let config = toml_loader::load_default()?;
    toml_loader::validate(&config)?;
    Ok(config)
}
