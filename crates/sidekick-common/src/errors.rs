use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("state serialization error: {0}")]
    Serialize(String),

    #[error("state write error: {0}")]
    Write(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SidekickError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("ai error: {0}")]
    Ai(String),

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("{0}")]
    Other(String),
}
