//! Error types for Pelt

use thiserror::Error;

/// The main error type for Pelt operations
#[derive(Debug, Error)]
pub enum PeltError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Registry error: {0}")]
    RegistryError(String),

    #[error("Host error: {0}")]
    HostError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),
}

/// Result type alias for Pelt operations
pub type Result<T> = std::result::Result<T, PeltError>;
