//! Error types for loading configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias used across the crate.
pub type Result<T> = std::result::Result<T, GameError>;

/// Errors surfaced outside the simulation. The tick loop itself never fails.
#[derive(Debug, Error)]
pub enum GameError {
    /// The configuration file could not be read.
    #[error("failed to read config {path}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The configuration file is not valid TOML for [`crate::config::GameConfig`].
    #[error("failed to parse config {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// A value parsed fine but is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
