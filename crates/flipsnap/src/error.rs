//! Error types

use std::path::PathBuf;

use flipsnap_platform::PlatformError;
use thiserror::Error;

/// Errors raised while constructing or configuring a widget
#[derive(Error, Debug)]
pub enum Error {
    /// Container resolution failed
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for widget operations
pub type Result<T> = std::result::Result<T, Error>;
