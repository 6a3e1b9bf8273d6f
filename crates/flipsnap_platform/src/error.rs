//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The container lookup key resolved to nothing
    #[error("Element not found: {0}")]
    ElementNotFound(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
