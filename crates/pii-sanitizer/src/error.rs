//! Error types for the sanitizer.

use thiserror::Error;

/// Result type for sanitizer construction and configuration.
pub type Result<T> = std::result::Result<T, SanitizerError>;

/// Errors that can occur while building or configuring a sanitizer.
///
/// Scrub operations themselves never fail: input that cannot be classified
/// is left as-is and uncounted.
#[derive(Error, Debug)]
pub enum SanitizerError {
    /// Invalid or contradictory configuration.
    #[error("config error: {0}")]
    ConfigError(String),

    /// Failed to compile a detection pattern.
    #[error("pattern error: {0}")]
    PatternError(String),

    /// Failed to load or generate the hashing key.
    #[error("key error: {0}")]
    KeyError(String),

    /// I/O error during config file operations.
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Internal error that should never expose raw data.
    #[error("internal error (details redacted for safety)")]
    InternalError,
}

impl SanitizerError {
    /// Create an internal error without attaching any input data.
    pub fn internal() -> Self {
        SanitizerError::InternalError
    }

    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        SanitizerError::ConfigError(message.into())
    }
}
