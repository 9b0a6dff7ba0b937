//! Error types for algoviz.
//!
//! The playback core deliberately has no error path: every out-of-range
//! input is clamped and every operation on an empty engine is a no-op.
//! `VizError` therefore only covers the configuration and CLI surface,
//! where YAML files and file paths can genuinely be wrong.

use thiserror::Error;

/// Result type alias for algoviz operations.
pub type VizResult<T> = Result<T, VizError>;

/// Unified error type for configuration and CLI operations.
#[derive(Debug, Error)]
pub enum VizError {
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Unknown algorithm name requested from the CLI.
    #[error("Unknown algorithm '{0}' (try 'algoviz list')")]
    UnknownAlgorithm(String),

    /// Serialization error (JSON summaries).
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl VizError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
