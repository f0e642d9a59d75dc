//! Error types for configuration validation.

use thiserror::Error;

/// Errors surfaced while validating a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document could not be parsed.
    #[error("malformed configuration: {source}")]
    Malformed {
        /// Source [`serde_json::Error`].
        #[from]
        source: serde_json::Error,
    },
    /// A field holds a value the controller cannot work with.
    #[error("invalid configuration field `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Human-readable explanation.
        reason: &'static str,
    },
}

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;
