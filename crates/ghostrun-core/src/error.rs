//! Error types.
//!
//! The tick itself is infallible: missing actors, rejected attacks and
//! repeated deaths are no-ops. Loading configuration is the only boundary
//! that reports errors.

use thiserror::Error;

/// Errors raised while loading or validating a [`SimConfig`](crate::config::SimConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON or does not match the config schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value parsed but is outside its allowed range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: String,
        /// What the value must satisfy.
        reason: &'static str,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            field: field.into(),
            reason,
        }
    }
}

/// Result alias for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;
