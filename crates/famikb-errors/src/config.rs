//! Boot-time configuration errors.

use std::path::PathBuf;

use thiserror::Error;

use crate::fault::FaultCode;

/// Errors raised while loading or validating a bridge configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read configuration {path}: {source}")]
    Io {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration text is not valid YAML or names an unknown value.
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A strap value is outside the range the board can present.
    #[error("Invalid strap {name}: {value} (expected 0 or 1)")]
    InvalidStrap {
        /// Strap name.
        name: &'static str,
        /// Value read by the board layer.
        value: u8,
    },

    /// A field combination that the bridge cannot serve.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// Offending field.
        field: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Build an [`ConfigError::InvalidValue`].
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by the bridge outside the real-time contexts.
#[derive(Error, Debug)]
pub enum BridgeError {
    /// Configuration could not be established.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A decoder rejected its input.
    #[error("Decoder fault: {0}")]
    Fault(#[from] FaultCode),
}
