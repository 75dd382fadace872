//! Error types for famikbctl

use famikb_errors::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Invalid hex byte: {0}")]
    InvalidHex(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Parse `1C`, `0x1C` or `0X1c` as one byte.
pub fn parse_hex_byte(text: &str) -> Result<u8, CliError> {
    let digits = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    u8::from_str_radix(digits, 16).or(Err(CliError::InvalidHex(text.to_string())))
}
