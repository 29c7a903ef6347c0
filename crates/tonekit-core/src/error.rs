//! Error types for ToneKit.

use thiserror::Error;

/// Main error type for ToneKit operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToneError {
    /// Input image is empty, malformed, or has an unsupported layout.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A scalar parameter is outside its domain (e.g. negative contrast).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The output image could not be built from a transformed buffer.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Tuning configuration failed to parse or validate.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for ToneError {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

/// Result type alias for ToneKit operations.
pub type Result<T> = std::result::Result<T, ToneError>;
