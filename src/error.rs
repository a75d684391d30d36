//! Error types for the letter renderer
//!
//! This module defines custom error types for letter rendering,
//! providing clear error messages and proper error propagation.

use thiserror::Error;

/// Custom error type for letter rendering operations
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Amount {amount} exceeds the supported range (max {max})")]
    AmountOutOfRange { amount: u64, max: u64 },

    #[error("Font error: {0}")]
    FontError(String),

    #[error("Image error: {0}")]
    ImageError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for field '{0}': {1}")]
    InvalidValue(String, String),
}

/// Result type alias for renderer operations
pub type RenderResult<T> = Result<T, RenderError>;

/// Helper to convert serde_json errors
impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::JsonError(err.to_string())
    }
}
