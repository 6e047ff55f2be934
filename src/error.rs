//! Error types for the user-records API client.

use thiserror::Error;

/// Errors that can occur when talking to the user-records service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service returned a non-success status
    #[error("Service error ({status}): {body}")]
    Status { status: u16, body: String },

    /// Response body could not be decoded
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Base URL rejected at client construction
    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Result type for API client operations.
pub type Result<T> = std::result::Result<T, ApiError>;
