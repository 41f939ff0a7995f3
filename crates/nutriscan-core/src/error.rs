//! Error types for nutriscan.

use thiserror::Error;

/// Result type alias using nutriscan's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for nutriscan operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Multipart body contained no file part
    #[error("No image file uploaded")]
    NoFileUploaded,

    /// Request carried no image bytes at all
    #[error("Failed to process image data")]
    EmptyPayload,

    /// Upload exceeded the configured size ceiling (maps to HTTP 413)
    #[error("File too large: maximum file size is {0} bytes")]
    PayloadTooLarge(usize),

    /// Model reply matched none of the tolerated envelope shapes
    #[error("Unexpected API response format: {0}")]
    ResponseFormat(String),

    /// Inference/generation failed at the provider
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Error::Request(format!("Request timed out: {}", e))
        } else {
            Error::Request(e.to_string())
        }
    }
}
