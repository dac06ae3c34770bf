//! Error Handling Module
//!
//! Defines the error type shared across the serving client library.
//! Uses thiserror for ergonomic error definitions.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for serving client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error decoding or processing an image
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// HTTP transport error (connection, timeout, non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The serving endpoint answered with an unusable payload
    #[error("Serving error: {0}")]
    Serving(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Path not found
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),
}

/// Convenience Result type for serving client operations
pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ClientError::Serving("empty predictions".to_string());
        assert_eq!(err.to_string(), "Serving error: empty predictions");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ClientError = io_err.into();
        assert!(matches!(err, ClientError::Io(_)));
    }

    #[test]
    fn test_path_not_found_display() {
        let err = ClientError::PathNotFound(PathBuf::from("/tmp/missing.jpg"));
        assert!(err.to_string().contains("missing.jpg"));
    }

    #[test]
    fn test_result_type() {
        let success: Result<i32> = Ok(42);
        assert!(success.is_ok());

        let failure: Result<i32> = Err(ClientError::Config("bad port".to_string()));
        assert!(failure.is_err());
    }
}
