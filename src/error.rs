//! Error handling for the client SDK
//!
//! This module defines all error types surfaced to SDK consumers.

use thiserror::Error;

/// Result type alias for the SDK
pub type Result<T> = std::result::Result<T, AppError>;

/// Main error type for the SDK
#[derive(Error, Debug)]
pub enum AppError {
    /// Client-side validation errors (bad app id, bad encryption key length)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Transport-level failures (DNS, refused connection, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The backend rejected the supplied credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Any other non-success response from the backend
    #[error("Service error (HTTP {status}): {message}")]
    Service {
        /// HTTP status code returned by the backend
        status: u16,
        /// Error body or status text
        message: String,
    },

    /// Operation attempted on a closed app handle
    #[error("App has been closed")]
    ClientClosed,

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    /// Whether this error came from client-side validation
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, AppError::InvalidArgument(_))
    }

    /// Whether this error came from rejected credentials
    pub fn is_auth_error(&self) -> bool {
        matches!(self, AppError::InvalidCredentials(_))
    }

    /// Whether this error came from the transport rather than the backend
    pub fn is_connection_error(&self) -> bool {
        matches!(self, AppError::Connection(_))
    }
}
