//! Error types for advisor

use thiserror::Error;

/// The main error type for advisor operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Session state errors
    #[error("Session error: {0}")]
    Session(String),

    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// A submission arrived while a request was still outstanding
    #[error("A request is already in flight")]
    ConcurrentRequest,

    /// The service answered with a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The service could not be reached
    #[error("Request fault: {0}")]
    Fault(String),

    /// The service answered successfully but the body was undecodable
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// A specialized Result type for advisor operations
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
