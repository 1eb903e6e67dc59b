//! Error types for client operations

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, GatewayClientError>;

/// Errors that can occur during client operations
#[derive(Error, Debug)]
pub enum GatewayClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// 404
    #[error("Not found: {0}")]
    NotFound(String),

    /// 409, duplicate serial number, uid or address
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 406, rejected input or full gateway
    #[error("Not acceptable: {0}")]
    NotAcceptable(String),

    /// 424, peripheral owned by another gateway
    #[error("Failed dependency: {0}")]
    FailedDependency(String),

    /// Any other error status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl GatewayClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// HTTP status behind this error, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            Self::NotAcceptable(_) => Some(406),
            Self::FailedDependency(_) => Some(424),
            Self::ServerError { status, .. } => Some(*status),
            _ => None,
        }
    }
}
