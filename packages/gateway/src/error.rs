// ABOUTME: Gateway error taxonomy
// ABOUTME: Maps transport and HTTP status failures into a typed error enum

use thiserror::Error;

/// Remote gateway errors
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Request timed out: {0}")]
    Timeout(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type GatewayResult<T> = Result<T, GatewayError>;

impl From<reqwest::Error> for GatewayError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            GatewayError::Timeout(error.to_string())
        } else if error.is_decode() {
            GatewayError::InvalidResponse(error.to_string())
        } else {
            GatewayError::Network(error.to_string())
        }
    }
}

impl GatewayError {
    /// Whether this error is an authoritative "session is gone" signal.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, GatewayError::Unauthorized(_))
    }
}
