// ABOUTME: Session package error taxonomy
// ABOUTME: Credential cache I/O and monitor lifecycle failures

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Could not determine home directory")]
    NoHomeDirectory,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SessionResult<T> = Result<T, SessionError>;
