// src/error.rs
//! Public error type for the entire crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    /// No password and no usable external key
    #[error("Key unavailable: {0}")]
    KeyUnavailable(String),

    /// Artifact rejected: truncated, malformed, tampered or opened with the wrong key
    #[error("Invalid token: {0}")]
    InvalidToken(&'static str),

    #[error("Unexpected failure: {0}")]
    Unexpected(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Coarse failure classes surfaced to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    KeyUnavailable,
    InvalidToken,
    UnexpectedFailure,
}

impl CoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CoreError::KeyUnavailable(_) => ErrorKind::KeyUnavailable,
            CoreError::InvalidToken(_) => ErrorKind::InvalidToken,
            CoreError::Unexpected(_) | CoreError::Io(_) | CoreError::Config(_) => {
                ErrorKind::UnexpectedFailure
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
