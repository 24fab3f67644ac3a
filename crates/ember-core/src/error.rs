//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("Audio error: {0}")]
    AudioError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;
