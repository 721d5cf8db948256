//! Error types for phase-actions-core

use thiserror::Error;

/// Result type alias for phase-actions-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types
#[derive(Error, Debug)]
pub enum Error {
    /// A value does not have the standard message shape
    #[error("Invalid message: {message}")]
    InvalidMessage {
        /// Error message
        message: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Failure raised by a payload or meta creator
    #[error(transparent)]
    Creator(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid message error
    pub fn invalid_message(message: impl Into<String>) -> Self {
        Self::InvalidMessage {
            message: message.into(),
        }
    }
}
