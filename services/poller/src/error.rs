//! Error types for the poll cycle

use codec::ProtocolError;
use network::TransportError;
use thiserror::Error;

/// Result type alias for poll operations
pub type Result<T> = std::result::Result<T, PollError>;

/// Failure of one poll cycle, tagged with the step that failed
#[derive(Debug, Error)]
pub enum PollError {
    /// Session carries no device to address the command to
    #[error("no device identifier available for the status query")]
    MissingDevice,

    /// Command envelope could not be built
    #[error("building status query: {0}")]
    Build(#[source] ProtocolError),

    /// Envelope could not be exchanged with the gateway
    #[error("exchanging status query: {0}")]
    Exchange(#[source] TransportError),

    /// Reply was rejected or asked for a retry
    #[error("validating status reply: {0}")]
    Validate(#[source] ProtocolError),
}

impl PollError {
    /// Check if this error is recoverable by resending the command
    pub fn is_retryable(&self) -> bool {
        matches!(self, PollError::Validate(e) if e.is_retryable())
    }

    /// Gateway status code behind the error, if the gateway sent one
    pub fn status_code(&self) -> Option<i64> {
        match self {
            PollError::Validate(e) => e.status_code(),
            _ => None,
        }
    }
}
