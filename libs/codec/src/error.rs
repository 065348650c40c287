//! Protocol-level errors for envelope construction and response validation
//!
//! Each variant carries enough context (sizes, declared vs calculated values,
//! the gateway's own message) to be logged without re-reading the response.

use thiserror::Error;

/// Envelope protocol errors
///
/// Only [`ProtocolError::RetryLater`] is transient; everything else means the
/// exchange cannot succeed by resending the same command.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProtocolError {
    /// Outbound envelope could not be serialized
    #[error("Envelope encoding failed: {reason}")]
    Encoding { reason: String },

    /// Response body is not a valid response envelope
    #[error("Response envelope decode failed: {reason} (body: {body_size} bytes)")]
    ProtocolDecode { reason: String, body_size: usize },

    /// Inner payload of a successful response is not a status report
    #[error("Status payload decode failed: {reason} (dataArea: {payload_size} bytes)")]
    PayloadDecode { reason: String, payload_size: usize },

    /// Checksum text is not a 32-bit hexadecimal number
    #[error("Malformed checksum {value:?}: {reason}")]
    MalformedChecksum { value: String, reason: String },

    /// Declared checksum does not match the returned payload
    #[error("Checksum mismatch: declared {declared:08X}, calculated {calculated:08X} (dataArea: {payload_size} bytes)")]
    ChecksumMismatch {
        declared: u32,
        calculated: u32,
        payload_size: usize,
    },

    /// Gateway has no fresh data yet; the command should be repeated
    #[error("Gateway asked to retry later (code {code}: {message})")]
    RetryLater { code: i64, message: String },

    /// Gateway answered with a status code this client does not know
    #[error("Unexpected gateway status code {code}: {message}")]
    UnexpectedStatus { code: i64, message: String },
}

impl ProtocolError {
    /// Create an Encoding error
    pub fn encoding(reason: impl Into<String>) -> Self {
        Self::Encoding {
            reason: reason.into(),
        }
    }

    /// Create a ProtocolDecode error for a response body
    pub fn protocol_decode(reason: impl Into<String>, body_size: usize) -> Self {
        Self::ProtocolDecode {
            reason: reason.into(),
            body_size,
        }
    }

    /// Create a PayloadDecode error for a returned dataArea
    pub fn payload_decode(reason: impl Into<String>, payload_size: usize) -> Self {
        Self::PayloadDecode {
            reason: reason.into(),
            payload_size,
        }
    }

    /// Create a MalformedChecksum error
    pub fn malformed_checksum(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedChecksum {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Whether resending the command may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, ProtocolError::RetryLater { .. })
    }

    /// Gateway status code carried by the error, if any
    pub fn status_code(&self) -> Option<i64> {
        match self {
            ProtocolError::RetryLater { code, .. } | ProtocolError::UnexpectedStatus { code, .. } => {
                Some(*code)
            }
            _ => None,
        }
    }
}

/// Result type for protocol operations
pub type ProtocolResult<T> = std::result::Result<T, ProtocolError>;
