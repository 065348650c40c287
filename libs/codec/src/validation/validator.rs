//! Response Validator & Decoder
//!
//! Turns the raw body of a `sendMqtt` reply into a [`TelemetryRecord`] or a
//! classified [`ProtocolError`]. Pure: all I/O happens in the transport.
//!
//! ## Validation Order
//!
//! ```text
//! raw bytes → outer envelope → status code → result → checksum → inner payload
//!                  ↓               ↓             ↓         ↓            ↓
//!            ProtocolDecode   RetryLater /  Protocol   Checksum     PayloadDecode
//!                             Unexpected    Decode     Mismatch
//! ```
//!
//! The `result` member is only interpreted on a 200 reply, so a 102 is
//! retryable whatever it carries.

use types::{ResponseEnvelope, TelemetryRecord};

use super::checksum::verify_quoted_checksum;
use crate::error::{ProtocolError, ProtocolResult};

/// Status code of a successful exchange
pub const STATUS_OK: i64 = 200;

/// Status code the gateway uses when the device has not answered yet
pub const STATUS_RETRY_LATER: i64 = 102;

/// How a gateway status code is handled
///
/// Both codes were observed, not documented. New codes land in
/// `Unexpected` until they are classified here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    RetryLater,
    Unexpected,
}

impl StatusClass {
    pub fn from_code(code: i64) -> Self {
        match code {
            STATUS_OK => StatusClass::Success,
            STATUS_RETRY_LATER => StatusClass::RetryLater,
            _ => StatusClass::Unexpected,
        }
    }
}

/// Decode the outer response envelope without judging it
pub fn decode_envelope(raw: &[u8]) -> ProtocolResult<ResponseEnvelope> {
    serde_json::from_slice(raw).map_err(|e| ProtocolError::protocol_decode(e.to_string(), raw.len()))
}

/// Validate a raw response body and decode its status report
pub fn validate_response(raw: &[u8]) -> ProtocolResult<TelemetryRecord> {
    let envelope = decode_envelope(raw)?;
    validate_envelope(&envelope)
}

/// Validate an already decoded response envelope
pub fn validate_envelope(envelope: &ResponseEnvelope) -> ProtocolResult<TelemetryRecord> {
    match StatusClass::from_code(envelope.code) {
        StatusClass::Success => {}
        StatusClass::RetryLater => {
            return Err(ProtocolError::RetryLater {
                code: envelope.code,
                message: envelope.message.clone(),
            });
        }
        StatusClass::Unexpected => {
            return Err(ProtocolError::UnexpectedStatus {
                code: envelope.code,
                message: envelope.message.clone(),
            });
        }
    }

    let result = envelope.decode_result().map_err(|e| {
        ProtocolError::protocol_decode(e.to_string(), envelope.result.to_string().len())
    })?;

    let data_area = &result.data_area;
    verify_quoted_checksum(data_area, &result.crc)?;

    serde_json::from_str(data_area)
        .map_err(|e| ProtocolError::payload_decode(e.to_string(), data_area.len()))
}
