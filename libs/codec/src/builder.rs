//! # Command Envelope Builder
//!
//! ## Purpose
//!
//! Builds the JSON body posted to `sendMqtt`. The inner payload is embedded
//! as a nested document through [`RawValue`], so it appears on the wire
//! exactly as given rather than as an escaped string.
//!
//! ## Architecture
//!
//! ```text
//! Poller → [CommandBuilder] → envelope bytes → HTTP transport
//!             ↓
//!    len + crc over the embedded payload bytes
//! ```
//!
//! `len` and `crc` are taken from the bytes that end up in `dataArea`, so the
//! declared values always describe what the server receives.

use serde_json::value::RawValue;
use types::{
    CommandEnvelope, CMD_TYPE_STATUS_QUERY, DEFAULT_LANG, DEFAULT_SEQUENCE,
    MESSAGE_TYPE_COMMAND, STATUS_QUERY_PAYLOAD,
};

use crate::error::{ProtocolError, ProtocolResult};
use crate::validation::checksum::{calculate_crc32, format_checksum};

/// Builder for outbound command envelopes
///
/// ```rust
/// use codec::CommandBuilder;
///
/// let body = CommandBuilder::status_query("10060005A02X0000")
///     .timestamp(1_700_000_000)
///     .build()
///     .unwrap();
/// assert!(body.ends_with(br#""dataArea":{"opt":1,"refreshData":1}}"#));
/// ```
#[derive(Debug, Clone)]
pub struct CommandBuilder<'a> {
    equip_no: &'a str,
    cmd_type: u32,
    lang: &'a str,
    message_type: u32,
    sequence: u32,
    timestamp: Option<i64>,
    payload: &'a [u8],
}

impl<'a> CommandBuilder<'a> {
    /// Create a builder for a command addressed to `equip_no`
    pub fn new(cmd_type: u32, equip_no: &'a str) -> Self {
        Self {
            equip_no,
            cmd_type,
            lang: DEFAULT_LANG,
            message_type: MESSAGE_TYPE_COMMAND,
            sequence: DEFAULT_SEQUENCE,
            timestamp: None,
            payload: b"{}",
        }
    }

    /// Status query asking the device to refresh its report
    pub fn status_query(equip_no: &'a str) -> Self {
        Self::new(CMD_TYPE_STATUS_QUERY, equip_no).payload(STATUS_QUERY_PAYLOAD.as_bytes())
    }

    /// Inner payload; must be a JSON document
    ///
    /// Leading and trailing whitespace is dropped when the document is
    /// embedded. Everything between the first and last significant byte is
    /// kept as is, and `len`/`crc` always describe the embedded bytes.
    pub fn payload(mut self, payload: &'a [u8]) -> Self {
        self.payload = payload;
        self
    }

    pub fn sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    /// Seconds since the Unix epoch; defaults to the time of `build`
    pub fn timestamp(mut self, timestamp: i64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn lang(mut self, lang: &'a str) -> Self {
        self.lang = lang;
        self
    }

    pub fn message_type(mut self, message_type: u32) -> Self {
        self.message_type = message_type;
        self
    }

    /// Assemble the envelope record
    pub fn build_envelope(&self) -> ProtocolResult<CommandEnvelope> {
        let text = std::str::from_utf8(self.payload)
            .map_err(|e| ProtocolError::encoding(format!("inner payload is not UTF-8: {}", e)))?;
        let data_area = RawValue::from_string(text.to_owned())
            .map_err(|e| ProtocolError::encoding(format!("inner payload is not JSON: {}", e)))?;

        let embedded = data_area.get().as_bytes();
        let len = embedded.len();
        let crc = format_checksum(calculate_crc32(embedded));

        Ok(CommandEnvelope {
            lang: self.lang.to_owned(),
            cmd_type: self.cmd_type,
            equip_no: self.equip_no.to_owned(),
            message_type: self.message_type,
            time_stamp: self
                .timestamp
                .unwrap_or_else(|| chrono::Utc::now().timestamp()),
            snno: self.sequence,
            len,
            crc,
            data_area,
        })
    }

    /// Serialize the envelope to the request body
    pub fn build(&self) -> ProtocolResult<Vec<u8>> {
        let envelope = self.build_envelope()?;
        serde_json::to_vec(&envelope).map_err(|e| ProtocolError::encoding(e.to_string()))
    }
}

/// Build a command body in one call
pub fn build_command(
    equip_no: &str,
    cmd_type: u32,
    payload: &[u8],
    sequence: u32,
    timestamp: i64,
) -> ProtocolResult<Vec<u8>> {
    CommandBuilder::new(cmd_type, equip_no)
        .payload(payload)
        .sequence(sequence)
        .timestamp(timestamp)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_query_envelope() {
        let envelope = CommandBuilder::status_query("10060005A02X0000")
            .timestamp(1_700_000_000)
            .build_envelope()
            .unwrap();

        assert_eq!(envelope.cmd_type, 203);
        assert_eq!(envelope.len, 25);
        assert_eq!(envelope.crc, "6FC3A6BF");
        assert_eq!(envelope.snno, 1);
        assert_eq!(envelope.lang, "EN_US");
        assert_eq!(envelope.data_area.get(), r#"{"opt":1,"refreshData":1}"#);
    }

    #[test]
    fn test_status_query_wire_bytes() {
        let body = build_command(
            "10060005A02X0000",
            203,
            br#"{"opt":1,"refreshData":1}"#,
            1,
            1_700_000_000,
        )
        .unwrap();

        assert_eq!(
            String::from_utf8(body).unwrap(),
            r#"{"lang":"EN_US","cmdType":203,"equipNo":"10060005A02X0000","type":0,"timeStamp":1700000000,"snno":1,"len":25,"crc":"6FC3A6BF","dataArea":{"opt":1,"refreshData":1}}"#
        );
    }

    #[test]
    fn test_default_timestamp_is_now() {
        let before = chrono::Utc::now().timestamp();
        let envelope = CommandBuilder::status_query("dev").build_envelope().unwrap();
        let after = chrono::Utc::now().timestamp();

        assert!(envelope.time_stamp >= before && envelope.time_stamp <= after);
    }

    #[test]
    fn test_padded_payload_is_trimmed_before_checksum() {
        let envelope = CommandBuilder::new(203, "dev")
            .payload(b"  {\"opt\":1,\"refreshData\":1}\n")
            .timestamp(0)
            .build_envelope()
            .unwrap();

        assert_eq!(envelope.data_area.get(), r#"{"opt":1,"refreshData":1}"#);
        assert_eq!(envelope.len, 25);
        assert_eq!(envelope.crc, "6FC3A6BF");
    }

    #[test]
    fn test_non_json_payload_is_encoding_error() {
        let err = CommandBuilder::new(203, "dev")
            .payload(b"opt=1")
            .build()
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Encoding { .. }));

        let err = CommandBuilder::new(203, "dev")
            .payload(&[0xff, 0xfe])
            .build()
            .unwrap_err();
        assert!(matches!(err, ProtocolError::Encoding { .. }));
    }
}
