//! Command and response envelopes exchanged with `hes-gateway/terminal/sendMqtt`.
//!
//! The gateway pretends to be an MQTT broker fronted by HTTP: a command is a
//! JSON envelope with routing metadata and an inner payload (`dataArea`), and
//! the reply mirrors that shape inside a generic `{code, message, result}`
//! response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;
use serde_json::Value;

/// Outbound command envelope
///
/// Field order is the wire order. `data_area` is embedded as a nested JSON
/// document, byte-for-byte, never as an escaped string.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandEnvelope {
    pub lang: String,
    pub cmd_type: u32,
    pub equip_no: String,
    #[serde(rename = "type")]
    pub message_type: u32,
    /// Seconds since the Unix epoch at construction time
    pub time_stamp: i64,
    pub snno: u32,
    /// Byte length of the embedded `data_area`
    pub len: usize,
    /// CRC-32 of the embedded `data_area`, 8 uppercase hex digits
    pub crc: String,
    pub data_area: Box<RawValue>,
}

/// Inbound response envelope
///
/// `result` stays untyped: its shape is only meaningful on a successful
/// reply, so it is decoded on demand with [`ResponseEnvelope::decode_result`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResponseEnvelope {
    pub code: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    pub result: Value,
    pub total: i64,
    pub success: bool,
}

impl ResponseEnvelope {
    /// Decode `result` as the mirror of the command; `null` or absent gives
    /// the empty result
    pub fn decode_result(&self) -> Result<EnvelopeResult, serde_json::Error> {
        if self.result.is_null() {
            return Ok(EnvelopeResult::default());
        }
        EnvelopeResult::deserialize(&self.result)
    }
}

/// `result` member of a response envelope, mirroring [`CommandEnvelope`]
///
/// Unlike the command, `data_area` arrives as a JSON string and `crc` is the
/// server's checksum over that string's quoted rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnvelopeResult {
    pub cmd_type: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub equip_no: String,
    #[serde(rename = "type")]
    pub message_type: i64,
    pub time_stamp: i64,
    pub snno: i64,
    pub len: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub crc: String,
    #[serde(deserialize_with = "null_as_default")]
    pub data_area: String,
}

/// Treat an explicit JSON `null` like a missing field
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
