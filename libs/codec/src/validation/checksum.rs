//! CRC32 Checksum Codec
//!
//! IEEE CRC-32 over envelope payloads, rendered the way the gateway writes it:
//! 8 uppercase hex digits, zero padded.
//!
//! The two directions disagree on what is hashed. Outbound, the checksum
//! covers the raw inner payload bytes. Inbound, the server hashes the JSON
//! string literal of the returned payload (surrounding quotes and escapes
//! included), so [`calculate_quoted_crc32`] must be used to verify it.

use crate::error::{ProtocolError, ProtocolResult};

/// Calculate CRC32 checksum for a payload
pub fn calculate_crc32(data: &[u8]) -> u32 {
    crc32fast::hash(data)
}

/// Render a checksum as 8 uppercase hex digits
pub fn format_checksum(checksum: u32) -> String {
    format!("{:08X}", checksum)
}

/// Parse a hex checksum, either case
pub fn parse_checksum(text: &str) -> ProtocolResult<u32> {
    if text.is_empty() {
        return Err(ProtocolError::malformed_checksum(text, "empty"));
    }

    // from_str_radix tolerates a leading '+', the wire format does not
    if let Some(bad) = text.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ProtocolError::malformed_checksum(
            text,
            format!("invalid hex digit {:?}", bad),
        ));
    }

    u32::from_str_radix(text, 16)
        .map_err(|e| ProtocolError::malformed_checksum(text, format!("exceeds 32 bits: {}", e)))
}

/// Calculate CRC32 over the JSON string literal rendering of `text`
pub fn calculate_quoted_crc32(text: &str) -> ProtocolResult<u32> {
    let quoted = serde_json::to_vec(text)
        .map_err(|e| ProtocolError::encoding(format!("quoting payload: {}", e)))?;
    Ok(calculate_crc32(&quoted))
}

/// Verify a server-declared checksum against a returned payload
pub fn verify_quoted_checksum(payload: &str, declared: &str) -> ProtocolResult<()> {
    let declared = parse_checksum(declared)?;
    let calculated = calculate_quoted_crc32(payload)?;

    if declared != calculated {
        return Err(ProtocolError::ChecksumMismatch {
            declared,
            calculated,
            payload_size: payload.len(),
        });
    }

    Ok(())
}
