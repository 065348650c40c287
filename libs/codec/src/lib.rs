//! # Gateway Envelope Codec
//!
//! ## Purpose
//!
//! The "rules" layer of the status client:
//! - CRC-32 checksum codec in the gateway's hex convention
//! - Command envelope construction with a nested inner payload
//! - Response validation: status classification, checksum verification and
//!   status report decoding
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → [codec] → network/
//!     ↑           ↓          ↓
//! Pure Data   Protocol    HTTP
//! Records     Rules       Session
//! ```
//!
//! ## What This Crate Does NOT Contain
//! - HTTP transport or authentication (belongs in network/)
//! - Retry policy (belongs in services/poller)
//! - Logging: every failure is returned to the caller as a [`ProtocolError`]

pub mod builder;
pub mod error;
pub mod validation;

pub use builder::{build_command, CommandBuilder};
pub use error::{ProtocolError, ProtocolResult};
pub use validation::{
    calculate_crc32, calculate_quoted_crc32, decode_envelope, format_checksum, parse_checksum,
    validate_envelope, validate_response, verify_quoted_checksum, StatusClass, STATUS_OK,
    STATUS_RETRY_LATER,
};
