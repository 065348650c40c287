//! Checksum codec and response validation

pub mod checksum;
pub mod validator;

pub use checksum::{
    calculate_crc32, calculate_quoted_crc32, format_checksum, parse_checksum,
    verify_quoted_checksum,
};
pub use validator::{
    decode_envelope, validate_envelope, validate_response, StatusClass, STATUS_OK,
    STATUS_RETRY_LATER,
};
