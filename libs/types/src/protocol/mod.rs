//! Gateway protocol records and the constants that identify a command.

pub mod envelope;
pub mod login;

/// Language tag sent with every command and login
pub const DEFAULT_LANG: &str = "EN_US";

/// Command type code of the status query
pub const CMD_TYPE_STATUS_QUERY: u32 = 203;

/// Message type carried by outbound commands
pub const MESSAGE_TYPE_COMMAND: u32 = 0;

/// Sequence number used for the single command this client issues
pub const DEFAULT_SEQUENCE: u32 = 1;

/// Inner payload of the status query, asking the device to refresh its data
pub const STATUS_QUERY_PAYLOAD: &str = r#"{"opt":1,"refreshData":1}"#;
