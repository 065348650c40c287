//! # Gateway Status Types
//!
//! Pure data structures shared by the codec, transport and poller crates.
//!
//! ## Design Philosophy
//!
//! - **Wire Shapes Only**: field names and order follow the gateway's JSON
//!   exactly; no protocol rules live here (those belong in `codec`)
//! - **Lenient Decoding**: missing fields decode as their zero value, the way
//!   the gateway's own clients treat partial documents
//! - **Typed Pass-Through**: telemetry fields nobody interprets yet are kept as
//!   raw JSON values instead of being dropped
//!
//! ## Architecture Role
//!
//! ```text
//! libs/types → codec/ → network/ → services/poller
//!     ↑          ↓          ↓            ↓
//! Envelopes   Checksums   HTTP       Backoff loop
//! Telemetry   Validation  Session    Console output
//! ```

pub mod protocol;
pub mod telemetry;

pub use protocol::envelope::{CommandEnvelope, EnvelopeResult, ResponseEnvelope};
pub use protocol::login::{LoginResponse, LoginResult};
pub use protocol::{
    CMD_TYPE_STATUS_QUERY, DEFAULT_LANG, DEFAULT_SEQUENCE, MESSAGE_TYPE_COMMAND,
    STATUS_QUERY_PAYLOAD,
};
pub use telemetry::TelemetryRecord;
