//! Gateway Network Transport
//!
//! Authenticated HTTP exchange with the FranklinWH `hes-gateway`. This crate
//! is a pure I/O boundary: it posts what it is given and returns what the
//! server sends back, without retries and without protocol judgement.

pub mod error;
pub mod transports;

// Re-export commonly used types
pub use error::{NetworkError, Result, TransportError};
pub use transports::{EnvelopeExchange, Endpoints, HttpTransport, Session, LOGIN_PATH, SEND_PATH};
