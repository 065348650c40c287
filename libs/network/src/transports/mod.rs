//! Envelope transport abstraction
//!
//! The poller only needs to hand an envelope to the gateway and get the raw
//! reply back. [`EnvelopeExchange`] captures that, so the poll loop can run
//! against the real HTTP session or against a scripted exchange.

use crate::Result;
use async_trait::async_trait;

pub mod http;

pub use http::{Endpoints, HttpTransport, Session, LOGIN_PATH, SEND_PATH};

/// One request/response exchange of a command envelope
#[async_trait]
pub trait EnvelopeExchange: Send + Sync {
    /// Device the envelopes are addressed to
    fn device_id(&self) -> &str;

    /// Post an envelope and return the raw reply body
    async fn exchange(&self, envelope: Vec<u8>) -> Result<Vec<u8>>;
}
