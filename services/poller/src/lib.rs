//! # Status Poller
//!
//! Retry/backoff controller and console front end for reading the live power
//! flows of a FranklinWH site.
//!
//! ## Architecture Role
//!
//! ```text
//! network::Session ──► StatusPoller ──► on_sample callback ──► console
//!                        │     ▲
//!                        ▼     │ RetryLater (102)
//!                      codec::validate_response
//! ```
//!
//! The poller owns the retry policy: a `102` reply is resent after a doubling
//! wait, everything else either yields a record or ends the cycle.

pub mod backoff;
pub mod console;
pub mod controller;
pub mod error;
pub mod prompt;
pub mod sleeper;

pub use backoff::{Backoff, DEFAULT_INITIAL_BACKOFF};
pub use console::{format_row, write_sample, SampleFormat, TABLE_HEADER};
pub use controller::{PollState, SamplePlan, StatusPoller};
pub use error::{PollError, Result};
pub use prompt::CredentialPrompt;
pub use sleeper::{RecordingSleeper, Sleeper, TokioSleeper};
