//! Status poll controller
//!
//! Drives one status query to completion: build a freshly timestamped
//! envelope, exchange it, validate the reply. A retry-later reply is resent
//! after an exponentially growing wait; every other failure ends the cycle.

use std::time::Duration;

use codec::{validate_response, CommandBuilder};
use network::EnvelopeExchange;
use tracing::{debug, info, warn};
use types::{TelemetryRecord, DEFAULT_SEQUENCE};

use crate::backoff::Backoff;
use crate::sleeper::{Sleeper, TokioSleeper};
use crate::{PollError, Result};

/// Poll cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollState {
    /// No query in progress
    Idle,
    /// Envelope handed to the exchange, waiting for the reply
    Sending,
    /// Gateway asked us to come back later; waiting out the backoff
    Retrying,
    /// Last query produced a status record
    Success,
    /// Last query ended with a terminal error
    Failed,
}

/// How many samples to take and how far apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePlan {
    /// `None` polls until a terminal error
    pub limit: Option<u64>,
    /// Zero stops after the first sample
    pub interval: Duration,
}

impl SamplePlan {
    /// Plan from the CLI's signed count; zero or negative means no limit
    pub fn new(count: i64, interval: Duration) -> Self {
        let limit = u64::try_from(count).ok().filter(|n| *n > 0);
        Self { limit, interval }
    }

    pub fn single() -> Self {
        Self {
            limit: Some(1),
            interval: Duration::ZERO,
        }
    }
}

impl Default for SamplePlan {
    fn default() -> Self {
        Self::single()
    }
}

/// Sequential status poller bound to one authenticated exchange
pub struct StatusPoller<E, S = TokioSleeper> {
    exchange: E,
    sleeper: S,
    backoff: Backoff,
    state: PollState,
    sequence: u32,
    attempts: u64,
}

impl<E: EnvelopeExchange> StatusPoller<E, TokioSleeper> {
    pub fn new(exchange: E, initial_backoff: Duration) -> Self {
        Self::with_sleeper(exchange, TokioSleeper, initial_backoff)
    }
}

impl<E: EnvelopeExchange, S: Sleeper> StatusPoller<E, S> {
    pub fn with_sleeper(exchange: E, sleeper: S, initial_backoff: Duration) -> Self {
        Self {
            exchange,
            sleeper,
            backoff: Backoff::new(initial_backoff),
            state: PollState::Idle,
            sequence: DEFAULT_SEQUENCE,
            attempts: 0,
        }
    }

    /// Override the `snno` carried by every envelope
    pub fn with_sequence(mut self, sequence: u32) -> Self {
        self.sequence = sequence;
        self
    }

    pub fn state(&self) -> PollState {
        self.state
    }

    pub fn backoff(&self) -> &Backoff {
        &self.backoff
    }

    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Envelopes sent since construction, retries included
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Query the gateway until it answers with a status record or fails
    pub async fn poll(&mut self) -> Result<TelemetryRecord> {
        loop {
            match self.attempt().await {
                Ok(record) => {
                    self.backoff.reset();
                    self.transition(PollState::Success);
                    return Ok(record);
                }
                Err(e) if e.is_retryable() => {
                    let wait = self.backoff.next_delay();
                    self.transition(PollState::Retrying);
                    warn!("No status data yet ({}), retrying in {:?}", e, wait);
                    self.sleeper.sleep(wait).await;
                }
                Err(e) => {
                    self.transition(PollState::Failed);
                    return Err(e);
                }
            }
        }
    }

    /// Take samples per `plan`, handing each one to `on_sample`
    ///
    /// The callback receives the 1-based sample number. Returns the number of
    /// samples taken when the plan completes.
    pub async fn run<F>(&mut self, plan: SamplePlan, mut on_sample: F) -> Result<u64>
    where
        F: FnMut(u64, &TelemetryRecord),
    {
        let mut taken = 0u64;
        loop {
            let record = self.poll().await?;
            taken += 1;
            on_sample(taken, &record);

            if plan.interval.is_zero() {
                break;
            }
            if plan.limit.is_some_and(|limit| taken >= limit) {
                break;
            }

            self.transition(PollState::Idle);
            self.sleeper.sleep(plan.interval).await;
        }

        info!("Sampling finished after {} sample(s)", taken);
        Ok(taken)
    }

    async fn attempt(&mut self) -> Result<TelemetryRecord> {
        let device = self.exchange.device_id();
        if device.is_empty() {
            return Err(PollError::MissingDevice);
        }

        let envelope = CommandBuilder::status_query(device)
            .sequence(self.sequence)
            .build()
            .map_err(PollError::Build)?;

        self.transition(PollState::Sending);
        self.attempts += 1;
        debug!("Sending status query ({} bytes)", envelope.len());

        let reply = self
            .exchange
            .exchange(envelope)
            .await
            .map_err(PollError::Exchange)?;
        debug!("Received status reply ({} bytes)", reply.len());

        validate_response(&reply).map_err(PollError::Validate)
    }

    fn transition(&mut self, next: PollState) {
        if self.state != next {
            debug!("Poll state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_plan_from_count() {
        let plan = SamplePlan::new(3, Duration::from_secs(30));
        assert_eq!(plan.limit, Some(3));

        assert_eq!(SamplePlan::new(0, Duration::from_secs(30)).limit, None);
        assert_eq!(SamplePlan::new(-1, Duration::from_secs(30)).limit, None);
    }

    #[test]
    fn test_default_plan_is_one_shot() {
        let plan = SamplePlan::default();
        assert_eq!(plan.limit, Some(1));
        assert!(plan.interval.is_zero());
    }
}
