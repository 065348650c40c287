//! Exponential backoff between retries of a status query

use std::time::Duration;

/// Default first wait after a retry-later reply
pub const DEFAULT_INITIAL_BACKOFF: Duration = Duration::from_secs(5);

/// Doubling backoff without ceiling
///
/// `next_delay` hands out the current wait and doubles it for the following
/// retry, so a base of 5s yields 5s, 10s, 20s, ... until `reset`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    base: Duration,
    current: Duration,
    retries: u32,
}

impl Backoff {
    pub fn new(base: Duration) -> Self {
        Self {
            base,
            current: base,
            retries: 0,
        }
    }

    /// Wait before the next retry; doubles the one after it
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2);
        self.retries = self.retries.saturating_add(1);
        delay
    }

    /// Back to the base wait after a success
    pub fn reset(&mut self) {
        self.current = self.base;
        self.retries = 0;
    }

    pub fn base(&self) -> Duration {
        self.base
    }

    /// Wait the next retry would use
    pub fn current(&self) -> Duration {
        self.current
    }

    /// Retries since the last reset
    pub fn retries(&self) -> u32 {
        self.retries
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_BACKOFF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubling_sequence() {
        let mut backoff = Backoff::default();

        assert_eq!(backoff.next_delay(), Duration::from_secs(5));
        assert_eq!(backoff.next_delay(), Duration::from_secs(10));
        assert_eq!(backoff.next_delay(), Duration::from_secs(20));
        assert_eq!(backoff.current(), Duration::from_secs(40));
        assert_eq!(backoff.retries(), 3);
    }

    #[test]
    fn test_reset_returns_to_base() {
        let mut backoff = Backoff::new(Duration::from_millis(250));
        backoff.next_delay();
        backoff.next_delay();

        backoff.reset();
        assert_eq!(backoff.retries(), 0);
        assert_eq!(backoff.next_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_no_ceiling_but_no_overflow() {
        let mut backoff = Backoff::new(Duration::from_secs(u64::MAX / 2));
        backoff.next_delay();
        backoff.next_delay();
        assert_eq!(backoff.current(), Duration::MAX);
        assert_eq!(backoff.next_delay(), Duration::MAX);
    }
}
