//! Retry strategies for webhook delivery.

use std::time::Duration;

/// Trait for retry pacing.
pub trait RetryStrategy: Send + Sync {
    /// Delay before the next attempt, given the number of attempts already
    /// made, or `None` when the attempt budget is spent.
    fn next_delay(&self, attempts: u32) -> Option<Duration>;

    /// Maximum number of attempts.
    fn max_attempts(&self) -> u32;
}

/// Linear backoff: the delay after attempt `n` is `n * base`.
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    /// Base delay.
    pub base: Duration,
    /// Maximum delay cap.
    pub max_delay: Duration,
    /// Maximum number of attempts.
    pub max_attempts: u32,
}

impl LinearBackoff {
    /// Creates the default strategy: 3 attempts, 1 s base delay.
    pub fn new() -> Self {
        Self {
            base: Duration::from_millis(1_000),
            max_delay: Duration::from_secs(300), // 5 minutes
            max_attempts: 3,
        }
    }

    /// Sets the base delay.
    pub fn base(mut self, base: Duration) -> Self {
        self.base = base;
        self
    }

    /// Sets the maximum delay.
    pub fn max_delay(mut self, max: Duration) -> Self {
        self.max_delay = max;
        self
    }

    /// Sets the maximum attempts.
    pub fn max_attempts(mut self, max: u32) -> Self {
        self.max_attempts = max;
        self
    }
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryStrategy for LinearBackoff {
    fn next_delay(&self, attempts: u32) -> Option<Duration> {
        if attempts >= self.max_attempts {
            return None;
        }

        let delay = self.base.saturating_mul(attempts);
        Some(std::cmp::min(delay, self.max_delay))
    }

    fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

/// No retry: a single attempt, fail fast.
#[derive(Debug, Clone, Default)]
pub struct NoRetry;

impl RetryStrategy for NoRetry {
    fn next_delay(&self, _attempts: u32) -> Option<Duration> {
        None
    }

    fn max_attempts(&self) -> u32 {
        1
    }
}
