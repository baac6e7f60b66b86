//! Rate-limit retry with exponential backoff.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::domain::errors::{DenoDeployError, DomainResult};
use crate::domain::models::config::RetryConfig;

/// Retry policy for HTTP 429 responses.
///
/// Only rate-limit errors are retried; every other error is returned as is.
/// The delay before the next attempt is the server's `retry-after` hint when
/// present, otherwise `base_delay * 2^attempt` capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    max_attempts: u32,
    /// Backoff before the second attempt, in milliseconds
    base_delay_ms: u64,
    /// Ceiling for computed backoff, in milliseconds
    max_delay_ms: u64,
}

impl RetryPolicy {
    /// Create a new retry policy.
    ///
    /// `max_attempts` below 1 is treated as 1.
    pub fn new(max_attempts: u32, base_delay_ms: u64, max_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
            max_delay_ms: max_delay_ms.max(base_delay_ms),
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_attempts, config.base_delay_ms, config.max_delay_ms)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Execute an operation, retrying while it is rate limited.
    ///
    /// The last error is returned once `max_attempts` is used up; no delay
    /// follows the final attempt.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> DomainResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = DomainResult<T>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => {
                    if attempt > 0 {
                        debug!(retries = attempt, "request succeeded after rate limiting");
                    }
                    return Ok(result);
                }
                Err(err) if err.is_rate_limited() && attempt + 1 < self.max_attempts => {
                    let delay = self.delay_for(&err, attempt);
                    warn!(
                        attempt = attempt + 1,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        retry_after = err.retry_after(),
                        "rate limited by Deno Deploy API, backing off"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    if err.is_rate_limited() {
                        warn!(attempts = attempt + 1, "still rate limited, giving up");
                    }
                    return Err(err);
                }
            }
        }
    }

    /// Delay before retrying after `err` on the given 0-indexed attempt.
    pub fn delay_for(&self, err: &DenoDeployError, attempt: u32) -> Duration {
        err.retry_after()
            .map_or_else(|| self.calculate_backoff(attempt), Duration::from_secs)
    }

    /// Exponential backoff: `min(base_delay * 2^attempt, max_delay)`.
    pub fn calculate_backoff(&self, attempt: u32) -> Duration {
        let backoff_ms = self
            .base_delay_ms
            .saturating_mul(2_u64.saturating_pow(attempt))
            .min(self.max_delay_ms);

        Duration::from_millis(backoff_ms)
    }
}

impl Default for RetryPolicy {
    /// Five attempts, 1 s base delay, 60 s cap.
    fn default() -> Self {
        Self::from_config(&RetryConfig::default())
    }
}
