//! Retry with exponential backoff
//!
//! Retry `n` (1-based) waits `base_delay * 2^n` before running the operation again, so the
//! default policy waits 2s, 4s and 8s.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// How often and how patiently a failing operation is retried
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed beyond the first attempt
    pub max_retries: u32,
    /// Time unit of the exponential backoff
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Runs `operation`, retrying every failure until it succeeds or retries run out.
    pub async fn run<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run_if(operation, |_| true).await
    }

    /// Like [`RetryPolicy::run`], but an error for which `is_retryable` is false is
    /// returned at once without consuming a retry.
    pub async fn run_if<F, Fut, T, E, P>(&self, mut operation: F, is_retryable: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 0 {
                        debug!(attempt, "Operation succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(error) if attempt < self.max_retries && is_retryable(&error) => {
                    attempt += 1;
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        %error,
                        "Operation failed, retrying"
                    );
                    sleep(delay).await;
                }
                Err(error) => {
                    if attempt == self.max_retries && attempt > 0 {
                        warn!(attempts = attempt + 1, %error, "Retries exhausted");
                    }
                    return Err(error);
                }
            }
        }
    }
}
