//! Resilient operation executor
//!
//! [`ResilientExecutor::execute`] runs an operation under a [`RetryPolicy`], gating every
//! attempt with a shared [`CircuitBreaker`].
//!
//! Accounting rules:
//! - the breaker counts **one** failure per failed `execute` call, not one per attempt, so
//!   a call that fails twice and then succeeds never trips a threshold of 2
//! - a half-open trial attempt reports its own outcome right away; a failed trial ends the
//!   call with the operation's error, since the circuit it re-opened would refuse a retry
//! - a refused attempt ends the call with `CircuitOpen` and consumes no retry

use crate::circuit_breaker::{CircuitBreaker, Permit};
use crate::error::ResilienceError;
use crate::retry::RetryPolicy;
use std::fmt::Display;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

/// Retry policy composed with a circuit breaker
///
/// Cloning shares the breaker state.
///
/// # Example
/// ```
/// use resilience::{CircuitBreaker, ResilientExecutor, RetryPolicy};
/// use std::time::Duration;
///
/// #[tokio::main]
/// async fn main() {
///     let executor = ResilientExecutor::new(
///         RetryPolicy::new(2, Duration::from_millis(1)),
///         CircuitBreaker::default(),
///     );
///
///     let value = executor.execute(|| async { Ok::<_, String>(42) }).await.unwrap();
///     assert_eq!(value, 42);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResilientExecutor {
    retry: RetryPolicy,
    breaker: CircuitBreaker,
}

impl ResilientExecutor {
    pub fn new(retry: RetryPolicy, breaker: CircuitBreaker) -> Self {
        Self { retry, breaker }
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }

    /// Runs `operation` with retries, failing fast while the circuit is open.
    ///
    /// Returns the operation's value, the last operation error once retries are
    /// exhausted, or [`ResilienceError::CircuitOpen`] if the breaker refused an attempt.
    pub async fn execute<F, Fut, T, E>(&self, operation: F) -> Result<T, ResilienceError<E>>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let breaker = &self.breaker;
        let operation = &operation;
        let last_was_trial = AtomicBool::new(false);
        let last_was_trial = &last_was_trial;
        let trial_failed = AtomicBool::new(false);
        let trial_failed = &trial_failed;

        let result = self
            .retry
            .run_if(
                move || async move {
                    let permit = match breaker.try_acquire().await {
                        Ok(permit) => permit,
                        Err(open) => {
                            tracing::warn!(
                                retry_after_ms = open.retry_after.as_millis() as u64,
                                "Circuit open, failing fast"
                            );
                            return Err(ResilienceError::from(open));
                        }
                    };
                    last_was_trial.store(permit.is_trial(), Ordering::Relaxed);

                    let outcome = operation().await;
                    if permit.is_trial() {
                        match &outcome {
                            Ok(_) => breaker.on_success(permit).await,
                            Err(_) => {
                                breaker.on_failure(permit).await;
                                trial_failed.store(true, Ordering::Relaxed);
                            }
                        }
                    }
                    outcome.map_err(ResilienceError::Operation)
                },
                |error: &ResilienceError<E>| {
                    !error.is_circuit_open() && !trial_failed.load(Ordering::Relaxed)
                },
            )
            .await;

        if !last_was_trial.load(Ordering::Relaxed) {
            match &result {
                Ok(_) => breaker.on_success(Permit::Normal).await,
                Err(ResilienceError::Operation(_)) => breaker.on_failure(Permit::Normal).await,
                Err(ResilienceError::CircuitOpen { .. }) => {}
            }
        }

        result
    }
}
