//! Circuit Breaker implementation for fault tolerance
//!
//! The circuit breaker prevents cascading failures by failing fast when an operation keeps
//! failing. It has three states:
//! - Closed: calls pass through, consecutive failures are counted
//! - Open: calls fail immediately until the cooldown has elapsed
//! - HalfOpen: exactly one trial call decides between Closed and Open
//!
//! Callers take a [`Permit`] with [`CircuitBreaker::try_acquire`] and report the outcome
//! with [`CircuitBreaker::on_success`] / [`CircuitBreaker::on_failure`]. [`CircuitBreaker::call`]
//! does all three for a single invocation.

use crate::error::{CircuitOpen, ResilienceError};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// State of the circuit breaker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircuitState {
    /// Circuit is closed, requests pass through normally
    Closed,
    /// Circuit is open, requests fail immediately until `until`
    Open { opened_at: Instant, until: Instant },
    /// Circuit is half-open, a single trial call is allowed
    HalfOpen { since: Instant },
}

/// Configuration for circuit breaker behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Number of consecutive failures before opening circuit
    pub failure_threshold: u32,
    /// How long the circuit stays open before allowing a trial call
    pub cooldown: Duration,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 2,
            cooldown: Duration::from_secs(60),
        }
    }
}

/// Admission ticket returned by [`CircuitBreaker::try_acquire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permit {
    /// Regular call while the circuit is closed
    Normal,
    /// The single half-open trial call, tagged with the moment it was admitted
    Trial { since: Instant },
}

impl Permit {
    pub fn is_trial(self) -> bool {
        matches!(self, Permit::Trial { .. })
    }
}

#[derive(Debug)]
struct BreakerState {
    state: CircuitState,
    consecutive_failures: u32,
}

/// Circuit breaker shared by every caller of one protected operation
///
/// Clones share state.
///
/// # Example
/// ```
/// use resilience::{CircuitBreaker, CircuitBreakerConfig, CircuitState, ResilienceError};
///
/// #[tokio::main]
/// async fn main() {
///     let breaker = CircuitBreaker::new(CircuitBreakerConfig::default());
///
///     for _ in 0..2 {
///         let _ = breaker.call(|| async { Err::<(), _>("boom") }).await;
///     }
///     assert!(matches!(breaker.state().await, CircuitState::Open { .. }));
///
///     let result = breaker.call(|| async { Ok::<_, &str>(1) }).await;
///     assert!(matches!(result, Err(ResilienceError::CircuitOpen { .. })));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    config: Arc<CircuitBreakerConfig>,
    state: Arc<Mutex<BreakerState>>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CircuitBreakerConfig::default())
    }
}

impl CircuitBreaker {
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config: Arc::new(config),
            state: Arc::new(Mutex::new(BreakerState {
                state: CircuitState::Closed,
                consecutive_failures: 0,
            })),
        }
    }

    pub fn config(&self) -> &CircuitBreakerConfig {
        &self.config
    }

    /// Get the current state of the circuit breaker
    pub async fn state(&self) -> CircuitState {
        self.state.lock().await.state
    }

    /// Get current consecutive failure count
    pub async fn failure_count(&self) -> u32 {
        self.state.lock().await.consecutive_failures
    }

    /// Reset the circuit breaker to closed state
    pub async fn reset(&self) {
        let mut state = self.state.lock().await;
        state.state = CircuitState::Closed;
        state.consecutive_failures = 0;
        info!("Circuit reset");
    }

    /// Asks to run one call.
    ///
    /// Once the cooldown has elapsed the first caller gets the [`Permit::Trial`] and the
    /// circuit becomes half-open; others are refused until the trial reports back. A trial
    /// that never reports (its future was dropped) is given up after another cooldown.
    pub async fn try_acquire(&self) -> Result<Permit, CircuitOpen> {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        match state.state {
            CircuitState::Closed => Ok(Permit::Normal),
            CircuitState::Open { until, .. } if now < until => Err(CircuitOpen {
                retry_after: until - now,
            }),
            CircuitState::Open { .. } => {
                state.state = CircuitState::HalfOpen { since: now };
                info!("Circuit half-open, allowing trial call");
                Ok(Permit::Trial { since: now })
            }
            CircuitState::HalfOpen { since } => {
                let expires = since + self.config.cooldown;
                if now < expires {
                    debug!("Trial call in flight, refusing");
                    Err(CircuitOpen {
                        retry_after: expires - now,
                    })
                } else {
                    state.state = CircuitState::HalfOpen { since: now };
                    warn!("Trial call never reported, allowing another");
                    Ok(Permit::Trial { since: now })
                }
            }
        }
    }

    /// Report a successful call made under `permit`.
    pub async fn on_success(&self, permit: Permit) {
        let mut state = self.state.lock().await;

        match (permit, state.state) {
            (Permit::Trial { since }, CircuitState::HalfOpen { since: current })
                if since == current =>
            {
                state.state = CircuitState::Closed;
                state.consecutive_failures = 0;
                info!("Circuit closed after successful trial");
            }
            (Permit::Normal, CircuitState::Closed) => {
                state.consecutive_failures = 0;
            }
            // Late reports from calls admitted under an earlier state, including a
            // trial that was given up on
            _ => {}
        }
    }

    /// Report a failed call made under `permit`.
    pub async fn on_failure(&self, permit: Permit) {
        let mut state = self.state.lock().await;
        let now = Instant::now();

        match (permit, state.state) {
            (Permit::Trial { since }, CircuitState::HalfOpen { since: current })
                if since == current =>
            {
                state.state = CircuitState::Open {
                    opened_at: now,
                    until: now + self.config.cooldown,
                };
                warn!(
                    cooldown_secs = self.config.cooldown.as_secs(),
                    "Trial call failed, circuit re-opened"
                );
            }
            (Permit::Normal, CircuitState::Closed) => {
                state.consecutive_failures += 1;
                if state.consecutive_failures >= self.config.failure_threshold {
                    state.state = CircuitState::Open {
                        opened_at: now,
                        until: now + self.config.cooldown,
                    };
                    warn!(
                        failures = state.consecutive_failures,
                        cooldown_secs = self.config.cooldown.as_secs(),
                        "Circuit opened"
                    );
                    state.consecutive_failures = 0;
                } else {
                    debug!(failures = state.consecutive_failures, "Failure recorded");
                }
            }
            _ => debug!(?permit, "Ignoring stale failure report"),
        }
    }

    /// Execute an operation once under circuit breaker protection
    pub async fn call<F, Fut, T, E>(&self, operation: F) -> Result<T, ResilienceError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let permit = self.try_acquire().await?;

        match operation().await {
            Ok(value) => {
                self.on_success(permit).await;
                Ok(value)
            }
            Err(e) => {
                self.on_failure(permit).await;
                Err(ResilienceError::Operation(e))
            }
        }
    }
}
