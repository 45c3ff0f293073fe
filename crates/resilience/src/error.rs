//! Error types for the resilience primitives

use std::time::Duration;

/// Returned by [`CircuitBreaker::try_acquire`](crate::CircuitBreaker::try_acquire) while
/// the circuit refuses calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Circuit breaker is open, retry after {retry_after:?}")]
pub struct CircuitOpen {
    /// Time left until the breaker lets a trial call through
    pub retry_after: Duration,
}

/// Failure of an operation run under resilience protection.
#[derive(Debug, thiserror::Error)]
pub enum ResilienceError<E> {
    /// The breaker refused the call; the operation was not invoked
    #[error("Circuit breaker is open, retry after {retry_after:?}")]
    CircuitOpen { retry_after: Duration },

    /// The operation itself failed (after any retries)
    #[error("{0}")]
    Operation(E),
}

impl<E> ResilienceError<E> {
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, Self::CircuitOpen { .. })
    }

    /// The underlying operation error, if the operation ran.
    pub fn into_operation(self) -> Option<E> {
        match self {
            Self::Operation(e) => Some(e),
            Self::CircuitOpen { .. } => None,
        }
    }
}

impl<E> From<CircuitOpen> for ResilienceError<E> {
    fn from(open: CircuitOpen) -> Self {
        Self::CircuitOpen {
            retry_after: open.retry_after,
        }
    }
}
