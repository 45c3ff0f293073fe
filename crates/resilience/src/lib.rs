//! Resilience primitives: retry with exponential backoff, a circuit breaker, and the
//! executor that composes them
//!
//! # Overview
//!
//! - **RetryPolicy**: re-runs a failing operation, waiting `base_delay * 2^n` before retry `n`
//! - **CircuitBreaker**: fails fast after consecutive failures, then lets one trial call
//!   decide whether to close again
//! - **ResilientExecutor**: retries an operation with every attempt gated by a shared breaker
//!
//! Each piece is usable and testable on its own.
//!
//! # Architecture
//!
//! ```text
//!   execute(op)
//!       │
//!       ▼
//! ┌──────────────────┐   refused   ┌──────────────────┐
//! │  Circuit Breaker │ ──────────► │   CircuitOpen    │
//! └────────┬─────────┘             └──────────────────┘
//!          │ permit
//!          ▼
//!       op() ── Err ──► sleep(base * 2^n) ──► next attempt (up to max_retries)
//!          │
//!          ▼ Ok
//!        value
//! ```
//!
//! # Usage Example
//!
//! ```
//! use resilience::{CircuitBreaker, CircuitBreakerConfig, ResilientExecutor, RetryPolicy};
//! use std::time::Duration;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let executor = ResilientExecutor::new(
//!     RetryPolicy::new(3, Duration::from_millis(1)),
//!     CircuitBreaker::new(CircuitBreakerConfig {
//!         failure_threshold: 2,
//!         cooldown: Duration::from_secs(60),
//!     }),
//! );
//!
//! let names = executor
//!     .execute(|| async { Ok::<_, String>(vec!["Tim Robbins"]) })
//!     .await
//!     .unwrap();
//! assert_eq!(names.len(), 1);
//! # }
//! ```

pub mod circuit_breaker;
pub mod error;
pub mod executor;
pub mod retry;

pub use circuit_breaker::{CircuitBreaker, CircuitBreakerConfig, CircuitState, Permit};
pub use error::{CircuitOpen, ResilienceError};
pub use executor::ResilientExecutor;
pub use retry::RetryPolicy;
