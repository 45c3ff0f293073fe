use resilience::{
    CircuitBreaker, CircuitBreakerConfig, CircuitState, ResilienceError, ResilientExecutor,
    RetryPolicy,
};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::time::{advance, Instant};

fn executor(max_retries: u32) -> ResilientExecutor {
    ResilientExecutor::new(
        RetryPolicy::new(max_retries, Duration::from_secs(1)),
        CircuitBreaker::new(CircuitBreakerConfig {
            failure_threshold: 2,
            cooldown: Duration::from_secs(60),
        }),
    )
}

async fn failing(executor: &ResilientExecutor, calls: &AtomicU32) -> Result<(), ResilienceError<String>> {
    executor
        .execute(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err("store unavailable".to_string()) }
        })
        .await
}

#[tokio::test(start_paused = true)]
async fn test_third_call_fails_fast_after_two_failed_executes() {
    let executor = executor(3);
    let calls = AtomicU32::new(0);

    for _ in 0..2 {
        let result = failing(&executor, &calls).await;
        assert!(matches!(result, Err(ResilienceError::Operation(_))));
    }
    assert_eq!(calls.load(Ordering::SeqCst), 8);
    assert!(matches!(
        executor.breaker().state().await,
        CircuitState::Open { .. }
    ));

    let started = Instant::now();
    let result = failing(&executor, &calls).await;

    assert!(matches!(result, Err(ResilienceError::CircuitOpen { .. })));
    assert_eq!(calls.load(Ordering::SeqCst), 8, "operation must not run");
    assert_eq!(started.elapsed(), Duration::ZERO, "no retry delay consumed");
}

#[tokio::test(start_paused = true)]
async fn test_trial_success_after_cooldown_closes_circuit() {
    let executor = executor(0);
    let calls = AtomicU32::new(0);
    for _ in 0..2 {
        let _ = failing(&executor, &calls).await;
    }

    advance(Duration::from_secs(60)).await;

    let value = executor
        .execute(|| async { Ok::<_, String>("recovered") })
        .await
        .unwrap();

    assert_eq!(value, "recovered");
    assert_eq!(executor.breaker().state().await, CircuitState::Closed);
    assert_eq!(executor.breaker().failure_count().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_trial_failure_reopens_and_stops_retrying() {
    let executor = executor(3);
    let calls = AtomicU32::new(0);
    for _ in 0..2 {
        let _ = failing(&executor, &calls).await;
    }
    advance(Duration::from_secs(60)).await;
    let before = calls.load(Ordering::SeqCst);
    let started = Instant::now();

    let result = failing(&executor, &calls).await;

    // The trial ran once and re-opened the circuit; no retry was attempted
    assert_eq!(calls.load(Ordering::SeqCst), before + 1);
    match result {
        Err(ResilienceError::Operation(e)) => assert_eq!(e, "store unavailable"),
        other => panic!("Expected the trial's own error, got {:?}", other),
    }
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert!(matches!(
        executor.breaker().state().await,
        CircuitState::Open { .. }
    ));
}

#[tokio::test(start_paused = true)]
async fn test_breaker_state_is_shared_between_clones() {
    let executor = executor(0);
    let clone = executor.clone();
    let calls = AtomicU32::new(0);

    let _ = failing(&executor, &calls).await;
    let _ = failing(&clone, &calls).await;

    let result = failing(&executor, &calls).await;
    assert!(result.unwrap_err().is_circuit_open());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_success_between_failures_keeps_circuit_closed() {
    let executor = executor(0);
    let calls = AtomicU32::new(0);

    let _ = failing(&executor, &calls).await;
    executor
        .execute(|| async { Ok::<_, String>(()) })
        .await
        .unwrap();
    let _ = failing(&executor, &calls).await;

    assert_eq!(executor.breaker().state().await, CircuitState::Closed);
    assert_eq!(executor.breaker().failure_count().await, 1);
}
