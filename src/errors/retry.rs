use std::time::Duration;
use std::future::Future;

use super::types::GateError;
use tracing::{debug, warn};

/// Bounded fixed-delay retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            delay: Duration::from_millis(10),
        }
    }
}

impl RetryConfig {
    /// Upper bound on the time spent sleeping between attempts.
    pub fn max_wait(&self) -> Duration {
        self.delay
            .checked_mul(self.max_attempts.saturating_sub(1))
            .unwrap_or(Duration::MAX)
    }
}

/// Execute an async operation with retry logic.
///
/// Retries only if the error is classified as retryable and the attempt cap
/// has not been reached. Waiting is a timer sleep, never a busy loop. The last
/// error is returned once the cap is hit.
pub async fn with_retry<F, Fut, T>(
    operation_name: &str,
    config: &RetryConfig,
    mut factory: F,
) -> Result<T, GateError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GateError>>,
{
    let max_attempts = config.max_attempts.max(1);

    for attempt in 0..max_attempts {
        match factory().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let classification = e.classify();

                if !classification.retryable {
                    warn!(
                        operation = operation_name,
                        error_type = classification.error_type,
                        "Non-retryable error, failing immediately"
                    );
                    return Err(e);
                }
                if attempt + 1 >= max_attempts {
                    warn!(
                        operation = operation_name,
                        attempts = max_attempts,
                        "Max attempts exhausted"
                    );
                    return Err(e);
                }

                debug!(
                    operation = operation_name,
                    attempt = attempt + 1,
                    max = max_attempts,
                    delay_ms = config.delay.as_millis() as u64,
                    error = %e,
                    "Retrying after error"
                );

                tokio::time::sleep(config.delay).await;
            }
        }
    }

    Err(GateError::Internal("Retry loop exited unexpectedly".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn fast(max_attempts: u32) -> RetryConfig {
        RetryConfig { max_attempts, delay: Duration::from_millis(1) }
    }

    #[test]
    fn test_default_bound() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 50);
        assert_eq!(config.delay, Duration::from_millis(10));
        assert_eq!(config.max_wait(), Duration::from_millis(490));
    }

    #[test]
    fn test_max_wait_saturates() {
        let config = RetryConfig { max_attempts: 2000, delay: Duration::from_millis(u64::MAX) };
        assert_eq!(config.max_wait(), Duration::MAX);
        let single = RetryConfig { max_attempts: 1, delay: Duration::from_millis(u64::MAX) };
        assert_eq!(single.max_wait(), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_first_try() {
        let result = with_retry("test", &fast(3), || async {
            Ok::<_, GateError>(42)
        }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_with_retry_recovers_after_not_ready() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast(10), || {
            let attempts = attempts_clone.clone();
            async move {
                if attempts.fetch_add(1, Ordering::SeqCst) < 3 {
                    Err(GateError::NativeStatusNotReady("pending".into()))
                } else {
                    Ok("ready")
                }
            }
        }).await;

        assert_eq!(result.unwrap(), "ready");
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_with_retry_non_retryable_fails_immediately() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast(5), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(GateError::Certificate("empty chain".into()))
            }
        }).await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_with_retry_stops_at_cap() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let result = with_retry("test", &fast(4), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(GateError::NativeStatusNotReady("never".into()))
            }
        }).await;

        assert!(matches!(result, Err(GateError::NativeStatusNotReady(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_runs_once() {
        let attempts = Arc::new(AtomicU32::new(0));
        let attempts_clone = attempts.clone();

        let _ = with_retry("test", &fast(0), || {
            let attempts = attempts_clone.clone();
            async move {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(GateError::NativeStatusNotReady("never".into()))
            }
        }).await;

        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }
}
