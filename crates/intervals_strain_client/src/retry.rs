use rand::{RngExt, rng};
use std::time::Duration;

use crate::IntervalsError;

/// Exponential backoff with jitter for idempotent requests.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
        }
    }
}

impl RetryPolicy {
    /// No retries at all; used by tests that count requests.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }

    /// Run `f` until it succeeds, `should_retry` rejects the error, or the
    /// retry budget is spent.
    pub async fn retry_async_if<F, Fut, T, E, P>(&self, mut f: F, should_retry: P) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
    {
        let mut attempt = 0u32;
        loop {
            match f().await {
                Ok(v) => return Ok(v),
                Err(e) => {
                    attempt += 1;
                    if attempt > self.max_retries || !should_retry(&e) {
                        return Err(e);
                    }
                    let delay = self.backoff(attempt);
                    tracing::debug!(attempt, delay_ms = delay.as_millis() as u64, "retrying request");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    /// Retry policy specialised to client errors.
    pub async fn retry_request<F, Fut, T>(&self, f: F) -> Result<T, IntervalsError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, IntervalsError>>,
    {
        self.retry_async_if(f, IntervalsError::is_retryable).await
    }

    fn backoff(&self, attempt: u32) -> Duration {
        let max_delay = self.base_delay * (1u32 << attempt.min(16));
        let max_ms = max_delay.as_millis() as u64;
        if max_ms == 0 {
            return Duration::ZERO;
        }
        let jitter = rng().random_range(0..max_ms);
        Duration::from_millis(jitter)
    }
}
