// Bounded retry with exponential backoff
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// Retry configuration
#[derive(Debug, Clone)]
pub struct RetryConfig {
    pub max_retries: u32,
    pub initial_delay_ms: u64,
    pub max_delay_ms: u64,
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay_ms: 500, // Half a second before the first retry
            max_delay_ms: 10_000,  // Never wait more than 10 seconds
            backoff_multiplier: 2.0,
        }
    }
}

/// Run an operation, retrying transient failures with exponential backoff.
///
/// `is_transient` decides which errors are worth another attempt; anything
/// else returns immediately. The budget is bounded either way, so the core
/// never needs a retry policy of its own on top of this.
pub async fn with_retry<F, Fut, T, E, P>(
    config: &RetryConfig,
    is_transient: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut delay_ms = config.initial_delay_ms;

    for attempt in 0..=config.max_retries {
        match operation().await {
            Ok(value) => {
                if attempt > 0 {
                    debug!("request succeeded after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(err) if attempt == config.max_retries || !is_transient(&err) => {
                warn!("request failed after {} attempts: {}", attempt + 1, err);
                return Err(err);
            }
            Err(err) => {
                warn!(
                    "request failed (attempt {}/{}): {}. retrying in {}ms",
                    attempt + 1,
                    config.max_retries + 1,
                    err,
                    delay_ms
                );
                sleep(Duration::from_millis(delay_ms)).await;
                delay_ms = (((delay_ms as f64) * config.backoff_multiplier) as u64)
                    .min(config.max_delay_ms);
            }
        }
    }

    unreachable!("loop returns on the final attempt")
}

/// Whether an HTTP status is worth retrying at all.
/// 5xx, 429 and 408 are transient; everything else is the caller's problem.
pub fn is_retryable_status(status: reqwest::StatusCode) -> bool {
    status.is_server_error()
        || status == reqwest::StatusCode::TOO_MANY_REQUESTS
        || status == reqwest::StatusCode::REQUEST_TIMEOUT
}
