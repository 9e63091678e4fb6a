//! Retry with exponential backoff for API calls.
//!
//! Only errors for which [`TwitterError::is_retryable`] holds are retried;
//! a 404 for an unknown screen name fails on the first attempt.

use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

use crate::TwitterError;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RetryConfig {
    /// Maximum number of retry attempts after the first try.
    pub max_retries: u32,
    /// Initial delay between retries (base for exponential backoff) in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub base_delay: Duration,
    /// Maximum delay between retries in milliseconds.
    #[serde(with = "crate::serde_millis")]
    pub max_delay: Duration,
    /// Multiplier for exponential backoff.
    pub backoff_multiplier: f64,
    /// Spread delays by ±25%.
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(5),
            backoff_multiplier: 2.0,
            jitter: true,
        }
    }
}

impl RetryConfig {
    /// A config that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    pub fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Calculate delay for a specific retry attempt (0-indexed, 0 = first try).
    pub fn calculate_delay(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::ZERO;
        }

        // base_delay * multiplier^(attempt-1)
        let exponential =
            self.base_delay.as_millis() as f64 * self.backoff_multiplier.powi((attempt - 1) as i32);
        let delay_ms = exponential.min(self.max_delay.as_millis() as f64) as u64;

        if self.jitter {
            let jitter_range = delay_ms / 4;
            if jitter_range > 0 {
                let jitter = fastrand::u64(0..jitter_range * 2);
                return Duration::from_millis(delay_ms - jitter_range + jitter);
            }
        }

        Duration::from_millis(delay_ms)
    }
}

/// Result of a retried operation.
#[derive(Debug)]
pub struct RetryResult<T> {
    /// The final result (success or last error).
    pub result: Result<T, TwitterError>,
    /// Number of attempts made (1 = first try succeeded).
    pub attempts: u32,
    /// Total time spent, delays included.
    pub total_duration: Duration,
}

impl<T> RetryResult<T> {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn into_result(self) -> Result<T, TwitterError> {
        self.result
    }
}

/// Runs `operation` until it succeeds, fails with a non-retryable error, or
/// the retry budget is spent.
pub async fn execute_with_retry_async<T, F, Fut>(
    config: &RetryConfig,
    mut operation: F,
) -> RetryResult<T>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, TwitterError>>,
{
    let start = Instant::now();
    let mut attempt = 0;

    loop {
        match operation(attempt).await {
            Ok(value) => {
                return RetryResult {
                    result: Ok(value),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
            Err(err) if err.is_retryable() && attempt < config.max_retries => {
                attempt += 1;
                let delay = config.calculate_delay(attempt);
                tracing::warn!(attempt, ?delay, error = %err, "retrying twitter request");
                if !delay.is_zero() {
                    sleep(delay).await;
                }
            }
            Err(err) => {
                return RetryResult {
                    result: Err(err),
                    attempts: attempt + 1,
                    total_duration: start.elapsed(),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use std::cell::Cell;

    fn unavailable() -> TwitterError {
        TwitterError::Api {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: "over capacity".into(),
        }
    }

    fn fast() -> RetryConfig {
        RetryConfig::default()
            .with_base_delay(Duration::from_millis(1))
            .with_jitter(false)
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.base_delay, Duration::from_millis(100));
        assert_eq!(config.max_delay, Duration::from_secs(5));
        assert!(config.jitter);
    }

    #[test]
    fn test_calculate_delay_exponential() {
        let config = RetryConfig::default().with_jitter(false);
        assert_eq!(config.calculate_delay(0), Duration::ZERO);
        assert_eq!(config.calculate_delay(1), Duration::from_millis(100));
        assert_eq!(config.calculate_delay(2), Duration::from_millis(200));
        assert_eq!(config.calculate_delay(3), Duration::from_millis(400));
    }

    #[test]
    fn test_calculate_delay_capped() {
        let config = RetryConfig::default()
            .with_jitter(false)
            .with_max_delay(Duration::from_millis(250));
        assert_eq!(config.calculate_delay(10), Duration::from_millis(250));
    }

    #[test]
    fn test_jitter_stays_within_quarter() {
        let config = RetryConfig::default();
        for _ in 0..50 {
            let delay = config.calculate_delay(2).as_millis();
            assert!((150..250).contains(&delay), "delay {delay} out of range");
        }
    }

    #[test]
    fn test_serde_durations_as_millis() {
        let json = serde_json::to_value(RetryConfig::default()).expect("serialize");
        assert_eq!(json["base_delay"], 100);
        assert_eq!(json["max_delay"], 5000);
    }

    #[tokio::test]
    async fn succeeds_after_transient_failures() {
        let calls = Cell::new(0);
        let result = execute_with_retry_async(&fast(), |attempt| {
            calls.set(calls.get() + 1);
            async move {
                if attempt < 2 {
                    Err(unavailable())
                } else {
                    Ok("done")
                }
            }
        })
        .await;

        assert!(result.is_success());
        assert_eq!(result.attempts, 3);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test]
    async fn gives_up_after_budget() {
        let result: RetryResult<()> =
            execute_with_retry_async(&fast().with_max_retries(2), |_| async {
                Err(unavailable())
            })
            .await;

        assert!(!result.is_success());
        assert_eq!(result.attempts, 3);
    }

    #[tokio::test]
    async fn non_retryable_fails_immediately() {
        let result: RetryResult<()> = execute_with_retry_async(&fast(), |_| async {
            Err(TwitterError::Api {
                status: StatusCode::NOT_FOUND,
                message: "User not found.".into(),
            })
        })
        .await;

        assert_eq!(result.attempts, 1);
        assert!(matches!(
            result.into_result(),
            Err(TwitterError::Api { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn none_never_retries() {
        let result: RetryResult<()> =
            execute_with_retry_async(&RetryConfig::none(), |_| async { Err(unavailable()) })
                .await;
        assert_eq!(result.attempts, 1);
    }
}
