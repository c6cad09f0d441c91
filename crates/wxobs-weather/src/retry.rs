//! Retry utilities for blocking HTTP operations with exponential backoff.
//!
//! Every failure is retried the same way: a timeout, a refused connection
//! and a 500 or 429 status all wait and try again until the attempts run
//! out. The last failure is handed back to the caller.

use std::fmt::Display;
use std::time::Duration;

/// Default retry configuration
pub const DEFAULT_MAX_RETRIES: u32 = 2;
pub const DEFAULT_BASE_BACKOFF_MS: u64 = 500;

/// Retry configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Delay before the first retry (doubles each attempt)
    pub base_backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_backoff: Duration::from_millis(DEFAULT_BASE_BACKOFF_MS),
        }
    }
}

impl RetryConfig {
    pub fn new(max_retries: u32, base_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            base_backoff: Duration::from_millis(base_backoff_ms),
        }
    }

    /// A single attempt, no waiting.
    pub fn no_retry() -> Self {
        Self::new(0, 0)
    }

    /// Delay after the failed attempt with 0-based index `attempt`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        // Exponential backoff: base_backoff * 2^attempt
        let factor = 2u32.saturating_pow(attempt);
        self.base_backoff.saturating_mul(factor)
    }

    pub fn total_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Run `operation` until it succeeds or `config.max_retries + 1` attempts
/// have failed, sleeping the calling thread between attempts.
///
/// # Example
/// ```ignore
/// let body = with_retry(&RetryConfig::default(), || {
///     transport.get(url, None, timeout)
/// })?;
/// ```
pub fn with_retry<T, E, F>(config: &RetryConfig, operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Display,
{
    with_retry_using(config, std::thread::sleep, operation)
}

/// Same as [`with_retry`] with a caller-supplied sleep.
pub fn with_retry_using<T, E, F, S>(
    config: &RetryConfig,
    mut sleep: S,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    S: FnMut(Duration),
    E: Display,
{
    let mut attempt = 0;

    loop {
        match operation() {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!("Request succeeded after {} retries", attempt);
                }
                return Ok(value);
            }
            Err(e) if attempt < config.max_retries => {
                let delay = config.delay_for_attempt(attempt);
                tracing::warn!(
                    "Attempt {} of {} failed: {}; retrying in {:?}",
                    attempt + 1,
                    config.total_attempts(),
                    e,
                    delay
                );
                sleep(delay);
                attempt += 1;
            }
            Err(e) => {
                tracing::error!(
                    "All {} attempts exhausted: {}",
                    config.total_attempts(),
                    e
                );
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 2);
        assert_eq!(config.base_backoff, Duration::from_millis(500));
        assert_eq!(config.total_attempts(), 3);
    }

    #[test]
    fn test_delay_calculation() {
        let config = RetryConfig::new(3, 500);

        assert_eq!(config.delay_for_attempt(0), Duration::from_millis(500));
        assert_eq!(config.delay_for_attempt(1), Duration::from_millis(1000));
        assert_eq!(config.delay_for_attempt(2), Duration::from_millis(2000));
    }

    #[test]
    fn test_delay_saturates() {
        let config = RetryConfig::new(40, 500);
        assert!(config.delay_for_attempt(40) >= config.delay_for_attempt(31));
    }

    #[test]
    fn test_success_first_attempt_never_sleeps() {
        let mut slept = Vec::new();
        let result: Result<u32, String> =
            with_retry_using(&RetryConfig::default(), |d| slept.push(d), || Ok(7));

        assert_eq!(result, Ok(7));
        assert!(slept.is_empty());
    }

    #[test]
    fn test_fails_twice_then_succeeds() {
        let mut calls = 0;
        let mut slept = Vec::new();
        let result = with_retry_using(
            &RetryConfig::default(),
            |d| slept.push(d),
            || {
                calls += 1;
                if calls < 3 {
                    Err(format!("connection refused ({})", calls))
                } else {
                    Ok("body")
                }
            },
        );

        assert_eq!(result, Ok("body"));
        assert_eq!(calls, 3);
        assert_eq!(
            slept,
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[test]
    fn test_all_attempts_fail_propagates_last_error() {
        let mut calls = 0;
        let mut slept = Vec::new();
        let result: Result<(), String> = with_retry_using(
            &RetryConfig::default(),
            |d| slept.push(d),
            || {
                calls += 1;
                Err(format!("failure {}", calls))
            },
        );

        assert_eq!(result, Err("failure 3".to_string()));
        assert_eq!(calls, 3);
        // No sleep after the final attempt
        assert_eq!(
            slept,
            vec![Duration::from_millis(500), Duration::from_millis(1000)]
        );
    }

    #[test]
    fn test_no_retry_makes_one_attempt() {
        let mut calls = 0;
        let result: Result<(), &str> = with_retry_using(
            &RetryConfig::no_retry(),
            |_| panic!("must not sleep"),
            || {
                calls += 1;
                Err("boom")
            },
        );

        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_with_retry_real_sleep_is_short_for_zero_backoff() {
        let mut calls = 0;
        let result: Result<u8, &str> = with_retry(&RetryConfig::new(2, 0), || {
            calls += 1;
            if calls == 2 {
                Ok(1)
            } else {
                Err("transient")
            }
        });
        assert_eq!(result, Ok(1));
    }
}
