use std::time::Duration;

use crate::errors::TrendResult;

/// Bounded retry with an exponential backoff schedule.
///
/// Injected into adapters that talk to rate-limited upstreams; after the last
/// attempt the original error is returned and the caller degrades to an empty
/// contribution.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
        }
    }

    /// Delay before retry number `attempt` (0-based): base * 2^attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    pub fn run<T>(&self, mut op: impl FnMut() -> TrendResult<T>) -> TrendResult<T> {
        let mut attempt = 0;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(e) if e.is_retryable() && attempt + 1 < self.max_attempts.max(1) => {
                    let delay = self.delay_for(attempt);
                    tracing::warn!(
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "retryable upstream error: {}",
                        e
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrendError;

    fn instant_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::ZERO)
    }

    #[test]
    fn test_backoff_schedule_doubles() {
        let policy = RetryPolicy::new(4, Duration::from_millis(100));
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn test_succeeds_after_transient_failures() {
        let mut calls = 0;
        let result = instant_policy(3).run(|| {
            calls += 1;
            if calls < 3 {
                Err(TrendError::RateLimited("test".to_string()))
            } else {
                Ok(calls)
            }
        });

        assert_eq!(result.unwrap(), 3);
    }

    #[test]
    fn test_gives_up_after_max_attempts() {
        let mut calls = 0;
        let result: TrendResult<()> = instant_policy(3).run(|| {
            calls += 1;
            Err(TrendError::RateLimited("test".to_string()))
        });

        assert!(matches!(result, Err(TrendError::RateLimited(_))));
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_non_retryable_fails_immediately() {
        let mut calls = 0;
        let result: TrendResult<()> = instant_policy(5).run(|| {
            calls += 1;
            Err(TrendError::Api("HTTP 403".to_string()))
        });

        assert!(matches!(result, Err(TrendError::Api(_))));
        assert_eq!(calls, 1);
    }
}
