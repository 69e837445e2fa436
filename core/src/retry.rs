//! Bounded exponential-backoff retry for fallible network operations.
//!
//! The wrapper consults [`Error::is_retryable`] instead of retrying on any
//! failure: a malformed credential or an unencodable record propagates
//! immediately, while transport faults and non-success responses are retried
//! until the attempt budget runs out. The original error is returned
//! unchanged after exhaustion so callers can still distinguish
//! transient-exhausted from non-retryable failures.

use std::future::Future;
use std::time::Duration;

use log::debug;
use log::warn;
use tokio::time::sleep;

use crate::{Error, Result};

/// Retry policy with exponential backoff.
///
/// Immutable configuration value. `max_attempts` counts every invocation of
/// the operation, the first one included, and is treated as at least 1.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total number of invocations, first attempt included.
    pub max_attempts: usize,

    /// Delay before the first retry.
    pub base_delay: Duration,

    /// Upper bound for a single backoff sleep.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget and base delay.
    pub fn new(max_attempts: usize, base_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            ..Default::default()
        }
    }

    /// Backoff duration before retrying after failure `attempt` (0-indexed).
    ///
    /// `base_delay * 2^attempt`, capped at `max_delay`.
    pub fn backoff(&self, attempt: usize) -> Duration {
        // Clamp the shift so the multiplier itself cannot overflow.
        let factor = 1u32 << attempt.min(31) as u32;
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }
}

/// Run `op` under `policy`, logging a warning per failed attempt.
pub async fn retry_with_backoff<F, Fut, T>(policy: &RetryPolicy, op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    retry_with_backoff_notify(
        policy,
        |err, attempt| warn!("attempt {} failed, will retry: {err}", attempt + 1),
        op,
    )
    .await
}

/// Run `op` under `policy`, invoking `notify` with each failure that will be
/// retried and the 0-indexed attempt number.
///
/// Non-retryable errors and the final exhausting error propagate unchanged;
/// `notify` never sees them.
pub async fn retry_with_backoff_notify<F, Fut, T, N>(
    policy: &RetryPolicy,
    mut notify: N,
    mut op: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
    N: FnMut(&Error, usize),
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 0;

    loop {
        match op().await {
            Ok(v) => {
                if attempt > 0 {
                    debug!("operation succeeded on attempt {}", attempt + 1);
                }
                return Ok(v);
            }
            Err(err) => {
                if !err.is_retryable() || attempt + 1 >= max_attempts {
                    return Err(err);
                }

                notify(&err, attempt);
                sleep(policy.backoff(attempt)).await;
                attempt += 1;
            }
        }
    }
}
