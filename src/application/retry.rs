//! Fixed-delay retry for transient RPC failures.
//!
//! Only errors classified as transient ([`Error::is_transient`]) are
//! retried. Anything else (reverts, insufficient funds, bad input) is
//! returned unchanged on the first occurrence. When every attempt fails
//! transiently the caller gets [`SwapError::RetriesExhausted`], which is
//! distinct from the underlying cause.

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{Error, Result, SwapError};

/// Attempt budget and fixed backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Create a policy. At least one attempt is always made.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// Single attempt, no retries.
    #[must_use]
    pub fn once() -> Self {
        Self::new(1, Duration::ZERO)
    }

    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Run `operation` under this policy.
    ///
    /// Strictly sequential: one attempt in flight, the caller suspends for
    /// each attempt and each delay.
    ///
    /// # Errors
    ///
    /// Returns the operation's error unchanged when it is not transient, or
    /// [`SwapError::RetriesExhausted`] after `max_attempts` transient failures.
    pub async fn execute<T, E, F, Fut>(&self, label: &str, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, E>>,
        E: Into<Error>,
    {
        let mut attempt = 1;
        loop {
            let err: Error = match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(operation = label, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) => err.into(),
            };

            if !err.is_transient() {
                return Err(err);
            }

            if attempt >= self.max_attempts {
                warn!(
                    operation = label,
                    attempts = attempt,
                    error = %err,
                    "RPC node kept failing, giving up"
                );
                return Err(SwapError::RetriesExhausted {
                    attempts: attempt,
                    last_error: err.to_string(),
                }
                .into());
            }

            warn!(
                operation = label,
                attempt,
                max_attempts = self.max_attempts,
                delay_ms = self.delay.as_millis() as u64,
                error = %err,
                "RPC node error, retrying"
            );
            sleep(self.delay).await;
            attempt += 1;
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(3, Duration::from_secs(5))
    }
}

/// Run `operation` with up to `max_attempts` attempts and a fixed `delay`.
///
/// Convenience wrapper around [`RetryPolicy::execute`].
///
/// # Errors
///
/// See [`RetryPolicy::execute`].
pub async fn execute_with_retry<T, E, F, Fut>(
    operation: F,
    max_attempts: u32,
    delay: Duration,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, E>>,
    E: Into<Error>,
{
    RetryPolicy::new(max_attempts, delay)
        .execute("operation", operation)
        .await
}
