//! Retry-with-backoff policy.
//!
//! DESIGN
//! ======
//! An explicit loop with an attempt counter, kept separate from the transport
//! so the policy can be tested with a scripted operation and a recording
//! timer. Statuses that signal a client-side problem (auth, permission,
//! missing resource, conflict, validation) are never retried; everything else,
//! including failures without a status, is.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::future::Future;
use std::time::Duration;

use crate::util::timer::Timer;

/// Statuses that are not transient.
pub const NON_RETRYABLE_STATUSES: [u16; 5] = [401, 403, 404, 409, 422];

pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt; `0` disables retrying.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self { max_retries, base_delay: DEFAULT_BASE_DELAY }
    }

    #[must_use]
    pub fn none() -> Self {
        Self::new(0)
    }

    #[must_use]
    pub fn is_retryable(status: Option<u16>) -> bool {
        status.is_none_or(|s| !NON_RETRYABLE_STATUSES.contains(&s))
    }

    /// Delay before retry number `retry_index` (zero-based): `base * (index + 1)`.
    #[must_use]
    pub fn delay_for(&self, retry_index: u32) -> Duration {
        self.base_delay.saturating_mul(retry_index.saturating_add(1))
    }

    /// Delay before the next attempt, or `None` to stop and surface the error.
    #[must_use]
    pub fn next_delay(&self, retries_done: u32, status: Option<u16>) -> Option<Duration> {
        if retries_done >= self.max_retries || !Self::is_retryable(status) {
            return None;
        }
        Some(self.delay_for(retries_done))
    }
}

/// Run `op` until it succeeds, hits a non-retryable failure, or exhausts the
/// policy. `status_of` extracts the HTTP status from a failure, if any.
///
/// # Errors
///
/// Returns the last failure produced by `op`.
pub async fn retry_with_backoff<T, E, F, Fut>(
    policy: RetryPolicy,
    timer: &dyn Timer,
    status_of: impl Fn(&E) -> Option<u16>,
    mut op: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut retries_done = 0;
    loop {
        match op(retries_done).await {
            Ok(value) => return Ok(value),
            Err(err) => match policy.next_delay(retries_done, status_of(&err)) {
                Some(delay) => {
                    log::debug!(
                        "retrying after {}ms (retry {} of {})",
                        delay.as_millis(),
                        retries_done + 1,
                        policy.max_retries
                    );
                    timer.sleep(delay).await;
                    retries_done += 1;
                }
                None => return Err(err),
            },
        }
    }
}
