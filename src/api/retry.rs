//
//  stash-client
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Bounded retry with exponential backoff.
//!
//! Every network operation runs its unit of work (build request, send,
//! classify) through [`RetryPolicy::run`]. The policy decides how many attempts
//! are made, how long to wait between them and which errors are worth another
//! attempt.
//!
//! By default only transport failures and 5xx responses are retried
//! ([`ApiError::is_retryable`]); a 400 or 404 will not succeed on a second try.
//! [`RetryPolicy::retry_all_errors`] restores the blanket behavior of retrying
//! every failure for callers that depend on that timing.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use super::common::{ApiError, Result};

/// Maximum number of attempts per call.
pub const MAX_ATTEMPTS: u32 = 3;

/// Base delay of the exponential backoff.
pub const BASE_DELAY: Duration = Duration::from_millis(250);

/// Ceiling applied to any single backoff delay.
pub const MAX_DELAY: Duration = Duration::from_secs(5);

/// Decides whether a failed attempt should be retried.
pub type RetryPredicate = fn(&ApiError) -> bool;

fn retry_transient(error: &ApiError) -> bool {
    error.is_retryable()
}

fn retry_everything(_: &ApiError) -> bool {
    true
}

/// Retry configuration for one client.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use stash_client::api::retry::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_attempts, 3);
/// assert_eq!(policy.backoff(0), Duration::from_millis(250));
/// assert_eq!(policy.backoff(1), Duration::from_millis(500));
/// assert_eq!(policy.backoff(10), Duration::from_secs(5));
/// ```
#[derive(Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Values below 1 behave as 1.
    pub max_attempts: u32,

    /// Delay after the first failed attempt; doubled for each further attempt.
    pub base_delay: Duration,

    /// Upper bound for a single delay.
    pub max_delay: Duration,

    retryable: RetryPredicate,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: MAX_ATTEMPTS,
            base_delay: BASE_DELAY,
            max_delay: MAX_DELAY,
            retryable: retry_transient,
        }
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_attempts", &self.max_attempts)
            .field("base_delay", &self.base_delay)
            .field("max_delay", &self.max_delay)
            .finish_non_exhaustive()
    }
}

impl RetryPolicy {
    /// A policy that makes exactly one attempt.
    pub fn single_attempt() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Replaces the retry predicate.
    pub fn with_predicate(mut self, retryable: RetryPredicate) -> Self {
        self.retryable = retryable;
        self
    }

    /// Retries every error, including permanent 4xx responses.
    pub fn retry_all_errors(self) -> Self {
        self.with_predicate(retry_everything)
    }

    /// Sets the base and maximum backoff delays.
    pub fn with_delays(mut self, base_delay: Duration, max_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self.max_delay = max_delay;
        self
    }

    /// Returns `true` if the predicate allows retrying `error`.
    pub fn should_retry(&self, error: &ApiError) -> bool {
        (self.retryable)(error)
    }

    /// Delay to wait after the failed attempt with the given zero-based index.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Runs `work` until it succeeds, the predicate rejects the error, or the
    /// attempts are exhausted.
    ///
    /// The last error is returned unmodified.
    pub async fn run<T, F, Fut>(&self, label: &str, mut work: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            match work().await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    attempt += 1;
                    if attempt >= attempts || !self.should_retry(&e) {
                        return Err(e);
                    }

                    let delay = self.backoff(attempt - 1);
                    tracing::warn!(
                        "{} attempt {}/{} failed ({}), retrying in {:?}",
                        label,
                        attempt,
                        attempts,
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
}
