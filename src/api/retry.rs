//
//  apim-client
//  api/retry.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/16.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Retry policy for resource calls.
//!
//! Network failures are always eligible for a retry; 5xx responses are
//! eligible when [`RetryPolicy::retry_server_errors`] is set. Delays grow
//! exponentially from `min_backoff`, are capped at `max_backoff`, and are
//! jittered so concurrent callers do not retry in lock step.

use std::time::Duration;

use rand::Rng;
use reqwest::StatusCode;

use crate::config::HttpConfig;

/// Bounded exponential backoff.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use apim_client::api::RetryPolicy;
///
/// let policy = RetryPolicy {
///     max_retries: 3,
///     min_backoff: Duration::from_millis(100),
///     max_backoff: Duration::from_millis(1_000),
///     retry_server_errors: true,
/// };
///
/// assert_eq!(policy.ceiling(0), Duration::from_millis(100));
/// assert_eq!(policy.ceiling(2), Duration::from_millis(400));
/// assert_eq!(policy.ceiling(10), Duration::from_millis(1_000));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Retries after the first attempt. Zero disables retrying.
    pub max_retries: u32,
    /// Smallest delay between attempts.
    pub min_backoff: Duration,
    /// Largest delay between attempts.
    pub max_backoff: Duration,
    /// Treat 5xx responses as transient.
    pub retry_server_errors: bool,
}

impl RetryPolicy {
    pub fn from_config(config: &HttpConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            min_backoff: config.min_backoff(),
            max_backoff: config.max_backoff(),
            retry_server_errors: config.retry_server_errors,
        }
    }

    /// A policy that makes exactly one attempt.
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            min_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            retry_server_errors: false,
        }
    }

    /// Whether a response with this status should be attempted again.
    pub fn is_retryable_status(&self, status: StatusCode) -> bool {
        self.retry_server_errors && status.is_server_error()
    }

    /// Upper bound of the delay before retry number `attempt` (0-based):
    /// `min_backoff * 2^attempt`, clamped to `[min_backoff, max_backoff]`.
    pub fn ceiling(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.min_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
            .max(self.min_backoff)
    }

    /// Jittered delay before retry number `attempt`, always within
    /// `[min_backoff, ceiling(attempt)]`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let low = self.min_backoff.as_millis() as u64;
        let high = self.ceiling(attempt).as_millis() as u64;
        if high <= low {
            return Duration::from_millis(low);
        }
        Duration::from_millis(rand::rng().random_range(low..=high))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&HttpConfig::default())
    }
}
