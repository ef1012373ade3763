//! Rate limiter trait and decision types.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};

/// Longest window accepted by [`RateLimitPolicy::new`].
pub const MAX_WINDOW_SECONDS: u64 = 86_400;

/// Fixed-window admission policy: `max_requests` per `window`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitPolicy {
    pub max_requests: u32,
    pub window: Duration,
}

impl RateLimitPolicy {
    pub fn new(max_requests: u32, window_seconds: u64) -> Self {
        Self {
            max_requests,
            window: Duration::seconds(window_seconds.clamp(1, MAX_WINDOW_SECONDS) as i64),
        }
    }
}

impl Default for RateLimitPolicy {
    fn default() -> Self {
        Self::new(10, 60)
    }
}

/// Outcome of one admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub limit: u32,
    pub remaining: u32,
    /// End of the current window.
    pub reset_at: DateTime<Utc>,
}

impl RateLimitDecision {
    /// Decision that admits the request without consuming anything.
    ///
    /// Returned by backends that could not reach their store.
    pub fn fail_open(policy: &RateLimitPolicy, now: DateTime<Utc>) -> Self {
        Self {
            allowed: true,
            limit: policy.max_requests,
            remaining: policy.max_requests,
            reset_at: now + policy.window,
        }
    }

    /// Whole seconds until the window resets, at least 1.
    pub fn retry_after_secs(&self, now: DateTime<Utc>) -> i64 {
        let millis = (self.reset_at - now).num_milliseconds();
        ((millis + 999) / 1000).max(1)
    }
}

/// Per-identity admission control for link creation.
///
/// Implementations count every check, admitted or not, against the caller's
/// current window.
///
/// # Implementations
///
/// - [`crate::infrastructure::rate_limit::MemoryRateLimiter`] - Process-local windows
/// - [`crate::infrastructure::rate_limit::RedisRateLimiter`] - Windows shared through Redis
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Records one request for `identity` and decides whether to admit it.
    ///
    /// Never fails: backends that cannot reach their store admit the request.
    async fn check(&self, identity: &str) -> RateLimitDecision;

    /// Drops windows that have already reset. Returns how many were removed.
    ///
    /// Backends whose store expires keys on its own return 0.
    async fn sweep(&self) -> usize;

    /// Checks if the backing store is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name for logs and health output.
    fn backend(&self) -> &'static str;
}
