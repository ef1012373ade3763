//! Process-local fixed-window rate limiter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use tracing::debug;

use super::service::{RateLimitDecision, RateLimitPolicy, RateLimiter};

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    reset_at: DateTime<Utc>,
}

/// Fixed-window limiter keeping one counter per identity in a [`DashMap`].
///
/// Windows are not shared between instances. Use
/// [`crate::infrastructure::rate_limit::RedisRateLimiter`] when running more
/// than one.
pub struct MemoryRateLimiter {
    policy: RateLimitPolicy,
    windows: DashMap<String, Window>,
}

impl MemoryRateLimiter {
    pub fn new(policy: RateLimitPolicy) -> Self {
        debug!(
            "Using in-memory rate limiter ({} requests / {}s)",
            policy.max_requests,
            policy.window.num_seconds()
        );
        Self {
            policy,
            windows: DashMap::new(),
        }
    }

    /// [`RateLimiter::check`] against an explicit clock.
    pub fn check_at(&self, identity: &str, now: DateTime<Utc>) -> RateLimitDecision {
        let mut window = self
            .windows
            .entry(identity.to_string())
            .or_insert_with(|| Window {
                count: 0,
                reset_at: now + self.policy.window,
            });

        if window.reset_at <= now {
            *window = Window {
                count: 0,
                reset_at: now + self.policy.window,
            };
        }

        window.count = window.count.saturating_add(1);

        RateLimitDecision {
            allowed: window.count <= self.policy.max_requests,
            limit: self.policy.max_requests,
            remaining: self.policy.max_requests.saturating_sub(window.count),
            reset_at: window.reset_at,
        }
    }

    /// [`RateLimiter::sweep`] against an explicit clock.
    pub fn sweep_at(&self, now: DateTime<Utc>) -> usize {
        let before = self.windows.len();
        self.windows.retain(|_, window| window.reset_at > now);
        before.saturating_sub(self.windows.len())
    }

    pub fn tracked_identities(&self) -> usize {
        self.windows.len()
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    async fn check(&self, identity: &str) -> RateLimitDecision {
        self.check_at(identity, Utc::now())
    }

    async fn sweep(&self) -> usize {
        self.sweep_at(Utc::now())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
