//! Redis-backed fixed-window rate limiter.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{info, warn};

use super::service::{RateLimitDecision, RateLimitPolicy, RateLimiter};

/// Increments the window counter and starts its expiry on the first hit.
///
/// Returns `{count, remaining_ttl_ms}` in one round trip, so concurrent
/// instances never observe a counter without an expiry.
const WINDOW_SCRIPT: &str = r#"
local current = redis.call('INCR', KEYS[1])
if current == 1 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
end
local ttl = redis.call('PTTL', KEYS[1])
if ttl < 0 then
    redis.call('PEXPIRE', KEYS[1], ARGV[1])
    ttl = tonumber(ARGV[1])
end
return {current, ttl}
"#;

/// Fixed-window limiter whose counters live in Redis.
///
/// Every instance sharing the Redis server shares the windows. Redis errors
/// admit the request and are logged.
pub struct RedisRateLimiter {
    client: ConnectionManager,
    policy: RateLimitPolicy,
    key_prefix: String,
}

impl RedisRateLimiter {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns a [`redis::RedisError`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, policy: RateLimitPolicy) -> redis::RedisResult<Self> {
        info!("Connecting to Redis for rate limiting");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            policy,
            key_prefix: "rate_limit:".to_string(),
        })
    }

    fn build_key(&self, identity: &str) -> String {
        format!("{}{}", self.key_prefix, identity)
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, identity: &str) -> RateLimitDecision {
        let now = Utc::now();
        let key = self.build_key(identity);
        let window_ms = self.policy.window.num_milliseconds();
        let mut conn = self.client.clone();

        let result = redis::cmd("EVAL")
            .arg(WINDOW_SCRIPT)
            .arg(1)
            .arg(&key)
            .arg(window_ms)
            .query_async::<(i64, i64)>(&mut conn)
            .await;

        match result {
            Ok((count, ttl_ms)) => {
                let count = u32::try_from(count.max(0)).unwrap_or(u32::MAX);
                let limit = self.policy.max_requests;

                RateLimitDecision {
                    allowed: count <= limit,
                    limit,
                    remaining: limit.saturating_sub(count),
                    reset_at: now + Duration::milliseconds(ttl_ms.clamp(0, window_ms)),
                }
            }
            Err(e) => {
                warn!("Redis rate limit error for {}: {}", identity, e);
                RateLimitDecision::fail_open(&self.policy, now)
            }
        }
    }

    async fn sweep(&self) -> usize {
        0
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend(&self) -> &'static str {
        "redis"
    }
}
