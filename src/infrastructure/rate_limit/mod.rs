//! Admission control for link creation.
//!
//! Provides a [`RateLimiter`] trait with two implementations:
//! - [`RedisRateLimiter`] - Windows shared across instances through Redis
//! - [`MemoryRateLimiter`] - Process-local windows, swept by [`spawn_sweeper`]

mod memory_limiter;
mod redis_limiter;
mod service;
mod sweeper;

pub use memory_limiter::MemoryRateLimiter;
pub use redis_limiter::RedisRateLimiter;
pub use service::{MAX_WINDOW_SECONDS, RateLimitDecision, RateLimitPolicy, RateLimiter};
pub use sweeper::spawn_sweeper;
