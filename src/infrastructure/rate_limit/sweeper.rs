//! Background eviction of reset rate-limit windows.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

use super::service::RateLimiter;

/// Spawns a task calling [`RateLimiter::sweep`] every `period`.
///
/// The first sweep runs one full period after spawning. The task runs until
/// the returned handle is aborted or the runtime shuts down.
pub fn spawn_sweeper(limiter: Arc<dyn RateLimiter>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let removed = limiter.sweep().await;
            if removed > 0 {
                debug!("Swept {} expired rate limit windows", removed);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::rate_limit::{MemoryRateLimiter, RateLimitPolicy};
    use chrono::Utc;

    #[tokio::test]
    async fn test_sweeper_evicts_reset_windows() {
        let limiter = Arc::new(MemoryRateLimiter::new(RateLimitPolicy::new(10, 60)));
        limiter.check_at("old", Utc::now() - chrono::Duration::seconds(120));
        assert_eq!(limiter.tracked_identities(), 1);

        let handle = spawn_sweeper(limiter.clone(), Duration::from_millis(20));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(limiter.tracked_identities(), 0);
        handle.abort();
    }
}
