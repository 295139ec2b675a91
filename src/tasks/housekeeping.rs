//! Cache Housekeeping Task
//!
//! Background task that periodically drops stale trending cache entries.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::TrendingCache;

/// Spawns a task that removes stale entries once per cache TTL.
///
/// The task exits when `cancel` fires.
///
/// # Example
/// ```ignore
/// let cancel = CancellationToken::new();
/// let handle = spawn_housekeeping_task(cache.clone(), cancel.clone());
/// // Later, during shutdown:
/// cancel.cancel();
/// handle.await?;
/// ```
pub fn spawn_housekeeping_task(
    cache: Arc<TrendingCache>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    let period = cache.ttl();

    tokio::spawn(async move {
        info!(
            "Starting cache housekeeping with period of {} seconds",
            period.as_secs()
        );

        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately; nothing can be stale yet
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Cache housekeeping stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let removed = cache.cleanup_stale().await;
                    if removed > 0 {
                        info!("Cache housekeeping: removed {} stale clusters", removed);
                    } else {
                        debug!("Cache housekeeping: no stale clusters found");
                    }
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::cluster_key;
    use chrono::{Duration as ChronoDuration, Utc};
    use std::time::Duration;

    #[tokio::test]
    async fn test_housekeeping_removes_stale_entries() {
        let cache = Arc::new(TrendingCache::new(Duration::from_secs(1)).unwrap());
        let key = cluster_key(0.0, 0.0, 0.5).unwrap();

        // Computed long ago, so already stale by the first sweep
        cache
            .set_at(key.clone(), Vec::new(), Utc::now() - ChronoDuration::seconds(10))
            .await;

        let cancel = CancellationToken::new();
        let handle = spawn_housekeeping_task(cache.clone(), cancel.clone());

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert!(cache.is_empty().await, "Stale entry should have been removed");

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_housekeeping_preserves_fresh_entries() {
        let cache = Arc::new(TrendingCache::new(Duration::from_secs(3600)).unwrap());
        cache
            .set(cluster_key(1.0, 1.0, 0.5).unwrap(), Vec::new())
            .await;

        let cancel = CancellationToken::new();
        let handle = spawn_housekeeping_task(cache.clone(), cancel.clone());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(cache.len().await, 1);

        cancel.cancel();
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_housekeeping_stops_on_cancel() {
        let cache = Arc::new(TrendingCache::new(Duration::from_secs(300)).unwrap());
        let cancel = CancellationToken::new();

        let handle = spawn_housekeeping_task(cache, cancel.clone());
        cancel.cancel();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("task should stop promptly")
            .unwrap();
    }
}
