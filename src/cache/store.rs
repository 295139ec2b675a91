//! Trending Cache Store Module
//!
//! Maps cluster keys to the most recently computed ranking for that cluster.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::cache::stats::CacheCounters;
use crate::cache::{CacheEntry, CacheStats};
use crate::error::{Result, TrendingError};
use crate::geo::ClusterKey;
use crate::models::Article;

// == Trending Cache ==
/// Cluster-keyed cache of ranked article lists.
///
/// A single structure-wide `RwLock` guards the map: lookups share the read
/// lock, while `set`, `clear` and housekeeping take the write lock. Readers
/// see either a complete prior entry or nothing.
#[derive(Debug)]
pub struct TrendingCache {
    /// Cluster key to entry
    entries: RwLock<HashMap<ClusterKey, CacheEntry>>,
    /// Hit/miss/eviction counters
    counters: CacheCounters,
    /// Entry lifetime
    ttl: Duration,
    /// Entry lifetime as a std duration, used as the housekeeping period
    ttl_std: StdDuration,
}

impl TrendingCache {
    // == Constructor ==
    /// Creates an empty cache. Fails with `InvalidConfiguration` on a zero TTL.
    pub fn new(ttl: StdDuration) -> Result<Self> {
        if ttl.is_zero() {
            return Err(TrendingError::InvalidConfiguration(
                "cache ttl must be > 0".to_string(),
            ));
        }
        let chrono_ttl = Duration::from_std(ttl).map_err(|e| {
            TrendingError::InvalidConfiguration(format!("cache ttl out of range: {}", e))
        })?;

        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            counters: CacheCounters::default(),
            ttl: chrono_ttl,
            ttl_std: ttl,
        })
    }

    pub fn ttl(&self) -> StdDuration {
        self.ttl_std
    }

    // == Get ==
    /// Returns the fresh ranking for `key`, or `None` if absent or stale.
    pub async fn get(&self, key: &ClusterKey) -> Option<Arc<Vec<Article>>> {
        self.get_at(key, Utc::now()).await
    }

    /// `get` evaluated against an explicit clock reading.
    pub async fn get_at(&self, key: &ClusterKey, now: DateTime<Utc>) -> Option<Arc<Vec<Article>>> {
        let entries = self.entries.read().await;
        match entries.get(key) {
            Some(entry) if !entry.is_stale(now, self.ttl) => {
                self.counters.record_hit();
                Some(Arc::clone(&entry.articles))
            }
            _ => {
                self.counters.record_miss();
                None
            }
        }
    }

    // == Set ==
    /// Stores a ranking for `key`, replacing any prior entry.
    pub async fn set(&self, key: ClusterKey, articles: Vec<Article>) {
        self.set_at(key, articles, Utc::now()).await
    }

    /// `set` with an explicit computation timestamp.
    pub async fn set_at(&self, key: ClusterKey, articles: Vec<Article>, now: DateTime<Utc>) {
        let entry = CacheEntry::new(articles, now);
        self.entries.write().await.insert(key, entry);
    }

    // == Cleanup Stale ==
    /// Physically removes every stale entry.
    ///
    /// Returns the number of entries removed.
    pub async fn cleanup_stale(&self) -> usize {
        self.cleanup_stale_at(Utc::now()).await
    }

    pub async fn cleanup_stale_at(&self, now: DateTime<Utc>) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_stale(now, self.ttl));
        let removed = before - entries.len();

        self.counters.record_evictions(removed);
        removed
    }

    // == Clear ==
    /// Discards all entries regardless of age. Returns how many were dropped.
    pub async fn clear(&self) -> usize {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        count
    }

    // == Stats ==
    pub async fn stats(&self) -> CacheStats {
        let total = self.entries.read().await.len();
        self.counters.snapshot(total)
    }

    // == Length ==
    /// Number of entries physically held, stale ones included.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::cluster_key;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            url: String::new(),
            publication_date: t0(),
            source_name: String::new(),
            category: Vec::new(),
            relevance_score: 0.0,
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    fn key(lat: f64, lon: f64) -> ClusterKey {
        cluster_key(lat, lon, 0.5).unwrap()
    }

    fn cache() -> TrendingCache {
        TrendingCache::new(StdDuration::from_secs(300)).unwrap()
    }

    #[test]
    fn test_cache_rejects_zero_ttl() {
        let result = TrendingCache::new(StdDuration::ZERO);
        assert!(matches!(result, Err(TrendingError::InvalidConfiguration(_))));
    }

    #[tokio::test]
    async fn test_cache_new_is_empty() {
        let cache = cache();
        assert!(cache.is_empty().await);
        assert_eq!(cache.ttl(), StdDuration::from_secs(300));
    }

    #[tokio::test]
    async fn test_cache_set_and_get() {
        let cache = cache();
        let articles = vec![article("a"), article("b")];

        cache.set_at(key(12.9, 77.6), articles.clone(), t0()).await;
        let cached = cache.get_at(&key(12.9, 77.6), t0()).await.unwrap();

        assert_eq!(*cached, articles);
    }

    #[tokio::test]
    async fn test_cache_get_missing() {
        let cache = cache();
        assert!(cache.get_at(&key(1.0, 1.0), t0()).await.is_none());

        let stats = cache.stats().await;
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.hits, 0);
    }

    #[tokio::test]
    async fn test_cache_overwrite() {
        let cache = cache();

        cache.set_at(key(0.0, 0.0), vec![article("old")], t0()).await;
        cache
            .set_at(key(0.0, 0.0), vec![article("new")], t0() + Duration::seconds(10))
            .await;

        let cached = cache.get_at(&key(0.0, 0.0), t0() + Duration::seconds(10)).await.unwrap();
        assert_eq!(cached[0].id, "new");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_ttl_expiration() {
        let cache = cache();
        cache.set_at(key(0.0, 0.0), vec![article("a")], t0()).await;

        assert!(cache.get_at(&key(0.0, 0.0), t0() + Duration::seconds(300)).await.is_some());
        assert!(cache.get_at(&key(0.0, 0.0), t0() + Duration::seconds(301)).await.is_none());

        // Stale entries stay physically present until housekeeping runs
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_cache_cleanup_stale() {
        let cache = cache();
        cache.set_at(key(0.0, 0.0), vec![article("a")], t0()).await;
        cache
            .set_at(key(10.0, 10.0), vec![article("b")], t0() + Duration::seconds(200))
            .await;

        let removed = cache.cleanup_stale_at(t0() + Duration::seconds(400)).await;
        assert_eq!(removed, 1);
        assert_eq!(cache.len().await, 1);
        assert!(cache
            .get_at(&key(10.0, 10.0), t0() + Duration::seconds(400))
            .await
            .is_some());
        assert_eq!(cache.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_cache_clear() {
        let cache = cache();
        cache.set_at(key(0.0, 0.0), vec![article("a")], t0()).await;
        cache.set_at(key(5.0, 5.0), vec![article("b")], t0()).await;

        assert_eq!(cache.clear().await, 2);
        assert!(cache.is_empty().await);
        assert!(cache.get_at(&key(0.0, 0.0), t0()).await.is_none());
    }

    #[tokio::test]
    async fn test_cache_concurrent_readers() {
        let cache = Arc::new(cache());
        let now = Utc::now();
        cache.set_at(key(0.0, 0.0), vec![article("a")], now).await;

        let mut handles = Vec::new();
        for _ in 0..16 {
            let cache = Arc::clone(&cache);
            handles.push(tokio::spawn(async move {
                cache.get(&key(0.1, 0.1)).await.map(|a| a.len())
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap(), Some(1));
        }
        assert_eq!(cache.stats().await.hits, 16);
    }
}
