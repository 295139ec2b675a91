//! Cache Entry Module
//!
//! A computed trending ranking for one cluster, stamped with its computation time.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::models::Article;

// == Cache Entry ==
/// Ranked articles for a cluster plus the time they were computed.
///
/// Entries are replaced wholesale on recomputation, never mutated in place.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Articles sorted by trending score, highest first
    pub articles: Arc<Vec<Article>>,
    /// Wall-clock time the ranking was computed
    pub computed_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(articles: Vec<Article>, computed_at: DateTime<Utc>) -> Self {
        Self {
            articles: Arc::new(articles),
            computed_at,
        }
    }

    // == Age ==
    /// Time elapsed since computation, as seen at `now`.
    pub fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.computed_at
    }

    // == Is Stale ==
    /// An entry goes stale once its age strictly exceeds `ttl`.
    pub fn is_stale(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.age(now) > ttl
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_fresh_within_ttl() {
        let entry = CacheEntry::new(Vec::new(), t0());
        let ttl = Duration::seconds(300);

        assert!(!entry.is_stale(t0(), ttl));
        assert!(!entry.is_stale(t0() + Duration::seconds(299), ttl));
    }

    #[test]
    fn test_entry_boundary_is_still_fresh() {
        let entry = CacheEntry::new(Vec::new(), t0());
        let ttl = Duration::seconds(300);

        // age == ttl is not yet stale; one millisecond more is
        assert!(!entry.is_stale(t0() + ttl, ttl));
        assert!(entry.is_stale(t0() + ttl + Duration::milliseconds(1), ttl));
    }

    #[test]
    fn test_entry_age() {
        let entry = CacheEntry::new(Vec::new(), t0());
        assert_eq!(entry.age(t0() + Duration::seconds(42)), Duration::seconds(42));
    }
}
