//! Response DTOs for the trending API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::cache::CacheStats;
use crate::models::Article;

/// Response body for GET /api/v1/news/trending
#[derive(Debug, Clone, Serialize)]
pub struct TrendingResponse {
    pub articles: Vec<Article>,
    pub meta: ResponseMeta,
}

/// Metadata describing how a result list was produced
#[derive(Debug, Clone, Serialize)]
pub struct ResponseMeta {
    pub count: usize,
    pub limit: usize,
    pub endpoint: String,
    pub query: String,
}

impl TrendingResponse {
    /// Creates a trending response; the echoed query uses four decimals.
    pub fn new(articles: Vec<Article>, limit: usize, lat: f64, lon: f64) -> Self {
        Self {
            meta: ResponseMeta {
                count: articles.len(),
                limit,
                endpoint: "trending".to_string(),
                query: format!("lat={:.4}, lon={:.4}", lat, lon),
            },
            articles,
        }
    }
}

/// Response body for GET /api/v1/news/trending/stats
#[derive(Debug, Clone, Serialize)]
pub struct CacheStatsResponse {
    /// Number of cache hits
    pub hits: u64,
    /// Number of cache misses (absent or stale)
    pub misses: u64,
    /// Number of stale entries removed by housekeeping
    pub evictions: u64,
    /// Current number of cluster entries in cache
    pub total_entries: usize,
    /// Hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            hit_rate: stats.hit_rate(),
            hits: stats.hits,
            misses: stats.misses,
            evictions: stats.evictions,
            total_entries: stats.total_entries,
        }
    }
}

/// Response body for DELETE /api/v1/news/trending/cache
#[derive(Debug, Clone, Serialize)]
pub struct ClearCacheResponse {
    pub message: String,
    pub cleared: usize,
}

impl ClearCacheResponse {
    pub fn new(cleared: usize) -> Self {
        Self {
            message: format!("Cleared {} cached clusters", cleared),
            cleared,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
