//! Cache Module
//!
//! Location-clustered trending cache with TTL invalidation.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TrendingCache;
