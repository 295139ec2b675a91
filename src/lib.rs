//! News Trending - location-aware trending news service
//!
//! Scores articles by recent, nearby user activity and caches the rankings
//! per spatial cluster with TTL invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod geo;
pub mod models;
pub mod store;
pub mod tasks;
pub mod trending;

pub use api::AppState;
pub use config::Config;
pub use error::{Result, TrendingError};
pub use store::{ArticleStore, EventStore, MemoryStore};
pub use tasks::{spawn_event_simulator, spawn_housekeeping_task};
pub use trending::TrendingService;
