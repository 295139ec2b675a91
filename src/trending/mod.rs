//! Trending Module
//!
//! Recency- and distance-weighted trending computation, served through the
//! location-clustered cache.

mod scorer;
mod service;

pub use scorer::{ScoringSettings, TrendingScorer};
pub use service::{TrendingService, OVERSAMPLE_FACTOR};
