//! Domain models and HTTP DTOs
//!
//! `Article` and `InteractionEvent` are the records exchanged with the stores;
//! the request/response types serialize the HTTP surface.

pub mod article;
pub mod event;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use article::Article;
pub use event::{EventKind, InteractionEvent};
pub use requests::{TrendingParams, TrendingQuery, DEFAULT_LIMIT, MAX_LIMIT};
pub use responses::{
    CacheStatsResponse, ClearCacheResponse, ErrorResponse, HealthResponse, ResponseMeta,
    TrendingResponse,
};
