//! API Module
//!
//! HTTP handlers and routing for the trending service.
//!
//! # Endpoints
//! - `GET /api/v1/news/trending?lat=&lon=&limit=` - Trending articles
//! - `DELETE /api/v1/news/trending/cache` - Clear the trending cache
//! - `GET /api/v1/news/trending/stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
