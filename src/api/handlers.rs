//! API Handlers
//!
//! HTTP request handlers for the trending endpoints.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};

use crate::error::{Result, TrendingError};
use crate::models::{
    CacheStatsResponse, ClearCacheResponse, HealthResponse, TrendingQuery, TrendingResponse,
};
use crate::trending::TrendingService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Trending orchestrator, shared with the background tasks
    pub service: Arc<TrendingService>,
}

impl AppState {
    pub fn new(service: Arc<TrendingService>) -> Self {
        Self { service }
    }
}

/// Handler for GET /api/v1/news/trending
///
/// Returns trending articles near `lat`/`lon`.
pub async fn trending_handler(
    State(state): State<AppState>,
    Query(query): Query<TrendingQuery>,
) -> Result<Json<TrendingResponse>> {
    let params = query.validate().map_err(TrendingError::InvalidRequest)?;

    let articles = state
        .service
        .get_trending_articles(params.lat, params.lon, params.limit)
        .await?;

    Ok(Json(TrendingResponse::new(
        articles,
        params.limit,
        params.lat,
        params.lon,
    )))
}

/// Handler for DELETE /api/v1/news/trending/cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.service.clear_cache().await;
    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /api/v1/news/trending/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<CacheStatsResponse> {
    Json(state.service.cache_stats().await.into())
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::Article;
    use crate::store::MemoryStore;
    use chrono::Utc;

    fn state_with(articles: Vec<Article>) -> AppState {
        let store = Arc::new(MemoryStore::with_articles(articles));
        let service = TrendingService::new(&Config::default(), store.clone(), store).unwrap();
        AppState::new(Arc::new(service))
    }

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            url: String::new(),
            publication_date: Utc::now(),
            source_name: String::new(),
            category: Vec::new(),
            relevance_score: 0.5,
            latitude: 12.9,
            longitude: 77.6,
        }
    }

    fn query(lat: &str, lon: &str) -> TrendingQuery {
        TrendingQuery {
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
            limit: None,
        }
    }

    #[tokio::test]
    async fn test_trending_handler() {
        let state = state_with(vec![article("a"), article("b")]);

        let response = trending_handler(State(state), Query(query("12.9", "77.6")))
            .await
            .unwrap();
        assert_eq!(response.meta.count, 2);
        assert_eq!(response.meta.limit, 5);
    }

    #[tokio::test]
    async fn test_trending_handler_invalid_query() {
        let state = state_with(Vec::new());

        let result = trending_handler(State(state), Query(query("north", "77.6"))).await;
        assert!(matches!(result, Err(TrendingError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_clear_cache_handler() {
        let state = state_with(vec![article("a")]);
        trending_handler(State(state.clone()), Query(query("12.9", "77.6")))
            .await
            .unwrap();

        let response = clear_cache_handler(State(state.clone())).await;
        assert_eq!(response.cleared, 1);

        let stats = stats_handler(State(state)).await;
        assert_eq!(stats.total_entries, 0);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
