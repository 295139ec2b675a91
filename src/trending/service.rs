//! Trending Service
//!
//! Public entry point for trending lookups. Serves rankings from the
//! cluster cache, computing and caching them on a miss, and owns the event
//! simulator's lifecycle.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cache::{CacheStats, TrendingCache};
use crate::config::Config;
use crate::error::Result;
use crate::geo::cluster_key;
use crate::models::Article;
use crate::store::{ArticleStore, EventStore};
use crate::tasks::{spawn_event_simulator, EventSimulator, SimulationSettings};
use crate::trending::{ScoringSettings, TrendingScorer};

/// A cached cluster holds this many times the requested limit, so later
/// requests for larger limits can still be served from it.
pub const OVERSAMPLE_FACTOR: usize = 3;

// == Trending Service ==
pub struct TrendingService {
    scorer: TrendingScorer,
    cache: Arc<TrendingCache>,
    articles: Arc<dyn ArticleStore>,
    events: Arc<dyn EventStore>,
    cluster_degrees: f64,
    simulation: SimulationSettings,
    simulator: Mutex<Option<JoinHandle<()>>>,
}

impl TrendingService {
    // == Constructor ==
    /// Builds a service from validated configuration.
    ///
    /// Fails with `InvalidConfiguration` when the config is out of range.
    pub fn new(
        config: &Config,
        articles: Arc<dyn ArticleStore>,
        events: Arc<dyn EventStore>,
    ) -> Result<Self> {
        config.validate()?;
        let cache = Arc::new(TrendingCache::new(config.cache_ttl_duration())?);
        let scorer = TrendingScorer::new(
            Arc::clone(&articles),
            Arc::clone(&events),
            ScoringSettings::from(config),
        );

        Ok(Self {
            scorer,
            cache,
            articles,
            events,
            cluster_degrees: config.cluster_degrees,
            simulation: SimulationSettings::from(config),
            simulator: Mutex::new(None),
        })
    }

    // == Get Trending Articles ==
    /// Returns up to `limit` trending articles for a location.
    ///
    /// Store failures surface as errors and leave the cache untouched.
    pub async fn get_trending_articles(
        &self,
        lat: f64,
        lon: f64,
        limit: usize,
    ) -> Result<Vec<Article>> {
        let key = cluster_key(lat, lon, self.cluster_degrees)?;

        if let Some(cached) = self.cache.get(&key).await {
            debug!("Trending cache hit for cluster {}", key);
            return Ok(cached.iter().take(limit).cloned().collect());
        }

        debug!("Trending cache miss for cluster {}", key);
        let fetch = limit.max(1).saturating_mul(OVERSAMPLE_FACTOR);
        let mut articles = self.scorer.compute_trending(lat, lon, fetch).await?;

        self.cache.set(key, articles.clone()).await;

        articles.truncate(limit);
        Ok(articles)
    }

    // == Clear Cache ==
    /// Drops every cached cluster immediately, regardless of TTL.
    pub async fn clear_cache(&self) -> usize {
        let cleared = self.cache.clear().await;
        info!("Trending cache cleared ({} clusters)", cleared);
        cleared
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }

    pub fn cache(&self) -> Arc<TrendingCache> {
        Arc::clone(&self.cache)
    }

    // == Event Simulation ==
    fn build_simulator(&self) -> EventSimulator {
        EventSimulator::new(
            Arc::clone(&self.articles),
            Arc::clone(&self.events),
            self.simulation.clone(),
        )
    }

    /// Starts the event simulator; it stops when `cancel` fires.
    ///
    /// Returns false if a simulator is already running.
    pub async fn start_event_simulation(&self, cancel: CancellationToken) -> bool {
        let mut slot = self.simulator.lock().await;
        if slot.as_ref().is_some_and(|handle| !handle.is_finished()) {
            debug!("Event simulation already running");
            return false;
        }

        *slot = Some(spawn_event_simulator(self.build_simulator(), cancel));
        info!("Event simulation started");
        true
    }

    /// Waits for a cancelled simulator task to finish.
    pub async fn join_event_simulation(&self) {
        let handle = self.simulator.lock().await.take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    pub async fn is_simulating(&self) -> bool {
        self.simulator
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Writes `count` simulated events at once. Returns how many were stored.
    pub async fn seed_events(&self, count: usize) -> usize {
        let written = self.build_simulator().burst(count).await;
        info!("Seeded {} simulated events", written);
        written
    }
}
