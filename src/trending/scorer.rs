//! Trending Scorer
//!
//! Turns a window of recent interaction events into a ranked article list for
//! a query location.
//!
//! Each event contributes `weight * recency * geo` to its article, where
//! - `weight` is 2.0 for a click and 1.0 for a view,
//! - `recency = exp(-age_hours / half_life_hours)`,
//! - `geo = 1 / (1 + distance_km / distance_scale_km)`.
//!
//! Contributions are summed per article. With no events in the window the
//! scorer falls back to the most recently published articles.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::config::{Config, MAX_WINDOW_HOURS};
use crate::error::Result;
use crate::geo::haversine_km;
use crate::models::{Article, InteractionEvent};
use crate::store::{ArticleStore, EventStore};

// == Scoring Settings ==
/// Fixed per deployment; never varied per request.
#[derive(Debug, Clone, Copy)]
pub struct ScoringSettings {
    /// How far back events are considered
    pub window: Duration,
    /// Exponential decay constant in hours
    pub half_life_hours: f64,
    /// Distance at which the geo factor halves, in km
    pub distance_scale_km: f64,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            window: Duration::hours(1),
            half_life_hours: 12.0,
            distance_scale_km: 100.0,
        }
    }
}

impl From<&Config> for ScoringSettings {
    fn from(config: &Config) -> Self {
        Self {
            window: Duration::hours(config.window_hours.min(MAX_WINDOW_HOURS) as i64),
            half_life_hours: config.half_life_hours,
            distance_scale_km: config.distance_scale_km,
        }
    }
}

impl ScoringSettings {
    /// Score of one event relative to a query location at time `now`.
    ///
    /// Events stamped in the future are treated as age zero.
    pub fn event_score(
        &self,
        event: &InteractionEvent,
        lat: f64,
        lon: f64,
        now: DateTime<Utc>,
    ) -> f64 {
        let age_hours = (now - event.created_at).num_milliseconds().max(0) as f64 / 3_600_000.0;
        let recency = (-age_hours / self.half_life_hours).exp();

        let distance = haversine_km(lat, lon, event.latitude, event.longitude);
        let geo = 1.0 / (1.0 + distance / self.distance_scale_km);

        event.kind.weight() * recency * geo
    }

    /// Sums event scores per referenced article.
    pub fn accumulate(
        &self,
        events: &[InteractionEvent],
        lat: f64,
        lon: f64,
        now: DateTime<Utc>,
    ) -> HashMap<String, f64> {
        let mut scores: HashMap<String, f64> = HashMap::new();
        for event in events {
            *scores.entry(event.article_id.clone()).or_insert(0.0) +=
                self.event_score(event, lat, lon, now);
        }
        scores
    }
}

// == Trending Scorer ==
pub struct TrendingScorer {
    articles: Arc<dyn ArticleStore>,
    events: Arc<dyn EventStore>,
    settings: ScoringSettings,
}

impl TrendingScorer {
    pub fn new(
        articles: Arc<dyn ArticleStore>,
        events: Arc<dyn EventStore>,
        settings: ScoringSettings,
    ) -> Self {
        Self {
            articles,
            events,
            settings,
        }
    }

    pub fn settings(&self) -> &ScoringSettings {
        &self.settings
    }

    /// Ranks up to `limit` articles for the query location.
    ///
    /// Store failures propagate as `StoreUnavailable`; nothing is retried here.
    pub async fn compute_trending(&self, lat: f64, lon: f64, limit: usize) -> Result<Vec<Article>> {
        self.compute_trending_at(lat, lon, limit, Utc::now()).await
    }

    /// `compute_trending` evaluated against an explicit clock reading.
    pub async fn compute_trending_at(
        &self,
        lat: f64,
        lon: f64,
        limit: usize,
        now: DateTime<Utc>,
    ) -> Result<Vec<Article>> {
        let since = now
            .checked_sub_signed(self.settings.window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let events = self.events.find_since(since).await?;

        if events.is_empty() {
            debug!("No recent activity, falling back to latest articles");
            let mut latest = self.articles.find_latest(limit).await?;
            sort_by_publication(&mut latest);
            latest.truncate(limit);
            return Ok(latest);
        }

        let scores = self.settings.accumulate(&events, lat, lon, now);
        let ids: Vec<String> = scores
            .iter()
            .filter(|(_, score)| **score > 0.0)
            .map(|(id, _)| id.clone())
            .collect();

        let articles = self.articles.find_by_ids(&ids).await?;
        let mut ranked: Vec<(f64, Article)> = articles
            .into_iter()
            .filter_map(|a| scores.get(&a.id).map(|&score| (score, a)))
            .collect();

        ranked.sort_by(|(sa, a), (sb, b)| {
            sb.partial_cmp(sa)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.id.cmp(&b.id))
        });
        ranked.truncate(limit);

        debug!(
            "Scored {} events across {} articles, returning {}",
            events.len(),
            scores.len(),
            ranked.len()
        );

        Ok(ranked.into_iter().map(|(_, article)| article).collect())
    }
}

fn sort_by_publication(articles: &mut [Article]) {
    articles.sort_by(|a, b| {
        b.publication_date
            .cmp(&a.publication_date)
            .then_with(|| a.id.cmp(&b.id))
    });
}
