//! In-memory article and event store

use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::{Result, TrendingError};
use crate::models::{Article, InteractionEvent};
use crate::store::{ArticleStore, EventStore};

// == Memory Store ==
/// Articles and events held in process memory.
///
/// Each collection sits behind its own lock, so the simulator appending
/// events never blocks article reads.
#[derive(Debug, Default)]
pub struct MemoryStore {
    articles: RwLock<Vec<Article>>,
    events: RwLock<Vec<InteractionEvent>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with the given articles.
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: RwLock::new(articles),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Loads a JSON array of articles from disk, replacing any held articles.
    ///
    /// Returns the number of articles loaded.
    pub async fn load_articles(&self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            TrendingError::StoreUnavailable(format!("failed to read {}: {}", path.display(), e))
        })?;
        let articles: Vec<Article> = serde_json::from_str(&raw).map_err(|e| {
            TrendingError::StoreUnavailable(format!("failed to parse {}: {}", path.display(), e))
        })?;

        let count = articles.len();
        *self.articles.write().await = articles;
        info!("Loaded {} articles from {}", count, path.display());
        Ok(count)
    }

    pub async fn article_count(&self) -> usize {
        self.articles.read().await.len()
    }

    pub async fn event_count(&self) -> usize {
        self.events.read().await.len()
    }
}

#[async_trait]
impl ArticleStore for MemoryStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().find(|a| a.id == id).cloned())
    }

    async fn find_all(&self, limit_hint: usize) -> Result<Vec<Article>> {
        let articles = self.articles.read().await;
        Ok(articles.iter().take(limit_hint).cloned().collect())
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Article>> {
        let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let articles = self.articles.read().await;
        Ok(articles
            .iter()
            .filter(|a| wanted.contains(a.id.as_str()))
            .cloned()
            .collect())
    }

    async fn find_latest(&self, limit: usize) -> Result<Vec<Article>> {
        let mut latest = self.articles.read().await.clone();
        latest.sort_by(|a, b| {
            b.publication_date
                .cmp(&a.publication_date)
                .then_with(|| a.id.cmp(&b.id))
        });
        latest.truncate(limit);
        Ok(latest)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn insert(&self, event: InteractionEvent) -> Result<()> {
        self.events.write().await.push(event);
        Ok(())
    }

    async fn insert_batch(&self, events: Vec<InteractionEvent>) -> Result<()> {
        self.events.write().await.extend(events);
        Ok(())
    }

    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<InteractionEvent>> {
        let events = self.events.read().await;
        Ok(events
            .iter()
            .filter(|e| e.created_at >= since)
            .cloned()
            .collect())
    }
}
