//! Store Module
//!
//! Read/write interfaces to the article and event stores. The trending core
//! only talks to these traits; `MemoryStore` is the in-process backend used by
//! the binary and the tests.

mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Article, InteractionEvent};

pub use memory::MemoryStore;

/// Read access to articles. Implementations surface failures as
/// `TrendingError::StoreUnavailable` and own any retry policy.
#[async_trait]
pub trait ArticleStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<Article>>;

    /// Returns up to `limit_hint` articles in no particular order.
    async fn find_all(&self, limit_hint: usize) -> Result<Vec<Article>>;

    /// Returns the articles among `ids` that exist; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Article>>;

    /// Returns the `limit` most recently published articles, newest first.
    async fn find_latest(&self, limit: usize) -> Result<Vec<Article>>;
}

/// Append-only access to interaction events.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert(&self, event: InteractionEvent) -> Result<()>;

    async fn insert_batch(&self, events: Vec<InteractionEvent>) -> Result<()>;

    /// Returns all events with `created_at >= since`.
    async fn find_since(&self, since: DateTime<Utc>) -> Result<Vec<InteractionEvent>>;
}
