//! Interaction event model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of simulated user interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    View,
    Click,
}

impl EventKind {
    /// Interaction weight; clicks signal stronger intent than views.
    pub fn weight(self) -> f64 {
        match self {
            EventKind::View => 1.0,
            EventKind::Click => 2.0,
        }
    }
}

/// One user interaction with an article at a location. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionEvent {
    pub article_id: String,
    pub kind: EventKind,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTime<Utc>,
}

impl InteractionEvent {
    pub fn new(
        article_id: impl Into<String>,
        kind: EventKind,
        latitude: f64,
        longitude: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            article_id: article_id.into(),
            kind,
            latitude,
            longitude,
            created_at,
        }
    }
}
