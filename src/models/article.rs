//! Article model
//!
//! Read-only view of a news article as stored by the article store.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A news article with its geographic anchor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
    /// Publication time; naive timestamps are read as UTC
    #[serde(deserialize_with = "deserialize_publication_date")]
    pub publication_date: DateTime<Utc>,
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub category: Vec<String>,
    /// Precomputed static relevance in [0, 1]
    #[serde(default)]
    pub relevance_score: f64,
    pub latitude: f64,
    pub longitude: f64,
}

fn deserialize_publication_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_publication_date(&raw).map_err(serde::de::Error::custom)
}

/// Parses RFC 3339 or a bare `YYYY-MM-DDTHH:MM:SS` timestamp.
pub fn parse_publication_date(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid publication_date '{}': {}", raw, e))
}
