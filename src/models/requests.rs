//! Request DTOs for the trending API
//!
//! Defines the query parameters accepted by the HTTP layer.

use serde::Deserialize;

/// Number of articles returned when no usable limit is given
pub const DEFAULT_LIMIT: usize = 5;

/// Upper bound on the requested limit
pub const MAX_LIMIT: usize = 100;

/// Query string for GET /api/v1/news/trending
///
/// Parameters arrive as raw strings so malformed numbers produce a JSON
/// error body instead of the extractor's plain-text rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TrendingQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
    pub limit: Option<String>,
}

/// Validated trending request parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendingParams {
    pub lat: f64,
    pub lon: f64,
    pub limit: usize,
}

impl TrendingQuery {
    /// Validates the query and resolves the effective limit.
    ///
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> Result<TrendingParams, String> {
        let (lat, lon) = match (self.lat.as_deref(), self.lon.as_deref()) {
            (Some(lat), Some(lon)) if !lat.is_empty() && !lon.is_empty() => (lat, lon),
            _ => return Err("lat and lon parameters are required".to_string()),
        };

        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| "invalid lat parameter".to_string())?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| "invalid lon parameter".to_string())?;

        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err("lat must be between -90 and 90".to_string());
        }
        if !lon.is_finite() || !(-180.0..=180.0).contains(&lon) {
            return Err("lon must be between -180 and 180".to_string());
        }

        Ok(TrendingParams {
            lat,
            lon,
            limit: resolve_limit(self.limit.as_deref()),
        })
    }
}

/// Missing, unparsable or non-positive limits fall back to the default.
fn resolve_limit(raw: Option<&str>) -> usize {
    match raw.and_then(|v| v.trim().parse::<i64>().ok()) {
        Some(limit) if limit > 0 => (limit as usize).min(MAX_LIMIT),
        _ => DEFAULT_LIMIT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(lat: &str, lon: &str, limit: Option<&str>) -> TrendingQuery {
        TrendingQuery {
            lat: Some(lat.to_string()),
            lon: Some(lon.to_string()),
            limit: limit.map(str::to_string),
        }
    }

    #[test]
    fn test_trending_query_deserialize() {
        let json = r#"{"lat": "12.97", "lon": "77.59", "limit": "10"}"#;
        let q: TrendingQuery = serde_json::from_str(json).unwrap();
        let params = q.validate().unwrap();
        assert_eq!(params.lat, 12.97);
        assert_eq!(params.lon, 77.59);
        assert_eq!(params.limit, 10);
    }

    #[test]
    fn test_validate_missing_coordinates() {
        let q = TrendingQuery {
            lat: Some("12.0".to_string()),
            ..TrendingQuery::default()
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_validate_unparsable_coordinate() {
        assert_eq!(
            query("abc", "77.0", None).validate().unwrap_err(),
            "invalid lat parameter"
        );
    }

    #[test]
    fn test_validate_out_of_range() {
        assert!(query("91", "0", None).validate().is_err());
        assert!(query("0", "-181", None).validate().is_err());
        assert!(query("NaN", "0", None).validate().is_err());
    }

    #[test]
    fn test_limit_defaults_and_clamps() {
        assert_eq!(query("0", "0", None).validate().unwrap().limit, DEFAULT_LIMIT);
        assert_eq!(query("0", "0", Some("0")).validate().unwrap().limit, DEFAULT_LIMIT);
        assert_eq!(query("0", "0", Some("-3")).validate().unwrap().limit, DEFAULT_LIMIT);
        assert_eq!(query("0", "0", Some("x")).validate().unwrap().limit, DEFAULT_LIMIT);
        assert_eq!(query("0", "0", Some("500")).validate().unwrap().limit, MAX_LIMIT);
    }
}
