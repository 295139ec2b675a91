//! Configuration Module
//!
//! Handles loading and validating service configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Result, TrendingError};

/// Longest accepted recent-events window (one year).
pub const MAX_WINDOW_HOURS: u64 = 24 * 365;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Trending cache TTL in seconds (also the housekeeping period)
    pub cache_ttl: u64,
    /// Spatial bucket size in degrees used to derive cluster keys
    pub cluster_degrees: f64,
    /// Width of the recent-events window in hours
    pub window_hours: u64,
    /// Recency decay constant in hours
    pub half_life_hours: f64,
    /// Distance at which the geo factor drops to 0.5, in kilometers
    pub distance_scale_km: f64,
    /// Event simulator tick period in seconds
    pub simulation_interval: u64,
    /// Whether the event simulator runs at all
    pub simulation_enabled: bool,
    /// Number of events written in one burst at startup
    pub seed_events: usize,
    /// Optional JSON file of articles to load at startup
    pub articles_path: Option<String>,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// A `.env` file in the working directory is read first when present.
    ///
    /// # Environment Variables
    /// - `TRENDING_CACHE_TTL` - Cache TTL in seconds (default: 300)
    /// - `LOCATION_CLUSTER_DEGREES` - Cluster granularity (default: 0.5)
    /// - `TRENDING_WINDOW_HOURS` - Recent-events window (default: 1)
    /// - `TRENDING_HALF_LIFE_HOURS` - Recency decay (default: 12)
    /// - `TRENDING_DISTANCE_SCALE_KM` - Distance decay (default: 100)
    /// - `SIMULATION_INTERVAL_SECS` - Simulator period (default: 5)
    /// - `SIMULATION_ENABLED` - Run the simulator (default: true)
    /// - `SEED_EVENTS` - Startup event burst size (default: 0)
    /// - `ARTICLES_PATH` - Article seed file (default: unset)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            cache_ttl: env_or("TRENDING_CACHE_TTL", defaults.cache_ttl),
            cluster_degrees: env_or("LOCATION_CLUSTER_DEGREES", defaults.cluster_degrees),
            window_hours: env_or("TRENDING_WINDOW_HOURS", defaults.window_hours),
            half_life_hours: env_or("TRENDING_HALF_LIFE_HOURS", defaults.half_life_hours),
            distance_scale_km: env_or("TRENDING_DISTANCE_SCALE_KM", defaults.distance_scale_km),
            simulation_interval: env_or("SIMULATION_INTERVAL_SECS", defaults.simulation_interval),
            simulation_enabled: env_or("SIMULATION_ENABLED", defaults.simulation_enabled),
            seed_events: env_or("SEED_EVENTS", defaults.seed_events),
            articles_path: env::var("ARTICLES_PATH").ok().filter(|v| !v.is_empty()),
            server_port: env_or("SERVER_PORT", defaults.server_port),
        }
    }

    /// Rejects values the trending pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(self.cluster_degrees.is_finite() && self.cluster_degrees > 0.0) {
            return Err(TrendingError::InvalidConfiguration(format!(
                "cluster_degrees must be > 0, got {}",
                self.cluster_degrees
            )));
        }
        if self.cache_ttl == 0 {
            return Err(TrendingError::InvalidConfiguration(
                "cache_ttl must be > 0".to_string(),
            ));
        }
        if self.window_hours == 0 || self.window_hours > MAX_WINDOW_HOURS {
            return Err(TrendingError::InvalidConfiguration(format!(
                "window_hours must be in 1..={}, got {}",
                MAX_WINDOW_HOURS, self.window_hours
            )));
        }
        if !(self.half_life_hours.is_finite() && self.half_life_hours > 0.0) {
            return Err(TrendingError::InvalidConfiguration(format!(
                "half_life_hours must be > 0, got {}",
                self.half_life_hours
            )));
        }
        if !(self.distance_scale_km.is_finite() && self.distance_scale_km > 0.0) {
            return Err(TrendingError::InvalidConfiguration(format!(
                "distance_scale_km must be > 0, got {}",
                self.distance_scale_km
            )));
        }
        if self.simulation_interval == 0 {
            return Err(TrendingError::InvalidConfiguration(
                "simulation_interval must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    pub fn cache_ttl_duration(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn simulation_interval_duration(&self) -> Duration {
        Duration::from_secs(self.simulation_interval)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache_ttl: 300,
            cluster_degrees: 0.5,
            window_hours: 1,
            half_life_hours: 12.0,
            distance_scale_km: 100.0,
            simulation_interval: 5,
            simulation_enabled: true,
            seed_events: 0,
            articles_path: None,
            server_port: 8080,
        }
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.cluster_degrees, 0.5);
        assert_eq!(config.window_hours, 1);
        assert_eq!(config.half_life_hours, 12.0);
        assert_eq!(config.distance_scale_km, 100.0);
        assert_eq!(config.simulation_interval, 5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("TRENDING_CACHE_TTL");
        env::remove_var("LOCATION_CLUSTER_DEGREES");
        env::remove_var("SERVER_PORT");

        let config = Config::from_env();
        assert_eq!(config.cache_ttl, 300);
        assert_eq!(config.cluster_degrees, 0.5);
        assert_eq!(config.server_port, 8080);
    }

    #[test]
    fn test_validate_rejects_non_positive_cluster_degrees() {
        for degrees in [0.0, -0.5, f64::NAN] {
            let config = Config {
                cluster_degrees: degrees,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TrendingError::InvalidConfiguration(_))
            ));
        }
    }

    #[test]
    fn test_validate_rejects_zero_ttl() {
        let config = Config {
            cache_ttl: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TrendingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_window() {
        let config = Config {
            window_hours: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_window() {
        let at_limit = Config {
            window_hours: MAX_WINDOW_HOURS,
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());

        for hours in [MAX_WINDOW_HOURS + 1, 1_000_000_000_000, u64::MAX] {
            let config = Config {
                window_hours: hours,
                ..Config::default()
            };
            assert!(matches!(
                config.validate(),
                Err(TrendingError::InvalidConfiguration(_))
            ));
        }
    }
}
