//! Geo Module
//!
//! Spatial bucketing and great-circle distance used by the trending pipeline.

use std::fmt;

use crate::error::{Result, TrendingError};

/// Mean Earth radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// == Cluster Key ==
/// Coarse spatial bucket identifier, e.g. `"12.50_77.50"`.
///
/// Derived from a coordinate by rounding each axis to the nearest multiple of
/// the cluster granularity and formatting with two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterKey(String);

impl ClusterKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a coordinate to its cluster key.
///
/// Rounds half away from zero. Fails with `InvalidConfiguration` when
/// `cluster_degrees` is not a positive finite number.
pub fn cluster_key(lat: f64, lon: f64, cluster_degrees: f64) -> Result<ClusterKey> {
    if !(cluster_degrees.is_finite() && cluster_degrees > 0.0) {
        return Err(TrendingError::InvalidConfiguration(format!(
            "cluster_degrees must be > 0, got {}",
            cluster_degrees
        )));
    }

    let lat = snap(lat, cluster_degrees);
    let lon = snap(lon, cluster_degrees);
    Ok(ClusterKey(format!("{:.2}_{:.2}", lat, lon)))
}

fn snap(value: f64, cluster_degrees: f64) -> f64 {
    // `+ 0.0` folds -0.0 into 0.0 so both sides of the equator share "0.00"
    (value / cluster_degrees).round() * cluster_degrees + 0.0
}

/// Great-circle distance between two coordinates in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
