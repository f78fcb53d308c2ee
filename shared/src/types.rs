//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// GPS coordinates as reported by the weather provider
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Identity key for location-keyed records
    pub fn key(&self) -> String {
        location_key(self.lat, self.lon)
    }

    /// Provider query form, `"{lat},{lon}"`
    pub fn as_query(&self) -> String {
        format!("{},{}", self.lat, self.lon)
    }
}

/// Build the identity key `"{lat}-{lon}"`.
///
/// Coordinates are rendered with `f64`'s `Display` and never rounded, so
/// bit-equal coordinates collide and near-equal ones do not. This is the only
/// numeric-to-string conversion used for keys.
pub fn location_key(lat: f64, lon: f64) -> String {
    format!("{}-{}", lat, lon)
}
