//! Saved favorite locations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::location_key;

/// Fields supplied when saving a location as a favorite
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFavorite {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&super::Place> for NewFavorite {
    fn from(place: &super::Place) -> Self {
        Self {
            name: place.name.clone(),
            region: place.region.clone(),
            country: place.country.clone(),
            lat: place.lat,
            lon: place.lon,
        }
    }
}

impl From<&super::ObservedLocation> for NewFavorite {
    fn from(location: &super::ObservedLocation) -> Self {
        Self {
            name: location.name.clone(),
            region: location.region.clone(),
            country: location.country.clone(),
            lat: location.lat,
            lon: location.lon,
        }
    }
}

/// A saved location. `id` is the coordinate identity key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteLocation {
    pub id: String,
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub added_at: DateTime<Utc>,
}

impl FavoriteLocation {
    pub fn new(candidate: NewFavorite, added_at: DateTime<Utc>) -> Self {
        Self {
            id: location_key(candidate.lat, candidate.lon),
            name: candidate.name,
            region: candidate.region,
            country: candidate.country,
            lat: candidate.lat,
            lon: candidate.lon,
            added_at,
        }
    }
}
