//! Location comparison entries and chart series

use serde::{Deserialize, Serialize};

use super::Observation;

/// An observation pinned for side-by-side comparison
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonEntry {
    pub id: String,
    pub name: String,
    pub weather: Observation,
}

impl ComparisonEntry {
    pub fn from_observation(weather: Observation) -> Self {
        Self {
            id: weather.key(),
            name: weather.location.name.clone(),
            weather,
        }
    }
}

/// One date on the comparison chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonRow {
    pub date: String,
    pub values: Vec<ComparisonValue>,
}

/// A single location's values for one date
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ComparisonValue {
    pub location: String,
    pub avg_temp_c: f64,
    pub chance_of_rain: i32,
}
