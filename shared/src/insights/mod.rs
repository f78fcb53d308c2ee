//! Derived insights: pure functions from weather data to readable text

mod interpretation;
mod recommendation;
mod trend;

pub use interpretation::interpret;
pub use recommendation::*;
pub use trend::*;

use serde::{Deserialize, Serialize};

use crate::models::{HistoricalPoint, Observation};

/// Everything the insight panel shows for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsightReport {
    pub interpretation: String,
    pub recommendations: Recommendations,
    pub trend: String,
}

impl InsightReport {
    pub fn build(
        observation: &Observation,
        history: &[HistoricalPoint],
        window: TrendWindow,
    ) -> Self {
        Self {
            interpretation: interpret(observation),
            recommendations: recommend(
                observation.current.temp_c,
                &observation.current.condition.text,
            ),
            trend: analyze_trend(history, window),
        }
    }
}
