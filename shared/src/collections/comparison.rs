//! Session-scoped set of observations for side-by-side comparison

use crate::models::{ComparisonEntry, ComparisonRow, ComparisonValue, Observation};

pub const MAX_COMPARISON_LOCATIONS: usize = 3;

/// Bounded, insertion-ordered comparison set. Not persisted.
#[derive(Debug, Clone, Default)]
pub struct ComparisonSet {
    entries: Vec<ComparisonEntry>,
}

impl ComparisonSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[ComparisonEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    pub fn can_add_more(&self) -> bool {
        self.entries.len() < MAX_COMPARISON_LOCATIONS
    }

    /// Pin an observation. No-op when full or already present.
    pub fn add(&mut self, weather: Observation) -> bool {
        if !self.can_add_more() {
            tracing::debug!("Comparison set is full, ignoring {}", weather.location.name);
            return false;
        }

        let entry = ComparisonEntry::from_observation(weather);
        if self.contains(&entry.id) {
            return false;
        }

        self.entries.push(entry);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Per-date rows of average temperature and rain chance.
    ///
    /// Dates come from the first entry; entries without a forecast day at a
    /// given index are left out of that row.
    pub fn chart_series(&self) -> Vec<ComparisonRow> {
        let Some(first) = self.entries.first() else {
            return Vec::new();
        };

        first
            .weather
            .forecast
            .forecastday
            .iter()
            .enumerate()
            .map(|(index, day)| ComparisonRow {
                date: day.date.clone(),
                values: self
                    .entries
                    .iter()
                    .filter_map(|entry| {
                        entry.weather.forecast.forecastday.get(index).map(|d| ComparisonValue {
                            location: entry.name.clone(),
                            avg_temp_c: d.day.avgtemp_c,
                            chance_of_rain: d.day.daily_chance_of_rain,
                        })
                    })
                    .collect(),
            })
            .collect()
    }
}
