//! Dashboard controller state
//!
//! Owns the search results, the displayed observation and the client-side
//! collections. Network calls happen outside; each one is bracketed by a
//! `begin_*` that issues a token and a `complete_*` that applies the response
//! only when its token is still the latest issued on that channel.

use serde::Serialize;

use crate::collections::{ComparisonSet, Favorites, KeyValueStore};
use crate::insights::{InsightReport, TrendWindow};
use crate::models::{
    AlertSeverity, HistoricalPoint, HourlySummary, NewFavorite, Observation, Place,
};
use crate::types::Coordinates;

/// Ticket for an in-flight request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn from_value(value: u64) -> Self {
        Self(value)
    }
}

/// Monotonic token source for one request channel
#[derive(Debug, Clone, Default)]
pub struct RequestSequencer {
    issued: u64,
    settled: u64,
}

impl RequestSequencer {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        RequestToken(self.issued)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.issued
    }

    /// Mark a response as received. Returns whether it should be applied.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.settled = token.0;
        true
    }

    pub fn is_pending(&self) -> bool {
        self.issued > self.settled
    }
}

/// A search result ready for the picker
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlaceOption {
    pub id: String,
    pub label: String,
    pub place: Place,
}

/// One row of the forecast panel
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayOutlook {
    pub date: String,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: String,
    pub precipitation_chance: i32,
    pub hourly: Option<HourlySummary>,
}

/// One point of the hourly chart
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HourOutlook {
    pub time: String,
    pub temp_c: f64,
    pub condition: String,
    pub precipitation_chance: i32,
}

/// A provider alert as the alerts panel shows it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AlertView {
    pub title: String,
    pub severity: AlertSeverity,
    pub headline: String,
    pub description: String,
    pub instruction: String,
    pub areas: String,
    pub effective: String,
    pub expires: String,
}

/// Dashboard state, constructed once per session with its storage
#[derive(Debug)]
pub struct Dashboard<S: KeyValueStore> {
    search: RequestSequencer,
    weather: RequestSequencer,
    results: Vec<Place>,
    observation: Option<Observation>,
    favorites: Favorites<S>,
    comparison: ComparisonSet,
}

impl<S: KeyValueStore> Dashboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            search: RequestSequencer::default(),
            weather: RequestSequencer::default(),
            results: Vec::new(),
            observation: None,
            favorites: Favorites::load(store),
            comparison: ComparisonSet::new(),
        }
    }

    pub fn results(&self) -> &[Place] {
        &self.results
    }

    pub fn observation(&self) -> Option<&Observation> {
        self.observation.as_ref()
    }

    pub fn favorites(&self) -> &Favorites<S> {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut Favorites<S> {
        &mut self.favorites
    }

    pub fn comparison(&self) -> &ComparisonSet {
        &self.comparison
    }

    pub fn comparison_mut(&mut self) -> &mut ComparisonSet {
        &mut self.comparison
    }

    pub fn is_loading(&self) -> bool {
        self.search.is_pending() || self.weather.is_pending()
    }

    /// Start a location search. A blank query clears the results, supersedes
    /// any search in flight and returns `None`.
    pub fn begin_search(&mut self, query: &str) -> Option<RequestToken> {
        let token = self.search.issue();
        if query.trim().is_empty() {
            self.search.settle(token);
            self.results.clear();
            return None;
        }
        Some(token)
    }

    /// Apply search results if they answer the latest search
    pub fn complete_search(&mut self, token: RequestToken, results: Vec<Place>) -> bool {
        if !self.search.settle(token) {
            tracing::debug!("Discarding stale search response #{}", token.value());
            return false;
        }
        self.results = results;
        true
    }

    pub fn begin_weather_fetch(&mut self) -> RequestToken {
        self.weather.issue()
    }

    /// Apply a weather response if it answers the latest fetch. A `None`
    /// result leaves the current observation in place.
    pub fn complete_weather_fetch(
        &mut self,
        token: RequestToken,
        observation: Option<Observation>,
    ) -> bool {
        if !self.weather.settle(token) {
            tracing::debug!("Discarding stale weather response #{}", token.value());
            return false;
        }
        match observation {
            Some(observation) => {
                self.observation = Some(observation);
                true
            }
            None => false,
        }
    }

    pub fn current_coordinates(&self) -> Option<Coordinates> {
        self.observation.as_ref().map(|o| o.location.coordinates())
    }

    pub fn is_current_favorite(&self) -> bool {
        self.current_coordinates()
            .map(|c| self.favorites.is_favorite(c.lat, c.lon))
            .unwrap_or(false)
    }

    /// Save or unsave the displayed location. Returns the new membership.
    pub fn toggle_current_favorite(&mut self) -> bool {
        let Some(observation) = self.observation.as_ref() else {
            return false;
        };

        let key = observation.key();
        if self.favorites.get(&key).is_some() {
            self.favorites.remove(&key);
            false
        } else {
            self.favorites.add(NewFavorite::from(&observation.location));
            true
        }
    }

    /// Pin the displayed observation for comparison
    pub fn compare_current(&mut self) -> bool {
        match self.observation.clone() {
            Some(observation) => self.comparison.add(observation),
            None => false,
        }
    }

    /// Search results labelled for display
    pub fn result_options(&self) -> Vec<PlaceOption> {
        self.results
            .iter()
            .map(|place| PlaceOption {
                id: place.key(),
                label: place.display_name(),
                place: place.clone(),
            })
            .collect()
    }

    /// Daily rows of the displayed forecast, empty before the first fetch
    pub fn outlook(&self) -> Vec<DayOutlook> {
        let Some(observation) = self.observation.as_ref() else {
            return Vec::new();
        };

        observation
            .forecast
            .forecastday
            .iter()
            .map(|day| DayOutlook {
                date: day.date.clone(),
                max_temp_c: day.day.maxtemp_c,
                min_temp_c: day.day.mintemp_c,
                condition: day.day.condition.text.clone(),
                precipitation_chance: day.precipitation_chance(),
                hourly: HourlySummary::from_hours(&day.hour),
            })
            .collect()
    }

    /// Hourly points for one forecast day, empty when the day does not exist
    pub fn hourly(&self, day_index: usize) -> Vec<HourOutlook> {
        self.observation
            .as_ref()
            .and_then(|o| o.forecast.forecastday.get(day_index))
            .map(|day| {
                day.hour
                    .iter()
                    .map(|hour| HourOutlook {
                        time: hour.time.clone(),
                        temp_c: hour.temp_c,
                        condition: hour.condition.text.clone(),
                        precipitation_chance: hour.precipitation_chance(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Alerts for the displayed location, most severe first
    pub fn alerts(&self) -> Vec<AlertView> {
        let Some(observation) = self.observation.as_ref() else {
            return Vec::new();
        };

        let mut alerts: Vec<AlertView> = observation
            .alert_list()
            .iter()
            .map(|alert| AlertView {
                title: alert.title().to_string(),
                severity: alert.severity_level(),
                headline: alert.headline.clone(),
                description: alert.desc.clone(),
                instruction: alert.instruction.clone(),
                areas: alert.areas.clone(),
                effective: alert.effective.clone(),
                expires: alert.expires.clone(),
            })
            .collect();
        alerts.sort_by_key(|alert| alert.severity);
        alerts
    }

    pub fn insights(
        &self,
        history: &[HistoricalPoint],
        window: TrendWindow,
    ) -> Option<InsightReport> {
        self.observation
            .as_ref()
            .map(|o| InsightReport::build(o, history, window))
    }
}
