//! Validation utilities for provider payloads and request input
//!
//! Payloads are decoded into typed structs first; these checks cover the
//! value constraints the types cannot express.

use chrono::NaiveDate;

use crate::models::{Observation, Place};

/// Forecast day range accepted by the provider
pub const MIN_FORECAST_DAYS: u32 = 1;
pub const MAX_FORECAST_DAYS: u32 = 14;

// ============================================================================
// Coordinates
// ============================================================================

/// Validate latitude/longitude are finite and on the globe
pub fn validate_coordinates(lat: f64, lon: f64) -> Result<(), &'static str> {
    if !lat.is_finite() || !lon.is_finite() {
        return Err("Coordinates must be finite numbers");
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err("Latitude must be between -90 and 90");
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Clamp a requested forecast length to what the provider serves
pub fn clamp_forecast_days(days: u32) -> u32 {
    days.clamp(MIN_FORECAST_DAYS, MAX_FORECAST_DAYS)
}

// ============================================================================
// Provider Payloads
// ============================================================================

/// Validate a location search result. Text fields are free-form.
pub fn validate_place(place: &Place) -> Result<(), &'static str> {
    validate_coordinates(place.lat, place.lon)
}

/// Validate a forecast observation
pub fn validate_observation(observation: &Observation) -> Result<(), &'static str> {
    validate_coordinates(observation.location.lat, observation.location.lon)?;

    let humidity = observation.current.humidity;
    if !(0.0..=100.0).contains(&humidity) {
        return Err("Humidity must be between 0 and 100");
    }
    if observation.current.wind_kph < 0.0 {
        return Err("Wind speed cannot be negative");
    }

    let mut previous: Option<NaiveDate> = None;
    for day in &observation.forecast.forecastday {
        let date = NaiveDate::parse_from_str(&day.date, "%Y-%m-%d")
            .map_err(|_| "Forecast date is not YYYY-MM-DD")?;
        if previous.is_some_and(|p| p >= date) {
            return Err("Forecast days must be in ascending date order");
        }
        if day.hour.len() > 24 {
            return Err("A forecast day has more than 24 hours");
        }
        previous = Some(date);
    }
    Ok(())
}

// ============================================================================
// Request Input
// ============================================================================

/// Validate a search query
pub fn validate_search_query(query: &str) -> Result<(), &'static str> {
    if query.trim().is_empty() {
        return Err("Search query is empty");
    }
    if query.len() > 200 {
        return Err("Search query is too long");
    }
    Ok(())
}
