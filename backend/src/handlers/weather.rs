//! HTTP handlers for location search, forecasts, history and insights

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use shared::{validate_coordinates, Coordinates, HistoricalPoint, InsightReport, Observation, Place};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Query parameters for location search
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search locations. Always answers with a list, empty on any failure.
pub async fn search_locations(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Place>> {
    let q = query.q.unwrap_or_default();
    Json(state.weather.search_locations(&q).await)
}

/// Coordinates as raw strings so bad input gets a field-level 400
#[derive(Debug, Deserialize)]
pub struct CoordinatesQuery {
    pub lat: Option<String>,
    pub lon: Option<String>,
}

impl CoordinatesQuery {
    pub fn coordinates(&self) -> AppResult<Coordinates> {
        let lat = parse_param("lat", self.lat.as_deref())?;
        let lon = parse_param("lon", self.lon.as_deref())?;
        validate_coordinates(lat, lon).map_err(|message| AppError::Validation {
            field: "lat,lon".to_string(),
            message: message.to_string(),
        })?;
        Ok(Coordinates::new(lat, lon))
    }
}

fn parse_param<T: std::str::FromStr>(field: &str, raw: Option<&str>) -> AppResult<T> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::missing_param(field))?;

    raw.parse().map_err(|_| AppError::Validation {
        field: field.to_string(),
        message: format!("Query parameter '{}' is not a valid number", field),
    })
}

/// Query parameters for forecasts
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    #[serde(flatten)]
    pub location: CoordinatesQuery,
    pub days: Option<String>,
}

/// Get current conditions and forecast for coordinates
pub async fn get_forecast(
    State(state): State<AppState>,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<Observation>> {
    let coordinates = query.location.coordinates()?;
    let days = match query.days.as_deref() {
        Some(raw) => Some(parse_param::<u32>("days", Some(raw))?),
        None => None,
    };

    let observation = state
        .weather
        .get_weather_data(coordinates, days)
        .await?
        .ok_or_else(|| AppError::NotFound("Weather data".to_string()))?;

    Ok(Json(observation))
}

/// Get the historical series for coordinates
pub async fn get_historical_weather(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> AppResult<Json<Vec<HistoricalPoint>>> {
    let coordinates = query.coordinates()?;
    let series = state.weather.get_historical(coordinates).await?;
    Ok(Json(series.points))
}

/// Get interpretation, recommendations and trend for coordinates
pub async fn get_insights(
    State(state): State<AppState>,
    Query(query): Query<CoordinatesQuery>,
) -> AppResult<Json<InsightReport>> {
    let coordinates = query.coordinates()?;
    let report = state.weather.get_insights(coordinates).await?;
    Ok(Json(report))
}
