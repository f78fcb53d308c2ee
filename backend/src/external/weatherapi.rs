//! WeatherAPI client for location search, forecasts and daily history
//!
//! Responses are decoded straight into the shared typed models, so a payload
//! missing a required field fails here rather than deeper in the app.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize};
use shared::{clamp_forecast_days, Coordinates, DayForecast, Forecast, Observation, Place};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

const DEFAULT_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// WeatherAPI client
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// history.json carries the same `forecast.forecastday` shape as forecasts
#[derive(Debug, Deserialize)]
struct HistoryResponse {
    forecast: Forecast,
}

impl WeatherApiClient {
    /// Create a new WeatherApiClient
    pub fn new(api_key: String) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string())
    }

    /// Create a new WeatherApiClient with custom base URL (for testing)
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from configuration. `None` when no API key is set.
    pub fn from_config(config: &WeatherConfig) -> Option<Self> {
        let api_key = config.credential()?.to_string();
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Some(Self {
            client,
            api_key,
            base_url: config.api_endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// Search locations by free-text query
    pub async fn search_locations(&self, query: &str) -> AppResult<Vec<Place>> {
        self.get_json("search.json", &[("q", query.to_string())])
            .await
    }

    /// Fetch current conditions plus a `days`-day forecast (clamped to 1..=14)
    pub async fn get_forecast(
        &self,
        coordinates: Coordinates,
        days: u32,
    ) -> AppResult<Observation> {
        let days = clamp_forecast_days(days);
        self.get_json(
            "forecast.json",
            &[
                ("q", coordinates.as_query()),
                ("days", days.to_string()),
                ("aqi", "yes".to_string()),
                ("alerts", "yes".to_string()),
            ],
        )
        .await
    }

    /// Fetch the recorded weather for one past day
    pub async fn get_history_day(
        &self,
        coordinates: Coordinates,
        date: NaiveDate,
    ) -> AppResult<DayForecast> {
        let data: HistoryResponse = self
            .get_json(
                "history.json",
                &[
                    ("q", coordinates.as_query()),
                    ("dt", date.format("%Y-%m-%d").to_string()),
                ],
            )
            .await?;

        data.forecast
            .forecastday
            .into_iter()
            .next()
            .ok_or_else(|| AppError::ExternalService(format!("No history returned for {}", date)))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Weather API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse {} response: {}", endpoint, e))
        })
    }
}
