//! Weather service: provider calls with soft failure, historical series and insights

use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rand::Rng;
use shared::{
    validate_observation, validate_place, validate_search_query, Coordinates, HistoricalPoint,
    InsightReport, Observation, Place, TrendWindow,
};

use crate::config::{Config, HistoricalSource};
use crate::error::{AppError, AppResult};
use crate::external::WeatherApiClient;

/// Weather service shared by all handlers
#[derive(Clone)]
pub struct WeatherService {
    client: Option<WeatherApiClient>,
    config: Arc<Config>,
}

/// A historical series and the trend reading that suits it
#[derive(Debug, Clone)]
pub struct HistoricalSeries {
    pub points: Vec<HistoricalPoint>,
    pub window: TrendWindow,
}

impl WeatherService {
    /// Create a new WeatherService. Provider calls need `weather.api_key`.
    pub fn new(config: Arc<Config>) -> Self {
        let client = WeatherApiClient::from_config(&config.weather);
        if client.is_none() {
            tracing::warn!("No weather API key configured; provider endpoints will fail");
        }
        Self { client, config }
    }

    fn client(&self) -> AppResult<&WeatherApiClient> {
        self.client.as_ref().ok_or_else(|| {
            AppError::Configuration("Weather API key is not configured".to_string())
        })
    }

    /// Search locations. Any failure is logged and yields an empty list.
    pub async fn search_locations(&self, query: &str) -> Vec<Place> {
        if validate_search_query(query).is_err() {
            return Vec::new();
        }

        let client = match self.client() {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Search locations error: {}", e);
                return Vec::new();
            }
        };

        match client.search_locations(query).await {
            Ok(places) => match places.iter().try_for_each(validate_place) {
                Ok(()) => places,
                Err(reason) => {
                    tracing::error!("Data validation error: {}", reason);
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::error!("Search locations error: {}", e);
                Vec::new()
            }
        }
    }

    /// Fetch an observation. Provider failures are logged and yield `None`;
    /// only a missing API key is an error.
    pub async fn get_weather_data(
        &self,
        coordinates: Coordinates,
        days: Option<u32>,
    ) -> AppResult<Option<Observation>> {
        let client = self.client()?;
        let days = days.unwrap_or(self.config.weather.forecast_days);

        let observation = match client.get_forecast(coordinates, days).await {
            Ok(observation) => observation,
            Err(e) => {
                tracing::error!("Get weather data error: {}", e);
                return Ok(None);
            }
        };

        if let Err(reason) = validate_observation(&observation) {
            tracing::error!("Forecast validation error: {}", reason);
            return Ok(None);
        }

        Ok(Some(observation))
    }

    /// Historical series for a location, oldest first
    pub async fn get_historical(&self, coordinates: Coordinates) -> AppResult<HistoricalSeries> {
        let client = self.client()?;

        match self.config.historical.source {
            HistoricalSource::Mock => {
                let points = mock_yearly_series(
                    Utc::now().year(),
                    self.config.historical.mock_years,
                    &mut rand::thread_rng(),
                );
                Ok(HistoricalSeries {
                    points,
                    window: TrendWindow::Yearly,
                })
            }
            HistoricalSource::Upstream => {
                let dates = trailing_dates(
                    Utc::now().date_naive(),
                    self.config.historical.window_days,
                );
                let points = fetch_history(client, coordinates, dates).await;
                Ok(HistoricalSeries {
                    points,
                    window: TrendWindow::Daily,
                })
            }
        }
    }

    /// Interpretation, recommendations and trend for a location
    pub async fn get_insights(&self, coordinates: Coordinates) -> AppResult<InsightReport> {
        let observation = self
            .get_weather_data(coordinates, None)
            .await?
            .ok_or_else(|| AppError::NotFound("Weather data".to_string()))?;
        let history = self.get_historical(coordinates).await?;

        Ok(InsightReport::build(
            &observation,
            &history.points,
            history.window,
        ))
    }
}

/// `window_days` dates ending yesterday, oldest first
pub fn trailing_dates(today: NaiveDate, window_days: u32) -> Vec<NaiveDate> {
    (1..=i64::from(window_days))
        .rev()
        .map(|offset| today - Duration::days(offset))
        .collect()
}

/// Fetch each day concurrently. Failed days are logged and omitted; order is kept.
async fn fetch_history(
    client: &WeatherApiClient,
    coordinates: Coordinates,
    dates: Vec<NaiveDate>,
) -> Vec<HistoricalPoint> {
    let handles: Vec<_> = dates
        .into_iter()
        .map(|date| {
            let client = client.clone();
            let handle =
                tokio::spawn(async move { client.get_history_day(coordinates, date).await });
            (date, handle)
        })
        .collect();

    let mut points = Vec::with_capacity(handles.len());
    for (date, handle) in handles {
        match handle.await {
            Ok(Ok(day)) => match HistoricalPoint::from_day(&day) {
                Some(point) => points.push(point),
                None => tracing::warn!("Skipping history day with malformed date: {}", day.date),
            },
            Ok(Err(e)) => tracing::warn!("History for {} unavailable: {}", date, e),
            Err(e) => tracing::error!("History task for {} failed: {}", date, e),
        }
    }

    tracing::debug!("Fetched {} history days", points.len());
    points
}

/// Yearly placeholder series ending at `current_year`, averages around 20°C ± 1
pub fn mock_yearly_series<R: Rng>(
    current_year: i32,
    years: u32,
    rng: &mut R,
) -> Vec<HistoricalPoint> {
    let years = i32::try_from(years).unwrap_or(i32::MAX);
    (0..years)
        .map(|i| {
            let year = current_year - (years - 1 - i);
            HistoricalPoint::yearly(year, 20.0 + rng.gen_range(-1.0..1.0))
        })
        .collect()
}
