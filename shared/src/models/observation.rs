//! Weather observation models
//!
//! Mirrors the provider's forecast payload. An `Observation` is produced whole
//! by the provider client and replaced as a unit when a newer fetch lands.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::types::{location_key, Coordinates};

/// Full weather snapshot for one location
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub location: ObservedLocation,
    pub current: CurrentConditions,
    pub forecast: Forecast,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alerts: Option<Alerts>,
}

impl Observation {
    /// Identity key of the observed location
    pub fn key(&self) -> String {
        location_key(self.location.lat, self.location.lon)
    }

    /// Local hour of day (0-23), `None` when `localtime` cannot be parsed
    pub fn local_hour(&self) -> Option<u32> {
        local_hour(&self.location.localtime)
    }

    /// Active alerts, empty when the provider sent none
    pub fn alert_list(&self) -> &[WeatherAlert] {
        self.alerts
            .as_ref()
            .map(|a| a.alert.as_slice())
            .unwrap_or_default()
    }
}

/// Location block of an observation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservedLocation {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    /// Local wall-clock time at the location, e.g. "2024-01-15 14:30"
    pub localtime: String,
}

impl ObservedLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}

/// Condition descriptor shared by current, daily and hourly blocks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

/// Current conditions
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub temp_f: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub pressure_mb: f64,
    pub precip_mm: f64,
    pub humidity: f64,
    pub feelslike_c: f64,
    pub uv: f64,
}

/// Multi-day forecast
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Forecast {
    pub forecastday: Vec<DayForecast>,
}

/// Forecast (or history) for a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayForecast {
    /// ISO date, e.g. "2024-01-15"
    pub date: String,
    pub day: DaySummary,
    #[serde(default)]
    pub hour: Vec<HourForecast>,
}

impl DayForecast {
    /// Chance of any precipitation, the larger of rain and snow
    pub fn precipitation_chance(&self) -> i32 {
        self.day.daily_chance_of_rain.max(self.day.daily_chance_of_snow)
    }
}

/// Aggregates for a single day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    pub condition: Condition,
    #[serde(default)]
    pub daily_chance_of_rain: i32,
    #[serde(default)]
    pub daily_chance_of_snow: i32,
    /// Present on history responses
    #[serde(default)]
    pub totalprecip_mm: f64,
    #[serde(default)]
    pub avghumidity: f64,
}

/// Hourly forecast entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourForecast {
    pub time: String,
    pub temp_c: f64,
    pub condition: Condition,
    #[serde(default)]
    pub chance_of_rain: i32,
    #[serde(default)]
    pub chance_of_snow: i32,
}

impl HourForecast {
    pub fn precipitation_chance(&self) -> i32 {
        self.chance_of_rain.max(self.chance_of_snow)
    }
}

/// Extremes over the next 24 hourly entries
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct HourlySummary {
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub max_chance_of_rain: i32,
}

impl HourlySummary {
    /// Summarise the first 24 hours, `None` when there are no hours
    pub fn from_hours(hours: &[HourForecast]) -> Option<Self> {
        let next = &hours[..hours.len().min(24)];
        let first = next.first()?;

        let summary = next.iter().fold(
            HourlySummary {
                max_temp_c: first.temp_c,
                min_temp_c: first.temp_c,
                max_chance_of_rain: first.chance_of_rain,
            },
            |acc, h| HourlySummary {
                max_temp_c: acc.max_temp_c.max(h.temp_c),
                min_temp_c: acc.min_temp_c.min(h.temp_c),
                max_chance_of_rain: acc.max_chance_of_rain.max(h.chance_of_rain),
            },
        );
        Some(summary)
    }
}

/// Alert envelope, `{"alert": [...]}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Alerts {
    #[serde(default)]
    pub alert: Vec<WeatherAlert>,
}

/// A government weather alert relayed by the provider
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeatherAlert {
    pub headline: String,
    pub severity: String,
    pub urgency: String,
    pub areas: String,
    pub category: String,
    pub event: String,
    pub effective: String,
    pub expires: String,
    pub desc: String,
    pub instruction: String,
}

impl WeatherAlert {
    pub fn severity_level(&self) -> AlertSeverity {
        AlertSeverity::classify(&self.severity)
    }

    /// Event name, falling back to the headline
    pub fn title(&self) -> &str {
        if self.event.is_empty() {
            &self.headline
        } else {
            &self.event
        }
    }
}

/// Display tier for an alert, ordered most severe first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// "extreme" or "severe"
    Severe,
    Moderate,
    Informational,
}

impl AlertSeverity {
    pub fn classify(severity: &str) -> Self {
        match severity.to_lowercase().as_str() {
            "extreme" | "severe" => AlertSeverity::Severe,
            "moderate" => AlertSeverity::Moderate,
            _ => AlertSeverity::Informational,
        }
    }
}

/// Parse the hour out of a provider local timestamp.
///
/// Accepts "2024-01-15 14:30", "2024-01-15 4:05" and ISO "2024-01-15T14:30:00".
pub fn local_hour(localtime: &str) -> Option<u32> {
    const FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    let trimmed = localtime.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|dt| dt.hour())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour(temp_c: f64, chance_of_rain: i32) -> HourForecast {
        HourForecast {
            time: "2024-01-15 00:00".to_string(),
            temp_c,
            condition: Condition {
                text: "Clear".to_string(),
                icon: String::new(),
                code: 1000,
            },
            chance_of_rain,
            chance_of_snow: 0,
        }
    }

    #[test]
    fn test_local_hour_parsing() {
        assert_eq!(local_hour("2024-01-15 14:30"), Some(14));
        assert_eq!(local_hour("2024-01-15 4:05"), Some(4));
        assert_eq!(local_hour("2024-01-15T23:59:00"), Some(23));
        assert_eq!(local_hour("not a time"), None);
        assert_eq!(local_hour(""), None);
    }

    #[test]
    fn test_alert_severity_classification() {
        assert_eq!(AlertSeverity::classify("Extreme"), AlertSeverity::Severe);
        assert_eq!(AlertSeverity::classify("SEVERE"), AlertSeverity::Severe);
        assert_eq!(AlertSeverity::classify("Moderate"), AlertSeverity::Moderate);
        assert_eq!(AlertSeverity::classify("Minor"), AlertSeverity::Informational);
        assert_eq!(AlertSeverity::classify(""), AlertSeverity::Informational);
    }

    #[test]
    fn test_alert_title_falls_back_to_headline() {
        let alert = WeatherAlert {
            headline: "Flood Warning issued".to_string(),
            ..Default::default()
        };
        assert_eq!(alert.title(), "Flood Warning issued");
    }

    #[test]
    fn test_hourly_summary_uses_first_24_hours() {
        let mut hours: Vec<HourForecast> = (0..24).map(|i| hour(10.0 + i as f64, i)).collect();
        hours.push(hour(99.0, 100));

        let summary = HourlySummary::from_hours(&hours).unwrap();
        assert_eq!(summary.max_temp_c, 33.0);
        assert_eq!(summary.min_temp_c, 10.0);
        assert_eq!(summary.max_chance_of_rain, 23);
    }

    #[test]
    fn test_hourly_summary_empty() {
        assert!(HourlySummary::from_hours(&[]).is_none());
    }

    #[test]
    fn test_hour_precipitation_chance() {
        let mut h = hour(0.0, 20);
        h.chance_of_snow = 70;
        assert_eq!(h.precipitation_chance(), 70);
    }
}
