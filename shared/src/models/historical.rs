//! Historical weather series

use serde::{Deserialize, Serialize};

use super::DayForecast;

/// One day (or one year, for the mock series) of historical weather.
/// Series are ordered oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalPoint {
    pub date: String,
    pub year: i32,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub condition: String,
    pub precipitation: f64,
    pub humidity: f64,
}

impl HistoricalPoint {
    /// Build a point from a provider history day. `None` when the date is malformed.
    pub fn from_day(day: &DayForecast) -> Option<Self> {
        let year = day.date.get(..4)?.parse().ok()?;

        Some(Self {
            date: day.date.clone(),
            year,
            avg_temp: day.day.avgtemp_c,
            max_temp: day.day.maxtemp_c,
            min_temp: day.day.mintemp_c,
            condition: day.day.condition.text.clone(),
            precipitation: day.day.totalprecip_mm,
            humidity: day.day.avghumidity,
        })
    }

    /// A yearly aggregate carrying only the average temperature
    pub fn yearly(year: i32, avg_temp: f64) -> Self {
        Self {
            date: format!("{}-01-01", year),
            year,
            avg_temp,
            max_temp: avg_temp,
            min_temp: avg_temp,
            condition: String::new(),
            precipitation: 0.0,
            humidity: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, DaySummary};

    #[test]
    fn test_from_history_day() {
        let day = DayForecast {
            date: "2024-03-02".to_string(),
            day: DaySummary {
                maxtemp_c: 14.2,
                mintemp_c: 6.1,
                avgtemp_c: 9.8,
                condition: Condition {
                    text: "Patchy rain possible".to_string(),
                    icon: String::new(),
                    code: 1063,
                },
                daily_chance_of_rain: 0,
                daily_chance_of_snow: 0,
                totalprecip_mm: 3.4,
                avghumidity: 81.0,
            },
            hour: Vec::new(),
        };

        let point = HistoricalPoint::from_day(&day).unwrap();
        assert_eq!(point.year, 2024);
        assert_eq!(point.avg_temp, 9.8);
        assert_eq!(point.precipitation, 3.4);
        assert_eq!(point.condition, "Patchy rain possible");
    }

    #[test]
    fn test_serializes_camel_case() {
        let point = HistoricalPoint {
            date: "2024-03-02".to_string(),
            year: 2024,
            avg_temp: 10.0,
            max_temp: 12.0,
            min_temp: 8.0,
            condition: "Sunny".to_string(),
            precipitation: 0.0,
            humidity: 50.0,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert!(json.get("avgTemp").is_some());
        assert!(json.get("maxTemp").is_some());
        assert!(json.get("avg_temp").is_none());
    }
}
