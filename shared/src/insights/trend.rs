//! Trend summaries over historical series
//!
//! Two readings are supported: a year-indexed rate of change (long-range
//! series) and a day-indexed composite for short trailing windows. Both take
//! the series oldest first and read its first and last points as the endpoints.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::models::HistoricalPoint;

pub const INSUFFICIENT_DATA: &str = "Insufficient data for trend analysis";
pub const STABLE_TEMPERATURE: &str = "Temperature has remained relatively stable over this period.";

/// Rates below this many °C per year read as stable
const YEARLY_STABLE_RATE: f64 = 0.1;
/// Deltas below this many °C read as stable over a daily window
const DAILY_STABLE_DELTA: f64 = 1.0;
/// Mean daily precipitation above this many mm is significant
const SIGNIFICANT_PRECIP_MM: f64 = 5.0;

/// How a series is indexed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TrendWindow {
    Yearly,
    Daily,
}

/// Summarise a series with the reading that matches its indexing
pub fn analyze_trend(series: &[HistoricalPoint], window: TrendWindow) -> String {
    match window {
        TrendWindow::Yearly => analyze_yearly_trend(series),
        TrendWindow::Daily => analyze_daily_trend(series),
    }
}

/// Average change in °C per year between the first and last points.
///
/// `None` for fewer than two points or when both endpoints share a year.
pub fn change_per_year(series: &[HistoricalPoint]) -> Option<f64> {
    let (first, last) = endpoints(series)?;
    let span = last.year - first.year;
    if span == 0 {
        return None;
    }
    Some((last.avg_temp - first.avg_temp) / f64::from(span))
}

/// Year-indexed reading: warming, cooling or stable at a per-year rate.
pub fn analyze_yearly_trend(series: &[HistoricalPoint]) -> String {
    let Some((first, last)) = endpoints(series) else {
        return INSUFFICIENT_DATA.to_string();
    };

    let Some(rate) = change_per_year(series) else {
        // Same-year endpoints: no rate, report the raw difference.
        let delta = last.avg_temp - first.avg_temp;
        if delta.abs() < YEARLY_STABLE_RATE {
            return STABLE_TEMPERATURE.to_string();
        }
        let direction = if delta > 0.0 { "rose" } else { "fell" };
        return format!(
            "Temperature {} by {}°C within {}.",
            direction,
            fixed(delta.abs(), 2),
            first.year
        );
    };

    if rate.abs() < YEARLY_STABLE_RATE {
        STABLE_TEMPERATURE.to_string()
    } else if rate > 0.0 {
        format!(
            "Temperature shows a warming trend of approximately {}°C per year.",
            fixed(rate, 2)
        )
    } else {
        format!(
            "Temperature shows a cooling trend of approximately {}°C per year.",
            fixed(rate.abs(), 2)
        )
    }
}

/// Day-indexed reading: mean temperature, direction, and precipitation tier.
pub fn analyze_daily_trend(series: &[HistoricalPoint]) -> String {
    let Some((first, last)) = endpoints(series) else {
        return INSUFFICIENT_DATA.to_string();
    };

    let count = series.len() as f64;
    let avg_temp = series.iter().map(|p| p.avg_temp).sum::<f64>() / count;
    let avg_precip = series.iter().map(|p| p.precipitation).sum::<f64>() / count;
    let delta = last.avg_temp - first.avg_temp;

    let mut sentences = vec![format!(
        "Average temperature over the past {} days was {}°C.",
        series.len(),
        fixed(avg_temp, 1)
    )];

    sentences.push(if delta.abs() < DAILY_STABLE_DELTA {
        "Temperatures have remained stable.".to_string()
    } else if delta > 0.0 {
        format!("Temperatures have been rising, up {}°C.", fixed(delta, 1))
    } else {
        format!("Temperatures have been falling, down {}°C.", fixed(delta.abs(), 1))
    });

    sentences.push(match PrecipitationTier::classify(avg_precip) {
        PrecipitationTier::Significant => format!(
            "Significant precipitation, averaging {} mm per day.",
            fixed(avg_precip, 1)
        ),
        PrecipitationTier::Light => format!(
            "Light precipitation, averaging {} mm per day.",
            fixed(avg_precip, 1)
        ),
        PrecipitationTier::None => "No precipitation recorded.".to_string(),
    });

    sentences.join(" ")
}

/// Mean daily precipitation tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecipitationTier {
    Significant,
    Light,
    None,
}

impl PrecipitationTier {
    pub fn classify(avg_precip_mm: f64) -> Self {
        if avg_precip_mm > SIGNIFICANT_PRECIP_MM {
            PrecipitationTier::Significant
        } else if avg_precip_mm > 0.0 {
            PrecipitationTier::Light
        } else {
            PrecipitationTier::None
        }
    }
}

fn endpoints(series: &[HistoricalPoint]) -> Option<(&HistoricalPoint, &HistoricalPoint)> {
    if series.len() < 2 {
        return None;
    }
    Some((series.first()?, series.last()?))
}

/// Fixed-point rendering with ties rounded away from zero
fn fixed(value: f64, dp: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => {
            let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{:.*}", dp as usize, rounded)
        }
        None => format!("{:.*}", dp as usize, value),
    }
}
