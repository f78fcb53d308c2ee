//! HTTP request handlers

pub mod health;
pub mod weather;

pub use health::health_check;
pub use weather::{get_forecast, get_historical_weather, get_insights, search_locations};
