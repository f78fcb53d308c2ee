//! Business logic services for the weather dashboard

pub mod weather;

pub use weather::{HistoricalSeries, WeatherService};
