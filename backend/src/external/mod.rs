//! External API integrations

pub mod weatherapi;

pub use weatherapi::WeatherApiClient;
