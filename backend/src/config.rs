//! Configuration management for the weather dashboard server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with WXD_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Upper bound for `historical.mock_years`
pub const MAX_MOCK_YEARS: u32 = 200;

/// Upper bound for `historical.window_days`, one request per day
pub const MAX_WINDOW_DAYS: u32 = 365;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Historical series configuration
    pub historical: HistoricalConfig,

    /// Log output configuration
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API base URL
    pub api_endpoint: String,

    /// Weather API key. Endpoints that call the provider answer 500 without it.
    pub api_key: Option<String>,

    /// Forecast length when the client does not ask for one
    pub forecast_days: u32,

    /// Upstream request timeout
    pub timeout_secs: u64,
}

impl WeatherConfig {
    /// The API key, if one is set and non-blank
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

/// Where the historical series comes from
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoricalSource {
    /// One provider history request per day over the trailing window
    Upstream,
    /// Generated yearly series
    Mock,
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoricalConfig {
    pub source: HistoricalSource,

    /// Trailing days fetched from the provider, ending yesterday
    pub window_days: u32,

    /// Years generated by the mock source, ending this year
    pub mock_years: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub format: LogFormat,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("WXD_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.weatherapi.com/v1")?
            .set_default("weather.forecast_days", 7)?
            .set_default("weather.timeout_secs", 10)?
            .set_default("historical.source", "upstream")?
            .set_default("historical.window_days", 7)?
            .set_default("historical.mock_years", 10)?
            .set_default("logging.format", "pretty")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (WXD_ prefix)
            .add_source(
                Environment::with_prefix("WXD")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would make a single request unreasonably large
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.historical.mock_years > MAX_MOCK_YEARS {
            return Err(ConfigError::Message(format!(
                "historical.mock_years must be at most {}, got {}",
                MAX_MOCK_YEARS, self.historical.mock_years
            )));
        }
        if self.historical.window_days > MAX_WINDOW_DAYS {
            return Err(ConfigError::Message(format!(
                "historical.window_days must be at most {}, got {}",
                MAX_WINDOW_DAYS, self.historical.window_days
            )));
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            weather: WeatherConfig {
                api_endpoint: "https://api.weatherapi.com/v1".to_string(),
                api_key: None,
                forecast_days: 7,
                timeout_secs: 10,
            },
            historical: HistoricalConfig {
                source: HistoricalSource::Upstream,
                window_days: 7,
                mock_years: 10,
            },
            logging: LoggingConfig {
                format: LogFormat::Pretty,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_not_a_credential() {
        let mut config = Config::default();
        assert_eq!(config.weather.credential(), None);

        config.weather.api_key = Some("   ".to_string());
        assert_eq!(config.weather.credential(), None);

        config.weather.api_key = Some("abc123".to_string());
        assert_eq!(config.weather.credential(), Some("abc123"));
    }

    #[test]
    fn test_validate_bounds_historical_sizes() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.historical.mock_years = MAX_MOCK_YEARS;
        assert!(config.validate().is_ok());

        config.historical.mock_years = u32::MAX;
        assert!(config.validate().is_err());

        config.historical.mock_years = 10;
        config.historical.window_days = MAX_WINDOW_DAYS + 1;
        assert!(config.validate().is_err());
    }
}
