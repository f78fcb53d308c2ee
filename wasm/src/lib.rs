//! WebAssembly module for the weather dashboard
//!
//! Provides client-side:
//! - Weather interpretation, recommendations and trend analysis
//! - Favorites persisted to the browser's localStorage
//! - Location comparison and the dashboard session state
//!
//! Structured values cross the boundary as JSON strings.

use std::io;

use serde::Serialize;
use thiserror::Error;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use wasm_bindgen::prelude::*;

use shared::{
    analyze_trend, interpret, recommend, AlertSeverity, Dashboard, HistoricalPoint, KeyValueStore,
    NewFavorite, Observation, Place, RequestToken, StorageError, TrendWindow,
};

#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    // Already set when the module is instantiated twice
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleMakeWriter)
        .with_max_level(Level::DEBUG)
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .try_init();
}

/// Errors surfaced to JavaScript as exception messages
#[derive(Error, Debug)]
pub enum WasmError {
    #[error("Invalid {what} JSON: {source}")]
    InvalidJson {
        what: &'static str,
        source: serde_json::Error,
    },

    #[error("Serialization failed: {0}")]
    Serialization(serde_json::Error),

    #[error("Unknown trend window: {0}")]
    UnknownWindow(String),
}

impl From<WasmError> for JsValue {
    fn from(error: WasmError) -> Self {
        JsValue::from_str(&error.to_string())
    }
}

fn parse_json<T: serde::de::DeserializeOwned>(
    json: &str,
    what: &'static str,
) -> Result<T, WasmError> {
    serde_json::from_str(json).map_err(|source| WasmError::InvalidJson { what, source })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, WasmError> {
    serde_json::to_string(value).map_err(WasmError::Serialization)
}

fn parse_window(window: &str) -> Result<TrendWindow, WasmError> {
    match window {
        "yearly" => Ok(TrendWindow::Yearly),
        "daily" => Ok(TrendWindow::Daily),
        other => Err(WasmError::UnknownWindow(other.to_string())),
    }
}

// ============================================================================
// Console Logging
// ============================================================================

/// Sends each formatted tracing event to the browser console at its level
struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one event; the console call happens on drop
struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let Some(line) = console_line(&self.buffer) else {
            return;
        };
        let line = JsValue::from_str(&line);
        if self.level == Level::ERROR {
            web_sys::console::error_1(&line);
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&line);
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&line);
        } else {
            web_sys::console::debug_1(&line);
        }
    }
}

/// Formatted event without its trailing newline, `None` when blank
fn console_line(buffer: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(buffer);
    let text = text.trim_end();
    (!text.is_empty()).then(|| text.to_string())
}

// ============================================================================
// Insights
// ============================================================================

/// Clothing, activity and preparation advice as `{clothing, activities, preparations}` JSON
#[wasm_bindgen]
pub fn get_recommendations(temp_c: f64, condition: &str) -> Result<String, WasmError> {
    to_json(&recommend(temp_c, condition))
}

/// Friendly narrative for a provider observation
#[wasm_bindgen]
pub fn interpret_weather(observation_json: &str) -> Result<String, WasmError> {
    let observation: Observation = parse_json(observation_json, "observation")?;
    Ok(interpret(&observation))
}

/// Trend sentence for a historical series. `window` is "yearly" or "daily".
#[wasm_bindgen]
pub fn analyze_temperature_trend(series_json: &str, window: &str) -> Result<String, WasmError> {
    let series: Vec<HistoricalPoint> = parse_json(series_json, "series")?;
    Ok(analyze_trend(&series, parse_window(window)?))
}

/// Display tier for a provider alert severity
#[wasm_bindgen]
pub fn classify_alert_severity(severity: &str) -> String {
    match AlertSeverity::classify(severity) {
        AlertSeverity::Severe => "severe",
        AlertSeverity::Moderate => "moderate",
        AlertSeverity::Informational => "informational",
    }
    .to_string()
}

/// Identity key for a location
#[wasm_bindgen]
pub fn location_id(lat: f64, lon: f64) -> String {
    shared::location_key(lat, lon)
}

// ============================================================================
// Browser Storage
// ============================================================================

/// `window.localStorage` as a key-value store
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn storage(&self) -> Result<web_sys::Storage, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;
        window
            .local_storage()
            .map_err(|e| StorageError::Unavailable(js_message(&e)))?
            .ok_or_else(|| StorageError::Unavailable("localStorage disabled".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        logged(self.storage().and_then(|storage| {
            storage
                .get_item(key)
                .map_err(|e| StorageError::Read(js_message(&e)))
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        logged(self.storage().and_then(|storage| {
            storage
                .set_item(key, value)
                .map_err(|e| StorageError::Write(js_message(&e)))
        }))
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Every localStorage failure is reported before it reaches the collections
fn logged<T>(result: Result<T, StorageError>) -> Result<T, StorageError> {
    if let Err(error) = &result {
        tracing::error!(%error, "localStorage access failed");
    }
    result
}

// ============================================================================
// Dashboard Session
// ============================================================================

/// One dashboard session: search, current observation, favorites and comparison
#[wasm_bindgen]
pub struct WeatherDashboard {
    inner: Dashboard<Box<dyn KeyValueStore>>,
}

impl WeatherDashboard {
    /// Session over any store
    pub fn with_store(store: Box<dyn KeyValueStore>) -> Self {
        Self {
            inner: Dashboard::new(store),
        }
    }
}

#[wasm_bindgen]
impl WeatherDashboard {
    /// Session backed by localStorage; favorites are loaded immediately
    #[wasm_bindgen(constructor)]
    pub fn new() -> WeatherDashboard {
        Self::with_store(Box::new(LocalStorage))
    }

    #[wasm_bindgen(getter)]
    pub fn loading(&self) -> bool {
        self.inner.is_loading()
    }

    /// Start a search. Returns the request token, or `undefined` for a blank
    /// query (results are cleared).
    pub fn begin_search(&mut self, query: &str) -> Option<f64> {
        self.inner.begin_search(query).map(|t| t.value() as f64)
    }

    /// Apply search results; `false` when a newer search superseded them
    pub fn complete_search(&mut self, token: f64, results_json: &str) -> Result<bool, WasmError> {
        let results: Vec<Place> = parse_json(results_json, "search results")?;
        Ok(self
            .inner
            .complete_search(RequestToken::from_value(token as u64), results))
    }

    pub fn results_json(&self) -> Result<String, WasmError> {
        to_json(self.inner.results())
    }

    /// Results as `[{id, label, place}]` for the picker
    pub fn result_options_json(&self) -> Result<String, WasmError> {
        to_json(&self.inner.result_options())
    }

    pub fn begin_weather_fetch(&mut self) -> f64 {
        self.inner.begin_weather_fetch().value() as f64
    }

    /// Apply a weather response. `null` keeps the current observation.
    pub fn complete_weather_fetch(
        &mut self,
        token: f64,
        observation_json: Option<String>,
    ) -> Result<bool, WasmError> {
        let observation = match observation_json.as_deref() {
            Some(json) => parse_json::<Option<Observation>>(json, "observation")?,
            None => None,
        };
        Ok(self
            .inner
            .complete_weather_fetch(RequestToken::from_value(token as u64), observation))
    }

    /// Current observation as JSON, `"null"` before the first fetch
    pub fn observation_json(&self) -> Result<String, WasmError> {
        to_json(&self.inner.observation())
    }

    /// Forecast days with precipitation chance and 24-hour extremes
    pub fn outlook_json(&self) -> Result<String, WasmError> {
        to_json(&self.inner.outlook())
    }

    /// Hourly points for one forecast day, `[]` when the day is missing
    pub fn hourly_json(&self, day_index: usize) -> Result<String, WasmError> {
        to_json(&self.inner.hourly(day_index))
    }

    /// Active alerts, most severe first
    pub fn alerts_json(&self) -> Result<String, WasmError> {
        to_json(&self.inner.alerts())
    }

    // Favorites

    pub fn favorites_json(&self) -> Result<String, WasmError> {
        to_json(self.inner.favorites().list())
    }

    /// Save a location (`{name, region, country, lat, lon}`); `false` if already saved
    pub fn add_favorite(&mut self, location_json: &str) -> Result<bool, WasmError> {
        let candidate: NewFavorite = parse_json(location_json, "location")?;
        Ok(self.inner.favorites_mut().add(candidate))
    }

    pub fn remove_favorite(&mut self, id: &str) -> bool {
        self.inner.favorites_mut().remove(id)
    }

    pub fn is_favorite(&self, lat: f64, lon: f64) -> bool {
        self.inner.favorites().is_favorite(lat, lon)
    }

    pub fn is_current_favorite(&self) -> bool {
        self.inner.is_current_favorite()
    }

    /// Save or unsave the displayed location; returns the new membership
    pub fn toggle_current_favorite(&mut self) -> bool {
        self.inner.toggle_current_favorite()
    }

    // Comparison

    pub fn comparison_json(&self) -> Result<String, WasmError> {
        to_json(self.inner.comparison().entries())
    }

    pub fn compare_current(&mut self) -> bool {
        self.inner.compare_current()
    }

    pub fn can_add_comparison(&self) -> bool {
        self.inner.comparison().can_add_more()
    }

    pub fn remove_comparison(&mut self, id: &str) -> bool {
        self.inner.comparison_mut().remove(id)
    }

    pub fn clear_comparison(&mut self) {
        self.inner.comparison_mut().clear()
    }

    /// Per-date rows for the comparison chart
    pub fn chart_series_json(&self) -> Result<String, WasmError> {
        to_json(&self.inner.comparison().chart_series())
    }

    // Insights

    /// `{interpretation, recommendations, trend}` for the displayed observation,
    /// `"null"` when nothing is displayed
    pub fn insights_json(&self, history_json: &str, window: &str) -> Result<String, WasmError> {
        let history: Vec<HistoricalPoint> = parse_json(history_json, "history")?;
        to_json(&self.inner.insights(&history, parse_window(window)?))
    }
}

impl Default for WeatherDashboard {
    fn default() -> Self {
        Self::new()
    }
}
