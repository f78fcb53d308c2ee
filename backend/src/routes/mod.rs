//! Route definitions for the weather dashboard API

use axum::{routing::get, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/search", get(handlers::search_locations))
        .route("/forecast", get(handlers::get_forecast))
        .route("/historical-weather", get(handlers::get_historical_weather))
        .route("/insights", get(handlers::get_insights))
}
