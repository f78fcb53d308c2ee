//! Shared types and logic for the weather dashboard
//!
//! This crate contains the data model, the insight engines and the
//! client-side collections used by the backend, the browser module (via
//! WASM), and any other component of the system.

pub mod collections;
pub mod dashboard;
pub mod insights;
pub mod models;
pub mod types;
pub mod validation;

pub use collections::*;
pub use dashboard::*;
pub use insights::*;
pub use models::*;
pub use types::*;
pub use validation::*;
