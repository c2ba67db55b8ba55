//! `wxquery` - hourly forecast extremes for a geocoded location
//!
//! This library geocodes a target with Nominatim, fetches the National
//! Weather Service hourly forecast for it, and answers max/min queries over
//! air temperature, feels-like temperature, humidity, wind and precipitation.

pub mod api;
pub mod app;
pub mod config;
pub mod conversion;
pub mod error;
pub mod extremum;
pub mod geo;
pub mod metrics;
pub mod models;
pub mod query;
pub mod report;
pub mod sources;

// Re-export core types for public API
pub use api::ApiClient;
pub use config::AppConfig;
pub use conversion::TemperatureScale;
pub use error::{FetchFailure, WxQueryError};
pub use extremum::{Extremum, Limit};
pub use metrics::{Metric, compute_extremum};
pub use models::{ForecastDocument, ForecastPeriod, GeoPoint};
pub use query::{Query, QueryPlan};
pub use report::Report;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, WxQueryError>;
