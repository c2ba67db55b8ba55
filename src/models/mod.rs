//! Data models for `wxquery`
//!
//! This module contains the domain models organized by concern:
//! - Location: geographic points
//! - Forecast: hourly forecast periods and the forecast area polygon
//! - Geocoding: Nominatim search and reverse results

pub mod forecast;
pub mod geocoding;
pub mod location;

// Re-export all public types for convenient access
pub use forecast::{ForecastDocument, ForecastPeriod, QuantitativeValue};
pub use geocoding::{Coordinate, GeocodeCandidate, ReverseGeocodeResult};
pub use location::GeoPoint;
