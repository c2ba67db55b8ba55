//! Hourly forecast model and the NWS document it is read from

use super::GeoPoint;
use crate::conversion;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// One forecast hour
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ForecastPeriod {
    /// Start of the period, with the offset the source reported
    pub start_time: DateTime<FixedOffset>,
    /// Air temperature in Fahrenheit
    pub temperature: f64,
    /// Unit the source used for `temperature` (`F` or `C`)
    #[serde(default)]
    pub temperature_unit: Option<String>,
    /// Relative humidity in percent
    #[serde(default)]
    pub relative_humidity: QuantitativeValue,
    /// Wind speed as reported, e.g. `"10 mph"`
    pub wind_speed: String,
    /// Chance of precipitation in percent
    #[serde(default)]
    pub probability_of_precipitation: QuantitativeValue,
}

/// NWS `{ "unitCode": ..., "value": ... }` pair; only the value is read
#[derive(Debug, Serialize, Deserialize, Clone, Copy, Default, PartialEq)]
pub struct QuantitativeValue {
    pub value: Option<f64>,
}

impl QuantitativeValue {
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self { value: Some(value) }
    }
}

/// Hourly forecast periods plus the polygon of the forecast grid cell
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(from = "wire::NwsForecast")]
pub struct ForecastDocument {
    /// Periods in chronological order
    pub periods: Vec<ForecastPeriod>,
    /// Outer ring of the forecast area, as read (closing vertex included)
    pub polygon: Vec<GeoPoint>,
}

impl ForecastDocument {
    /// Create a document, normalizing every period to Fahrenheit
    #[must_use]
    pub fn new(periods: Vec<ForecastPeriod>, polygon: Vec<GeoPoint>) -> Self {
        let periods = periods.into_iter().map(normalize_to_fahrenheit).collect();
        Self { periods, polygon }
    }

    /// Number of periods available for a query window
    #[must_use]
    pub fn available_periods(&self) -> usize {
        self.periods.len()
    }

    /// Clamp a requested window to the periods actually present
    #[must_use]
    pub fn clamp_window(&self, requested: usize) -> usize {
        requested.min(self.available_periods())
    }
}

fn normalize_to_fahrenheit(mut period: ForecastPeriod) -> ForecastPeriod {
    if period
        .temperature_unit
        .as_deref()
        .is_some_and(|unit| unit.eq_ignore_ascii_case("C"))
    {
        period.temperature = conversion::fahrenheit(period.temperature);
        period.temperature_unit = Some("F".to_string());
    }
    period
}

/// NWS GeoJSON forecast response structures
mod wire {
    use super::{ForecastDocument, ForecastPeriod, GeoPoint};
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct NwsForecast {
        #[serde(default)]
        pub geometry: Option<NwsGeometry>,
        pub properties: NwsForecastProperties,
    }

    #[derive(Debug, Deserialize)]
    pub struct NwsGeometry {
        /// Polygon rings of `[lon, lat]` positions
        #[serde(default)]
        pub coordinates: Vec<Vec<[f64; 2]>>,
    }

    #[derive(Debug, Deserialize)]
    pub struct NwsForecastProperties {
        pub periods: Vec<ForecastPeriod>,
    }

    impl From<NwsForecast> for ForecastDocument {
        fn from(forecast: NwsForecast) -> Self {
            let polygon = forecast
                .geometry
                .and_then(|geometry| geometry.coordinates.into_iter().next())
                .unwrap_or_default()
                .into_iter()
                .map(|[lon, lat]| GeoPoint::new(lat, lon))
                .collect();

            ForecastDocument::new(forecast.properties.periods, polygon)
        }
    }
}
