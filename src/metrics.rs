//! Per-metric extraction and the extremum queries built on it
//!
//! Every query kind reads one number per forecast period, feeds the
//! (value, start time) pairs to [`extremum::reduce`] and formats the
//! winner as `<UTC timestamp> <value>[%]`.

use crate::conversion::{self, TemperatureScale};
use crate::extremum::{self, Extremum, Limit};
use crate::models::{ForecastDocument, ForecastPeriod, QuantitativeValue};
use crate::{Result, WxQueryError};
use chrono::{DateTime, FixedOffset, Utc};
use std::fmt;
use tracing::debug;

/// At or above this temperature (°F) the heat index applies
pub const HEAT_INDEX_THRESHOLD_F: f64 = 68.0;
/// At or below this temperature (°F) the wind chill may apply
pub const WIND_CHILL_THRESHOLD_F: f64 = 50.0;
/// Wind chill only applies to winds strictly above this speed (mph)
pub const WIND_CHILL_MIN_WIND_MPH: f64 = 3.0;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The quantity a query scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    /// Air temperature
    AirTemperature(TemperatureScale),
    /// Heat index / wind chill adjusted temperature
    FeelsLike(TemperatureScale),
    /// Relative humidity in percent
    Humidity,
    /// Wind speed in mph
    WindSpeed,
    /// Chance of precipitation in percent
    Precipitation,
}

impl Metric {
    /// The value this metric reads from one period
    pub fn sample(self, period: &ForecastPeriod) -> Result<f64> {
        match self {
            Metric::AirTemperature(scale) => Ok(scale.convert_fahrenheit(period.temperature)),
            Metric::FeelsLike(scale) => Ok(scale.convert_fahrenheit(feels_like(period)?)),
            Metric::Humidity => percentage(period.relative_humidity, "relativeHumidity", period),
            Metric::WindSpeed => parse_wind_speed(&period.wind_speed),
            Metric::Precipitation => percentage(
                period.probability_of_precipitation,
                "probabilityOfPrecipitation",
                period,
            ),
        }
    }

    /// Whether results carry a `%` suffix
    #[must_use]
    pub fn is_percentage(self) -> bool {
        matches!(self, Metric::Humidity | Metric::Precipitation)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::AirTemperature(scale) => write!(f, "TEMPERATURE AIR {scale}"),
            Metric::FeelsLike(scale) => write!(f, "TEMPERATURE FEELS {scale}"),
            Metric::Humidity => f.write_str("HUMIDITY"),
            Metric::WindSpeed => f.write_str("WIND"),
            Metric::Precipitation => f.write_str("PRECIPITATION"),
        }
    }
}

/// Feels-like temperature (°F) for one period.
///
/// Heat index from 68°F up, wind chill at 50°F and below when the wind is
/// above 3 mph, the air temperature otherwise.
pub fn feels_like(period: &ForecastPeriod) -> Result<f64> {
    let temperature = period.temperature;
    let wind = parse_wind_speed(&period.wind_speed)?;

    if temperature >= HEAT_INDEX_THRESHOLD_F {
        let humidity = percentage(period.relative_humidity, "relativeHumidity", period)?;
        Ok(conversion::heat_index(temperature, humidity))
    } else if temperature <= WIND_CHILL_THRESHOLD_F && wind > WIND_CHILL_MIN_WIND_MPH {
        Ok(conversion::wind_chill(temperature, wind))
    } else {
        Ok(temperature)
    }
}

/// Leading number of an NWS wind speed such as `"10 mph"` or `"5 to 10 mph"`
pub fn parse_wind_speed(wind_speed: &str) -> Result<f64> {
    wind_speed
        .split_whitespace()
        .next()
        .and_then(|speed| speed.parse::<f64>().ok())
        .ok_or_else(|| WxQueryError::format(format!("Unparseable wind speed '{wind_speed}'")))
}

fn percentage(value: QuantitativeValue, field: &str, period: &ForecastPeriod) -> Result<f64> {
    value.value.ok_or_else(|| {
        WxQueryError::invalid_data(format!(
            "Period starting {} has no {field} value",
            period.start_time.to_rfc3339()
        ))
    })
}

/// Scan the first `window` periods (clamped to what is available) for `metric`
pub fn find_extremum(
    metric: Metric,
    forecast: &ForecastDocument,
    window: usize,
    limit: Limit,
) -> Result<Extremum<DateTime<FixedOffset>>> {
    let length = forecast.clamp_window(window);
    if length < window {
        debug!(
            "Query window of {} hours clamped to {} available periods",
            window, length
        );
    }

    let samples = forecast.periods[..length]
        .iter()
        .map(|period| -> Result<(f64, DateTime<FixedOffset>)> {
            Ok((metric.sample(period)?, period.start_time))
        })
        .collect::<Result<Vec<_>>>()?;

    extremum::reduce(samples, limit).ok_or_else(|| {
        WxQueryError::validation(format!("{metric} {limit} query has an empty window"))
    })
}

/// Run one extremum query and format its result line
pub fn compute_extremum(
    metric: Metric,
    forecast: &ForecastDocument,
    window: usize,
    limit: Limit,
) -> Result<String> {
    let best = find_extremum(metric, forecast, window, limit)?;
    debug!(
        "{} {} over {} hours: {} at {}",
        metric, limit, window, best.value, best.timestamp
    );
    Ok(format_result(&best, metric.is_percentage()))
}

/// `<UTC timestamp> <value to 4 places>[%]`
#[must_use]
pub fn format_result(result: &Extremum<DateTime<FixedOffset>>, percent: bool) -> String {
    let suffix = if percent { "%" } else { "" };
    format!(
        "{} {:.4}{suffix}",
        result.timestamp.with_timezone(&Utc).format(TIMESTAMP_FORMAT),
        result.value
    )
}
