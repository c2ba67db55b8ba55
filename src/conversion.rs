//! Temperature conversion and feels-like formulas
//!
//! All temperatures are Fahrenheit unless a function says otherwise. The
//! formulas are evaluated over their whole numeric domain; callers decide
//! where each one applies.

use crate::WxQueryError;
use std::fmt;
use std::str::FromStr;

/// Temperature scale requested by a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureScale {
    Fahrenheit,
    Celsius,
}

impl TemperatureScale {
    /// Express a Fahrenheit temperature in this scale
    #[must_use]
    pub fn convert_fahrenheit(self, temperature: f64) -> f64 {
        match self {
            TemperatureScale::Fahrenheit => temperature,
            TemperatureScale::Celsius => celsius(temperature),
        }
    }
}

impl FromStr for TemperatureScale {
    type Err = WxQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "F" => Ok(TemperatureScale::Fahrenheit),
            "C" => Ok(TemperatureScale::Celsius),
            other => Err(WxQueryError::validation(format!(
                "Unknown temperature scale '{other}', expected F or C"
            ))),
        }
    }
}

impl fmt::Display for TemperatureScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemperatureScale::Fahrenheit => f.write_str("F"),
            TemperatureScale::Celsius => f.write_str("C"),
        }
    }
}

/// Fahrenheit to Celsius
#[must_use]
pub fn celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) * (5.0 / 9.0)
}

/// Celsius to Fahrenheit
#[must_use]
pub fn fahrenheit(celsius: f64) -> f64 {
    celsius * (9.0 / 5.0) + 32.0
}

/// Rothfusz heat index for temperature `t` (°F) and relative humidity `h` (%)
#[must_use]
pub fn heat_index(t: f64, h: f64) -> f64 {
    -42.379 + 2.049_015_23 * t + 10.143_331_27 * h
        - 0.224_755_41 * t * h
        - 0.006_837_83 * t * t
        - 0.054_817_17 * h * h
        + 0.001_228_74 * t * t * h
        + 0.000_852_82 * t * h * h
        - 0.000_001_99 * t * t * h * h
}

/// NWS wind chill for temperature `t` (°F) and wind speed `w` (mph)
#[must_use]
pub fn wind_chill(t: f64, w: f64) -> f64 {
    let wind_factor = w.powf(0.16);
    35.74 + 0.6215 * t - 35.75 * wind_factor + 0.4275 * t * wind_factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPSILON: f64 = 1e-9;

    #[rstest]
    #[case(32.0, 0.0)]
    #[case(212.0, 100.0)]
    #[case(-40.0, -40.0)]
    #[case(68.0, 20.0)]
    fn test_celsius(#[case] fahrenheit_value: f64, #[case] expected: f64) {
        assert!((celsius(fahrenheit_value) - expected).abs() < EPSILON);
    }

    #[rstest]
    #[case(-273.15)]
    #[case(-12.5)]
    #[case(0.0)]
    #[case(37.0)]
    #[case(1.0e6)]
    fn test_round_trip(#[case] value: f64) {
        assert!((celsius(fahrenheit(value)) - value).abs() < 1e-6);
        assert!((fahrenheit(celsius(value)) - value).abs() < 1e-6);
    }

    #[test]
    fn test_heat_index_reference_values() {
        assert!((heat_index(68.0, 50.0) - 77.350_842_22).abs() < 1e-6);
        assert!((heat_index(90.0, 60.0) - 99.677_717_9).abs() < 1e-6);
    }

    #[test]
    fn test_wind_chill_reference_values() {
        assert!((wind_chill(50.0, 4.0) - 48.870_248_359_539_33).abs() < 1e-9);
        assert!((wind_chill(30.0, 10.0) - 21.248_293_255_649_617).abs() < 1e-9);
    }

    #[test]
    fn test_formulas_are_total() {
        assert!(heat_index(-100.0, 0.0).is_finite());
        assert!(wind_chill(120.0, 0.0).is_finite());
    }

    #[test]
    fn test_scale_parsing() {
        assert_eq!("F".parse::<TemperatureScale>().unwrap(), TemperatureScale::Fahrenheit);
        assert_eq!("C".parse::<TemperatureScale>().unwrap(), TemperatureScale::Celsius);
        assert!("K".parse::<TemperatureScale>().is_err());
    }

    #[test]
    fn test_scale_applies_conversion() {
        assert_eq!(TemperatureScale::Fahrenheit.convert_fahrenheit(50.0), 50.0);
        assert!((TemperatureScale::Celsius.convert_fahrenheit(50.0) - 10.0).abs() < EPSILON);
    }
}
