//! Geographic point model

use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in decimal degrees, within [-90, 90]
    pub latitude: f64,
    /// Longitude in decimal degrees, within [-180, 180]
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a new point
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both coordinates are inside their valid ranges
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Latitude as `<abs>/<N|S>`
    #[must_use]
    pub fn format_latitude(&self) -> String {
        let hemisphere = if self.latitude < 0.0 { 'S' } else { 'N' };
        format!("{}/{hemisphere}", format_degrees(self.latitude.abs()))
    }

    /// Longitude as `<abs>/<E|W>`
    #[must_use]
    pub fn format_longitude(&self) -> String {
        let hemisphere = if self.longitude < 0.0 { 'W' } else { 'E' };
        format!("{}/{hemisphere}", format_degrees(self.longitude.abs()))
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format_latitude(), self.format_longitude())
    }
}

/// Shortest round-trip decimal, keeping one fractional digit for whole numbers.
fn format_degrees(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hemisphere_formatting() {
        let point = GeoPoint::new(33.6459, -117.8422);
        assert_eq!(point.to_string(), "33.6459/N 117.8422/W");

        let southern = GeoPoint::new(-23.0, 32.5);
        assert_eq!(southern.to_string(), "23.0/S 32.5/E");
    }

    #[test]
    fn test_zero_is_north_and_east() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_eq!(origin.to_string(), "0.0/N 0.0/E");
    }

    #[test]
    fn test_validity() {
        assert!(GeoPoint::new(90.0, -180.0).is_valid());
        assert!(!GeoPoint::new(90.5, 0.0).is_valid());
        assert!(!GeoPoint::new(0.0, 181.0).is_valid());
    }
}
