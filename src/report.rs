//! Final output: locations, address, query results and data attributions

use crate::models::GeoPoint;
use std::fmt;

pub const FORWARD_GEOCODING_ATTRIBUTION: &str = "**Forward geocoding data from OpenStreetMap";
pub const REVERSE_GEOCODING_ATTRIBUTION: &str = "**Reverse geocoding data from OpenStreetMap";
pub const WEATHER_ATTRIBUTION: &str =
    "**Real-time weather data from National Weather Service, United States Department of Commerce";

/// Which remote services supplied data for this run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Attributions {
    pub forward_geocoding: bool,
    pub weather: bool,
    pub reverse_geocoding: bool,
}

impl Attributions {
    fn lines(self) -> impl Iterator<Item = &'static str> {
        [
            (self.forward_geocoding, FORWARD_GEOCODING_ATTRIBUTION),
            (self.reverse_geocoding, REVERSE_GEOCODING_ATTRIBUTION),
            (self.weather, WEATHER_ATTRIBUTION),
        ]
        .into_iter()
        .filter_map(|(used, line)| used.then_some(line))
    }
}

/// A completed run, ready to print
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub target: GeoPoint,
    pub forecast: GeoPoint,
    pub address: String,
    pub results: Vec<String>,
    pub attributions: Attributions,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "TARGET {}", self.target)?;
        writeln!(f, "FORECAST {}", self.forecast)?;
        writeln!(f, "{}", self.address)?;
        for result in &self.results {
            writeln!(f, "{result}")?;
        }

        writeln!(f)?;
        for line in self.attributions.lines() {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
