//! Nominatim geocoding result models

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate as Nominatim sends it: `jsonv2` uses strings, other formats numbers
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Numeric value, parsing the textual form if needed
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            Coordinate::Number(value) => Some(*value),
            Coordinate::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Number(value) => write!(f, "{value}"),
            Coordinate::Text(text) => f.write_str(text),
        }
    }
}

/// One candidate match from a forward geocoding search
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeocodeCandidate {
    pub lat: Coordinate,
    pub lon: Coordinate,
    #[serde(default)]
    pub display_name: String,
}

/// Reverse geocoding answer; Nominatim reports misses as `{ "error": ... }`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ReverseGeocodeResult {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
