//! Forecast-area centroid and geocoding point extraction

use crate::models::{GeoPoint, GeocodeCandidate, ReverseGeocodeResult};
use crate::{Result, WxQueryError};
use std::collections::HashSet;

/// Mean latitude and mean longitude of the unique vertices of `vertices`.
///
/// Vertices are compared as exact coordinate pairs, so the closing vertex of
/// a ring counts once. Sums run in first-occurrence order.
pub fn centroid_of(vertices: &[GeoPoint]) -> Result<GeoPoint> {
    let mut seen = HashSet::with_capacity(vertices.len());
    let unique: Vec<&GeoPoint> = vertices
        .iter()
        .filter(|vertex| seen.insert(vertex_key(vertex)))
        .collect();

    if unique.is_empty() {
        return Err(WxQueryError::invalid_data(
            "Forecast area polygon has no vertices",
        ));
    }

    let (lat_sum, lon_sum) = unique.iter().fold((0.0, 0.0), |(lat, lon), vertex| {
        (lat + vertex.latitude, lon + vertex.longitude)
    });
    let count = unique.len() as f64;

    Ok(GeoPoint::new(lat_sum / count, lon_sum / count))
}

/// Bit pattern key; adding `0.0` folds `-0.0` into `0.0`
fn vertex_key(vertex: &GeoPoint) -> (u64, u64) {
    (
        (vertex.latitude + 0.0).to_bits(),
        (vertex.longitude + 0.0).to_bits(),
    )
}

/// Location of the best (first) forward geocoding candidate
pub fn first_geocode_point(results: &[GeocodeCandidate]) -> Result<GeoPoint> {
    let best = results
        .first()
        .ok_or_else(|| WxQueryError::not_found("Forward geocoding returned no results"))?;

    let latitude = best.lat.to_f64().ok_or_else(|| {
        WxQueryError::invalid_data(format!("Unparseable latitude '{}'", best.lat))
    })?;
    let longitude = best.lon.to_f64().ok_or_else(|| {
        WxQueryError::invalid_data(format!("Unparseable longitude '{}'", best.lon))
    })?;

    Ok(GeoPoint::new(latitude, longitude))
}

/// Display name of a reverse geocoding result
pub fn reverse_address(result: &ReverseGeocodeResult) -> Result<String> {
    if let Some(error) = &result.error {
        return Err(WxQueryError::not_found(format!(
            "Reverse geocoding failed: {error}"
        )));
    }

    result
        .display_name
        .clone()
        .ok_or_else(|| WxQueryError::invalid_data("Reverse geocoding result has no display name"))
}
