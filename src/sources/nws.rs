//! National Weather Service hourly forecast source
//!
//! The forecast is reached in two steps: `/points/{lat},{lon}` names the
//! grid's `forecastHourly` URL, which is then fetched.

use super::DataSource;
use crate::api::ApiClient;
use crate::config::NwsConfig;
use crate::models::{ForecastDocument, GeoPoint};
use crate::{Result, WxQueryError};
use serde::Deserialize;
use tracing::{info, instrument, warn};

const GEO_JSON: &str = "application/geo+json";

/// Hourly forecast for a point, from api.weather.gov
#[derive(Debug, Clone)]
pub struct NwsForecast {
    client: ApiClient,
    base_url: String,
    user_agent: String,
    point: GeoPoint,
}

#[derive(Debug, Deserialize)]
struct NwsPoints {
    properties: NwsPointsProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NwsPointsProperties {
    forecast_hourly: Option<String>,
}

impl NwsForecast {
    #[must_use]
    pub fn new(client: ApiClient, config: &NwsConfig, point: GeoPoint) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            point,
        }
    }

    /// URL of the points lookup for this forecast's location
    #[must_use]
    pub fn points_url(&self) -> String {
        format!(
            "{}/points/{},{}",
            self.base_url, self.point.latitude, self.point.longitude
        )
    }
}

impl DataSource for NwsForecast {
    type Document = ForecastDocument;

    fn is_remote(&self) -> bool {
        true
    }

    #[instrument(skip(self), fields(lat = self.point.latitude, lon = self.point.longitude))]
    async fn fetch(&self) -> Result<ForecastDocument> {
        let headers = [("User-Agent", self.user_agent.as_str()), ("Accept", GEO_JSON)];

        let points_url = self.points_url();
        let points: NwsPoints = self.client.get_json(&points_url, &headers).await?;
        let forecast_url = points.properties.forecast_hourly.ok_or_else(|| {
            warn!("Points response has no forecastHourly link");
            WxQueryError::invalid_data("NWS points response has no hourly forecast URL")
        })?;

        // Failures of either request are reported against the points URL
        let forecast: ForecastDocument = self
            .client
            .get_json(&forecast_url, &headers)
            .await
            .map_err(|err| match err {
                WxQueryError::Fetch { origin, reason } => {
                    WxQueryError::fetch(origin.replace(&forecast_url, &points_url), reason)
                }
                other => other,
            })?;

        info!(
            "Retrieved hourly forecast with {} periods",
            forecast.available_periods()
        );
        Ok(forecast)
    }
}
