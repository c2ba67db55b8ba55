//! Nominatim (OpenStreetMap) forward and reverse geocoding sources

use super::DataSource;
use crate::api::ApiClient;
use crate::config::NominatimConfig;
use crate::models::{GeoPoint, GeocodeCandidate, ReverseGeocodeResult};
use crate::Result;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Free-text location search
#[derive(Debug, Clone)]
pub struct NominatimSearch {
    client: ApiClient,
    base_url: String,
    referer: String,
    query: String,
    min_interval: Duration,
}

impl NominatimSearch {
    #[must_use]
    pub fn new(client: ApiClient, config: &NominatimConfig, query: impl Into<String>) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            referer: config.referer.clone(),
            query: query.into(),
            min_interval: Duration::from_millis(config.min_interval_ms),
        }
    }

    #[must_use]
    pub fn search_url(&self) -> String {
        format!(
            "{}/search?q={}&format=jsonv2",
            self.base_url,
            urlencoding::encode(&self.query)
        )
    }
}

impl DataSource for NominatimSearch {
    type Document = Vec<GeocodeCandidate>;

    fn is_remote(&self) -> bool {
        true
    }

    #[instrument(skip(self), fields(query = %self.query))]
    async fn fetch(&self) -> Result<Vec<GeocodeCandidate>> {
        let headers = [("Referer", self.referer.as_str())];
        let candidates: Vec<GeocodeCandidate> =
            self.client.get_json(&self.search_url(), &headers).await?;

        if candidates.is_empty() {
            warn!("No results found for location '{}'", self.query);
        } else {
            info!(
                "Found {} geocoding results for '{}'",
                candidates.len(),
                self.query
            );
        }

        // Nominatim's usage policy allows one request per second
        if !self.min_interval.is_zero() {
            debug!("Pausing {:?} before the next Nominatim request", self.min_interval);
            tokio::time::sleep(self.min_interval).await;
        }

        Ok(candidates)
    }
}

/// Address lookup for a point
#[derive(Debug, Clone)]
pub struct NominatimReverse {
    client: ApiClient,
    base_url: String,
    referer: String,
    point: GeoPoint,
}

impl NominatimReverse {
    #[must_use]
    pub fn new(client: ApiClient, config: &NominatimConfig, point: GeoPoint) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            referer: config.referer.clone(),
            point,
        }
    }

    #[must_use]
    pub fn reverse_url(&self) -> String {
        format!(
            "{}/reverse?lat={}&lon={}&format=jsonv2",
            self.base_url, self.point.latitude, self.point.longitude
        )
    }
}

impl DataSource for NominatimReverse {
    type Document = ReverseGeocodeResult;

    fn is_remote(&self) -> bool {
        true
    }

    #[instrument(skip(self), fields(lat = self.point.latitude, lon = self.point.longitude))]
    async fn fetch(&self) -> Result<ReverseGeocodeResult> {
        let headers = [("Referer", self.referer.as_str())];
        let result: ReverseGeocodeResult =
            self.client.get_json(&self.reverse_url(), &headers).await?;

        match (&result.display_name, &result.error) {
            (Some(name), _) => info!("Reverse geocoded to: {}", name),
            (None, Some(error)) => warn!("Reverse geocoding failed: {}", error),
            (None, None) => warn!("Reverse geocoding returned no display name"),
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;
    use crate::models::Coordinate;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(server: &MockServer) -> (ApiClient, NominatimConfig) {
        let client = ApiClient::new(&HttpConfig {
            timeout_seconds: 5,
            max_retries: 0,
        })
        .unwrap();
        let config = NominatimConfig {
            base_url: server.uri(),
            referer: "https://example.com/wxquery".to_string(),
            min_interval_ms: 0,
        };
        (client, config)
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("q", "Bren Events Center, Irvine, CA"))
            .and(query_param("format", "jsonv2"))
            .and(header("Referer", "https://example.com/wxquery"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"lat": "33.6459", "lon": "-117.8422", "display_name": "Bren Events Center"}]"#,
            ))
            .mount(&server)
            .await;

        let (client, config) = config(&server);
        let search = NominatimSearch::new(client, &config, "Bren Events Center, Irvine, CA");
        let candidates = search.fetch().await.unwrap();

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].lat, Coordinate::Text("33.6459".into()));
        assert!(search.is_remote());
    }

    #[tokio::test]
    async fn test_search_with_no_results() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
            .mount(&server)
            .await;

        let (client, config) = config(&server);
        let candidates = NominatimSearch::new(client, &config, "Atlantis")
            .fetch()
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_reverse_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/reverse"))
            .and(query_param("lat", "33.64"))
            .and(query_param("lon", "-117.84"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"place_id": 7, "display_name": "Irvine, Orange County, California, United States"}"#,
            ))
            .mount(&server)
            .await;

        let (client, config) = config(&server);
        let result = NominatimReverse::new(client, &config, GeoPoint::new(33.64, -117.84))
            .fetch()
            .await
            .unwrap();
        assert_eq!(
            result.display_name.as_deref(),
            Some("Irvine, Orange County, California, United States")
        );
    }

    #[tokio::test]
    async fn test_search_url_format() {
        let server = MockServer::start().await;
        let (client, config) = config(&server);
        let search = NominatimSearch::new(client, &config, "Irvine CA");
        assert_eq!(
            search.search_url(),
            format!("{}/search?q=Irvine%20CA&format=jsonv2", server.uri())
        );
    }
}
