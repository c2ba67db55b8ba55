//! HTTP client shared by the NWS and Nominatim sources
//!
//! Wraps `reqwest` with retry middleware and maps every way a JSON GET can
//! fail onto a [`FetchFailure`] so the caller can print the failure report.

use crate::config::HttpConfig;
use crate::error::FetchFailure;
use crate::{Result, WxQueryError};
use anyhow::Context;
use reqwest::StatusCode;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, instrument, warn};

/// Responses slower than this are logged as warnings
const SLOW_RESPONSE: Duration = Duration::from_secs(5);

/// JSON-over-HTTP client with transient-failure retries
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: ClientWithMiddleware,
}

impl ApiClient {
    /// Create a new client from the HTTP settings
    pub fn new(config: &HttpConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.timeout_seconds.into());

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .with_context(|| "Failed to create HTTP client")?;

        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Ok(Self { client })
    }

    /// GET `url` with `headers` and decode the body as JSON.
    ///
    /// Fails with a fetch error whose origin is `<status> <url>` once a
    /// status is known, or just the URL when the request never completed.
    #[instrument(skip(self, headers))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<T> {
        let start_time = Instant::now();

        let request = headers
            .iter()
            .fold(self.client.get(url), |request, (name, value)| {
                request.header(*name, *value)
            });

        debug!("Sending request");
        let response = request.send().await.map_err(|e| {
            warn!("Network error for {}: {}", url, e);
            WxQueryError::fetch(url, FetchFailure::Network)
        })?;

        let status = response.status();
        let origin = format!("{} {}", status.as_u16(), url);
        if status != StatusCode::OK {
            error!(
                "Request failed with status: {} - {}",
                status,
                status.canonical_reason().unwrap_or("Unknown error")
            );
            return Err(WxQueryError::fetch(origin, FetchFailure::NotOk));
        }

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            WxQueryError::fetch(url, FetchFailure::Network)
        })?;

        let parse_start = Instant::now();
        let document = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {}", e);
            WxQueryError::fetch(origin, FetchFailure::Format)
        })?;

        let total_duration = start_time.elapsed();
        info!(
            "Successful API request in {:.3}s (parse: {:.3}s)",
            total_duration.as_secs_f64(),
            parse_start.elapsed().as_secs_f64()
        );
        if total_duration > SLOW_RESPONSE {
            warn!(
                "Slow API response detected: {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        Ok(document)
    }
}
