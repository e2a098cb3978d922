//! HTTP directions client.
//!
//! Talks to a Google Directions compatible endpoint. Handles the API key,
//! limits concurrent requests, and reduces a response to a `RouteSummary`.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::{Coordinate, LegMode};

use super::error::DirectionsError;
use super::types::DirectionsResponse;
use super::{DirectionsProvider, RouteSummary};

/// Default base URL for the directions API.
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 8;

/// Configuration for the HTTP directions client.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// API key sent as the `key` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Maximum concurrent requests across all plans
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl DirectionsConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 15,
        }
    }

    /// Set a custom base URL (for testing or a self-hosted proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Directions API client.
///
/// Uses a semaphore to limit concurrent requests and avoid rate limiting.
#[derive(Debug, Clone)]
pub struct HttpDirectionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    semaphore: Arc<Semaphore>,
}

impl HttpDirectionsClient {
    /// Create a new client with the given configuration.
    pub fn new(config: DirectionsConfig) -> Result<Self, DirectionsError> {
        if config.api_key.trim().is_empty() {
            return Err(DirectionsError::NotConfigured(
                "directions API key is empty".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// Request directions for a single mode.
    pub async fn directions(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> Result<RouteSummary, DirectionsError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| DirectionsError::NotConfigured("semaphore closed".to_string()))?;

        let url = format!("{}/directions/json", self.base_url);

        trace!(%origin, %destination, %mode, "Requesting directions");

        let response = self
            .http
            .get(&url)
            .query(&[
                ("origin", origin.to_query_param()),
                ("destination", destination.to_query_param()),
                ("mode", mode.as_str().to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(DirectionsError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(DirectionsError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: DirectionsResponse =
            serde_json::from_str(&body).map_err(|e| DirectionsError::Json {
                message: e.to_string(),
            })?;

        summarize(parsed)
    }
}

impl DirectionsProvider for HttpDirectionsClient {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> Result<RouteSummary, DirectionsError> {
        self.directions(origin, destination, mode).await
    }
}

/// Reduce a directions response to the first route's total distance and duration.
pub(crate) fn summarize(response: DirectionsResponse) -> Result<RouteSummary, DirectionsError> {
    let message = response.error_message.unwrap_or_default();

    match response.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" | "NOT_FOUND" => return Err(DirectionsError::NoRoute),
        "REQUEST_DENIED" => return Err(DirectionsError::Unauthorized),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => return Err(DirectionsError::RateLimited),
        other => {
            return Err(DirectionsError::Status {
                status: other.to_string(),
                message,
            });
        }
    }

    let route = response.routes.first().ok_or(DirectionsError::NoRoute)?;
    if route.legs.is_empty() {
        return Err(DirectionsError::NoRoute);
    }

    // Multi-waypoint routes report one leg per waypoint pair
    let (distance_meters, duration_seconds) = route
        .legs
        .iter()
        .fold((0.0, 0.0), |(d, t), leg| (d + leg.distance.value, t + leg.duration.value));

    Ok(RouteSummary {
        distance_meters,
        duration_seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> DirectionsResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn config_defaults() {
        let config = DirectionsConfig::new("test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.max_concurrent, DEFAULT_MAX_CONCURRENT);
        assert_eq!(config.timeout_secs, 15);
    }

    #[test]
    fn config_builders() {
        let config = DirectionsConfig::new("k")
            .with_base_url("http://localhost:8080/")
            .with_max_concurrent(2)
            .with_timeout(3);
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.max_concurrent, 2);
        assert_eq!(config.timeout_secs, 3);
    }

    #[test]
    fn empty_key_is_not_configured() {
        let result = HttpDirectionsClient::new(DirectionsConfig::new("  "));
        assert!(matches!(result, Err(DirectionsError::NotConfigured(_))));
    }

    #[test]
    fn summarize_ok_response() {
        let response = parse(
            r#"{
                "status": "OK",
                "routes": [
                    {"legs": [{"distance": {"value": 2300, "text": "2.3 km"},
                               "duration": {"value": 540, "text": "9 mins"}}]},
                    {"legs": [{"distance": {"value": 9999}, "duration": {"value": 9999}}]}
                ]
            }"#,
        );

        let summary = summarize(response).unwrap();
        assert_eq!(summary.distance_meters, 2_300.0);
        assert_eq!(summary.duration_seconds, 540.0);
    }

    #[test]
    fn summarize_sums_legs_of_first_route() {
        let response = parse(
            r#"{"status": "OK", "routes": [{"legs": [
                {"distance": {"value": 100}, "duration": {"value": 10}},
                {"distance": {"value": 200}, "duration": {"value": 20}}
            ]}]}"#,
        );

        let summary = summarize(response).unwrap();
        assert_eq!(summary.distance_meters, 300.0);
        assert_eq!(summary.duration_seconds, 30.0);
    }

    #[test]
    fn summarize_zero_results_is_no_route() {
        let response = parse(r#"{"status": "ZERO_RESULTS", "routes": []}"#);
        assert!(matches!(summarize(response), Err(DirectionsError::NoRoute)));
    }

    #[test]
    fn summarize_ok_without_routes_is_no_route() {
        let response = parse(r#"{"status": "OK"}"#);
        assert!(matches!(summarize(response), Err(DirectionsError::NoRoute)));

        let response = parse(r#"{"status": "OK", "routes": [{"legs": []}]}"#);
        assert!(matches!(summarize(response), Err(DirectionsError::NoRoute)));
    }

    #[test]
    fn summarize_maps_failure_statuses() {
        let denied = parse(r#"{"status": "REQUEST_DENIED", "error_message": "bad key"}"#);
        assert!(matches!(summarize(denied), Err(DirectionsError::Unauthorized)));

        let limited = parse(r#"{"status": "OVER_QUERY_LIMIT"}"#);
        assert!(matches!(summarize(limited), Err(DirectionsError::RateLimited)));

        let invalid = parse(r#"{"status": "INVALID_REQUEST", "error_message": "missing origin"}"#);
        match summarize(invalid) {
            Err(DirectionsError::Status { status, message }) => {
                assert_eq!(status, "INVALID_REQUEST");
                assert_eq!(message, "missing origin");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
