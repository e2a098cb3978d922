//! OpenStreetMap geocoding client.
//!
//! Searches Nominatim first, retries nationwide when a biased search finds
//! too little, and falls back to Photon as a last resort.

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::Coordinate;

use super::error::GeocodeError;
use super::rank::{PlacePreferences, rank_places};
use super::types::{NominatimPlaceDto, NominatimReverseDto, Place, PhotonResponseDto};

/// Default base URL for Nominatim.
const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default base URL for Photon.
const DEFAULT_PHOTON_URL: &str = "https://photon.komoot.io";

/// Default user agent. Nominatim rejects requests without one.
const DEFAULT_USER_AGENT: &str = concat!("stitch-server/", env!("CARGO_PKG_VERSION"));

/// Half-width of the bias box around `near`, in degrees.
const VIEWBOX_HALF_DEGREES: f64 = 0.25;

/// A search with fewer results than this is retried more broadly.
const MIN_USEFUL_RESULTS: usize = 2;

/// Queries shorter than this (after trimming) are not searched.
const MIN_QUERY_CHARS: usize = 2;

/// Configuration for the geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeConfig {
    /// Base URL for Nominatim
    pub nominatim_url: String,
    /// Base URL for Photon
    pub photon_url: String,
    /// User-Agent header sent with every request
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Names that boost relevance
    pub preferences: PlacePreferences,
}

impl GeocodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom base URLs (for testing or a self-hosted instance).
    pub fn with_base_urls(
        mut self,
        nominatim: impl Into<String>,
        photon: impl Into<String>,
    ) -> Self {
        self.nominatim_url = nominatim.into().trim_end_matches('/').to_string();
        self.photon_url = photon.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn with_preferences(mut self, preferences: PlacePreferences) -> Self {
        self.preferences = preferences;
        self
    }
}

impl Default for GeocodeConfig {
    fn default() -> Self {
        Self {
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            photon_url: DEFAULT_PHOTON_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            preferences: PlacePreferences::default(),
        }
    }
}

/// Per-search parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchParams {
    /// ISO country codes to restrict Nominatim to (comma-separated)
    pub country: Option<String>,
    /// Point to bias results towards
    pub near: Option<Coordinate>,
    /// Maximum results returned
    pub limit: usize,
}

impl SearchParams {
    pub fn with_country(mut self, country: Option<String>) -> Self {
        self.country = country;
        self
    }

    pub fn with_near(mut self, near: Option<Coordinate>) -> Self {
        self.near = near;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            country: Some("bd".to_string()),
            near: None,
            limit: 8,
        }
    }
}

/// Nominatim `viewbox` parameter: `west,north,east,south`.
fn viewbox(near: &Coordinate) -> String {
    format!(
        "{},{},{},{}",
        near.longitude() - VIEWBOX_HALF_DEGREES,
        near.latitude() + VIEWBOX_HALF_DEGREES,
        near.longitude() + VIEWBOX_HALF_DEGREES,
        near.latitude() - VIEWBOX_HALF_DEGREES,
    )
}

/// Geocoding client.
#[derive(Debug, Clone)]
pub struct GeocodeClient {
    http: reqwest::Client,
    nominatim_url: String,
    photon_url: String,
    preferences: PlacePreferences,
}

impl GeocodeClient {
    /// Create a new geocoding client.
    pub fn new(config: GeocodeConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            nominatim_url: config.nominatim_url,
            photon_url: config.photon_url,
            preferences: config.preferences,
        })
    }

    /// Search for places matching `query`.
    ///
    /// The first Nominatim request must succeed; failures in the broader
    /// retries are logged and the results found so far are kept.
    pub async fn search(
        &self,
        query: &str,
        params: &SearchParams,
    ) -> Result<Vec<Place>, GeocodeError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }

        let mut places = self
            .nominatim_search(query, params.country.as_deref(), params.near.as_ref(), params.limit)
            .await?;

        if places.len() < MIN_USEFUL_RESULTS {
            debug!(query, found = places.len(), "Retrying geocode nationwide");
            match self
                .nominatim_search(query, params.country.as_deref(), None, params.limit)
                .await
            {
                Ok(more) => places.extend(more),
                Err(e) => warn!(query, error = %e, "Nationwide geocode retry failed"),
            }
        }

        if places.len() < MIN_USEFUL_RESULTS {
            debug!(query, found = places.len(), "Falling back to Photon");
            match self.photon_search(query, params.near.as_ref(), params.limit).await {
                Ok(more) => places.extend(more),
                Err(e) => warn!(query, error = %e, "Photon fallback failed"),
            }
        }

        Ok(rank_places(places, &self.preferences, params.limit))
    }

    /// Human-readable name for a coordinate.
    ///
    /// Falls back to the formatted coordinate when the service knows no name.
    pub async fn reverse(&self, coordinate: Coordinate) -> Result<String, GeocodeError> {
        let url = format!("{}/reverse", self.nominatim_url);
        let query = [
            ("format", "json".to_string()),
            ("lat", coordinate.latitude().to_string()),
            ("lon", coordinate.longitude().to_string()),
        ];

        let response: NominatimReverseDto = self.get_json(&url, &query).await?;

        Ok(response
            .display_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| coordinate.to_string()))
    }

    async fn nominatim_search(
        &self,
        query: &str,
        country: Option<&str>,
        near: Option<&Coordinate>,
        limit: usize,
    ) -> Result<Vec<Place>, GeocodeError> {
        let url = format!("{}/search", self.nominatim_url);
        let mut params = vec![
            ("q", query.to_string()),
            ("format", "json".to_string()),
            ("addressdetails", "1".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(country) = country.filter(|c| !c.is_empty()) {
            params.push(("countrycodes", country.to_string()));
        }
        // Bias only; `bounded` is never set
        if let Some(near) = near {
            params.push(("viewbox", viewbox(near)));
        }

        let hits: Vec<NominatimPlaceDto> = self.get_json(&url, &params).await?;
        Ok(hits.into_iter().filter_map(NominatimPlaceDto::into_place).collect())
    }

    async fn photon_search(
        &self,
        query: &str,
        near: Option<&Coordinate>,
        limit: usize,
    ) -> Result<Vec<Place>, GeocodeError> {
        let url = format!("{}/api/", self.photon_url);
        let mut params = vec![
            ("q", query.to_string()),
            ("lang", "en".to_string()),
            ("limit", limit.to_string()),
        ];
        if let Some(near) = near {
            params.push(("lat", near.latitude().to_string()));
            params.push(("lon", near.longitude().to_string()));
        }

        let response: PhotonResponseDto = self.get_json(&url, &params).await?;
        Ok(response
            .features
            .into_iter()
            .enumerate()
            .filter_map(|(idx, feature)| feature.into_place(idx))
            .collect())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, GeocodeError> {
        let response = self
            .http
            .get(url)
            .query(query)
            .header(reqwest::header::ACCEPT_LANGUAGE, "en")
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(GeocodeError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeocodeError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        serde_json::from_str(&body).map_err(|e| GeocodeError::Json {
            message: e.to_string(),
        })
    }
}
