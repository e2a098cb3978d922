//! Wire types for the directions API (Google Directions JSON shape).
//!
//! Only the fields the planner needs are modelled.

use serde::Deserialize;

/// Top-level directions response.
#[derive(Debug, Clone, Deserialize)]
pub struct DirectionsResponse {
    /// `OK`, `ZERO_RESULTS`, `NOT_FOUND`, `REQUEST_DENIED`, ...
    pub status: String,

    #[serde(default)]
    pub error_message: Option<String>,

    #[serde(default)]
    pub routes: Vec<RouteDto>,
}

/// One alternative route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteDto {
    #[serde(default)]
    pub legs: Vec<RouteLegDto>,
}

/// A leg between two waypoints of a route.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteLegDto {
    pub distance: ValueDto,
    pub duration: ValueDto,
}

/// A numeric value with its human-readable text.
#[derive(Debug, Clone, Deserialize)]
pub struct ValueDto {
    /// Metres for distances, seconds for durations
    pub value: f64,

    #[serde(default)]
    pub text: Option<String>,
}
