//! Data transfer objects for web requests and responses.

use chrono::{NaiveTime, TimeDelta};
use serde::{Deserialize, Serialize};

use crate::domain::{ConnectorMode, HubId, Itinerary, Leg, Priority};
use crate::geocode::Place;
use crate::hubs::{HubDto, HubRegistry};
use crate::planner::{PlanError, PlanOptions, PlanResult};

/// Response listing the hub registry.
#[derive(Debug, Serialize)]
pub struct HubListResponse {
    pub hubs: Vec<HubDto>,
}

/// Request to search places by name.
#[derive(Debug, Deserialize)]
pub struct PlaceSearchRequest {
    /// Free-text query
    pub q: String,

    /// Optional bias point latitude
    pub lat: Option<f64>,

    /// Optional bias point longitude
    pub lng: Option<f64>,

    /// Maximum results (default 8)
    pub limit: Option<usize>,
}

/// A place in search results.
#[derive(Debug, Serialize)]
pub struct PlaceResult {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub source: String,
    pub place_type: Option<String>,
}

/// Response for place search.
#[derive(Debug, Serialize)]
pub struct PlaceSearchResponse {
    pub places: Vec<PlaceResult>,
}

/// Request for a reverse lookup.
#[derive(Debug, Deserialize)]
pub struct ReverseRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Response for a reverse lookup.
#[derive(Debug, Serialize)]
pub struct ReverseResponse {
    pub name: String,
}

/// Origin or destination of a plan request: a point or a place name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PlaceInput {
    Point { lat: f64, lng: f64 },
    Query { query: String },
}

/// Request to plan itineraries.
#[derive(Debug, Deserialize)]
pub struct PlanItinerariesRequest {
    pub origin: PlaceInput,
    pub destination: PlaceInput,

    /// Nearest hubs considered on each side
    pub hub_fanout: Option<usize>,

    /// Connector modes, e.g. `["walking", "driving"]`
    pub connector_modes: Option<Vec<String>>,

    /// One of `time`, `cost`, `co2`, `reliability`
    pub priority: Option<String>,

    /// Maximum itineraries returned
    pub top_k: Option<usize>,

    /// Departure time in HH:MM format; enables departure and arrival times
    pub depart_at: Option<String>,
}

impl PlanItinerariesRequest {
    /// Build planner options, starting from the defaults.
    pub fn plan_options(&self) -> Result<PlanOptions, PlanError> {
        let mut options = PlanOptions::default();

        if let Some(hub_fanout) = self.hub_fanout {
            options = options.with_hub_fanout(hub_fanout);
        }

        if let Some(modes) = &self.connector_modes {
            let modes = modes
                .iter()
                .map(|m| ConnectorMode::parse(m))
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| PlanError::InvalidOptions(e.to_string()))?;
            options = options.with_connector_modes(modes);
        }

        if let Some(priority) = &self.priority {
            options = options.with_priority(Priority::parse(priority)?);
        }

        if let Some(top_k) = self.top_k {
            options = options.with_top_k(top_k);
        }

        options.validate()?;
        Ok(options)
    }

    /// Parse `depart_at`, if given.
    pub fn departure_time(&self) -> Result<Option<NaiveTime>, PlanError> {
        self.depart_at
            .as_deref()
            .map(|s| {
                NaiveTime::parse_from_str(s.trim(), "%H:%M").map_err(|_| {
                    PlanError::InvalidOptions(format!("depart_at must be HH:MM, got {s:?}"))
                })
            })
            .transpose()
    }
}

/// A leg of an itinerary.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// `driving`, `walking`, `bicycling` or `transit`
    pub mode: String,

    pub distance_meters: f64,

    pub duration_seconds: f64,

    /// Duration rounded to whole minutes
    pub duration_mins: i64,
}

/// An itinerary option.
#[derive(Debug, Serialize)]
pub struct ItineraryResult {
    pub id: String,
    pub label: String,
    pub legs: Vec<LegResult>,

    pub total_duration_seconds: f64,
    pub total_distance_meters: f64,
    pub total_cost_units: f64,
    pub total_co2_grams: f64,
    pub transfer_count: u32,
    pub reliability_score: f64,
    pub raw_score: f64,

    /// Total duration rounded to whole minutes
    pub duration_mins: i64,

    /// Name of the hub where the trunk starts
    pub from_hub: String,

    /// Name of the hub where the trunk ends
    pub to_hub: String,

    /// Departure time, when the request gave one
    pub departure_time: Option<String>,

    /// Arrival time, when the request gave a departure time
    pub arrival_time: Option<String>,
}

/// Response for itinerary planning.
#[derive(Debug, Serialize)]
pub struct PlanItinerariesResponse {
    /// Itinerary options, best first. Empty when nothing could be stitched.
    pub itineraries: Vec<ItineraryResult>,

    pub candidates_attempted: usize,

    pub candidates_assembled: usize,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl From<&Place> for PlaceResult {
    fn from(place: &Place) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            lat: place.coordinate.latitude(),
            lng: place.coordinate.longitude(),
            source: place.source.to_string(),
            place_type: place.place_type.clone(),
        }
    }
}

impl HubListResponse {
    pub fn from_registry(registry: &HubRegistry) -> Self {
        Self {
            hubs: registry.hubs().iter().map(HubDto::from).collect(),
        }
    }
}

impl LegResult {
    /// Create from a domain Leg.
    pub fn from_leg(leg: &Leg) -> Self {
        Self {
            mode: leg.mode().to_string(),
            distance_meters: leg.distance_meters(),
            duration_seconds: leg.duration_seconds(),
            duration_mins: whole_minutes(leg.duration_seconds()),
        }
    }
}

impl ItineraryResult {
    /// Create from a domain Itinerary.
    ///
    /// Hub ids are resolved to names through `registry`, falling back to the
    /// id itself.
    pub fn from_itinerary(
        itinerary: &Itinerary,
        registry: &HubRegistry,
        depart_at: Option<NaiveTime>,
    ) -> Self {
        let hub_name = |id: &HubId| {
            registry
                .get(id)
                .map(|hub| hub.name.clone())
                .unwrap_or_else(|| id.to_string())
        };

        // Arrival is omitted when the duration is too large for a TimeDelta
        let travel = TimeDelta::try_seconds(itinerary.total_duration_seconds().round() as i64);
        let departure_time = depart_at.map(format_time);
        let arrival_time = depart_at
            .zip(travel)
            .map(|(depart, travel)| format_time(depart + travel));

        Self {
            id: itinerary.id().to_string(),
            label: itinerary.label().to_string(),
            legs: itinerary.legs().iter().map(LegResult::from_leg).collect(),
            total_duration_seconds: itinerary.total_duration_seconds(),
            total_distance_meters: itinerary.total_distance_meters(),
            total_cost_units: itinerary.total_cost_units(),
            total_co2_grams: itinerary.total_co2_grams(),
            transfer_count: itinerary.transfer_count(),
            reliability_score: itinerary.reliability_score(),
            raw_score: itinerary.raw_score(),
            duration_mins: whole_minutes(itinerary.total_duration_seconds()),
            from_hub: hub_name(itinerary.from_hub()),
            to_hub: hub_name(itinerary.to_hub()),
            departure_time,
            arrival_time,
        }
    }
}

impl PlanItinerariesResponse {
    pub fn from_result(
        result: &PlanResult,
        registry: &HubRegistry,
        depart_at: Option<NaiveTime>,
    ) -> Self {
        Self {
            itineraries: result
                .itineraries
                .iter()
                .map(|it| ItineraryResult::from_itinerary(it, registry, depart_at))
                .collect(),
            candidates_attempted: result.candidates_attempted,
            candidates_assembled: result.candidates_assembled,
        }
    }
}

fn whole_minutes(seconds: f64) -> i64 {
    (seconds / 60.0).round() as i64
}

/// Format a time as "HH:MM". Times past midnight wrap around.
fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}
