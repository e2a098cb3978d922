//! Application state for the web layer.

use std::sync::Arc;

use crate::directions::DirectionsBackend;
use crate::geocode::GeocodeClient;
use crate::hubs::HubLocator;
use crate::planner::PlannerConfig;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Directions provider used to resolve legs
    pub directions: Arc<DirectionsBackend>,

    /// Hub registry and nearest-hub lookup
    pub locator: Arc<HubLocator>,

    /// Itinerary planner configuration
    pub config: Arc<PlannerConfig>,

    /// Place search and reverse geocoding
    pub geocoder: Arc<GeocodeClient>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        directions: DirectionsBackend,
        locator: HubLocator,
        config: PlannerConfig,
        geocoder: GeocodeClient,
    ) -> Self {
        Self {
            directions: Arc::new(directions),
            locator: Arc::new(locator),
            config: Arc::new(config),
            geocoder: Arc::new(geocoder),
        }
    }
}
