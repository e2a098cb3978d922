//! Offline straight-line directions.
//!
//! Estimates routes from great-circle distance and per-mode speeds. Useful
//! for development and demos without directions API credentials.

use crate::domain::{ConnectorMode, Coordinate, LegMode};

use super::error::DirectionsError;
use super::{DirectionsProvider, RouteSummary};

/// Road distance is longer than the straight line by roughly this factor.
const DEFAULT_DETOUR_FACTOR: f64 = 1.3;

/// Provider that never touches the network.
#[derive(Debug, Clone)]
pub struct StraightLineDirections {
    detour_factor: f64,
}

impl StraightLineDirections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom detour factor (clamped to at least 1.0).
    pub fn with_detour_factor(mut self, factor: f64) -> Self {
        self.detour_factor = if factor.is_finite() {
            factor.max(1.0)
        } else {
            DEFAULT_DETOUR_FACTOR
        };
        self
    }

    /// Average speed in metres per second.
    fn speed_mps(mode: LegMode) -> f64 {
        match mode {
            LegMode::Connector(ConnectorMode::Walking) => 1.4,
            LegMode::Connector(ConnectorMode::Bicycling) => 4.2,
            LegMode::Connector(ConnectorMode::Driving) => 8.3,
            LegMode::Trunk => 6.9,
        }
    }

    /// Estimate a route without any I/O.
    pub fn estimate(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> RouteSummary {
        let distance_meters = origin.distance_to(&destination) * self.detour_factor;
        RouteSummary {
            distance_meters,
            duration_seconds: distance_meters / Self::speed_mps(mode),
        }
    }
}

impl Default for StraightLineDirections {
    fn default() -> Self {
        Self {
            detour_factor: DEFAULT_DETOUR_FACTOR,
        }
    }
}

impl DirectionsProvider for StraightLineDirections {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> Result<RouteSummary, DirectionsError> {
        Ok(self.estimate(origin, destination, mode))
    }
}
