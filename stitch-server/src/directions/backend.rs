//! Runtime choice of directions provider.

use crate::cache::CachedDirections;
use crate::domain::{Coordinate, LegMode};

use super::client::HttpDirectionsClient;
use super::error::DirectionsError;
use super::offline::StraightLineDirections;
use super::{DirectionsProvider, RouteSummary};

/// The provider the server was started with.
pub enum DirectionsBackend {
    /// Live directions API behind a route cache
    Http(CachedDirections<HttpDirectionsClient>),
    /// Straight-line estimates, no network
    Offline(StraightLineDirections),
}

impl DirectionsBackend {
    /// Short name for logs and the health endpoint.
    pub fn name(&self) -> &'static str {
        match self {
            DirectionsBackend::Http(_) => "http",
            DirectionsBackend::Offline(_) => "offline",
        }
    }
}

impl DirectionsProvider for DirectionsBackend {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> Result<RouteSummary, DirectionsError> {
        match self {
            DirectionsBackend::Http(client) => client.route(origin, destination, mode).await,
            DirectionsBackend::Offline(offline) => offline.route(origin, destination, mode).await,
        }
    }
}
