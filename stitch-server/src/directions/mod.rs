//! Directions providers.
//!
//! A directions provider turns an origin, a destination and a travel mode
//! into a distance and a duration. The planner depends only on the
//! `DirectionsProvider` trait, so it can be tested with mock providers and
//! run offline without an API key.

mod backend;
mod client;
mod error;
mod offline;
mod types;

use std::future::Future;

use crate::domain::{Coordinate, LegMode};

pub use backend::DirectionsBackend;
pub use client::{DirectionsConfig, HttpDirectionsClient};
pub use error::DirectionsError;
pub use offline::StraightLineDirections;
pub use types::{DirectionsResponse, RouteDto, RouteLegDto, ValueDto};

/// Distance and duration of a single routed trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteSummary {
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

/// Trait for resolving routes between two points.
///
/// This abstraction allows the planner to be tested with mock data.
pub trait DirectionsProvider: Send + Sync {
    /// Route from `origin` to `destination` using `mode`.
    fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> impl Future<Output = Result<RouteSummary, DirectionsError>> + Send;
}
