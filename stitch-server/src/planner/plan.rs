//! Itinerary planning entry point.
//!
//! Validates the request, locates hubs on each side, stitches candidates
//! and hands them to the ranking engine.

use tracing::{info, warn};

use crate::directions::DirectionsProvider;
use crate::domain::{Coordinate, InvalidPriority, Itinerary};
use crate::hubs::HubLocator;

use super::config::{PlanOptions, PlannerConfig};
use super::generate::CandidateGenerator;
use super::rank::rank_and_label;

/// Error from itinerary planning.
#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    /// Priority outside the known set
    #[error(transparent)]
    InvalidPriority(#[from] InvalidPriority),

    /// Options that can never produce a plan
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// No leg could be resolved because the provider itself is unreachable
    #[error("directions provider unavailable ({attempted} candidates attempted): {last_error}")]
    ProviderUnavailable { attempted: usize, last_error: String },
}

/// Result of planning.
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// Ranked, labeled itineraries, best first.
    pub itineraries: Vec<Itinerary>,

    /// Number of hub/mode combinations tried.
    pub candidates_attempted: usize,

    /// Number of combinations whose legs all resolved.
    pub candidates_assembled: usize,
}

impl PlanResult {
    /// Create an empty result.
    pub fn empty() -> Self {
        Self {
            itineraries: Vec::new(),
            candidates_attempted: 0,
            candidates_assembled: 0,
        }
    }
}

/// Multi-modal itinerary planner.
pub struct Planner<'a, P: DirectionsProvider> {
    provider: &'a P,
    locator: &'a HubLocator,
    config: &'a PlannerConfig,
}

impl<'a, P: DirectionsProvider> Planner<'a, P> {
    /// Create a new planner.
    pub fn new(provider: &'a P, locator: &'a HubLocator, config: &'a PlannerConfig) -> Self {
        Self {
            provider,
            locator,
            config,
        }
    }

    /// Plan itineraries from `origin` to `destination`.
    ///
    /// An empty list is a valid outcome. Only invalid options and a
    /// completely unreachable provider are errors.
    pub async fn plan_itineraries(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        options: &PlanOptions,
    ) -> Result<PlanResult, PlanError> {
        options.validate()?;

        let origin_hubs = self.locator.nearest_hubs(origin, options.hub_fanout);
        let destination_hubs = self.locator.nearest_hubs(destination, options.hub_fanout);

        if origin_hubs.is_empty() || destination_hubs.is_empty() {
            info!(%origin, %destination, "No hubs available; nothing to plan");
            return Ok(PlanResult::empty());
        }

        let generator = CandidateGenerator::new(self.provider, self.config);
        let candidates = generator
            .generate(
                origin,
                destination,
                &origin_hubs,
                &destination_hubs,
                &options.connector_modes,
            )
            .await;

        let attempted = candidates.attempted;
        let assembled = candidates.itineraries.len();

        if attempted > 0
            && candidates.resolved_legs == 0
            && candidates.failures.iter().all(|f| f.is_provider_level())
            && let Some(last) = candidates.failures.last()
        {
            warn!(attempted, error = %last, "Directions provider unavailable");
            return Err(PlanError::ProviderUnavailable {
                attempted,
                last_error: last.to_string(),
            });
        }

        let itineraries = rank_and_label(candidates.itineraries, options.priority, options.top_k);

        info!(
            %origin,
            %destination,
            priority = %options.priority,
            attempted,
            assembled,
            returned = itineraries.len(),
            "Planned itineraries"
        );

        Ok(PlanResult {
            itineraries,
            candidates_attempted: attempted,
            candidates_assembled: assembled,
        })
    }
}

#[cfg(test)]
#[path = "plan_tests.rs"]
mod tests;
