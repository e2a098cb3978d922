//! Candidate generation.
//!
//! Enumerates every (origin hub, destination hub, first mode, last mode)
//! combination and stitches each into a three-leg itinerary. A combination
//! whose legs cannot all be resolved is dropped without affecting the rest.

use futures::future::join_all;
use tracing::debug;

use crate::directions::DirectionsProvider;
use crate::domain::{ConnectorMode, Coordinate, Hub, Itinerary, Leg, LegMode};

use super::config::PlannerConfig;
use super::estimate::estimate;
use super::resolver::{LegResolver, LegUnavailable};

/// Outcome of enumerating candidates for one request.
#[derive(Debug, Default)]
pub struct CandidateSet {
    /// Successfully assembled itineraries, in enumeration order.
    pub itineraries: Vec<Itinerary>,

    /// Number of combinations attempted.
    pub attempted: usize,

    /// Number of individual legs that resolved.
    pub resolved_legs: usize,

    /// Every leg failure seen while assembling.
    pub failures: Vec<LegUnavailable>,
}

/// One combination to try.
#[derive(Debug, Clone, Copy)]
struct Combination<'h> {
    from_hub: &'h Hub,
    to_hub: &'h Hub,
    first_mode: ConnectorMode,
    last_mode: ConnectorMode,
}

impl Combination<'_> {
    fn id(&self) -> String {
        format!(
            "it_{}_{}_{}_{}",
            self.from_hub.id, self.to_hub.id, self.first_mode, self.last_mode
        )
    }
}

/// Result of attempting a single combination.
struct Attempt {
    itinerary: Option<Itinerary>,
    resolved_legs: usize,
    failures: Vec<LegUnavailable>,
}

/// Stitches candidates through a leg resolver.
pub struct CandidateGenerator<'a, P: DirectionsProvider> {
    resolver: LegResolver<'a, P>,
    config: &'a PlannerConfig,
}

impl<'a, P: DirectionsProvider> CandidateGenerator<'a, P> {
    pub fn new(provider: &'a P, config: &'a PlannerConfig) -> Self {
        Self {
            resolver: LegResolver::new(provider, config.max_concurrent, config.leg_timeout()),
            config,
        }
    }

    /// Attempt every combination of the given hubs and connector modes.
    ///
    /// All combinations are in flight together, bounded by the resolver's
    /// concurrency gate. Output order follows enumeration order
    /// (origin hub, destination hub, first mode, last mode) regardless of
    /// completion order.
    pub async fn generate(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        origin_hubs: &[Hub],
        destination_hubs: &[Hub],
        modes: &[ConnectorMode],
    ) -> CandidateSet {
        let mut combinations = Vec::with_capacity(
            origin_hubs.len() * destination_hubs.len() * modes.len() * modes.len(),
        );
        for from_hub in origin_hubs {
            for to_hub in destination_hubs {
                for &first_mode in modes {
                    for &last_mode in modes {
                        combinations.push(Combination {
                            from_hub,
                            to_hub,
                            first_mode,
                            last_mode,
                        });
                    }
                }
            }
        }

        let attempts = join_all(
            combinations
                .iter()
                .map(|combination| self.attempt(origin, destination, *combination)),
        )
        .await;

        let mut set = CandidateSet {
            attempted: combinations.len(),
            ..CandidateSet::default()
        };

        for attempt in attempts {
            set.resolved_legs += attempt.resolved_legs;
            set.failures.extend(attempt.failures);
            if let Some(itinerary) = attempt.itinerary {
                set.itineraries.push(itinerary);
            }
        }

        set
    }

    async fn attempt(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        combination: Combination<'_>,
    ) -> Attempt {
        let id = combination.id();

        let (first, trunk, last) = futures::join!(
            self.resolver.resolve_leg(
                origin,
                combination.from_hub.coordinate,
                combination.first_mode.into()
            ),
            self.resolver.resolve_leg(
                combination.from_hub.coordinate,
                combination.to_hub.coordinate,
                LegMode::Trunk
            ),
            self.resolver.resolve_leg(
                combination.to_hub.coordinate,
                destination,
                combination.last_mode.into()
            ),
        );

        let mut legs: Vec<Leg> = Vec::with_capacity(3);
        let mut failures = Vec::new();
        for result in [first, trunk, last] {
            match result {
                Ok(leg) => legs.push(leg),
                Err(e) => failures.push(e),
            }
        }
        let resolved_legs = legs.len();

        if let Some(e) = failures.first() {
            debug!(candidate = %id, error = %e, "Discarding candidate");
            return Attempt {
                itinerary: None,
                resolved_legs,
                failures,
            };
        }

        let itinerary = match <[Leg; 3]>::try_from(legs) {
            Ok(legs) => {
                let totals = estimate(&legs, &self.config.rates);
                Itinerary::new(
                    id.as_str(),
                    legs,
                    combination.from_hub.id.clone(),
                    combination.to_hub.id.clone(),
                    totals.cost_units,
                    totals.co2_grams,
                    self.config.default_reliability,
                )
                .map_err(|e| debug!(candidate = %id, error = %e, "Discarding candidate"))
                .ok()
            }
            Err(_) => None,
        };

        Attempt {
            itinerary,
            resolved_legs,
            failures,
        }
    }
}
