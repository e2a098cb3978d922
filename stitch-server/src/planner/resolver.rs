//! Leg resolution.
//!
//! Wraps the directions provider so that each call is bounded by a
//! concurrency gate and a timeout, and so that any failure surfaces as a
//! `LegUnavailable` scoped to the one leg that needed it.

use std::time::Duration;

use tokio::sync::Semaphore;

use crate::directions::{DirectionsError, DirectionsProvider};
use crate::domain::{Coordinate, DomainError, Leg, LegMode};

/// A single leg could not be resolved.
///
/// Recovered locally by discarding the candidate that needed the leg.
#[derive(Debug, thiserror::Error)]
pub enum LegUnavailable {
    /// The provider call failed
    #[error("{mode} leg failed: {source}")]
    Provider {
        mode: LegMode,
        #[source]
        source: DirectionsError,
    },

    /// The provider did not answer in time
    #[error("{mode} leg timed out after {timeout:?}")]
    Timeout { mode: LegMode, timeout: Duration },

    /// The provider answered with numbers that do not form a valid leg
    #[error("{mode} leg unusable: {source}")]
    Unusable {
        mode: LegMode,
        #[source]
        source: DomainError,
    },
}

impl LegUnavailable {
    /// Whether the failure points at the provider as a whole rather than
    /// this particular route. Timeouts count as provider-level.
    pub fn is_provider_level(&self) -> bool {
        match self {
            LegUnavailable::Provider { source, .. } => source.is_provider_level(),
            LegUnavailable::Timeout { .. } => true,
            LegUnavailable::Unusable { .. } => false,
        }
    }
}

/// Resolves legs through a directions provider.
pub struct LegResolver<'a, P: DirectionsProvider> {
    provider: &'a P,
    gate: Semaphore,
    timeout: Duration,
}

impl<'a, P: DirectionsProvider> LegResolver<'a, P> {
    /// Create a resolver allowing `max_concurrent` calls in flight, each
    /// limited to `timeout`.
    pub fn new(provider: &'a P, max_concurrent: usize, timeout: Duration) -> Self {
        Self {
            provider,
            gate: Semaphore::new(max_concurrent.max(1)),
            timeout,
        }
    }

    /// Resolve one origin/destination/mode triple into a `Leg`.
    pub async fn resolve_leg(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> Result<Leg, LegUnavailable> {
        // The gate is never closed while the resolver is alive
        let _permit = self.gate.acquire().await.map_err(|_| LegUnavailable::Provider {
            mode,
            source: DirectionsError::NotConfigured("concurrency gate closed".to_string()),
        })?;

        let route = self.provider.route(origin, destination, mode);
        let summary = tokio::time::timeout(self.timeout, route)
            .await
            .map_err(|_| LegUnavailable::Timeout {
                mode,
                timeout: self.timeout,
            })?
            .map_err(|source| LegUnavailable::Provider { mode, source })?;

        Leg::new(mode, summary.distance_meters, summary.duration_seconds)
            .map_err(|source| LegUnavailable::Unusable { mode, source })
    }
}
