//! Caching layer for directions responses.
//!
//! Every candidate with the same pair of hubs shares a trunk leg, and
//! connector legs repeat across requests from the same neighbourhood. We
//! cache successful routes keyed by quantized endpoints and mode.
//!
//! Quantizing to 1e-5 degrees (about a metre) bounds cache cardinality
//! without merging genuinely different endpoints.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::directions::{DirectionsError, DirectionsProvider, RouteSummary};
use crate::domain::{Coordinate, LegMode};

/// Cache key: (origin, destination, mode) with quantized coordinates.
type RouteKey = ((i64, i64), (i64, i64), LegMode);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 10_000,
        }
    }
}

/// Cache of resolved routes.
pub struct RouteCache {
    routes: MokaCache<RouteKey, RouteSummary>,
}

impl RouteCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { routes }
    }

    fn key(origin: &Coordinate, destination: &Coordinate, mode: LegMode) -> RouteKey {
        (origin.quantized(), destination.quantized(), mode)
    }

    pub async fn get(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: LegMode,
    ) -> Option<RouteSummary> {
        self.routes.get(&Self::key(origin, destination, mode)).await
    }

    /// Cached route, or the result of `fetch`, stored on success.
    ///
    /// Concurrent calls for the same key share one `fetch`. A failure is
    /// returned to every waiter and nothing is stored.
    pub async fn get_or_fetch<F>(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
        mode: LegMode,
        fetch: F,
    ) -> Result<RouteSummary, DirectionsError>
    where
        F: Future<Output = Result<RouteSummary, DirectionsError>>,
    {
        self.routes
            .try_get_with(Self::key(origin, destination, mode), fetch)
            .await
            .map_err(DirectionsError::from)
    }
}

/// Directions provider with caching.
///
/// Wraps any provider and caches successful routes. Concurrent requests
/// for the same route share one call to the provider. Failures are never
/// cached.
pub struct CachedDirections<P> {
    inner: P,
    cache: RouteCache,
}

impl<P: DirectionsProvider> CachedDirections<P> {
    /// Create a new cached provider.
    pub fn new(inner: P, cache_config: &CacheConfig) -> Self {
        Self {
            inner,
            cache: RouteCache::new(cache_config),
        }
    }

    #[cfg(test)]
    pub(crate) fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: DirectionsProvider> DirectionsProvider for CachedDirections<P> {
    async fn route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        mode: LegMode,
    ) -> Result<RouteSummary, DirectionsError> {
        if let Some(cached) = self.cache.get(&origin, &destination, mode).await {
            trace!(%origin, %destination, %mode, "Route cache hit");
            return Ok(cached);
        }

        self.cache
            .get_or_fetch(
                &origin,
                &destination,
                mode,
                self.inner.route(origin, destination, mode),
            )
            .await
    }
}
