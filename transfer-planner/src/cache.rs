//! Caching layer for MBTA API responses.
//!
//! Route lists and per-route stop lists change rarely, but a full network
//! load issues one request per route. Caching both keeps repeated loads
//! (such as a manual refresh shortly after start-up) off the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::trace;

use crate::domain::RouteId;
use crate::mbta::{MbtaClient, MbtaError, RouteResource, RouteSource, StopResource};

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached entries per kind.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(10 * 60),
            max_capacity: 500,
        }
    }
}

/// MBTA client with caching.
///
/// Route lists are keyed by the route type filter, stop lists by route id.
pub struct CachedMbtaClient {
    client: MbtaClient,
    routes: MokaCache<String, Arc<Vec<RouteResource>>>,
    stops: MokaCache<RouteId, Arc<Vec<StopResource>>>,
}

impl CachedMbtaClient {
    /// Create a new cached client.
    pub fn new(client: MbtaClient, config: &CacheConfig) -> Self {
        let routes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            client,
            routes,
            stops,
        }
    }

    /// Get the route list, using the cache if available.
    pub async fn fetch_routes(&self) -> Result<Arc<Vec<RouteResource>>, MbtaError> {
        let key = self.client.route_filter().to_string();

        if let Some(cached) = self.routes.get(&key).await {
            trace!(filter = %key, "Route list cache hit");
            return Ok(cached);
        }

        let entry = Arc::new(self.client.fetch_routes().await?);
        self.routes.insert(key, entry.clone()).await;

        Ok(entry)
    }

    /// Get the stops of a route, using the cache if available.
    pub async fn fetch_stops(&self, route: &RouteId) -> Result<Arc<Vec<StopResource>>, MbtaError> {
        if let Some(cached) = self.stops.get(route).await {
            trace!(route = %route, "Stop list cache hit");
            return Ok(cached);
        }

        let entry = Arc::new(self.client.fetch_stops(route).await?);
        self.stops.insert(route.clone(), entry.clone()).await;

        Ok(entry)
    }

    /// Access the underlying client for operations that bypass cache.
    pub fn client(&self) -> &MbtaClient {
        &self.client
    }

    /// Number of cached entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.routes.entry_count() + self.stops.entry_count()
    }

    /// Invalidate all cached entries.
    pub fn invalidate_all(&self) {
        self.routes.invalidate_all();
        self.stops.invalidate_all();
    }
}

impl RouteSource for CachedMbtaClient {
    async fn routes(&self) -> Result<Vec<RouteResource>, MbtaError> {
        Ok(self.fetch_routes().await?.as_ref().clone())
    }

    async fn stops(&self, route: &RouteId) -> Result<Vec<StopResource>, MbtaError> {
        Ok(self.fetch_stops(route).await?.as_ref().clone())
    }
}
