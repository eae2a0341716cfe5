//! Loading a full set of routes with their stops.

use std::future::Future;

use futures::future::join_all;
use tracing::{debug, info, warn};

use crate::domain::{Route, RouteId, StopName};

use super::error::MbtaError;
use super::types::{RouteResource, StopResource};

/// Something that can list routes and the stops each route serves.
///
/// Implemented by the live client, the cached client and the mock, so the
/// loader can be exercised without network access.
pub trait RouteSource {
    /// All routes of interest.
    fn routes(&self) -> impl Future<Output = Result<Vec<RouteResource>, MbtaError>> + Send;

    /// The stops served by one route.
    fn stops(
        &self,
        route: &RouteId,
    ) -> impl Future<Output = Result<Vec<StopResource>, MbtaError>> + Send;
}

/// Fetch every route and its stops.
///
/// Stop queries are independent, so they are issued concurrently,
/// `batch_size` at a time. All of them must succeed: a route whose stops
/// could not be fetched would silently drop edges from the graph, so any
/// failure fails the whole load.
///
/// Routes with an invalid id and stops with a missing or blank name are
/// skipped with a warning.
pub async fn load_routes<S: RouteSource>(
    source: &S,
    batch_size: usize,
) -> Result<Vec<Route>, MbtaError> {
    let resources = source.routes().await?;

    let named: Vec<(RouteId, String)> = resources
        .iter()
        .filter_map(|r| match RouteId::parse(&r.id) {
            Ok(id) => Some((id, r.display_name().to_string())),
            Err(e) => {
                warn!(id = %r.id, error = %e, "Skipping route with invalid id");
                None
            }
        })
        .collect();

    let mut routes = Vec::with_capacity(named.len());

    for batch in named.chunks(batch_size.max(1)) {
        let results = join_all(batch.iter().map(|(id, _)| source.stops(id))).await;

        for ((id, name), result) in batch.iter().zip(results) {
            let stops = result.inspect_err(|e| {
                warn!(route = %id, error = %e, "Failed to fetch stops");
            })?;

            let stop_names = stop_names(id, stops);
            debug!(route = %id, stops = stop_names.len(), "Fetched stops");
            routes.push(Route::new(id.clone(), name.clone(), stop_names));
        }
    }

    info!(routes = routes.len(), "Loaded routes");
    Ok(routes)
}

/// Flatten stop resources into validated names.
fn stop_names(route: &RouteId, stops: Vec<StopResource>) -> Vec<StopName> {
    stops
        .into_iter()
        .filter_map(|stop| {
            let parsed = stop
                .attributes
                .name
                .as_deref()
                .map(StopName::parse)
                .transpose()
                .ok()
                .flatten();
            if parsed.is_none() {
                warn!(route = %route, stop = %stop.id, "Skipping stop without a usable name");
            }
            parsed
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::mbta::types::{Resource, RouteAttributes, StopAttributes};

    /// In-memory source that records how many stop queries it served.
    struct FakeSource {
        routes: Vec<RouteResource>,
        stops: HashMap<String, Vec<StopResource>>,
        stop_calls: Mutex<usize>,
    }

    impl FakeSource {
        fn new() -> Self {
            Self {
                routes: Vec::new(),
                stops: HashMap::new(),
                stop_calls: Mutex::new(0),
            }
        }

        fn add_route(&mut self, id: &str, long_name: &str, stops: &[Option<&str>]) {
            self.routes.push(Resource {
                id: id.to_string(),
                attributes: RouteAttributes {
                    long_name: Some(long_name.to_string()),
                    short_name: None,
                    route_type: Some(1),
                },
            });
            let stops = stops
                .iter()
                .enumerate()
                .map(|(i, name)| Resource {
                    id: format!("{id}-{i}"),
                    attributes: StopAttributes {
                        name: name.map(str::to_string),
                    },
                })
                .collect();
            self.stops.insert(id.to_string(), stops);
        }
    }

    impl RouteSource for FakeSource {
        async fn routes(&self) -> Result<Vec<RouteResource>, MbtaError> {
            Ok(self.routes.clone())
        }

        async fn stops(&self, route: &RouteId) -> Result<Vec<StopResource>, MbtaError> {
            *self.stop_calls.lock().unwrap() += 1;
            self.stops
                .get(route.as_str())
                .cloned()
                .ok_or_else(|| MbtaError::Api {
                    status: 404,
                    message: format!("no stops for {route}"),
                })
        }
    }

    #[tokio::test]
    async fn loads_routes_in_order_with_stops() {
        let mut source = FakeSource::new();
        source.add_route("Red", "Red Line", &[Some("Alewife"), Some("Park Street")]);
        source.add_route("Orange", "Orange Line", &[Some("State"), Some("Back Bay")]);
        source.add_route("Blue", "Blue Line", &[Some("State")]);

        let routes = load_routes(&source, 2).await.unwrap();

        let ids: Vec<_> = routes.iter().map(|r| r.id().as_str()).collect();
        assert_eq!(ids, ["Red", "Orange", "Blue"]);
        assert_eq!(routes[0].name(), "Red Line");
        assert_eq!(routes[0].stop_count(), 2);
        assert_eq!(*source.stop_calls.lock().unwrap(), 3);
    }

    #[tokio::test]
    async fn skips_unusable_stops_and_ids() {
        let mut source = FakeSource::new();
        source.add_route("Red", "Red Line", &[Some("Alewife"), None, Some("   ")]);
        source.add_route("  ", "Nameless", &[Some("Somewhere")]);

        let routes = load_routes(&source, 8).await.unwrap();

        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].stop_count(), 1);
    }

    #[tokio::test]
    async fn failed_stop_query_fails_the_load() {
        let mut source = FakeSource::new();
        source.add_route("Red", "Red Line", &[Some("Alewife")]);
        source.routes.push(Resource {
            id: "Orphan".to_string(),
            attributes: RouteAttributes::default(),
        });

        let err = load_routes(&source, 8).await.unwrap_err();
        assert!(matches!(err, MbtaError::Api { status: 404, .. }));
    }

    #[tokio::test]
    async fn zero_batch_size_still_loads() {
        let mut source = FakeSource::new();
        source.add_route("Red", "Red Line", &[Some("Alewife")]);

        let routes = load_routes(&source, 0).await.unwrap();
        assert_eq!(routes.len(), 1);
    }
}
