//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Route;
use crate::network::{NetworkStats, RouteSummary, TransitNetwork};
use crate::planner::TransferPath;

/// Query for a transfer path between two stops.
#[derive(Debug, Deserialize)]
pub struct PathRequest {
    /// Start stop name
    pub from: String,

    /// End stop name
    pub to: String,

    /// Comma-separated route ids that are out of service
    pub closed: Option<String>,
}

/// A route in the route listing.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    pub id: String,
    pub name: String,
    pub stop_count: usize,

    /// Routes sharing at least one stop with this one
    pub adjacent: Vec<String>,
}

/// Response listing every route.
#[derive(Debug, Serialize)]
pub struct RoutesResponse {
    pub routes: Vec<RouteResult>,
}

/// A stop served by several routes.
#[derive(Debug, Serialize)]
pub struct HubResult {
    pub stop: String,
    pub routes: Vec<String>,
}

/// Network statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub most_stops: RouteSummary,
    pub fewest_stops: RouteSummary,
    pub hubs: Vec<HubResult>,
}

/// One leg of a transfer path.
#[derive(Debug, Serialize)]
pub struct PathRouteResult {
    pub id: String,
    pub name: String,
}

/// Transfer path response.
#[derive(Debug, Serialize)]
pub struct PathResponse {
    pub routes: Vec<PathRouteResult>,
    pub transfers: usize,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

// Conversion implementations

impl RouteResult {
    /// Create from a route and the network it belongs to.
    pub fn from_route(route: &Route, network: &TransitNetwork) -> Self {
        let adjacent = network
            .graph()
            .neighbors(route.id())
            .into_iter()
            .flatten()
            .map(|id| id.to_string())
            .collect();

        Self {
            id: route.id().to_string(),
            name: route.name().to_string(),
            stop_count: route.stop_count(),
            adjacent,
        }
    }
}

impl From<NetworkStats> for StatsResponse {
    fn from(stats: NetworkStats) -> Self {
        let hubs = stats
            .hubs
            .iter()
            .map(|(stop, routes)| HubResult {
                stop: stop.to_string(),
                routes: routes.iter().map(|id| id.to_string()).collect(),
            })
            .collect();

        Self {
            most_stops: stats.most_stops,
            fewest_stops: stats.fewest_stops,
            hubs,
        }
    }
}

impl PathResponse {
    /// Create from a path, naming each route from the network.
    pub fn from_path(path: &TransferPath, network: &TransitNetwork) -> Self {
        let routes = path
            .routes()
            .iter()
            .map(|id| PathRouteResult {
                id: id.to_string(),
                name: network
                    .route(id)
                    .map_or_else(|| id.to_string(), |r| r.name().to_string()),
            })
            .collect();

        Self {
            routes,
            transfers: path.transfers(),
        }
    }
}
