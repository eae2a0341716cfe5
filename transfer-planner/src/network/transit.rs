//! A fully indexed snapshot of the network.

use tracing::debug;

use crate::domain::{Route, RouteId, StopName};

use super::graph::{AdjacencyGraph, HubStopIndex, StopIndex, build_adjacency};
use super::stats::{NetworkStats, StatsError, aggregate};

/// Routes plus everything derived from them.
///
/// Built once from a list of routes and never modified afterwards; a
/// refresh builds a new `TransitNetwork`.
#[derive(Debug, Clone, Default)]
pub struct TransitNetwork {
    routes: Vec<Route>,
    graph: AdjacencyGraph,
    hubs: HubStopIndex,
    stops: StopIndex,
}

impl TransitNetwork {
    /// Build the adjacency graph and stop indexes for `routes`.
    ///
    /// Route order is kept; it decides statistics tie-breaks and the
    /// order in which a stop's routes are tried during planning.
    pub fn build(routes: Vec<Route>) -> Self {
        let (graph, hubs) = build_adjacency(&routes);
        let stops = StopIndex::build(&routes);

        debug!(
            routes = routes.len(),
            edges = graph.edge_count(),
            stops = stops.len(),
            hubs = hubs.len(),
            "Built transit network"
        );

        Self {
            routes,
            graph,
            hubs,
            stops,
        }
    }

    /// Routes in input order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Look up a route by id.
    pub fn route(&self, id: &RouteId) -> Option<&Route> {
        self.routes.iter().find(|r| r.id() == id)
    }

    /// The route adjacency graph.
    pub fn graph(&self) -> &AdjacencyGraph {
        &self.graph
    }

    /// Stops served by more than one route.
    pub fn hubs(&self) -> &HubStopIndex {
        &self.hubs
    }

    /// Every known stop.
    pub fn stops(&self) -> &StopIndex {
        &self.stops
    }

    /// Routes serving a stop, in route input order.
    pub fn routes_serving(&self, stop: &StopName) -> Option<&[RouteId]> {
        self.stops.routes_serving(stop)
    }

    /// Longest and shortest routes plus hub stops.
    pub fn stats(&self) -> Result<NetworkStats, StatsError> {
        aggregate(&self.routes, &self.hubs)
    }
}
