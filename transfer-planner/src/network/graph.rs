//! Route adjacency graph and the stop indexes built alongside it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::domain::{Route, RouteId, StopName};

use super::intersect::intersect;

/// Undirected graph whose nodes are routes.
///
/// Two routes are adjacent when they share at least one stop. The graph
/// is symmetric when produced by [`build_adjacency`]: if `B` is a neighbour
/// of `A` then `A` is a neighbour of `B`.
///
/// A graph is never mutated after it is built. Removing a route produces
/// a new graph and leaves the original intact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AdjacencyGraph {
    edges: BTreeMap<RouteId, BTreeSet<RouteId>>,
}

impl AdjacencyGraph {
    /// The routes directly reachable from `route` via a shared stop.
    ///
    /// Returns `None` if the route is not in the graph at all.
    pub fn neighbors(&self, route: &RouteId) -> Option<&BTreeSet<RouteId>> {
        self.edges.get(route)
    }

    /// Whether the route is a node of this graph.
    pub fn contains(&self, route: &RouteId) -> bool {
        self.edges.contains_key(route)
    }

    /// Whether there is an edge between the two routes.
    pub fn are_adjacent(&self, a: &RouteId, b: &RouteId) -> bool {
        self.edges.get(a).is_some_and(|n| n.contains(b))
    }

    /// All routes in the graph, in id order.
    pub fn routes(&self) -> impl Iterator<Item = &RouteId> {
        self.edges.keys()
    }

    /// Iterate over `(route, neighbours)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&RouteId, &BTreeSet<RouteId>)> {
        self.edges.iter()
    }

    /// Number of routes in the graph.
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// Whether the graph has no routes.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        let directed: usize = self.edges.values().map(BTreeSet::len).sum();
        let self_loops = self
            .edges
            .iter()
            .filter(|(route, n)| n.contains(*route))
            .count();
        (directed + self_loops) / 2
    }

    /// Whether every edge has its reverse edge.
    pub fn is_symmetric(&self) -> bool {
        self.edges
            .iter()
            .all(|(a, n)| n.iter().all(|b| self.are_adjacent(b, a)))
    }

    /// A copy of this graph with `route` taken out of service.
    ///
    /// The route is dropped as a node and from every other route's
    /// neighbour set. Removing a route that is not in the graph returns
    /// an identical copy.
    pub fn without_route(&self, route: &RouteId) -> AdjacencyGraph {
        self.without_routes(std::slice::from_ref(route))
    }

    /// A copy of this graph with every route in `closed` taken out of service.
    pub fn without_routes(&self, closed: &[RouteId]) -> AdjacencyGraph {
        self.edges
            .iter()
            .filter(|(route, _)| !closed.contains(*route))
            .map(|(route, neighbors)| {
                let kept = neighbors
                    .iter()
                    .filter(|n| !closed.contains(*n))
                    .cloned()
                    .collect();
                (route.clone(), kept)
            })
            .collect()
    }
}

impl FromIterator<(RouteId, BTreeSet<RouteId>)> for AdjacencyGraph {
    fn from_iter<I: IntoIterator<Item = (RouteId, BTreeSet<RouteId>)>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

/// Stops served by more than one route, with the routes serving them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HubStopIndex {
    hubs: BTreeMap<StopName, BTreeSet<RouteId>>,
}

impl HubStopIndex {
    /// Routes serving the stop, if it is a hub.
    pub fn get(&self, stop: &StopName) -> Option<&BTreeSet<RouteId>> {
        self.hubs.get(stop)
    }

    /// Iterate over hubs in stop-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&StopName, &BTreeSet<RouteId>)> {
        self.hubs.iter()
    }

    /// Number of hub stops.
    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    /// Whether there are no hub stops.
    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }
}

/// Build the route adjacency graph and hub stop index.
///
/// Every unordered pair of distinct routes is compared; when their stop
/// sets intersect, an undirected edge is added and both routes are
/// recorded against each shared stop. Every input route becomes a node,
/// including routes that share no stop with any other.
///
/// This is quadratic in the number of routes, which is fine at the scale
/// of a city's rail lines.
pub fn build_adjacency(routes: &[Route]) -> (AdjacencyGraph, HubStopIndex) {
    let nodes: BTreeMap<RouteId, BTreeSet<RouteId>> = routes
        .iter()
        .map(|r| (r.id().clone(), BTreeSet::new()))
        .collect();

    let pairs = routes
        .iter()
        .enumerate()
        .flat_map(move |(i, a)| routes[i + 1..].iter().map(move |b| (a, b)))
        .filter(|(a, b)| a.id() != b.id());

    let (edges, hubs) = pairs.fold(
        (nodes, BTreeMap::<StopName, BTreeSet<RouteId>>::new()),
        |(mut edges, mut hubs), (a, b)| {
            let shared = intersect(a.stop_names(), b.stop_names());
            if shared.is_empty() {
                return (edges, hubs);
            }

            edges.entry(a.id().clone()).or_default().insert(b.id().clone());
            edges.entry(b.id().clone()).or_default().insert(a.id().clone());

            for stop in shared {
                let serving = hubs.entry(stop).or_default();
                serving.insert(a.id().clone());
                serving.insert(b.id().clone());
            }

            (edges, hubs)
        },
    );

    (AdjacencyGraph { edges }, HubStopIndex { hubs })
}

/// Every stop with the routes serving it, in input route order.
///
/// Unlike [`HubStopIndex`] this includes stops served by a single route,
/// so it can resolve any known stop to its routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopIndex {
    stops: BTreeMap<StopName, Vec<RouteId>>,
}

impl StopIndex {
    /// Index the stops of the given routes.
    pub fn build(routes: &[Route]) -> Self {
        let stops = routes.iter().fold(
            BTreeMap::<StopName, Vec<RouteId>>::new(),
            |mut stops, route| {
                for stop in route.stop_names() {
                    let serving = stops.entry(stop.clone()).or_default();
                    if !serving.contains(route.id()) {
                        serving.push(route.id().clone());
                    }
                }
                stops
            },
        );

        Self { stops }
    }

    /// Routes serving the stop, or `None` if no known route serves it.
    pub fn routes_serving(&self, stop: &StopName) -> Option<&[RouteId]> {
        self.stops.get(stop).map(Vec::as_slice)
    }

    /// All known stop names, in order.
    pub fn stop_names(&self) -> impl Iterator<Item = &StopName> {
        self.stops.keys()
    }

    /// Number of distinct stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether no stops are known.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
