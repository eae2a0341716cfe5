//! Fewest-transfer search over the route adjacency graph.
//!
//! Either endpoint may lie on several routes. Each start route gets its
//! own breadth-first search, and the shortest result across all of them
//! wins. BFS over an unweighted graph finds the minimum number of routes,
//! which is one more than the number of transfers.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;

use crate::domain::RouteId;
use crate::network::{AdjacencyGraph, intersect};

/// Error from transfer path search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PathError {
    /// The start stop resolved to no routes
    #[error("no route serves the start stop")]
    NoStartRoute,

    /// The end stop resolved to no routes
    #[error("no route serves the end stop")]
    NoEndRoute,

    /// No chain of adjacent routes links start to end
    #[error("no transfer path connects the start and end routes")]
    NoPathFound,
}

/// An ordered sequence of routes, each adjacent to the next.
///
/// Always holds at least one route. A single route means start and end
/// are on the same line and no transfer is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TransferPath(Vec<RouteId>);

impl TransferPath {
    /// A path that stays on one route.
    fn single(route: RouteId) -> Self {
        Self(vec![route])
    }

    /// The routes to ride, in order.
    pub fn routes(&self) -> &[RouteId] {
        &self.0
    }

    /// Number of routes ridden.
    pub fn route_count(&self) -> usize {
        self.0.len()
    }

    /// Number of transfers between routes.
    pub fn transfers(&self) -> usize {
        self.0.len() - 1
    }

    /// The route boarded at the start stop.
    pub fn first(&self) -> &RouteId {
        // Safe: never constructed empty
        self.0.first().unwrap()
    }

    /// The route ridden to the end stop.
    pub fn last(&self) -> &RouteId {
        // Safe: never constructed empty
        self.0.last().unwrap()
    }

    /// Consume the path, returning its routes.
    pub fn into_routes(self) -> Vec<RouteId> {
        self.0
    }
}

/// Find a fewest-transfer sequence of routes from any start route to any
/// end route.
///
/// If a route appears in both sets, the result is that single route; the
/// first such route in `start_routes` order is chosen. Otherwise each
/// start route is searched in order and the shortest path wins, with
/// ties going to the earlier start route. Neighbours are explored in
/// route id order, so the result is the same on every run.
///
/// Routes that are not in the graph (for example because they were
/// removed) are never part of a path, whether listed as a start, an end,
/// or a neighbour of another route.
pub fn find_path(
    start_routes: &[RouteId],
    end_routes: &[RouteId],
    graph: &AdjacencyGraph,
) -> Result<TransferPath, PathError> {
    if start_routes.is_empty() {
        return Err(PathError::NoStartRoute);
    }
    if end_routes.is_empty() {
        return Err(PathError::NoEndRoute);
    }

    if let Some(shared) = intersect(start_routes, end_routes)
        .into_iter()
        .find(|route| graph.contains(route))
    {
        return Ok(TransferPath::single(shared));
    }

    let targets: HashSet<&RouteId> = end_routes.iter().collect();

    let mut best: Option<TransferPath> = None;
    for start in start_routes {
        let Some(path) = search_from(start, &targets, graph) else {
            continue;
        };
        if best
            .as_ref()
            .is_none_or(|b| path.route_count() < b.route_count())
        {
            best = Some(path);
        }
    }

    best.ok_or(PathError::NoPathFound)
}

/// Breadth-first search from one start route to the nearest target.
fn search_from(
    start: &RouteId,
    targets: &HashSet<&RouteId>,
    graph: &AdjacencyGraph,
) -> Option<TransferPath> {
    let neighbors = graph.neighbors(start)?;

    let mut parents: HashMap<&RouteId, &RouteId> = HashMap::new();
    let mut visited: HashSet<&RouteId> = HashSet::from([start]);
    let mut frontier: VecDeque<&RouteId> = VecDeque::new();

    for next in neighbors {
        if visited.insert(next) {
            parents.insert(next, start);
            frontier.push_back(next);
        }
    }

    while let Some(route) = frontier.pop_front() {
        // Hand-built graphs may list a neighbour that has no entry of its own
        let Some(neighbors) = graph.neighbors(route) else {
            continue;
        };
        if targets.contains(route) {
            return Some(reconstruct(route, &parents));
        }

        for next in neighbors {
            if visited.insert(next) {
                parents.insert(next, route);
                frontier.push_back(next);
            }
        }
    }

    None
}

/// Walk predecessor links back from `end` to the start route.
fn reconstruct<'a>(end: &'a RouteId, parents: &HashMap<&'a RouteId, &'a RouteId>) -> TransferPath {
    let mut routes = vec![end.clone()];
    let mut current = end;
    while let Some(&parent) = parents.get(current) {
        routes.push(parent.clone());
        current = parent;
    }
    routes.reverse();
    TransferPath(routes)
}
