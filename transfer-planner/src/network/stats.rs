//! Network statistics: longest and shortest routes, hub stops.

use serde::Serialize;

use crate::domain::{Route, RouteId};

use super::graph::HubStopIndex;

/// Errors from statistics aggregation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    /// No routes were supplied
    #[error("cannot compute statistics for an empty network")]
    EmptyInput,
}

/// Summary of one route for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteSummary {
    pub id: RouteId,
    pub name: String,
    pub stop_count: usize,
}

impl From<&Route> for RouteSummary {
    fn from(route: &Route) -> Self {
        Self {
            id: route.id().clone(),
            name: route.name().to_string(),
            stop_count: route.stop_count(),
        }
    }
}

/// Aggregate statistics for a network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkStats {
    /// The route serving the most stops.
    pub most_stops: RouteSummary,

    /// The route serving the fewest stops.
    pub fewest_stops: RouteSummary,

    /// Stops served by more than one route.
    pub hubs: HubStopIndex,
}

/// Compute statistics over the routes and hub index.
///
/// Ties for most or fewest stops go to the route that comes first in
/// `routes`.
pub fn aggregate(routes: &[Route], hubs: &HubStopIndex) -> Result<NetworkStats, StatsError> {
    let (first, rest) = routes.split_first().ok_or(StatsError::EmptyInput)?;

    let (most, fewest) = rest.iter().fold((first, first), |(most, fewest), route| {
        let most = if route.stop_count() > most.stop_count() {
            route
        } else {
            most
        };
        let fewest = if route.stop_count() < fewest.stop_count() {
            route
        } else {
            fewest
        };
        (most, fewest)
    });

    Ok(NetworkStats {
        most_stops: most.into(),
        fewest_stops: fewest.into(),
        hubs: hubs.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StopName;
    use crate::network::build_adjacency;

    fn route_with_stops(id: &str, count: usize) -> Route {
        Route::new(
            RouteId::parse(id).unwrap(),
            format!("{id} Line"),
            (0..count).map(|i| StopName::parse(&format!("{id}-{i}")).unwrap()),
        )
    }

    #[test]
    fn picks_max_and_min() {
        let routes = vec![
            route_with_stops("A", 5),
            route_with_stops("B", 12),
            route_with_stops("C", 3),
        ];

        let stats = aggregate(&routes, &HubStopIndex::default()).unwrap();

        assert_eq!(stats.most_stops.id.as_str(), "B");
        assert_eq!(stats.most_stops.stop_count, 12);
        assert_eq!(stats.fewest_stops.id.as_str(), "C");
        assert_eq!(stats.fewest_stops.stop_count, 3);
        assert_eq!(stats.fewest_stops.name, "C Line");
    }

    #[test]
    fn ties_go_to_first_occurrence() {
        let routes = vec![
            route_with_stops("A", 4),
            route_with_stops("B", 9),
            route_with_stops("C", 9),
            route_with_stops("D", 4),
        ];

        let stats = aggregate(&routes, &HubStopIndex::default()).unwrap();

        assert_eq!(stats.most_stops.id.as_str(), "B");
        assert_eq!(stats.fewest_stops.id.as_str(), "A");
    }

    #[test]
    fn single_route_is_both_extremes() {
        let routes = vec![route_with_stops("Only", 7)];
        let stats = aggregate(&routes, &HubStopIndex::default()).unwrap();

        assert_eq!(stats.most_stops, stats.fewest_stops);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = aggregate(&[], &HubStopIndex::default()).unwrap_err();
        assert_eq!(err, StatsError::EmptyInput);
        assert_eq!(err.to_string(), "cannot compute statistics for an empty network");
    }

    #[test]
    fn carries_hub_index() {
        let stop = |s: &str| StopName::parse(s).unwrap();
        let routes = vec![
            Route::new(RouteId::parse("Red").unwrap(), "Red Line", [stop("Park Street")]),
            Route::new(
                RouteId::parse("Green-B").unwrap(),
                "Green Line B",
                [stop("Park Street"), stop("Kenmore")],
            ),
        ];
        let (_, hubs) = build_adjacency(&routes);

        let stats = aggregate(&routes, &hubs).unwrap();

        assert_eq!(stats.hubs.len(), 1);
        assert!(stats.hubs.get(&stop("Park Street")).is_some());
    }
}
