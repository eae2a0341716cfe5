//! Route types.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::StopName;

/// Error returned when parsing an invalid route identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid route id: {reason}")]
pub struct InvalidRouteId {
    reason: &'static str,
}

/// A route (transit line) identifier, e.g. `Red` or `Green-B`.
///
/// Route ids are the nodes of the adjacency graph, so they are ordered:
/// every structure keyed by `RouteId` iterates in the same order on
/// every run.
///
/// # Examples
///
/// ```
/// use transfer_planner::domain::RouteId;
///
/// let red = RouteId::parse("Red").unwrap();
/// assert_eq!(red.as_str(), "Red");
///
/// assert!(RouteId::parse("").is_err());
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteId(String);

impl RouteId {
    /// Parse a route id, trimming surrounding whitespace.
    pub fn parse(s: &str) -> Result<Self, InvalidRouteId> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(InvalidRouteId {
                reason: "must not be empty",
            });
        }

        if trimmed.chars().any(char::is_control) {
            return Err(InvalidRouteId {
                reason: "must not contain control characters",
            });
        }

        Ok(RouteId(trimmed.to_string()))
    }

    /// Returns the route id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteId {
    type Error = InvalidRouteId;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        RouteId::parse(&value)
    }
}

impl From<RouteId> for String {
    fn from(id: RouteId) -> Self {
        id.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RouteId({})", self.0)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A route together with the set of stops it serves.
///
/// Stop order along the line is irrelevant here; only membership matters
/// for deciding where riders can transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    id: RouteId,
    name: String,
    stop_names: BTreeSet<StopName>,
}

impl Route {
    /// Creates a route. Duplicate stop names collapse into one.
    pub fn new(
        id: RouteId,
        name: impl Into<String>,
        stops: impl IntoIterator<Item = StopName>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            stop_names: stops.into_iter().collect(),
        }
    }

    /// The route identifier.
    pub fn id(&self) -> &RouteId {
        &self.id
    }

    /// Human-readable route name (e.g. "Red Line").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The distinct stops this route serves.
    pub fn stop_names(&self) -> &BTreeSet<StopName> {
        &self.stop_names
    }

    /// Number of distinct stops served.
    pub fn stop_count(&self) -> usize {
        self.stop_names.len()
    }

    /// Whether this route serves the given stop.
    pub fn serves(&self, stop: &StopName) -> bool {
        self.stop_names.contains(stop)
    }
}
