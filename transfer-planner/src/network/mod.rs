//! Route adjacency graph construction and network statistics.
//!
//! Turns a list of routes (each with the set of stops it serves) into an
//! undirected graph of routes that share a stop, plus stop indexes used
//! for statistics and for resolving a stop to the routes serving it.

mod graph;
mod intersect;
mod stats;
mod transit;

pub use graph::{AdjacencyGraph, HubStopIndex, StopIndex, build_adjacency};
pub use intersect::intersect;
pub use stats::{NetworkStats, RouteSummary, StatsError, aggregate};
pub use transit::TransitNetwork;
