//! Subway transfer planner.
//!
//! Builds a graph of transit routes that share stops and answers: "which
//! lines do I ride, with the fewest transfers, to get from this stop to
//! that one?" Route and stop data come from the MBTA v3 API.

pub mod cache;
pub mod config;
pub mod domain;
pub mod mbta;
pub mod network;
pub mod planner;
pub mod web;
