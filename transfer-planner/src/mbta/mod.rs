//! MBTA v3 API client and network loading.
//!
//! Provides the route and stop data the planner consumes: the live HTTP
//! client, a mock that serves fixture files, a disk snapshot, and the
//! loader that fans out one stop query per route.

mod client;
mod error;
mod loader;
mod mock;
mod snapshot;
mod types;

pub use client::{MbtaClient, MbtaConfig};
pub use error::MbtaError;
pub use loader::{RouteSource, load_routes};
pub use mock::MockMbtaClient;
pub use snapshot::{DEFAULT_MAX_AGE, NetworkSnapshot, SnapshotRejection, SnapshotStore};
pub use types::{
    Document, Resource, RouteAttributes, RouteResource, StopAttributes, StopResource,
};
