//! On-disk copy of the last successful network load.
//!
//! A snapshot remembers the route-type filter it was loaded under. The
//! server only starts from a snapshot that is recent, was taken under the
//! filter it is configured with, and would produce a usable network;
//! anything else is refused and the caller goes back to the API.

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use crate::domain::{Route, RouteId};

use super::error::MbtaError;

/// Snapshots older than this are not used.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Routes as loaded from the API, with the conditions they were loaded under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSnapshot {
    route_filter: String,
    /// Unix seconds
    taken_at: u64,
    routes: Vec<Route>,
}

impl NetworkSnapshot {
    /// Capture `routes`, loaded under `route_filter`, as of now.
    pub fn new(route_filter: impl Into<String>, routes: Vec<Route>) -> Self {
        Self {
            route_filter: route_filter.into(),
            taken_at: unix_now(),
            routes,
        }
    }

    pub fn route_filter(&self) -> &str {
        &self.route_filter
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Time since the snapshot was taken, as seen at `now` (unix seconds).
    pub fn age(&self, now: u64) -> Duration {
        Duration::from_secs(now.saturating_sub(self.taken_at))
    }

    /// Check that this snapshot can stand in for a fresh load.
    pub fn validate(
        &self,
        route_filter: &str,
        max_age: Duration,
        now: u64,
    ) -> Result<(), SnapshotRejection> {
        if self.route_filter != route_filter {
            return Err(SnapshotRejection::FilterMismatch {
                stored: self.route_filter.clone(),
                expected: route_filter.to_string(),
            });
        }

        let age = self.age(now);
        if age >= max_age {
            return Err(SnapshotRejection::Expired { age });
        }

        if self.routes.is_empty() {
            return Err(SnapshotRejection::Empty);
        }

        let mut seen = HashSet::new();
        if let Some(dup) = self.routes.iter().map(Route::id).find(|id| !seen.insert(*id)) {
            return Err(SnapshotRejection::DuplicateRoute(dup.clone()));
        }

        Ok(())
    }

    pub fn into_routes(self) -> Vec<Route> {
        self.routes
    }
}

/// Why a snapshot on disk was not used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SnapshotRejection {
    #[error("no snapshot file")]
    Missing,

    #[error("snapshot unreadable: {0}")]
    Unreadable(String),

    #[error("snapshot is {}s old", age.as_secs())]
    Expired { age: Duration },

    #[error("snapshot was taken for route types {stored}, want {expected}")]
    FilterMismatch { stored: String, expected: String },

    #[error("snapshot holds no routes")]
    Empty,

    #[error("snapshot lists route {0} twice")]
    DuplicateRoute(RouteId),
}

/// Reads and writes the snapshot for one route-type filter.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
    route_filter: String,
    max_age: Duration,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>, route_filter: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            route_filter: route_filter.into(),
            max_age: DEFAULT_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Routes from the snapshot, if it passes [`NetworkSnapshot::validate`].
    pub fn load(&self) -> Result<Vec<Route>, SnapshotRejection> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(SnapshotRejection::Missing);
            }
            Err(e) => return Err(SnapshotRejection::Unreadable(e.to_string())),
        };

        let snapshot: NetworkSnapshot = serde_json::from_slice(&bytes)
            .map_err(|e| SnapshotRejection::Unreadable(e.to_string()))?;
        snapshot.validate(&self.route_filter, self.max_age, unix_now())?;

        Ok(snapshot.into_routes())
    }

    /// Record `routes` as the latest load.
    ///
    /// The file is replaced in one rename, so a reader never sees a
    /// half-written snapshot.
    pub fn save(&self, routes: &[Route]) -> Result<(), MbtaError> {
        let snapshot = NetworkSnapshot::new(self.route_filter.as_str(), routes.to_vec());
        let json = serde_json::to_vec(&snapshot).map_err(|e| MbtaError::Json {
            message: format!("failed to encode snapshot: {e}"),
            body: None,
        })?;

        let io_error = |path: &Path| {
            let path = path.to_path_buf();
            move |source: io::Error| MbtaError::Io { path, source }
        };

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(io_error(dir))?;
        }

        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, json).map_err(io_error(&staging))?;
        std::fs::rename(&staging, &self.path).map_err(io_error(&self.path))
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
