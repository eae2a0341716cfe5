//! Mock MBTA client for running without API access.
//!
//! Serves routes and stops from JSON files in the API's own wire format:
//! `routes.json` holds the route document and `stops/{route id}.json` the
//! stop document for each route.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::domain::RouteId;

use super::error::MbtaError;
use super::loader::RouteSource;
use super::types::{Document, RouteAttributes, RouteResource, StopAttributes, StopResource};

/// Mock client that serves data from JSON files.
#[derive(Debug, Clone)]
pub struct MockMbtaClient {
    routes: Arc<Vec<RouteResource>>,
    stops: Arc<HashMap<RouteId, Vec<StopResource>>>,
}

impl MockMbtaClient {
    /// Load mock data from a directory.
    pub fn new(data_dir: impl AsRef<Path>) -> Result<Self, MbtaError> {
        let data_dir = data_dir.as_ref();

        let routes: Document<RouteAttributes> = read_json(&data_dir.join("routes.json"))?;

        let stops_dir = data_dir.join("stops");
        let entries = std::fs::read_dir(&stops_dir).map_err(|source| MbtaError::Io {
            path: stops_dir.clone(),
            source,
        })?;

        let mut stops = HashMap::new();
        for entry in entries {
            let entry = entry.map_err(|source| MbtaError::Io {
                path: stops_dir.clone(),
                source,
            })?;

            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            // Route id from filename (e.g. "Green-B.json" -> "Green-B")
            let route = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| RouteId::parse(s).ok())
                .ok_or_else(|| MbtaError::MockData(format!("invalid filename: {:?}", path)))?;

            let document: Document<StopAttributes> = read_json(&path)?;
            stops.insert(route, document.data);
        }

        if routes.data.is_empty() {
            return Err(MbtaError::MockData(format!(
                "no routes found in {:?}",
                data_dir
            )));
        }

        Ok(Self {
            routes: Arc::new(routes.data),
            stops: Arc::new(stops),
        })
    }

    /// Route ids that have stop data.
    pub fn available_routes(&self) -> Vec<RouteId> {
        let mut ids: Vec<RouteId> = self.stops.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl RouteSource for MockMbtaClient {
    async fn routes(&self) -> Result<Vec<RouteResource>, MbtaError> {
        Ok(self.routes.as_ref().clone())
    }

    async fn stops(&self, route: &RouteId) -> Result<Vec<StopResource>, MbtaError> {
        self.stops
            .get(route)
            .cloned()
            .ok_or_else(|| MbtaError::RouteNotFound(route.clone()))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, MbtaError> {
    let json = std::fs::read_to_string(path).map_err(|source| MbtaError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&json).map_err(|e| MbtaError::Json {
        message: format!("Failed to parse {:?}: {}", path, e),
        body: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mbta::load_routes;
    use crate::network::TransitNetwork;

    fn data_dir() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data/mock_network")
    }

    fn id(s: &str) -> RouteId {
        RouteId::parse(s).unwrap()
    }

    #[tokio::test]
    async fn load_mock_data() {
        let client = MockMbtaClient::new(data_dir()).unwrap();
        let available = client.available_routes();

        assert!(available.contains(&id("Red")));
        assert!(available.contains(&id("Mattapan")));
    }

    #[tokio::test]
    async fn get_stops() {
        let client = MockMbtaClient::new(data_dir()).unwrap();
        let stops = client.stops(&id("Blue")).await.unwrap();

        assert!(!stops.is_empty());
        assert_eq!(stops[0].attributes.name.as_deref(), Some("Wonderland"));
    }

    #[tokio::test]
    async fn unknown_route_returns_error() {
        let client = MockMbtaClient::new(data_dir()).unwrap();
        let result = client.stops(&id("Silver")).await;

        assert!(matches!(result, Err(MbtaError::RouteNotFound(_))));
    }

    #[tokio::test]
    async fn missing_directory_is_an_error() {
        let err = MockMbtaClient::new("/nonexistent/mock").unwrap_err();
        assert!(matches!(err, MbtaError::Io { .. }));
    }

    #[tokio::test]
    async fn empty_route_list_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("routes.json"), r#"{"data": []}"#).unwrap();
        std::fs::create_dir(dir.path().join("stops")).unwrap();

        let err = MockMbtaClient::new(dir.path()).unwrap_err();
        assert!(matches!(err, MbtaError::MockData(_)));
    }

    #[tokio::test]
    async fn mock_network_is_connected_downtown() {
        let client = MockMbtaClient::new(data_dir()).unwrap();
        let network = TransitNetwork::build(load_routes(&client, 4).await.unwrap());

        let graph = network.graph();
        assert!(graph.are_adjacent(&id("Red"), &id("Orange")));
        assert!(graph.are_adjacent(&id("Orange"), &id("Blue")));
        assert!(graph.are_adjacent(&id("Green-B"), &id("Green-E")));
        assert!(!graph.are_adjacent(&id("Red"), &id("Blue")));
        assert!(graph.are_adjacent(&id("Red"), &id("Mattapan")));
    }
}
