use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use transfer_planner::cache::{CacheConfig, CachedMbtaClient};
use transfer_planner::config::AppConfig;
use transfer_planner::domain::Route;
use transfer_planner::mbta::{
    MbtaClient, MbtaConfig, MbtaError, MockMbtaClient, SnapshotStore, load_routes,
};
use transfer_planner::network::TransitNetwork;
use transfer_planner::web::{AppState, create_router};

/// Number of stop queries issued concurrently while loading.
const LOAD_BATCH_SIZE: usize = 8;

/// Where network data comes from.
enum DataSource {
    Live(Arc<CachedMbtaClient>),
    Mock(MockMbtaClient),
}

impl DataSource {
    async fn load(&self) -> Result<Vec<Route>, MbtaError> {
        match self {
            DataSource::Live(client) => load_routes(client.as_ref(), LOAD_BATCH_SIZE).await,
            DataSource::Mock(client) => load_routes(client, LOAD_BATCH_SIZE).await,
        }
    }

    /// Route-type filter for live data; mock data is never snapshotted.
    fn route_filter(&self) -> Option<&str> {
        match self {
            DataSource::Live(client) => Some(client.client().route_filter()),
            DataSource::Mock(_) => None,
        }
    }

    /// Drop cached responses so the next load sees fresh data.
    fn invalidate(&self) {
        if let DataSource::Live(client) = self {
            client.invalidate_all();
        }
    }
}

fn save_snapshot(store: Option<&SnapshotStore>, routes: &[Route]) {
    if let Some(store) = store
        && let Err(e) = store.save(routes)
    {
        warn!(path = %store.path().display(), error = %e, "Failed to save network snapshot");
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");

    let source = match &config.mock_data_dir {
        Some(dir) => {
            info!(dir = %dir.display(), "Using mock network data");
            DataSource::Mock(MockMbtaClient::new(dir).expect("Failed to load mock data"))
        }
        None => {
            if config.mbta_api_key.is_none() {
                warn!("MBTA_API_KEY not set. Requests will be rate limited.");
            }
            let mut mbta_config = MbtaConfig::new(config.mbta_api_key.clone());
            if let Some(url) = &config.mbta_base_url {
                mbta_config = mbta_config.with_base_url(url);
            }
            let client = MbtaClient::new(mbta_config).expect("Failed to create MBTA client");
            DataSource::Live(Arc::new(CachedMbtaClient::new(
                client,
                &CacheConfig::default(),
            )))
        }
    };

    let snapshot = source.route_filter().map(|filter| {
        SnapshotStore::new(&config.snapshot_path, filter).with_max_age(config.refresh_interval)
    });

    // Prefer a usable snapshot on disk, fail fast if neither it nor the API is available
    let from_disk = snapshot.as_ref().and_then(|store| match store.load() {
        Ok(routes) => {
            info!(
                path = %store.path().display(),
                routes = routes.len(),
                "Loaded network snapshot"
            );
            Some(routes)
        }
        Err(reason) => {
            info!(path = %store.path().display(), %reason, "Not using network snapshot");
            None
        }
    });
    let routes = match from_disk {
        Some(routes) => routes,
        None => {
            let routes = source.load().await.expect("Failed to load network");
            save_snapshot(snapshot.as_ref(), &routes);
            routes
        }
    };

    let network = TransitNetwork::build(routes);
    info!(
        routes = network.routes().len(),
        stops = network.stops().len(),
        hubs = network.hubs().len(),
        "Network ready"
    );

    let state = AppState::new(network);

    // Periodically reload the network; on failure keep serving the old one
    let refresh_state = state.clone();
    let refresh_interval = config.refresh_interval;
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(refresh_interval);
        interval.tick().await; // First tick is immediate, skip it
        loop {
            interval.tick().await;
            source.invalidate();
            match source.load().await {
                Ok(routes) => {
                    save_snapshot(snapshot.as_ref(), &routes);
                    let network = TransitNetwork::build(routes);
                    info!(routes = network.routes().len(), "Refreshed network");
                    refresh_state.replace_network(network).await;
                }
                Err(e) => error!(error = %e, "Failed to refresh network"),
            }
        }
    });

    let app = create_router(state);

    let addr = config.bind_addr;
    info!("Transfer planner listening on http://{addr}");
    info!("  GET /health");
    info!("  GET /api/routes");
    info!("  GET /api/stats");
    info!("  GET /api/path?from=<stop>&to=<stop>&closed=<route,...>");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");
    axum::serve(listener, app).await.expect("Server error");
}
