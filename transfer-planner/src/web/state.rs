//! Application state for the web layer.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::network::TransitNetwork;

/// Shared application state.
///
/// Holds the current network snapshot. A refresh swaps in a whole new
/// network; requests in flight keep the snapshot they started with.
#[derive(Clone)]
pub struct AppState {
    network: Arc<RwLock<Arc<TransitNetwork>>>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(network: TransitNetwork) -> Self {
        Self {
            network: Arc::new(RwLock::new(Arc::new(network))),
        }
    }

    /// The current network.
    pub async fn network(&self) -> Arc<TransitNetwork> {
        self.network.read().await.clone()
    }

    /// Replace the network with a freshly built one.
    pub async fn replace_network(&self, network: TransitNetwork) {
        let mut guard = self.network.write().await;
        *guard = Arc::new(network);
    }
}
