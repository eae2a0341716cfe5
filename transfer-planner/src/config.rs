//! Server configuration.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Default refresh interval: 24 hours.
const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Error from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable held a value that could not be used
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

/// Configuration for the server binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// MBTA API key (optional; unauthenticated requests are rate limited harder)
    pub mbta_api_key: Option<String>,

    /// Override for the MBTA API base URL
    pub mbta_base_url: Option<String>,

    /// Address to serve HTTP on
    pub bind_addr: SocketAddr,

    /// How often to reload the network from the API
    pub refresh_interval: Duration,

    /// Where to keep the on-disk network snapshot
    pub snapshot_path: PathBuf,

    /// Serve fixture data from this directory instead of the live API
    pub mock_data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mbta_api_key: None,
            mbta_base_url: None,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            snapshot_path: PathBuf::from("network_snapshot.json"),
            mock_data_dir: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through a variable lookup function.
    ///
    /// Unset and empty variables fall back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        config.mbta_api_key = get("MBTA_API_KEY");
        config.mbta_base_url = get("MBTA_BASE_URL");

        if let Some(addr) = get("BIND_ADDR") {
            config.bind_addr = addr.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "BIND_ADDR",
                message: format!("{e}"),
            })?;
        }

        if let Some(secs) = get("REFRESH_INTERVAL_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|e| ConfigError::Invalid {
                var: "REFRESH_INTERVAL_SECS",
                message: format!("{e}"),
            })?;
            if secs == 0 {
                return Err(ConfigError::Invalid {
                    var: "REFRESH_INTERVAL_SECS",
                    message: "must be greater than zero".to_string(),
                });
            }
            config.refresh_interval = Duration::from_secs(secs);
        }

        if let Some(path) = get("SNAPSHOT_PATH") {
            config.snapshot_path = PathBuf::from(path);
        }

        config.mock_data_dir = get("MOCK_DATA_DIR").map(PathBuf::from);

        Ok(config)
    }
}
