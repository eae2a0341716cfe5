//! MBTA v3 API HTTP client.
//!
//! Fetches the subway route list and, per route, the stops it serves.
//! Requests are bounded by a semaphore so a full network load does not
//! trip the API's rate limit.

use std::sync::Arc;

use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use tokio::sync::Semaphore;
use tracing::trace;

use crate::domain::RouteId;

use super::error::MbtaError;
use super::loader::RouteSource;
use super::types::{Document, Resource, RouteResource, StopResource};

/// Default base URL for the MBTA v3 API.
const DEFAULT_BASE_URL: &str = "https://api-v3.mbta.com";

/// Light rail (0) and heavy rail (1): the subway.
const DEFAULT_ROUTE_TYPES: [u8; 2] = [0, 1];

/// Default maximum concurrent requests.
const DEFAULT_MAX_CONCURRENT: usize = 5;

/// Configuration for the MBTA client.
#[derive(Debug, Clone)]
pub struct MbtaConfig {
    /// API key; the API works without one at a lower rate limit
    pub api_key: Option<String>,
    /// Base URL for the API
    pub base_url: String,
    /// GTFS route types to load
    pub route_types: Vec<u8>,
    /// Maximum concurrent requests
    pub max_concurrent: usize,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl MbtaConfig {
    /// Create a new config, optionally with an API key.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            route_types: DEFAULT_ROUTE_TYPES.to_vec(),
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set which route types to load.
    pub fn with_route_types(mut self, types: impl Into<Vec<u8>>) -> Self {
        self.route_types = types.into();
        self
    }

    /// Set maximum concurrent requests.
    pub fn with_max_concurrent(mut self, n: usize) -> Self {
        self.max_concurrent = n;
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// The `filter[type]` query value, e.g. `0,1`.
    pub fn route_type_filter(&self) -> String {
        self.route_types
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for MbtaConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

/// MBTA v3 API client.
#[derive(Debug, Clone)]
pub struct MbtaClient {
    http: reqwest::Client,
    base_url: String,
    route_filter: String,
    semaphore: Arc<Semaphore>,
}

impl MbtaClient {
    /// Create a new MBTA client with the given configuration.
    pub fn new(config: MbtaConfig) -> Result<Self, MbtaError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.api+json"),
        );

        if let Some(key) = &config.api_key {
            let api_key = HeaderValue::from_str(key).map_err(|_| {
                MbtaError::InvalidConfig("API key is not a valid header value".to_string())
            })?;
            headers.insert(HeaderName::from_static("x-api-key"), api_key);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            route_filter: config.route_type_filter(),
            semaphore: Arc::new(Semaphore::new(config.max_concurrent.max(1))),
        })
    }

    /// The route type filter this client was configured with.
    pub fn route_filter(&self) -> &str {
        &self.route_filter
    }

    /// Fetch the routes of the configured types.
    pub async fn fetch_routes(&self) -> Result<Vec<RouteResource>, MbtaError> {
        self.get_document("routes", &[("filter[type]", self.route_filter.clone())])
            .await
    }

    /// Fetch the stops served by a route.
    pub async fn fetch_stops(&self, route: &RouteId) -> Result<Vec<StopResource>, MbtaError> {
        self.get_document("stops", &[("filter[route]", route.as_str().to_string())])
            .await
    }

    /// GET a JSON:API document and return its resources.
    async fn get_document<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<Resource<T>>, MbtaError> {
        let _permit = self
            .semaphore
            .acquire()
            .await
            .map_err(|_| MbtaError::ClientClosed)?;

        let url = format!("{}/{}", self.base_url, path);
        trace!(%url, ?query, "MBTA request");

        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MbtaError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MbtaError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MbtaError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let document: Document<T> = serde_json::from_str(&body).map_err(|e| MbtaError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        Ok(document.data)
    }
}

impl RouteSource for MbtaClient {
    async fn routes(&self) -> Result<Vec<RouteResource>, MbtaError> {
        self.fetch_routes().await
    }

    async fn stops(&self, route: &RouteId) -> Result<Vec<StopResource>, MbtaError> {
        self.fetch_stops(route).await
    }
}
