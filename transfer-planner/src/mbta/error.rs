//! MBTA client error types.

use std::path::PathBuf;

use crate::domain::RouteId;

/// Errors that can occur when fetching network data from the MBTA API.
#[derive(Debug, thiserror::Error)]
pub enum MbtaError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Authentication failed
    #[error("unauthorized: check MBTA_API_KEY")]
    Unauthorized,

    /// Rate limited by the API
    #[error("rate limited by MBTA API")]
    RateLimited,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// No stops are known for the route
    #[error("no stops for route {0}")]
    RouteNotFound(RouteId),

    /// Client configuration cannot be used (e.g. a malformed API key)
    #[error("invalid MBTA client configuration: {0}")]
    InvalidConfig(String),

    /// The client's request limiter was shut down
    #[error("MBTA client is closed")]
    ClientClosed,

    /// Reading local network data failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Local network data is present but unusable
    #[error("invalid mock data: {0}")]
    MockData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = MbtaError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = MbtaError::Json {
            message: "expected string".into(),
            body: Some("{}".into()),
        };
        assert_eq!(err.to_string(), "JSON parse error: expected string");

        assert_eq!(
            MbtaError::Unauthorized.to_string(),
            "unauthorized: check MBTA_API_KEY"
        );
        assert_eq!(
            MbtaError::RouteNotFound(RouteId::parse("Red").unwrap()).to_string(),
            "no stops for route Red"
        );
        assert_eq!(
            MbtaError::InvalidConfig("bad key".into()).to_string(),
            "invalid MBTA client configuration: bad key"
        );
        assert_eq!(MbtaError::ClientClosed.to_string(), "MBTA client is closed");
    }

    #[test]
    fn io_error_names_the_file() {
        let err = MbtaError::Io {
            path: PathBuf::from("data/routes.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert_eq!(err.to_string(), "failed to read data/routes.json: missing");
        assert!(std::error::Error::source(&err).is_some());
    }
}
