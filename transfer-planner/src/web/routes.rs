//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tracing::warn;

use crate::domain::{RouteId, StopName};
use crate::network::StatsError;
use crate::planner::{PathError, PlanError, PlanRequest, plan};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/routes", get(list_routes))
        .route("/api/stats", get(network_stats))
        .route("/api/path", get(find_transfer_path))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every route with its stop count and adjacent routes.
async fn list_routes(State(state): State<AppState>) -> Json<RoutesResponse> {
    let network = state.network().await;

    let routes = network
        .routes()
        .iter()
        .map(|route| RouteResult::from_route(route, &network))
        .collect();

    Json(RoutesResponse { routes })
}

/// Longest and shortest routes plus hub stops.
async fn network_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let network = state.network().await;
    let stats = network.stats()?;
    Ok(Json(stats.into()))
}

/// Fewest-transfer path between two stops.
async fn find_transfer_path(
    State(state): State<AppState>,
    Query(req): Query<PathRequest>,
) -> Result<Json<PathResponse>, AppError> {
    let from = StopName::parse(&req.from).map_err(|e| AppError::BadRequest {
        message: format!("Invalid start stop: {e}"),
    })?;
    let to = StopName::parse(&req.to).map_err(|e| AppError::BadRequest {
        message: format!("Invalid end stop: {e}"),
    })?;
    let closed = parse_closed(req.closed.as_deref())?;

    let network = state.network().await;
    let request = PlanRequest::new(from, to).with_closed(closed);
    let path = plan(&network, &request)?;

    Ok(Json(PathResponse::from_path(&path, &network)))
}

/// Parse a comma-separated list of route ids, ignoring empty entries.
fn parse_closed(closed: Option<&str>) -> Result<Vec<RouteId>, AppError> {
    closed
        .unwrap_or_default()
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            RouteId::parse(s).map_err(|e| AppError::BadRequest {
                message: format!("Invalid closed route {s:?}: {e}"),
            })
        })
        .collect()
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        let message = e.to_string();
        match e {
            PlanError::UnknownStop(_) | PlanError::Path(PathError::NoPathFound) => {
                AppError::NotFound { message }
            }
            PlanError::Path(PathError::NoStartRoute | PathError::NoEndRoute) => {
                AppError::BadRequest { message }
            }
        }
    }
}

impl From<StatsError> for AppError {
    fn from(e: StatsError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), error = %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
