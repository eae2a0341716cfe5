//! Stop-to-stop planning on top of the route search.

use std::borrow::Cow;

use tracing::debug;

use crate::domain::{RouteId, StopName};
use crate::network::TransitNetwork;

use super::search::{PathError, TransferPath, find_path};

/// Error from planning a trip between two stops.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// The stop is not served by any known route
    #[error("unknown stop: {0}")]
    UnknownStop(StopName),

    /// Route search failed
    #[error(transparent)]
    Path(#[from] PathError),
}

/// Request to plan a trip between two stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanRequest {
    /// Stop the rider starts from.
    pub from: StopName,

    /// Stop the rider wants to reach.
    pub to: StopName,

    /// Routes that are out of service for this request.
    pub closed: Vec<RouteId>,
}

impl PlanRequest {
    /// Create a request with every route in service.
    pub fn new(from: StopName, to: StopName) -> Self {
        Self {
            from,
            to,
            closed: Vec::new(),
        }
    }

    /// Mark routes as out of service.
    pub fn with_closed(mut self, closed: impl IntoIterator<Item = RouteId>) -> Self {
        self.closed.extend(closed);
        self
    }
}

/// Plan the fewest-transfer trip between two stops.
///
/// Both stops are resolved to the routes serving them. Closed routes are
/// taken out of the graph and out of the resolved route sets, so a stop
/// served only by closed routes fails with `NoStartRoute` or
/// `NoEndRoute`.
pub fn plan(network: &TransitNetwork, request: &PlanRequest) -> Result<TransferPath, PlanError> {
    let start_routes = resolve(network, &request.from, &request.closed)?;
    let end_routes = resolve(network, &request.to, &request.closed)?;

    let graph = if request.closed.is_empty() {
        Cow::Borrowed(network.graph())
    } else {
        Cow::Owned(network.graph().without_routes(&request.closed))
    };

    let path = find_path(&start_routes, &end_routes, &graph)?;

    debug!(
        from = %request.from,
        to = %request.to,
        closed = request.closed.len(),
        transfers = path.transfers(),
        "Planned transfer path"
    );

    Ok(path)
}

/// Routes serving `stop` that are still in service.
fn resolve(
    network: &TransitNetwork,
    stop: &StopName,
    closed: &[RouteId],
) -> Result<Vec<RouteId>, PlanError> {
    let serving = network
        .routes_serving(stop)
        .ok_or_else(|| PlanError::UnknownStop(stop.clone()))?;

    Ok(serving
        .iter()
        .filter(|route| !closed.contains(*route))
        .cloned()
        .collect())
}
