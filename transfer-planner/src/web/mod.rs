//! Web layer for the transfer planner.
//!
//! Provides JSON endpoints for route listings, network statistics and
//! transfer paths.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
