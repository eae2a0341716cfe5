//! Domain types for the transfer planner.
//!
//! Route ids and stop names are validated at construction time, so code
//! that receives them can trust they are non-empty and printable.

mod route;
mod stop;

pub use route::{InvalidRouteId, Route, RouteId};
pub use stop::{InvalidStopName, StopName};
