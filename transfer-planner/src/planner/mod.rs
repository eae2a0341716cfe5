//! Fewest-transfer route planning.
//!
//! `find_path` works on route sets and a graph; `plan` is the stop-level
//! entry point that resolves stops to routes and applies closures first.

mod plan;
mod search;


pub use plan::{PlanError, PlanRequest, plan};
pub use search::{PathError, TransferPath, find_path};
