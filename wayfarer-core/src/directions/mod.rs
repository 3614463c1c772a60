//! Fetch road routes from a directions service.
//!
//! The `DirectionsProvider` trait abstracts a remote routing call: callers
//! supply origin, destination and ordered intermediate waypoints, and
//! receive the route's length, duration and dense geometry.
//!
//! Failures are reported as [`DirectionsError`]; the planner recovers from
//! every one of them by synthesising a route locally.

mod error;
mod provider;

pub use error::DirectionsError;
pub use provider::{Directions, DirectionsProvider, DirectionsQuery, Offline};
