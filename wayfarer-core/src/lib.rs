//! Core route-planning types for the Wayfarer engine.
//!
//! The crate is synchronous and free of I/O. It orders stops, asks an
//! injected [`DirectionsProvider`] for a road route, and synthesises a
//! deterministic route whenever the remote one is unavailable. Every plan
//! yields a displayable [`RouteResult`]; errors are recorded in its
//! [`RouteSource`] rather than returned.

mod coordinate;
pub mod directions;
mod eta;
mod ordering;
mod planner;
mod route;
mod synthesis;
mod viewport;

pub use coordinate::{Coordinate, EARTH_RADIUS_KM, haversine_km, path_length_km};
pub use directions::{Directions, DirectionsError, DirectionsProvider, DirectionsQuery, Offline};
pub use eta::{estimate_travel_time, format_duration, format_duration_text, hours_to_duration};
pub use ordering::{nearest_neighbour_order, order_waypoints};
pub use planner::{PlannerConfig, RoutePlanner};
pub use route::{
    FallbackReason, RouteMode, RouteRequest, RouteRequestError, RouteResult, RouteSource, round_km,
};
pub use synthesis::{VIETNAM_NORTH_SOUTH_CORRIDOR, corridor_polyline, interpolate_polyline};
pub use viewport::{DEFAULT_VIEWPORT_PADDING, MIN_VIEWPORT_SPAN_DEGREES, MapViewport};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
