//! Facade crate for the Wayfarer trip planning engine.
//!
//! This crate re-exports the route planning domain and exposes the HTTP
//! directions provider and the device location resolver behind feature
//! flags.

#![forbid(unsafe_code)]

pub use wayfarer_core::{
    Coordinate, Directions, DirectionsError, DirectionsProvider, DirectionsQuery, FallbackReason,
    MapViewport, Offline, PlannerConfig, RouteMode, RoutePlanner, RouteRequest, RouteRequestError,
    RouteResult, RouteSource, format_duration_text, haversine_km,
};

#[cfg(feature = "http")]
pub use wayfarer_data::routing::{
    HttpDirectionsProvider, HttpDirectionsProviderConfig, ProviderBuildError,
};

#[cfg(feature = "location")]
pub use wayfarer_location::{
    LocationError, LocationResolver, LocationResolverConfig, LocationResult, PositioningError,
    PositioningService, ResolverStatus,
};

/// Deterministic doubles for exercising planners and resolvers in tests.
#[cfg(feature = "test-support")]
pub mod test_support {
    pub use wayfarer_core::test_support::*;
    #[cfg(feature = "location")]
    pub use wayfarer_location::test_support::*;
}
