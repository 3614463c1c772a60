//! HTTP-based directions providers for routing services.
//!
//! This module provides [`HttpDirectionsProvider`], an implementation of
//! [`wayfarer_core::DirectionsProvider`] that fetches driving routes from an
//! OSRM-compatible route service.
//!
//! # Architecture
//!
//! One request is made per query to the route endpoint with the ordered
//! waypoints. The synchronous [`wayfarer_core::DirectionsProvider`] trait is
//! implemented by blocking on the async HTTP call internally. Failures are
//! reported as [`wayfarer_core::DirectionsError`]; the planner decides what
//! to do with them.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use wayfarer_core::RoutePlanner;
//! use wayfarer_data::routing::{HttpDirectionsProvider, HttpDirectionsProviderConfig};
//!
//! let config = HttpDirectionsProviderConfig::new("https://routing.example.com")
//!     .with_api_key("my-key")
//!     .with_timeout(Duration::from_secs(10));
//! let planner = RoutePlanner::new(HttpDirectionsProvider::with_config(config)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod provider;
mod wire;

#[doc(hidden)]
pub mod test_support;

pub use provider::{
    DEFAULT_PROFILE, DEFAULT_USER_AGENT, HttpDirectionsProvider, HttpDirectionsProviderConfig,
    ProviderBuildError,
};
