//! Device position acquisition for the Wayfarer engine.
//!
//! [`LocationResolver`] wraps a platform [`PositioningService`] with
//! permission and service checks, a last-known fast path, a
//! progressive-accuracy search, reverse geocoding with a placeholder
//! fallback, and a single-entry TTL cache. Each resolver runs at most one
//! attempt at a time; newer attempts cancel older ones and stale results
//! are never published.
//!
//! The resolver is runtime-agnostic apart from Tokio's timer and sync
//! primitives; it spawns no tasks.

mod cache;
mod config;
mod error;
mod resolver;
mod service;
mod types;

pub use cache::LocationCacheEntry;
pub use config::{ADDRESS_UNAVAILABLE, DEFAULT_TIERS, LocationResolverConfig};
pub use error::{LocationError, PositioningError};
pub use resolver::{LocationResolver, ResolverStatus};
pub use service::PositioningService;
pub use types::{
    Accuracy, AccuracyTier, Address, FixOrigin, LocationResult, PermissionStatus, PositionFix,
};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod tests;
