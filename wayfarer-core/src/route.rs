//! Route requests and the renderable routes produced for them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Coordinate, DirectionsError};

/// How a request should be planned.
///
/// `Single` is the mock mode used by single-order screens: it never calls
/// the remote service. `MultiStop` and `LongHaul` try the remote service
/// first when one is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteMode {
    /// One pickup and one drop-off, synthesised locally.
    #[default]
    Single,
    /// Several stops visited in nearest-neighbour order.
    MultiStop,
    /// Intercity trip following the north-south highway corridor.
    LongHaul,
}

/// Parameters for a single planning call.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, RouteMode, RouteRequest};
///
/// let request = RouteRequest::new(Coordinate::new(10.77, 106.70), Coordinate::new(10.80, 106.66))
///     .with_stops(vec![Coordinate::new(10.78, 106.69)])
///     .with_mode(RouteMode::MultiStop);
/// assert_eq!(request.stops.len(), 1);
/// assert!(request.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteRequest {
    /// Where the route starts.
    pub origin: Coordinate,
    /// Where the route ends.
    pub destination: Coordinate,
    /// Intermediate stops, in the order the caller supplied them.
    #[serde(default)]
    pub stops: Vec<Coordinate>,
    /// Planning mode.
    #[serde(default)]
    pub mode: RouteMode,
}

/// Reasons a [`RouteRequest`] is rejected by [`RouteRequest::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteRequestError {
    /// The origin is not a valid WGS84 coordinate.
    #[error("origin {0:?} is not a valid coordinate")]
    InvalidOrigin(Coordinate),
    /// The destination is not a valid WGS84 coordinate.
    #[error("destination {0:?} is not a valid coordinate")]
    InvalidDestination(Coordinate),
    /// A stop is not a valid WGS84 coordinate.
    #[error("stop {index} ({coordinate:?}) is not a valid coordinate")]
    InvalidStop {
        /// Position of the stop in the request.
        index: usize,
        /// The offending value.
        coordinate: Coordinate,
    },
}

impl RouteRequest {
    /// Construct a request with no stops in [`RouteMode::Single`].
    #[must_use]
    pub const fn new(origin: Coordinate, destination: Coordinate) -> Self {
        Self {
            origin,
            destination,
            stops: Vec::new(),
            mode: RouteMode::Single,
        }
    }

    /// Replace the intermediate stops.
    #[must_use]
    pub fn with_stops(mut self, stops: Vec<Coordinate>) -> Self {
        self.stops = stops;
        self
    }

    /// Set the planning mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RouteMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check every coordinate is finite and within range.
    ///
    /// # Errors
    ///
    /// Returns the first invalid coordinate found, checking origin,
    /// destination and then stops in order.
    pub fn validate(&self) -> Result<(), RouteRequestError> {
        if !self.origin.is_valid() {
            return Err(RouteRequestError::InvalidOrigin(self.origin));
        }
        if !self.destination.is_valid() {
            return Err(RouteRequestError::InvalidDestination(self.destination));
        }
        if let Some((index, coordinate)) = self
            .stops
            .iter()
            .enumerate()
            .find(|(_, stop)| !stop.is_valid())
        {
            return Err(RouteRequestError::InvalidStop {
                index,
                coordinate: *coordinate,
            });
        }
        Ok(())
    }
}

/// Why the planner synthesised a route instead of using the remote one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "reason", content = "error")]
pub enum FallbackReason {
    /// The request mode never calls the remote service.
    SynthesisOnly,
    /// The planner was built without a directions provider.
    NoProvider,
    /// The remote call failed or returned nothing usable.
    RemoteUnavailable(DirectionsError),
}

/// Where a [`RouteResult`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "detail")]
pub enum RouteSource {
    /// Geometry and estimates came from the directions service.
    Remote,
    /// Geometry and estimates were synthesised locally.
    Fallback(FallbackReason),
}

impl RouteSource {
    /// Whether the route was synthesised locally.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}

/// A planned route ready for display.
///
/// `ordered_waypoints` always starts at the origin and ends at the
/// destination with every stop exactly once in between. `polyline` always
/// has at least two points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    /// Origin, stops in visiting order, destination.
    pub ordered_waypoints: Vec<Coordinate>,
    /// Dense path for rendering.
    pub polyline: Vec<Coordinate>,
    /// Route length in kilometres, one decimal place.
    pub distance_km: f64,
    /// Estimated driving time.
    pub duration: Duration,
    /// Display form of `duration`.
    pub duration_text: String,
    /// Whether the route is remote or synthesised.
    pub source: RouteSource,
}

impl RouteResult {
    /// First waypoint of the route.
    #[must_use]
    pub fn origin(&self) -> Option<&Coordinate> {
        self.ordered_waypoints.first()
    }

    /// Last waypoint of the route.
    #[must_use]
    pub fn destination(&self) -> Option<&Coordinate> {
        self.ordered_waypoints.last()
    }

    /// Intermediate stops in visiting order.
    #[must_use]
    pub fn stops(&self) -> &[Coordinate] {
        match self.ordered_waypoints.as_slice() {
            [_, inner @ .., _] => inner,
            _ => &[],
        }
    }
}

/// Round kilometres to one decimal place.
#[must_use]
pub fn round_km(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}
