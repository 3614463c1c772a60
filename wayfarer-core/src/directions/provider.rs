//! Directions provider trait and the query/answer types it exchanges.

use crate::Coordinate;

use super::error::DirectionsError;

/// A routing question: drive from `origin` through `waypoints` to
/// `destination`, in that order.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsQuery {
    /// Start of the route.
    pub origin: Coordinate,
    /// End of the route.
    pub destination: Coordinate,
    /// Intermediate stops in visiting order, excluding the endpoints.
    pub waypoints: Vec<Coordinate>,
}

impl DirectionsQuery {
    /// Every coordinate of the query in travel order.
    pub fn points(&self) -> impl Iterator<Item = &Coordinate> {
        std::iter::once(&self.origin)
            .chain(self.waypoints.iter())
            .chain(std::iter::once(&self.destination))
    }

    /// Whether every coordinate in the query is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.points().all(Coordinate::is_valid)
    }
}

/// A route as returned by a directions service.
#[derive(Debug, Clone, PartialEq)]
pub struct Directions {
    /// Total length in metres.
    pub distance_m: f64,
    /// Total driving time in seconds.
    pub duration_s: f64,
    /// Dense route geometry in travel order.
    pub geometry: Vec<Coordinate>,
}

/// Fetch a driving route for a query.
///
/// Implementations perform at most one outbound request per call and do not
/// retry; the planner treats any error as a signal to synthesise a route.
///
/// # Examples
///
/// ```rust
/// use wayfarer_core::{Coordinate, Directions, DirectionsError, DirectionsProvider, DirectionsQuery};
///
/// struct StraightLine;
///
/// impl DirectionsProvider for StraightLine {
///     fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
///         Ok(Directions {
///             distance_m: 1_000.0,
///             duration_s: 60.0,
///             geometry: query.points().copied().collect(),
///         })
///     }
/// }
///
/// let query = DirectionsQuery {
///     origin: Coordinate::new(0.0, 0.0),
///     destination: Coordinate::new(0.0, 0.01),
///     waypoints: Vec::new(),
/// };
/// let directions = StraightLine.get_directions(&query)?;
/// assert_eq!(directions.geometry.len(), 2);
/// # Ok::<(), DirectionsError>(())
/// ```
pub trait DirectionsProvider {
    /// Return the route for `query`.
    ///
    /// Implementations must return `Err(DirectionsError::EmptyResponse)`
    /// when the service answers without a route.
    fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError>;
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for Box<T> {
    fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        (**self).get_directions(query)
    }
}

impl<T: DirectionsProvider + ?Sized> DirectionsProvider for &T {
    fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        (**self).get_directions(query)
    }
}

/// Provider type for planners that never reach a directions service.
///
/// The type has no values; it only fills the provider slot of
/// [`crate::RoutePlanner::offline`].
#[derive(Debug, Clone, Copy)]
pub enum Offline {}

impl DirectionsProvider for Offline {
    fn get_directions(&self, _query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        match *self {}
    }
}
