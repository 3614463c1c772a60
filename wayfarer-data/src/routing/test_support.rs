//! Test utilities for directions providers.
//!
//! This module provides [`StubDirectionsProvider`], a deterministic test
//! double for [`DirectionsProvider`] that returns pre-configured responses
//! without making HTTP requests. It also counts calls so tests can assert
//! that the planner skipped the remote service.

use std::sync::atomic::{AtomicUsize, Ordering};

use wayfarer_core::{Directions, DirectionsError, DirectionsProvider, DirectionsQuery};

/// Stub `DirectionsProvider` for testing.
///
/// # Example
///
/// ```
/// use wayfarer_core::{Coordinate, DirectionsProvider, DirectionsQuery};
/// use wayfarer_data::routing::test_support::StubDirectionsProvider;
///
/// let provider = StubDirectionsProvider::following_query(1_000.0, 60.0);
/// let query = DirectionsQuery {
///     origin: Coordinate::new(0.0, 0.0),
///     destination: Coordinate::new(0.0, 0.01),
///     waypoints: Vec::new(),
/// };
///
/// let directions = provider.get_directions(&query).unwrap();
/// assert_eq!(directions.geometry.len(), 2);
/// assert_eq!(provider.calls(), 1);
/// ```
#[derive(Debug)]
pub struct StubDirectionsProvider {
    response: StubResponse,
    calls: AtomicUsize,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Fixed(Directions),
    FollowQuery { distance_m: f64, duration_s: f64 },
    Error(DirectionsError),
}

impl StubDirectionsProvider {
    /// Create a provider that returns the given directions for any query.
    #[must_use]
    pub const fn with_directions(directions: Directions) -> Self {
        Self::from_response(StubResponse::Fixed(directions))
    }

    /// Create a provider whose geometry is the query points themselves.
    #[must_use]
    pub const fn following_query(distance_m: f64, duration_s: f64) -> Self {
        Self::from_response(StubResponse::FollowQuery {
            distance_m,
            duration_s,
        })
    }

    /// Create a provider that returns the given error.
    #[must_use]
    pub const fn with_error(error: DirectionsError) -> Self {
        Self::from_response(StubResponse::Error(error))
    }

    /// Number of `get_directions` calls made so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    const fn from_response(response: StubResponse) -> Self {
        Self {
            response,
            calls: AtomicUsize::new(0),
        }
    }
}

impl DirectionsProvider for StubDirectionsProvider {
    fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.response {
            StubResponse::Fixed(directions) => Ok(directions.clone()),
            StubResponse::FollowQuery {
                distance_m,
                duration_s,
            } => Ok(Directions {
                distance_m: *distance_m,
                duration_s: *duration_s,
                geometry: query.points().copied().collect(),
            }),
            StubResponse::Error(error) => Err(error.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wayfarer_core::Coordinate;

    fn query() -> DirectionsQuery {
        DirectionsQuery {
            origin: Coordinate::new(0.0, 0.0),
            destination: Coordinate::new(1.0, 1.0),
            waypoints: vec![Coordinate::new(0.5, 0.5)],
        }
    }

    #[rstest]
    fn following_query_echoes_points() {
        let provider = StubDirectionsProvider::following_query(10.0, 20.0);
        let directions = provider.get_directions(&query()).expect("should succeed");
        assert_eq!(directions.geometry.len(), 3);
        assert_eq!(directions.duration_s, 20.0);
    }

    #[rstest]
    fn with_error_returns_configured_error() {
        let provider = StubDirectionsProvider::with_error(DirectionsError::Timeout {
            url: "http://example.com/route/v1/driving".to_owned(),
            timeout_secs: 30,
        });

        let err = provider.get_directions(&query()).expect_err("should fail");

        assert!(matches!(err, DirectionsError::Timeout { .. }));
        assert_eq!(provider.calls(), 1);
    }
}
