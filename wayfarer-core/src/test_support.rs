//! Deterministic `DirectionsProvider` doubles used by unit and behaviour
//! tests.

use crate::{
    Directions, DirectionsError, DirectionsProvider, DirectionsQuery, estimate_travel_time,
    path_length_km,
};

/// Speed used to derive straight-line durations.
const STRAIGHT_LINE_SPEED_KMH: f64 = 50.0;

/// Provider answering with the query points joined by straight lines.
///
/// Distance is the haversine length of those lines and duration assumes a
/// steady 50 km/h.
#[derive(Default, Debug, Copy, Clone)]
pub struct StraightLineDirectionsProvider;

impl DirectionsProvider for StraightLineDirectionsProvider {
    fn get_directions(&self, query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        if !query.is_valid() {
            return Err(DirectionsError::InvalidInput);
        }
        let geometry: Vec<_> = query.points().copied().collect();
        let km = path_length_km(&geometry);
        Ok(Directions {
            distance_m: km * 1_000.0,
            duration_s: estimate_travel_time(km, STRAIGHT_LINE_SPEED_KMH).as_secs_f64(),
            geometry,
        })
    }
}

/// Provider that always fails with a network error.
#[derive(Default, Debug, Copy, Clone)]
pub struct UnreachableDirectionsProvider;

impl DirectionsProvider for UnreachableDirectionsProvider {
    fn get_directions(&self, _query: &DirectionsQuery) -> Result<Directions, DirectionsError> {
        Err(DirectionsError::NetworkError {
            url: "http://directions.invalid/route/v1/driving".to_owned(),
            message: "connection refused".to_owned(),
        })
    }
}
