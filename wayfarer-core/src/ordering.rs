//! Greedy stop ordering.
//!
//! Stops are visited nearest-first from the origin: at each step the
//! unvisited stop with the smallest haversine distance to the current
//! position is taken. Ties go to the stop that appears first in the input.
//! This is a fast approximation, not an optimal tour.

use crate::{Coordinate, haversine_km};

/// Order `stops` by the nearest-neighbour heuristic starting at `origin`.
///
/// The result is a permutation of `stops`; zero or one stop is returned
/// unchanged.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, nearest_neighbour_order};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let stops = [
///     Coordinate::new(0.0, 1.0),
///     Coordinate::new(0.0, 3.0),
///     Coordinate::new(0.0, 2.0),
/// ];
/// let ordered = nearest_neighbour_order(&origin, &stops);
/// assert_eq!(ordered, vec![stops[0], stops[2], stops[1]]);
/// ```
#[must_use]
pub fn nearest_neighbour_order(origin: &Coordinate, stops: &[Coordinate]) -> Vec<Coordinate> {
    if stops.len() < 2 {
        return stops.to_vec();
    }

    let mut remaining: Vec<Coordinate> = stops.to_vec();
    let mut ordered = Vec::with_capacity(stops.len());
    let mut current = *origin;

    while let Some(index) = nearest_index(&current, &remaining) {
        let next = remaining.remove(index);
        ordered.push(next);
        current = next;
    }

    ordered
}

/// Full waypoint list: origin, ordered stops, destination.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, order_waypoints};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let destination = Coordinate::new(0.0, 4.0);
/// assert_eq!(order_waypoints(&origin, &[], &destination), vec![origin, destination]);
/// ```
#[must_use]
pub fn order_waypoints(
    origin: &Coordinate,
    stops: &[Coordinate],
    destination: &Coordinate,
) -> Vec<Coordinate> {
    let mut waypoints = Vec::with_capacity(stops.len() + 2);
    waypoints.push(*origin);
    waypoints.extend(nearest_neighbour_order(origin, stops));
    waypoints.push(*destination);
    waypoints
}

/// Index of the candidate closest to `from`; the earliest wins on ties.
fn nearest_index(from: &Coordinate, candidates: &[Coordinate]) -> Option<usize> {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (index, haversine_km(from, candidate)))
        .fold(None, |best: Option<(usize, f64)>, (index, distance)| match best {
            Some((_, best_distance)) if best_distance <= distance => best,
            _ => Some((index, distance)),
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn visits_nearest_stop_first() {
        // A sits on the origin, so it is consumed before anything else.
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 1.0);
        let c = Coordinate::new(0.0, 3.0);
        let d = Coordinate::new(0.0, 2.0);
        let origin = Coordinate::new(0.0, 0.0);
        let destination = Coordinate::new(0.0, 4.0);

        let waypoints = order_waypoints(&origin, &[a, b, c, d], &destination);

        assert_eq!(waypoints, vec![origin, a, b, d, c, destination]);
    }

    #[rstest]
    fn ties_keep_input_order() {
        let origin = Coordinate::new(0.0, 0.0);
        let east = Coordinate::new(0.0, 1.0);
        let west = Coordinate::new(0.0, -1.0);

        assert_eq!(nearest_neighbour_order(&origin, &[east, west]), vec![east, west]);
        assert_eq!(nearest_neighbour_order(&origin, &[west, east]), vec![west, east]);
    }

    #[rstest]
    fn single_stop_is_kept() {
        let origin = Coordinate::new(0.0, 0.0);
        let stop = Coordinate::new(5.0, 5.0);
        let destination = Coordinate::new(1.0, 1.0);
        assert_eq!(
            order_waypoints(&origin, &[stop], &destination),
            vec![origin, stop, destination]
        );
    }

    #[rstest]
    fn duplicate_stops_are_both_kept() {
        let origin = Coordinate::new(0.0, 0.0);
        let stop = Coordinate::new(0.5, 0.5);
        assert_eq!(nearest_neighbour_order(&origin, &[stop, stop]), vec![stop, stop]);
    }
}
