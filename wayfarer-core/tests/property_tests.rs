//! Property-based tests for stop ordering and route synthesis.
//!
//! # Invariants tested
//!
//! - **Permutation:** nearest-neighbour ordering keeps every stop exactly once.
//! - **Endpoints:** planned routes start at the origin and end at the destination.
//! - **Totality:** offline planning always yields at least two polyline points.
//! - **Monotonic estimates:** longer distances never take less time.
//! - **Detours:** adding a stop never shortens the synthesised distance.

use proptest::prelude::*;
use wayfarer_core::{
    Coordinate, RouteMode, RoutePlanner, RouteRequest, estimate_travel_time, format_duration_text,
    nearest_neighbour_order,
};

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (8.0_f64..23.0, 102.0_f64..110.0).prop_map(|(lat, lon)| Coordinate::new(lat, lon))
}

fn mode() -> impl Strategy<Value = RouteMode> {
    prop_oneof![
        Just(RouteMode::Single),
        Just(RouteMode::MultiStop),
        Just(RouteMode::LongHaul),
    ]
}

fn sort_key(c: &Coordinate) -> (u64, u64) {
    (c.latitude.to_bits(), c.longitude.to_bits())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Ordering is a permutation of the input stops.
    #[test]
    fn ordering_is_a_permutation(
        origin in coordinate(),
        stops in prop::collection::vec(coordinate(), 0..12),
    ) {
        let mut ordered = nearest_neighbour_order(&origin, &stops);
        let mut expected = stops.clone();
        ordered.sort_by_key(sort_key);
        expected.sort_by_key(sort_key);
        prop_assert_eq!(ordered, expected);
    }

    /// Offline plans are total and anchored at both endpoints.
    #[test]
    fn offline_plans_are_total(
        origin in coordinate(),
        destination in coordinate(),
        stops in prop::collection::vec(coordinate(), 0..6),
        mode in mode(),
    ) {
        let request = RouteRequest::new(origin, destination).with_stops(stops.clone()).with_mode(mode);
        let route = RoutePlanner::offline().plan(&request);

        prop_assert!(route.polyline.len() >= 2);
        prop_assert_eq!(route.polyline.first(), Some(&origin));
        prop_assert_eq!(route.polyline.last(), Some(&destination));
        prop_assert_eq!(route.ordered_waypoints.len(), stops.len() + 2);
        prop_assert!(route.distance_km.is_finite() && route.distance_km >= 0.0);
        prop_assert!(route.source.is_fallback());
    }

    /// Travel-time estimates grow with distance.
    #[test]
    fn estimates_are_monotonic(
        shorter in 0.0_f64..5_000.0,
        extra in 0.0_f64..5_000.0,
        speed in 1.0_f64..130.0,
    ) {
        let near = estimate_travel_time(shorter, speed);
        let far = estimate_travel_time(shorter + extra, speed);
        prop_assert!(near <= far);
    }

    /// A stop between the endpoints never shortens the synthesised route.
    #[test]
    fn extra_stop_never_shortens_fallback_distance(
        origin in coordinate(),
        destination in coordinate(),
        stop in coordinate(),
    ) {
        let planner = RoutePlanner::offline();
        let direct = RouteRequest::new(origin, destination).with_mode(RouteMode::MultiStop);
        let detour = direct.clone().with_stops(vec![stop]);

        let direct_km = planner.plan(&direct).distance_km;
        let detour_km = planner.plan(&detour).distance_km;
        prop_assert!(detour_km >= direct_km, "{detour_km} < {direct_km}");
    }

    /// Display text never reports sixty minutes.
    #[test]
    fn duration_text_minutes_stay_below_an_hour(hours in 0.0_f64..100.0) {
        let text = format_duration_text(hours);
        prop_assert!(!text.contains("60 phút"));
        prop_assert!(!text.ends_with(" 60p"));
    }
}
