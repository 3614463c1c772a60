//! Behavioural tests for planning against a directions service.
//!
//! These tests use [`StubDirectionsProvider`] in place of
//! [`wayfarer_data::routing::HttpDirectionsProvider`] so no routing service
//! has to be running.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use wayfarer_core::{
    Coordinate, DirectionsError, FallbackReason, RouteMode, RoutePlanner, RouteRequest,
    RouteResult, RouteSource,
};
use wayfarer_data::routing::test_support::StubDirectionsProvider;

type PlannerCell = RefCell<Option<RoutePlanner<StubDirectionsProvider>>>;
type ResultCell = RefCell<Option<RouteResult>>;

const ROUTE_URL: &str = "http://routing.example.com/route/v1/driving";

#[fixture]
fn planner() -> PlannerCell {
    RefCell::new(None)
}

#[fixture]
fn result() -> ResultCell {
    RefCell::new(None)
}

fn install(planner: &PlannerCell, provider: StubDirectionsProvider) {
    *planner.borrow_mut() = Some(RoutePlanner::new(provider));
}

fn plan(planner: &PlannerCell, result: &ResultCell, request: &RouteRequest) {
    let guard = planner.borrow();
    let built = guard.as_ref().expect("planner must be initialised");
    *result.borrow_mut() = Some(built.plan(request));
}

fn source(result: &ResultCell) -> RouteSource {
    let borrowed = result.borrow();
    borrowed.as_ref().expect("a route must have been planned").source.clone()
}

fn calls(planner: &PlannerCell) -> usize {
    let guard = planner.borrow();
    let built = guard.as_ref().expect("planner must be initialised");
    built.directions().map_or(0, StubDirectionsProvider::calls)
}

// --- Given steps ---

#[given("a directions service returning a route through the waypoints")]
fn service_ok(#[from(planner)] planner: &PlannerCell) {
    install(planner, StubDirectionsProvider::following_query(42_000.0, 3_600.0));
}

#[given("a directions service that times out")]
fn service_timeout(#[from(planner)] planner: &PlannerCell) {
    install(
        planner,
        StubDirectionsProvider::with_error(DirectionsError::Timeout {
            url: ROUTE_URL.to_owned(),
            timeout_secs: 30,
        }),
    );
}

#[given("a directions service reporting no route")]
fn service_no_route(#[from(planner)] planner: &PlannerCell) {
    install(
        planner,
        StubDirectionsProvider::with_error(DirectionsError::ServiceError {
            code: "NoRoute".to_owned(),
            message: "Impossible route between points".to_owned(),
        }),
    );
}

// --- When steps ---

#[when("I plan a multi-stop delivery")]
fn plan_delivery(#[from(planner)] planner: &PlannerCell, #[from(result)] result: &ResultCell) {
    let request = RouteRequest::new(Coordinate::new(10.77, 106.70), Coordinate::new(10.85, 106.75))
        .with_stops(vec![Coordinate::new(10.80, 106.72), Coordinate::new(10.78, 106.71)])
        .with_mode(RouteMode::MultiStop);
    plan(planner, result, &request);
}

#[when("I plan a long-haul trip")]
fn plan_long_haul(#[from(planner)] planner: &PlannerCell, #[from(result)] result: &ResultCell) {
    let request = RouteRequest::new(Coordinate::new(16.0544, 108.2022), Coordinate::new(10.8231, 106.6297))
        .with_mode(RouteMode::LongHaul);
    plan(planner, result, &request);
}

#[when("I plan a single trip")]
fn plan_single(#[from(planner)] planner: &PlannerCell, #[from(result)] result: &ResultCell) {
    let request = RouteRequest::new(Coordinate::new(10.77, 106.70), Coordinate::new(10.85, 106.75));
    plan(planner, result, &request);
}

// --- Then steps ---

#[then("the route comes from the remote service")]
fn then_remote(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let route = borrowed.as_ref().expect("a route must have been planned");
    assert_eq!(route.source, RouteSource::Remote);
    assert!((route.distance_km - 42.0).abs() < 1e-9);
    assert_eq!(route.duration_text, "1h");
    assert_eq!(route.polyline, route.ordered_waypoints);
}

#[then("the directions service was called once")]
fn then_called_once(#[from(planner)] planner: &PlannerCell) {
    assert_eq!(calls(planner), 1);
}

#[then("the directions service was not called")]
fn then_not_called(#[from(planner)] planner: &PlannerCell) {
    assert_eq!(calls(planner), 0);
}

#[then("the route is synthesised from the ordered waypoints")]
fn then_waypoints(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let route = borrowed.as_ref().expect("a route must have been planned");
    assert_eq!(route.polyline, route.ordered_waypoints);
    assert_eq!(
        route.stops(),
        &[Coordinate::new(10.78, 106.71), Coordinate::new(10.80, 106.72)]
    );
}

#[then("the fallback reason is a timeout")]
fn then_timeout(#[from(result)] result: &ResultCell) {
    let actual = source(result);
    assert!(
        matches!(
            actual,
            RouteSource::Fallback(FallbackReason::RemoteUnavailable(DirectionsError::Timeout { .. }))
        ),
        "unexpected source {actual:?}"
    );
}

#[then("the route is synthesised along the corridor")]
fn then_corridor(#[from(result)] result: &ResultCell) {
    let borrowed = result.borrow();
    let route = borrowed.as_ref().expect("a route must have been planned");
    // Da Nang to Ho Chi Minh City covers ten anchors, both endpoint cities included.
    assert_eq!(route.polyline.len(), 12, "got {:?}", route.polyline);
    assert_eq!(route.polyline.first(), route.ordered_waypoints.first());
    assert_eq!(route.polyline.last(), route.ordered_waypoints.last());
}

#[then("the fallback reason is a service error")]
fn then_service_error(#[from(result)] result: &ResultCell) {
    let actual = source(result);
    assert!(
        matches!(
            actual,
            RouteSource::Fallback(FallbackReason::RemoteUnavailable(
                DirectionsError::ServiceError { .. }
            ))
        ),
        "unexpected source {actual:?}"
    );
}

// --- Scenario registrations ---

macro_rules! register_scenario {
    ($fn_name:ident, $title:literal) => {
        #[scenario(path = "tests/features/http_directions.feature", name = $title)]
        fn $fn_name(planner: PlannerCell, result: ResultCell) {
            let _ = (planner, result);
        }
    };
}

register_scenario!(
    using_remote_route,
    "using the remote route when the service answers"
);
register_scenario!(
    falling_back_on_timeout,
    "falling back when the service times out"
);
register_scenario!(
    falling_back_on_no_route,
    "falling back when the service reports no route"
);
register_scenario!(skipping_service_for_single, "skipping the service for single trips");
