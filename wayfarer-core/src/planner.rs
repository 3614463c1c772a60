//! `RoutePlanner`: remote directions first, deterministic synthesis after.
//!
//! Planning never fails. A remote route is used when the request mode
//! allows it, a provider is configured, and the provider answers with a
//! usable geometry; every other case falls through to local synthesis and
//! records why in [`RouteSource::Fallback`].

use crate::{
    Coordinate, Directions, DirectionsError, DirectionsProvider, DirectionsQuery, FallbackReason,
    Offline, RouteMode, RouteRequest, RouteResult, RouteSource, VIETNAM_NORTH_SOUTH_CORRIDOR,
    corridor_polyline, estimate_travel_time, format_duration, hours_to_duration,
    interpolate_polyline, order_waypoints, path_length_km, round_km,
};

const SECONDS_PER_HOUR: f64 = 3_600.0;
const METRES_PER_KM: f64 = 1_000.0;

/// Configuration for [`RoutePlanner`].
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerConfig {
    /// Average speed used to estimate synthesised durations.
    pub average_speed_kmh: f64,
    /// Latitude span, in degrees, from which single-mode trips follow the
    /// highway corridor instead of a straight line.
    pub long_haul_latitude_delta: f64,
    /// Number of segments in a short-haul straight-line route.
    pub short_haul_steps: u32,
    /// Corridor anchors for long-haul synthesis, listed north to south.
    pub corridor: Vec<Coordinate>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: 50.0,
            long_haul_latitude_delta: 2.0,
            short_haul_steps: 4,
            corridor: VIETNAM_NORTH_SOUTH_CORRIDOR.to_vec(),
        }
    }
}

impl PlannerConfig {
    /// Set the average speed used for synthesised durations.
    #[must_use]
    pub const fn with_average_speed_kmh(mut self, speed: f64) -> Self {
        self.average_speed_kmh = speed;
        self
    }

    /// Set the latitude span that switches single-mode trips to the corridor.
    #[must_use]
    pub const fn with_long_haul_latitude_delta(mut self, degrees: f64) -> Self {
        self.long_haul_latitude_delta = degrees;
        self
    }

    /// Replace the long-haul corridor anchors.
    #[must_use]
    pub fn with_corridor(mut self, corridor: Vec<Coordinate>) -> Self {
        self.corridor = corridor;
        self
    }
}

/// Plans displayable routes for [`RouteRequest`]s.
///
/// The planner holds no state between calls; each call performs at most one
/// directions request and never retries.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, RoutePlanner, RouteRequest};
///
/// let planner = RoutePlanner::offline();
/// let request = RouteRequest::new(Coordinate::new(10.77, 106.70), Coordinate::new(10.80, 106.66));
/// let route = planner.plan(&request);
/// assert_eq!(route.polyline.len(), 5);
/// assert!(route.source.is_fallback());
/// ```
#[derive(Debug)]
pub struct RoutePlanner<D> {
    directions: Option<D>,
    config: PlannerConfig,
}

impl RoutePlanner<Offline> {
    /// Construct a planner that always synthesises routes.
    #[must_use]
    pub fn offline() -> Self {
        Self::with_config(None, PlannerConfig::default())
    }
}

impl<D> RoutePlanner<D>
where
    D: DirectionsProvider,
{
    /// Construct a planner backed by `directions` with default configuration.
    #[must_use]
    pub fn new(directions: D) -> Self {
        Self::with_config(Some(directions), PlannerConfig::default())
    }

    /// Construct a planner with an optional provider and explicit configuration.
    #[must_use]
    pub const fn with_config(directions: Option<D>, config: PlannerConfig) -> Self {
        Self { directions, config }
    }

    /// Planner configuration.
    #[must_use]
    pub const fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The directions provider, if one is configured.
    #[must_use]
    pub const fn directions(&self) -> Option<&D> {
        self.directions.as_ref()
    }

    /// Plan a route for `request`.
    ///
    /// Never fails: when the remote route is unavailable the result is
    /// synthesised and tagged with [`RouteSource::Fallback`].
    #[must_use]
    pub fn plan(&self, request: &RouteRequest) -> RouteResult {
        let waypoints = order_waypoints(&request.origin, &request.stops, &request.destination);

        let reason = match (request.mode, self.directions.as_ref()) {
            (RouteMode::Single, _) => FallbackReason::SynthesisOnly,
            (_, None) => FallbackReason::NoProvider,
            (_, Some(provider)) => match self.fetch_remote(provider, request, &waypoints) {
                Ok(route) => return route,
                Err(error) => {
                    log::warn!("directions unavailable, synthesising route: {error}");
                    FallbackReason::RemoteUnavailable(error)
                }
            },
        };

        self.synthesise(request, waypoints, reason)
    }

    fn fetch_remote(
        &self,
        provider: &D,
        request: &RouteRequest,
        waypoints: &[Coordinate],
    ) -> Result<RouteResult, DirectionsError> {
        let query = DirectionsQuery {
            origin: request.origin,
            destination: request.destination,
            waypoints: inner(waypoints).to_vec(),
        };
        let directions = provider.get_directions(&query)?;
        remote_route(directions, waypoints.to_vec())
    }

    fn synthesise(
        &self,
        request: &RouteRequest,
        waypoints: Vec<Coordinate>,
        reason: FallbackReason,
    ) -> RouteResult {
        let polyline = self.fallback_polyline(request, &waypoints);
        let length_km = path_length_km(&polyline);
        let duration = estimate_travel_time(length_km, self.config.average_speed_kmh);
        log::debug!(
            "synthesised {} point route over {length_km:.1} km ({reason:?})",
            polyline.len()
        );
        RouteResult {
            ordered_waypoints: waypoints,
            polyline,
            distance_km: round_km(length_km),
            duration,
            duration_text: format_duration(duration),
            source: RouteSource::Fallback(reason),
        }
    }

    fn fallback_polyline(&self, request: &RouteRequest, waypoints: &[Coordinate]) -> Vec<Coordinate> {
        let origin = &request.origin;
        let destination = &request.destination;
        if !request.stops.is_empty() || request.mode == RouteMode::MultiStop {
            return waypoints.to_vec();
        }

        let follow_corridor = match request.mode {
            RouteMode::LongHaul => true,
            RouteMode::Single => {
                (origin.latitude - destination.latitude).abs()
                    >= self.config.long_haul_latitude_delta
            }
            RouteMode::MultiStop => false,
        };

        follow_corridor
            .then(|| corridor_polyline(origin, destination, &self.config.corridor))
            .flatten()
            .unwrap_or_else(|| {
                interpolate_polyline(origin, destination, self.config.short_haul_steps)
            })
    }
}

/// Convert a provider answer into a remote [`RouteResult`].
fn remote_route(
    directions: Directions,
    waypoints: Vec<Coordinate>,
) -> Result<RouteResult, DirectionsError> {
    if directions.geometry.len() < 2 {
        return Err(DirectionsError::EmptyResponse);
    }
    if !(directions.distance_m.is_finite() && directions.duration_s.is_finite()) {
        return Err(DirectionsError::ParseError {
            message: "route distance and duration must be finite".to_string(),
        });
    }

    let duration = hours_to_duration(directions.duration_s / SECONDS_PER_HOUR);
    Ok(RouteResult {
        ordered_waypoints: waypoints,
        polyline: directions.geometry,
        distance_km: round_km(directions.distance_m / METRES_PER_KM),
        duration,
        duration_text: format_duration(duration),
        source: RouteSource::Remote,
    })
}

fn inner(waypoints: &[Coordinate]) -> &[Coordinate] {
    match waypoints {
        [_, inner @ .., _] => inner,
        _ => &[],
    }
}
