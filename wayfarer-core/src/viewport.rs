//! Bounding viewport for showing a planned route on a map.

use geo::{BoundingRect, LineString, Rect};
use serde::{Deserialize, Serialize};

use crate::{Coordinate, RouteResult};

/// Default padding, as a fraction of the route's span on each axis.
pub const DEFAULT_VIEWPORT_PADDING: f64 = 0.1;

/// Smallest span, in degrees, a viewport is given on either axis.
///
/// Keeps a route whose endpoints coincide from producing a zero-area box.
pub const MIN_VIEWPORT_SPAN_DEGREES: f64 = 0.005;

/// A padded latitude/longitude box that contains a route.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapViewport {
    /// Minimum latitude and longitude corner.
    pub south_west: Coordinate,
    /// Maximum latitude and longitude corner.
    pub north_east: Coordinate,
}

impl MapViewport {
    /// Fit a viewport around `route`.
    ///
    /// The box covers every polyline point, or only the origin and
    /// destination when the polyline has two points or fewer. Each axis is
    /// widened by `padding` times its span on both sides. Returns `None`
    /// when the route has no points at all.
    ///
    /// # Examples
    /// ```
    /// use std::time::Duration;
    /// use wayfarer_core::{Coordinate, MapViewport, RouteResult, RouteSource};
    ///
    /// let a = Coordinate::new(10.0, 106.0);
    /// let b = Coordinate::new(11.0, 107.0);
    /// let route = RouteResult {
    ///     ordered_waypoints: vec![a, b],
    ///     polyline: vec![a, b],
    ///     distance_km: 155.7,
    ///     duration: Duration::from_secs(11_210),
    ///     duration_text: "3h 7p".into(),
    ///     source: RouteSource::Remote,
    /// };
    /// let viewport = MapViewport::fit(&route, 0.1).unwrap();
    /// assert!((viewport.south_west.latitude - 9.9).abs() < 1e-9);
    /// assert!((viewport.north_east.longitude - 107.1).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn fit(route: &RouteResult, padding: f64) -> Option<Self> {
        let points: Vec<Coordinate> = if route.polyline.len() > 2 {
            route.polyline.clone()
        } else {
            route
                .origin()
                .into_iter()
                .chain(route.destination())
                .copied()
                .collect()
        };
        Self::around(&points, padding)
    }

    /// Fit a viewport around arbitrary points.
    #[must_use]
    pub fn around(points: &[Coordinate], padding: f64) -> Option<Self> {
        let line: LineString<f64> = points.iter().map(|c| geo::Coord::from(*c)).collect();
        let rect = line.bounding_rect()?;
        Some(Self::from_rect(pad(rect, padding)))
    }

    /// Centre of the viewport.
    #[must_use]
    pub fn centre(&self) -> Coordinate {
        self.south_west.lerp(&self.north_east, 0.5)
    }

    fn from_rect(rect: Rect<f64>) -> Self {
        Self {
            south_west: rect.min().into(),
            north_east: rect.max().into(),
        }
    }
}

fn pad(rect: Rect<f64>, padding: f64) -> Rect<f64> {
    let padding = if padding.is_finite() { padding.max(0.0) } else { 0.0 };
    let width = rect.width().max(MIN_VIEWPORT_SPAN_DEGREES);
    let height = rect.height().max(MIN_VIEWPORT_SPAN_DEGREES);
    let centre = rect.center();
    let half_x = width * (0.5 + padding);
    let half_y = height * (0.5 + padding);
    Rect::new(
        geo::Coord {
            x: centre.x - half_x,
            y: centre.y - half_y,
        },
        geo::Coord {
            x: centre.x + half_x,
            y: centre.y + half_y,
        },
    )
}
