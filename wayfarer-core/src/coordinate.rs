//! WGS84 coordinates and great-circle helpers.
//!
//! [`Coordinate`] stores `latitude` first, matching how the rest of the
//! engine talks about positions. Conversions to and from [`geo::Coord`]
//! follow the `geo` convention of `x = longitude` and `y = latitude`.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// Mean Earth radius used by [`haversine_km`].
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// A latitude/longitude pair in decimal degrees.
///
/// Equality is plain value equality; the type is `Copy` and never owned by
/// anything beyond the value holding it.
///
/// # Examples
/// ```
/// use wayfarer_core::Coordinate;
///
/// let hanoi = Coordinate::new(21.0285, 105.8542);
/// assert_eq!(hanoi.latitude, 21.0285);
/// assert_eq!(hanoi.longitude, 105.8542);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

impl Coordinate {
    /// Construct a coordinate from latitude and longitude.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::Coordinate;
    ///
    /// assert!(Coordinate::new(10.8, 106.6).is_valid());
    /// assert!(!Coordinate::new(91.0, 0.0).is_valid());
    /// assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    /// ```
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Format as `"lon,lat"`, the axis order expected by routing services.
    ///
    /// # Examples
    /// ```
    /// use wayfarer_core::Coordinate;
    ///
    /// assert_eq!(Coordinate::new(51.5, -0.1).to_lon_lat_string(), "-0.1,51.5");
    /// ```
    #[must_use]
    pub fn to_lon_lat_string(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }

    /// Build a coordinate from a `[lon, lat]` pair as found in GeoJSON.
    #[must_use]
    pub const fn from_lon_lat(pair: [f64; 2]) -> Self {
        let [longitude, latitude] = pair;
        Self::new(latitude, longitude)
    }

    /// Point a fraction `t` of the way towards `other`.
    ///
    /// Interpolation is linear in degree space, which is adequate for the
    /// short spans the planner synthesises.
    #[must_use]
    pub fn lerp(&self, other: &Self, t: f64) -> Self {
        Self::new(
            self.latitude + (other.latitude - self.latitude) * t,
            self.longitude + (other.longitude - self.longitude) * t,
        )
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.longitude,
            y: value.latitude,
        }
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(value: Coord<f64>) -> Self {
        Self::new(value.y, value.x)
    }
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Uses the haversine formula with a spherical Earth of radius
/// [`EARTH_RADIUS_KM`]. `geo::Haversine` measures against the 6371.0088 km
/// mean radius instead, so it is not used here; every route total and ETA is
/// measured on the fixed 6371 km sphere.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, haversine_km};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0);
/// assert!((haversine_km(&a, &b) - 111.19).abs() < 0.01);
/// ```
#[must_use]
pub fn haversine_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    // Rounding can push `h` a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Total haversine length of a path in kilometres.
///
/// Paths with fewer than two points have zero length.
#[must_use]
pub fn path_length_km(path: &[Coordinate]) -> f64 {
    path.windows(2)
        .map(|pair| match pair {
            [a, b] => haversine_km(a, b),
            _ => 0.0,
        })
        .sum()
}
