//! Response types for the directions route service.
//!
//! The service follows the OSRM route response shape with `geojson`
//! geometries: coordinates arrive as `[longitude, latitude]` pairs.
//!
//! See: <http://project-osrm.org/docs/v5.24.0/api/#route-service>

use serde::Deserialize;
use wayfarer_core::Coordinate;

/// Route service response.
#[derive(Debug, Deserialize)]
pub struct DirectionsResponse {
    /// Status code, `"Ok"` on success.
    ///
    /// Some gateways omit the field on success, so absence is not an error.
    pub code: Option<String>,

    /// Optional error message accompanying a non-`"Ok"` code.
    pub message: Option<String>,

    /// Candidate routes; the first is the recommended one.
    #[serde(default)]
    pub routes: Vec<WireRoute>,
}

impl DirectionsResponse {
    /// Check if the response indicates success.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code.as_deref().is_none_or(|code| code == "Ok")
    }
}

/// A single route in a [`DirectionsResponse`].
#[derive(Debug, Deserialize)]
pub struct WireRoute {
    /// Length in metres.
    pub distance: f64,
    /// Driving time in seconds.
    pub duration: f64,
    /// Route shape.
    pub geometry: WireGeometry,
}

/// GeoJSON `LineString` geometry.
#[derive(Debug, Deserialize)]
pub struct WireGeometry {
    /// `[longitude, latitude]` pairs in travel order.
    pub coordinates: Vec<[f64; 2]>,
}

impl WireGeometry {
    /// Decode the geometry into coordinates.
    #[must_use]
    pub fn to_coordinates(&self) -> Vec<Coordinate> {
        self.coordinates
            .iter()
            .copied()
            .map(Coordinate::from_lon_lat)
            .collect()
    }
}
