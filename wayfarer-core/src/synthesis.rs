//! Deterministic route geometry used when no remote route is available.
//!
//! Three shapes are produced:
//!
//! - **multi-stop**: the ordered waypoints themselves;
//! - **long-haul**: origin, the highway corridor anchors lying between the
//!   two endpoint latitudes, destination;
//! - **short-haul**: evenly spaced points on the straight line between
//!   origin and destination.

use crate::Coordinate;

/// Anchor points along Vietnam's north-south highway, listed north to south.
///
/// The order follows the road, not strict latitude: Phan Thiet sits
/// slightly south of Bien Hoa but is passed first when heading south.
pub const VIETNAM_NORTH_SOUTH_CORRIDOR: [Coordinate; 19] = [
    Coordinate::new(21.0285, 105.8542), // Ha Noi
    Coordinate::new(20.5411, 105.9139), // Phu Ly
    Coordinate::new(20.2506, 105.9745), // Ninh Binh
    Coordinate::new(19.8067, 105.7852), // Thanh Hoa
    Coordinate::new(18.6796, 105.6813), // Vinh
    Coordinate::new(18.3428, 105.9057), // Ha Tinh
    Coordinate::new(17.4689, 106.6223), // Dong Hoi
    Coordinate::new(16.8163, 107.1003), // Dong Ha
    Coordinate::new(16.4637, 107.5909), // Hue
    Coordinate::new(16.0544, 108.2022), // Da Nang
    Coordinate::new(15.5736, 108.4740), // Tam Ky
    Coordinate::new(15.1214, 108.8044), // Quang Ngai
    Coordinate::new(13.7829, 109.2196), // Quy Nhon
    Coordinate::new(13.0955, 109.3209), // Tuy Hoa
    Coordinate::new(12.2388, 109.1967), // Nha Trang
    Coordinate::new(11.5643, 108.9886), // Phan Rang
    Coordinate::new(10.9289, 108.1021), // Phan Thiet
    Coordinate::new(10.9574, 106.8427), // Bien Hoa
    Coordinate::new(10.8231, 106.6297), // Ho Chi Minh City
];

/// Corridor anchors between the endpoint latitudes, in travel order.
///
/// Anchors are kept when their latitude lies within the inclusive range
/// spanned by `origin` and `destination`. The list is read north to south
/// and reversed when the trip heads north. Returns `None` when no anchor
/// qualifies so the caller can pick another shape.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, VIETNAM_NORTH_SOUTH_CORRIDOR, corridor_polyline};
///
/// let hanoi = Coordinate::new(21.0285, 105.8542);
/// let hue = Coordinate::new(16.4637, 107.5909);
/// let path = corridor_polyline(&hanoi, &hue, &VIETNAM_NORTH_SOUTH_CORRIDOR).unwrap();
/// assert_eq!(path.first(), Some(&hanoi));
/// assert_eq!(path.last(), Some(&hue));
/// assert!(path.len() > 2);
/// ```
#[must_use]
pub fn corridor_polyline(
    origin: &Coordinate,
    destination: &Coordinate,
    anchors: &[Coordinate],
) -> Option<Vec<Coordinate>> {
    let south = origin.latitude.min(destination.latitude);
    let north = origin.latitude.max(destination.latitude);
    let mut between: Vec<Coordinate> = anchors
        .iter()
        .filter(|anchor| (south..=north).contains(&anchor.latitude))
        .copied()
        .collect();
    if between.is_empty() {
        return None;
    }
    if origin.latitude < destination.latitude {
        between.reverse();
    }

    let mut path = Vec::with_capacity(between.len() + 2);
    path.push(*origin);
    path.extend(between);
    path.push(*destination);
    Some(path)
}

/// Evenly spaced points from `origin` to `destination` inclusive.
///
/// `steps` is the number of segments, so the result has `steps + 1` points;
/// a `steps` of zero is treated as one.
///
/// # Examples
/// ```
/// use wayfarer_core::{Coordinate, interpolate_polyline};
///
/// let path = interpolate_polyline(&Coordinate::new(0.0, 0.0), &Coordinate::new(4.0, 8.0), 4);
/// assert_eq!(path.len(), 5);
/// assert_eq!(path[2], Coordinate::new(2.0, 4.0));
/// ```
#[must_use]
pub fn interpolate_polyline(
    origin: &Coordinate,
    destination: &Coordinate,
    steps: u32,
) -> Vec<Coordinate> {
    let steps = steps.max(1);
    let denominator = f64::from(steps);
    (0..=steps)
        .map(|step| {
            if step == steps {
                *destination
            } else {
                origin.lerp(destination, f64::from(step) / denominator)
            }
        })
        .collect()
}
