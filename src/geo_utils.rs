//! Geographic utilities: distances, speeds, bounds and unit conversion.
//!
//! All pipeline thresholds operate on planar Euclidean distance in degree
//! space ([`planar_distance`]); the same metric drives segmentation,
//! simplification and matching. [`haversine_distance`] is the metric
//! (meters) counterpart used for reporting segment lengths.

use geo::{Coord, EuclideanDistance, HaversineDistance, Line, Point};

use crate::{Bounds, TrackPoint};

/// Meters per degree of latitude.
const METERS_PER_DEGREE: f64 = 111_320.0;

fn to_geo_point(p: &TrackPoint) -> Point<f64> {
    Point::new(p.longitude, p.latitude)
}

/// Planar Euclidean distance between two points, in degrees.
///
/// Deterministic and symmetric: `planar_distance(a, b) == planar_distance(b, a)`.
pub fn planar_distance(a: &TrackPoint, b: &TrackPoint) -> f64 {
    to_geo_point(a).euclidean_distance(&to_geo_point(b))
}

/// Great-circle distance between two points, in meters.
pub fn haversine_distance(a: &TrackPoint, b: &TrackPoint) -> f64 {
    to_geo_point(a).haversine_distance(&to_geo_point(b))
}

/// Instantaneous speed between two time-ordered points, in degrees/second.
///
/// Returns 0 when the elapsed time is not positive; within a valid segment
/// timestamps strictly increase, so this guard only fires for loose points.
pub fn point_speed(a: &TrackPoint, b: &TrackPoint) -> f64 {
    let elapsed = b.time - a.time;
    if elapsed > 0.0 {
        planar_distance(a, b) / elapsed
    } else {
        0.0
    }
}

/// Perpendicular distance from a point to the chord between two points,
/// in degrees.
///
/// The chord is treated as a line segment: deviations beyond its endpoints
/// measure to the nearest endpoint.
pub fn perpendicular_distance(
    point: &TrackPoint,
    chord_start: &TrackPoint,
    chord_end: &TrackPoint,
) -> f64 {
    let chord = Line::new(
        Coord {
            x: chord_start.longitude,
            y: chord_start.latitude,
        },
        Coord {
            x: chord_end.longitude,
            y: chord_end.latitude,
        },
    );
    chord.euclidean_distance(&to_geo_point(point))
}

/// Approximate the degree-equivalent of a metric distance at a latitude.
///
/// One degree of latitude is ~111.32 km everywhere; a degree of longitude
/// shrinks with the cosine of the latitude, so the same metric distance
/// spans more degrees away from the equator.
///
/// # Example
/// ```
/// use tripmatch::geo_utils::meters_to_degrees;
/// let deg = meters_to_degrees(111_320.0, 0.0);
/// assert!((deg - 1.0).abs() < 0.01);
/// ```
pub fn meters_to_degrees(meters: f64, latitude: f64) -> f64 {
    // Clamp near the poles where the longitude scale degenerates
    let lat_scale = latitude.to_radians().cos().max(0.01);
    meters / (METERS_PER_DEGREE * lat_scale)
}

/// Compute the bounding box of a point slice (zeroed for an empty slice).
pub fn compute_bounds(points: &[TrackPoint]) -> Bounds {
    Bounds::from_points(points).unwrap_or(Bounds {
        min_lat: 0.0,
        max_lat: 0.0,
        min_lng: 0.0,
        max_lng: 0.0,
    })
}

/// Compute the center of a point slice's bounding box.
pub fn compute_center(points: &[TrackPoint]) -> TrackPoint {
    compute_bounds(points).center()
}
