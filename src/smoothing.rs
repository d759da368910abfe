//! Positional noise smoothing.
//!
//! Each point's corrected position is a weighted mean of the whole segment,
//! with weights decaying with temporal distance from the point. The `noise`
//! scalar controls how strongly neighbours influence the result: 0 leaves
//! the segment untouched, large values pull every point towards the segment
//! centroid.

use serde::{Deserialize, Serialize};

use crate::error::ensure_non_negative;
use crate::{Result, Segment, TrackPoint};

/// Weighting scheme used by [`smooth_segment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SmoothStrategy {
    /// Weight inversely proportional to time separation:
    /// `noise / (noise + dt)` for a neighbour `dt` seconds away.
    Inverse,
    /// Temporal Gaussian kernel: `exp(-(dt / noise)^2 / 2)`.
    Gaussian,
}

impl SmoothStrategy {
    fn weight(&self, dt: f64, noise: f64) -> f64 {
        match self {
            SmoothStrategy::Inverse => noise / (noise + dt),
            SmoothStrategy::Gaussian => (-0.5 * (dt / noise).powi(2)).exp(),
        }
    }
}

/// Remove point-to-point noise from a segment.
///
/// Output has the same point count and timestamps as the input; only
/// positions change. Derived speeds are cleared since they are stale once
/// positions move. With `noise == 0` the input is returned unchanged.
///
/// Re-smoothing an already smooth segment converges: every pass is a convex
/// combination of the previous positions, so repeated application contracts
/// towards the segment centroid with monotonically decreasing effect.
///
/// # Example
/// ```
/// use tripmatch::{smooth_segment, Segment, SmoothStrategy, TrackPoint};
///
/// let segment = Segment::new(vec![
///     TrackPoint::new(51.5074, -0.1278, 0.0),
///     TrackPoint::new(51.5081, -0.1285, 10.0),
///     TrackPoint::new(51.5090, -0.1300, 20.0),
/// ])?;
/// let smooth = smooth_segment(&segment, SmoothStrategy::Inverse, 5.0)?;
/// assert_eq!(smooth.point_count(), segment.point_count());
/// # Ok::<(), tripmatch::TripMatchError>(())
/// ```
pub fn smooth_segment(segment: &Segment, strategy: SmoothStrategy, noise: f64) -> Result<Segment> {
    ensure_non_negative("smooth_noise", noise)?;
    if noise == 0.0 {
        return Ok(segment.clone());
    }

    let points = segment.points();
    let smoothed: Vec<TrackPoint> = points
        .iter()
        .map(|p| {
            let mut weight_sum = 0.0;
            let mut lat = 0.0;
            let mut lng = 0.0;
            for q in points {
                let dt = (q.time - p.time).abs();
                let w = strategy.weight(dt, noise);
                weight_sum += w;
                lat += w * q.latitude;
                lng += w * q.longitude;
            }
            TrackPoint::new(lat / weight_sum, lng / weight_sum, p.time)
        })
        .collect();

    Segment::new(smoothed)
}
