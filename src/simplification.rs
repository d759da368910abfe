//! Two-budget trajectory simplification.
//!
//! A Douglas-Peucker style divide-and-conquer reduction with two
//! independent error budgets: positional deviation from the chord and
//! deviation of the point-implied speed from the chord's average speed.
//! The speed budget keeps points a purely positional pass would discard,
//! such as the start of a stop inside an otherwise straight run.

use crate::error::ensure_non_negative;
use crate::geo_utils::{perpendicular_distance, planar_distance, point_speed};
use crate::{Result, Segment, TrackPoint};

/// Reduce a segment's point count while bounding positional and
/// implied-speed error.
///
/// Endpoints are always retained; the output never has more points than the
/// input. When several interior points tie for maximum deviation the lowest
/// index wins, and when both budgets are exceeded in a range the positional
/// offender is the split point.
///
/// # Example
/// ```
/// use tripmatch::{simplify_segment, Segment, TrackPoint};
///
/// // Three collinear fixes at constant speed reduce to the endpoints
/// let segment = Segment::new(vec![
///     TrackPoint::new(0.0, 0.0, 0.0),
///     TrackPoint::new(0.001, 0.001, 1.0),
///     TrackPoint::new(0.002, 0.002, 2.0),
/// ])?;
/// let simplified = simplify_segment(&segment, 0.0001, 0.01)?;
/// assert_eq!(simplified.point_count(), 2);
/// # Ok::<(), tripmatch::TripMatchError>(())
/// ```
pub fn simplify_segment(
    segment: &Segment,
    max_dist_error: f64,
    max_speed_error: f64,
) -> Result<Segment> {
    ensure_non_negative("simplify_max_dist_error", max_dist_error)?;
    ensure_non_negative("simplify_max_speed_error", max_speed_error)?;

    let points = segment.points();
    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;

    mark_range(
        points,
        0,
        points.len() - 1,
        max_dist_error,
        max_speed_error,
        &mut keep,
    );

    let reduced: Vec<TrackPoint> = points
        .iter()
        .zip(&keep)
        .filter(|(_, kept)| **kept)
        .map(|(p, _)| *p)
        .collect();

    Segment::new(reduced)
}

/// Recurse over `[lo, hi]`, marking interior points that exceed a budget.
fn mark_range(
    points: &[TrackPoint],
    lo: usize,
    hi: usize,
    max_dist_error: f64,
    max_speed_error: f64,
    keep: &mut [bool],
) {
    if hi - lo < 2 {
        return;
    }

    // Chord average speed; t[hi] > t[lo] by the segment invariant
    let chord_speed = planar_distance(&points[lo], &points[hi]) / (points[hi].time - points[lo].time);

    let mut max_dist = f64::NEG_INFINITY;
    let mut dist_idx = lo;
    let mut max_speed_dev = f64::NEG_INFINITY;
    let mut speed_idx = lo;

    for i in lo + 1..hi {
        // Strictly greater, so the lowest index wins ties
        let dist = perpendicular_distance(&points[i], &points[lo], &points[hi]);
        if dist > max_dist {
            max_dist = dist;
            dist_idx = i;
        }

        let speed_dev = (point_speed(&points[i - 1], &points[i]) - chord_speed).abs();
        if speed_dev > max_speed_dev {
            max_speed_dev = speed_dev;
            speed_idx = i;
        }
    }

    let split = if max_dist > max_dist_error {
        Some(dist_idx)
    } else if max_speed_dev > max_speed_error {
        Some(speed_idx)
    } else {
        None
    };

    if let Some(mid) = split {
        keep[mid] = true;
        mark_range(points, lo, mid, max_dist_error, max_speed_error, keep);
        mark_range(points, mid, hi, max_dist_error, max_speed_error, keep);
    }
}
