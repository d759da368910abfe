//! Spatial/temporal discontinuity splitting.
//!
//! A track recorded across several driving legs separated by stops arrives
//! as one point sequence; this stage cuts it into independent segments
//! wherever consecutive points are too far apart in space or time.

use log::debug;

use crate::error::ensure_positive;
use crate::geo_utils::planar_distance;
use crate::{Result, Segment};

/// Split a segment at spatial/temporal discontinuities.
///
/// One forward pass over consecutive pairs: a boundary is inserted between
/// `p[i]` and `p[i+1]` when their planar distance exceeds `eps` (degrees) or
/// their time gap exceeds `min_time` (seconds). Pairs exactly at either
/// threshold stay together. A boundary that would strand a single-point
/// fragment is dropped so the point merges with the adjacent segment: a
/// leading fragment merges forward, a trailing fragment merges backward.
///
/// Re-running on any output segment with the same parameters returns it
/// unchanged.
///
/// # Example
/// ```
/// use tripmatch::{split_segment, Segment, TrackPoint};
///
/// let segment = Segment::new(vec![
///     TrackPoint::new(0.0, 0.0, 0.0),
///     TrackPoint::new(0.001, 0.0, 10.0),
///     TrackPoint::new(0.5, 0.0, 20.0),   // large spatial jump
///     TrackPoint::new(0.501, 0.0, 30.0),
/// ])?;
/// let pieces = split_segment(&segment, 0.01, 60.0)?;
/// assert_eq!(pieces.len(), 2);
/// # Ok::<(), tripmatch::TripMatchError>(())
/// ```
pub fn split_segment(segment: &Segment, eps: f64, min_time: f64) -> Result<Vec<Segment>> {
    ensure_positive("seg_eps", eps)?;
    ensure_positive("seg_min_time", min_time)?;

    let points = segment.points();

    // Candidate cut before index i+1 wherever the pair (i, i+1) exceeds a
    // threshold; strictly greater, so exact ties stay within bounds.
    let mut cuts: Vec<usize> = Vec::new();
    for (i, pair) in points.windows(2).enumerate() {
        let gap = planar_distance(&pair[0], &pair[1]);
        let dt = pair[1].time - pair[0].time;
        if gap > eps || dt > min_time {
            cuts.push(i + 1);
        }
    }

    // Drop cuts that would strand a single-point fragment.
    let mut kept: Vec<usize> = Vec::new();
    let mut start = 0;
    for cut in cuts {
        if cut - start < 2 {
            continue;
        }
        kept.push(cut);
        start = cut;
    }
    if points.len() - start < 2 {
        kept.pop();
    }

    let mut segments = Vec::with_capacity(kept.len() + 1);
    let mut lo = 0;
    for cut in kept {
        segments.push(Segment::new(points[lo..cut].to_vec())?);
        lo = cut;
    }
    segments.push(Segment::new(points[lo..].to_vec())?);

    debug!(
        "split {} points into {} segment(s) (eps={}, min_time={}s)",
        points.len(),
        segments.len(),
        eps,
        min_time
    );

    Ok(segments)
}
