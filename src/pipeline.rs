//! Track-to-trip normalization pipeline.
//!
//! Smoothing, segmentation and simplification run in that fixed order, each
//! stage consuming the previous stage's output. Disabled stages pass their
//! input through unchanged; derived per-point speeds are populated on the
//! final segments.

use log::debug;

use crate::segmentation::split_segment;
use crate::simplification::simplify_segment;
use crate::smoothing::smooth_segment;
use crate::{PipelineConfig, Result, Segment, Track};

/// Normalize one raw segment into clean trajectory segments.
///
/// Runs smooth, split, simplify per the configuration, then populates
/// derived speeds. Splitting may yield several output segments; the other
/// stages are one-to-one.
pub fn normalize_segment(segment: &Segment, config: &PipelineConfig) -> Result<Vec<Segment>> {
    let smoothed = if config.smooth {
        smooth_segment(segment, config.smooth_strategy, config.smooth_noise)?
    } else {
        segment.clone()
    };

    let pieces = if config.seg {
        split_segment(&smoothed, config.seg_eps, config.seg_min_time)?
    } else {
        vec![smoothed]
    };

    let mut normalized = Vec::with_capacity(pieces.len());
    for piece in &pieces {
        let reduced = if config.simplify {
            simplify_segment(
                piece,
                config.simplify_max_dist_error,
                config.simplify_max_speed_error,
            )?
        } else {
            piece.clone()
        };
        normalized.push(reduced.compute_speeds());
    }

    debug!(
        "normalized {} points into {} segment(s)",
        segment.point_count(),
        normalized.len()
    );

    Ok(normalized)
}

impl Track {
    /// Normalize every segment of this track into a trip.
    ///
    /// The output track keeps the name; its segments are the concatenated
    /// normalization results of each input segment, in order. Errors
    /// propagate immediately; there is no partial output.
    ///
    /// # Example
    /// ```
    /// use tripmatch::{PipelineConfig, Segment, Track, TrackPoint};
    ///
    /// let points: Vec<TrackPoint> = (0..10)
    ///     .map(|i| TrackPoint::new(47.37 + 0.0001 * i as f64, 8.55, i as f64 * 5.0))
    ///     .collect();
    /// let track = Track::new("zurich-loop", vec![Segment::new(points)?]);
    ///
    /// let trip = track.to_trip(&PipelineConfig::default())?;
    /// assert_eq!(trip.name, "zurich-loop");
    /// assert!(!trip.segments.is_empty());
    /// # Ok::<(), tripmatch::TripMatchError>(())
    /// ```
    pub fn to_trip(&self, config: &PipelineConfig) -> Result<Track> {
        let mut segments = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            segments.extend(normalize_segment(segment, config)?);
        }
        Ok(Track::new(&self.name, segments))
    }
}
