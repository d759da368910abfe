//! # Trip Match
//!
//! GPS track-to-trip normalization and trip learning.
//!
//! This library provides:
//! - A track normalization pipeline (smoothing, segmentation, simplification)
//! - Trip classification against a corpus of known canonical trips
//! - An append-only canonical corpus with precomputed nearest-neighbour indexes
//! - Geodesy helpers (planar and haversine distance, unit conversion)
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel corpus scoring with rayon
//! - **`synthetic`** - Enable the synthetic GPS track generator for tests/benches
//!
//! ## Quick Start
//!
//! ```rust
//! use tripmatch::{
//!     learn_trip, CanonicalCorpus, PipelineConfig, Segment, Track, TrackPoint, TripOutcome,
//! };
//!
//! // A short raw track: five fixes one second apart
//! let points: Vec<TrackPoint> = (0..5)
//!     .map(|i| TrackPoint::new(51.5074 + 0.001 * i as f64, -0.1278, i as f64))
//!     .collect();
//! let track = Track::new("morning-commute", vec![Segment::new(points)?]);
//!
//! // Normalize it into a trip
//! let trip = track.to_trip(&PipelineConfig::default())?;
//!
//! // Classify each normalized segment against the corpus
//! let mut corpus = CanonicalCorpus::new();
//! for segment in trip.segments {
//!     match learn_trip(segment, None, &corpus, 0.001, 0.0005)? {
//!         TripOutcome::Matched { trip_id, .. } => println!("recurrence of {}", trip_id),
//!         TripOutcome::New { trip_id, segment } => corpus.append(trip_id, segment)?,
//!     }
//! }
//! # Ok::<(), tripmatch::TripMatchError>(())
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{OptionExt, Result, TripMatchError};

// Geographic utilities (distance, speed, bounds, unit conversion)
pub mod geo_utils;

// Positional noise smoothing
pub mod smoothing;
pub use smoothing::{smooth_segment, SmoothStrategy};

// Spatial/temporal discontinuity splitting
pub mod segmentation;
pub use segmentation::split_segment;

// Two-budget trajectory simplification
pub mod simplification;
pub use simplification::simplify_segment;

// Trip classification against the canonical corpus
pub mod matching;
pub use matching::{learn_trip, score_against, segment_dissimilarity};

// Append-only store of learned trips
pub mod corpus;
pub use corpus::{CanonicalCorpus, CanonicalEntry};

// Track-to-trip normalization pipeline
pub mod pipeline;
pub use pipeline::normalize_segment;

// Synthetic GPS data generator (not included in production builds)
#[cfg(feature = "synthetic")]
pub mod synthetic;

// ============================================================================
// Core Types
// ============================================================================

/// Stable identifier of a learned trip in the canonical corpus.
pub type TripId = String;

/// A timestamped GPS fix.
///
/// # Example
/// ```
/// use tripmatch::TrackPoint;
/// let point = TrackPoint::new(51.5074, -0.1278, 0.0); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Seconds since epoch. Strictly increasing within a segment.
    pub time: f64,
    /// Derived speed in degrees/second, populated by the pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl TrackPoint {
    /// Create a new point without a derived speed.
    pub fn new(latitude: f64, longitude: f64, time: f64) -> Self {
        Self {
            latitude,
            longitude,
            time,
            speed: None,
        }
    }

    /// Create a new point with a derived speed.
    pub fn with_speed(latitude: f64, longitude: f64, time: f64, speed: f64) -> Self {
        Self {
            latitude,
            longitude,
            time,
            speed: Some(speed),
        }
    }

    /// Check if the point has valid coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }
}

/// Bounding box for a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty slice.
    pub fn from_points(points: &[TrackPoint]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }
        let mut min_lat = f64::MAX;
        let mut max_lat = f64::MIN;
        let mut min_lng = f64::MAX;
        let mut max_lng = f64::MIN;

        for p in points {
            min_lat = min_lat.min(p.latitude);
            max_lat = max_lat.max(p.latitude);
            min_lng = min_lng.min(p.longitude);
            max_lng = max_lng.max(p.longitude);
        }

        Some(Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        })
    }

    /// Get the center point of the bounds (timestamp zero).
    pub fn center(&self) -> TrackPoint {
        TrackPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
            0.0,
        )
    }
}

/// One continuous trajectory leg: an ordered, time-increasing point sequence.
///
/// Both invariants (at least two points, strictly increasing timestamps) are
/// enforced at construction, so every stage downstream can rely on them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    points: Vec<TrackPoint>,
}

impl Segment {
    /// Create a segment, validating the point sequence.
    ///
    /// # Example
    /// ```
    /// use tripmatch::{Segment, TrackPoint};
    ///
    /// let points = vec![
    ///     TrackPoint::new(51.5074, -0.1278, 0.0),
    ///     TrackPoint::new(51.5080, -0.1290, 10.0),
    /// ];
    /// assert!(Segment::new(points).is_ok());
    /// ```
    pub fn new(points: Vec<TrackPoint>) -> Result<Self> {
        if points.len() < 2 {
            return Err(TripMatchError::InsufficientPoints {
                point_count: points.len(),
                minimum_required: 2,
            });
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].time <= pair[0].time {
                return Err(TripMatchError::NonIncreasingTimestamps { index: i + 1 });
            }
        }
        Ok(Self { points })
    }

    /// The point sequence.
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Number of points (always >= 2).
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// First point.
    pub fn start(&self) -> &TrackPoint {
        &self.points[0]
    }

    /// Last point.
    pub fn end(&self) -> &TrackPoint {
        &self.points[self.points.len() - 1]
    }

    /// Bounding box of the segment.
    pub fn bounds(&self) -> Bounds {
        geo_utils::compute_bounds(&self.points)
    }

    /// Total great-circle length in meters.
    pub fn length_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| geo_utils::haversine_distance(&w[0], &w[1]))
            .sum()
    }

    /// Elapsed time from first to last point in seconds.
    pub fn duration_seconds(&self) -> f64 {
        self.end().time - self.start().time
    }

    /// A copy of this segment with derived per-point speeds populated.
    ///
    /// Every point carries the speed from its predecessor to itself; the
    /// first point takes the speed of the first pair.
    pub fn compute_speeds(&self) -> Segment {
        let first_speed = geo_utils::point_speed(&self.points[0], &self.points[1]);
        let points = self
            .points
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let speed = if i == 0 {
                    first_speed
                } else {
                    geo_utils::point_speed(&self.points[i - 1], p)
                };
                TrackPoint::with_speed(p.latitude, p.longitude, p.time, speed)
            })
            .collect();
        Segment { points }
    }
}

/// A named collection of independent trajectory segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Track {
    /// Create a new track.
    pub fn new(name: &str, segments: Vec<Segment>) -> Self {
        Self {
            name: name.to_string(),
            segments,
        }
    }
}

/// Configuration for the track-to-trip normalization pipeline.
///
/// Each boolean toggles whether its stage runs; a disabled stage passes its
/// input through unchanged. All geometric thresholds are planar degree-space
/// quantities; use [`geo_utils::meters_to_degrees`] to derive them from
/// metric distances.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Run the noise smoother.
    /// Default: true
    pub smooth: bool,

    /// Weighting scheme for the smoother.
    /// Default: [`SmoothStrategy::Inverse`]
    pub smooth_strategy: SmoothStrategy,

    /// Smoothing intensity; 0 disables all correction.
    /// Default: 30.0 (neighbours within ~30 s contribute strongly)
    pub smooth_noise: f64,

    /// Split the track at spatial/temporal discontinuities.
    /// Default: true
    pub seg: bool,

    /// Spatial split threshold between consecutive points, in degrees.
    /// Default: 0.005 (~550 m at the equator)
    pub seg_eps: f64,

    /// Temporal split threshold between consecutive points, in seconds.
    /// Default: 120.0
    pub seg_min_time: f64,

    /// Run the two-budget simplifier.
    /// Default: true
    pub simplify: bool,

    /// Maximum positional deviation from the chord, in degrees.
    /// Default: 0.0001 (~11 m at the equator)
    pub simplify_max_dist_error: f64,

    /// Maximum implied-speed deviation from the chord average, in
    /// degrees/second.
    /// Default: 0.00002 (~2 m/s at the equator)
    pub simplify_max_speed_error: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            smooth: true,
            smooth_strategy: SmoothStrategy::Inverse,
            smooth_noise: 30.0,
            seg: true,
            seg_eps: 0.005,
            seg_min_time: 120.0,
            simplify: true,
            simplify_max_dist_error: 0.0001,
            simplify_max_speed_error: 0.00002,
        }
    }
}

/// Dissimilarity detail for one corpus entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    /// The corpus entry this score refers to.
    pub trip_id: TripId,
    /// Mean nearest-neighbour distance from candidate to canonical, in
    /// degrees. Identical geometry scores 0.
    pub dissimilarity: f64,
    /// Fraction of candidate points within the point radius (0.0-1.0).
    pub coverage: f64,
}

/// Classification outcome for one submitted segment.
///
/// Exactly one variant is produced per [`learn_trip`] call. The matcher never
/// mutates the corpus; registering a `New` trip is the caller's explicit
/// [`CanonicalCorpus::append`].
#[derive(Debug, Clone, PartialEq)]
pub enum TripOutcome {
    /// The candidate is a recurrence of a known trip.
    Matched {
        trip_id: TripId,
        /// The canonical segment the candidate matched.
        canonical: Segment,
        /// Score of the winning entry.
        score: MatchScore,
    },
    /// The candidate is a new route.
    New {
        trip_id: TripId,
        /// The submitted segment, returned for the caller to register.
        segment: Segment,
    },
}
