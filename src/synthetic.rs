//! Synthetic GPS track generator for tests and benchmarks.
//!
//! Generates seeded, reproducible raw tracks with configurable path shape
//! and GPS noise, so pipeline and matcher behavior can be validated against
//! known ground truth.
//!
//! Feature-gated behind `synthetic` — not included in production builds.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::geo_utils::meters_to_degrees;
use crate::{Segment, Track, TrackPoint};

/// Shape of a generated path.
#[derive(Debug, Clone, Copy)]
pub enum PathPattern {
    /// Straight line with minor perturbation.
    Straight,
    /// Winding road with bounded heading changes per step.
    Winding,
}

/// Configuration for a generated track.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Starting point (latitude, longitude).
    pub origin: (f64, f64),
    /// Number of fixes to generate (at least 2).
    pub point_count: usize,
    /// Ground distance between consecutive fixes in meters.
    pub step_meters: f64,
    /// Time between consecutive fixes in seconds (must be positive).
    pub interval_seconds: f64,
    /// Standard deviation of GPS noise in meters (0 = noise-free).
    pub noise_sigma_meters: f64,
    /// Path shape.
    pub pattern: PathPattern,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            origin: (47.37, 8.55),
            point_count: 200,
            step_meters: 15.0,
            interval_seconds: 1.0,
            noise_sigma_meters: 3.0,
            pattern: PathPattern::Winding,
            seed: 42,
        }
    }
}

/// Generate a single-segment track from the configuration.
pub fn generate_track(name: &str, config: &SyntheticConfig) -> Track {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let count = config.point_count.max(2);

    let (mut lat, mut lng) = config.origin;
    let mut heading: f64 = rng.gen_range(0.0..2.0 * PI);
    let mut points = Vec::with_capacity(count);

    for i in 0..count {
        points.push(TrackPoint::new(lat, lng, i as f64 * config.interval_seconds));

        heading += match config.pattern {
            PathPattern::Straight => rng.gen_range(-0.02..0.02),
            PathPattern::Winding => rng.gen_range(-0.3..0.3),
        };

        // Latitude degrees are latitude-independent; longitude shrinks with cos(lat)
        lat += meters_to_degrees(config.step_meters, 0.0) * heading.cos();
        lng += meters_to_degrees(config.step_meters, lat) * heading.sin();
    }

    let noisy = add_gps_noise(&points, config.noise_sigma_meters, &mut rng);

    let segment =
        Segment::new(noisy).expect("synthetic config must yield a valid segment (positive interval)");
    Track::new(name, vec![segment])
}

/// Add Gaussian GPS noise to points via the Box-Muller transform.
fn add_gps_noise(points: &[TrackPoint], sigma_meters: f64, rng: &mut StdRng) -> Vec<TrackPoint> {
    if sigma_meters <= 0.0 {
        return points.to_vec();
    }

    points
        .iter()
        .map(|p| {
            let u1: f64 = rng.gen_range(0.0001..1.0);
            let u2: f64 = rng.gen_range(0.0..1.0);
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * PI * u2;

            TrackPoint::new(
                p.latitude + meters_to_degrees(sigma_meters, 0.0) * r * theta.cos(),
                p.longitude + meters_to_degrees(sigma_meters, p.latitude) * r * theta.sin(),
                p.time,
            )
        })
        .collect()
}
