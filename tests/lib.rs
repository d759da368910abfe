//! Tests for lib.rs core types

use tripmatch::{Bounds, Segment, Track, TrackPoint, TripMatchError};

fn sample_points() -> Vec<TrackPoint> {
    vec![
        TrackPoint::new(51.5074, -0.1278, 0.0),
        TrackPoint::new(51.5080, -0.1290, 10.0),
        TrackPoint::new(51.5090, -0.1300, 20.0),
        TrackPoint::new(51.5100, -0.1310, 30.0),
    ]
}

#[test]
fn test_track_point_validation() {
    assert!(TrackPoint::new(51.5074, -0.1278, 0.0).is_valid());
    assert!(!TrackPoint::new(91.0, 0.0, 0.0).is_valid());
    assert!(!TrackPoint::new(0.0, 181.0, 0.0).is_valid());
    assert!(!TrackPoint::new(f64::NAN, 0.0, 0.0).is_valid());
}

#[test]
fn test_segment_requires_two_points() {
    let result = Segment::new(vec![TrackPoint::new(51.5, -0.12, 0.0)]);
    assert!(matches!(
        result,
        Err(TripMatchError::InsufficientPoints {
            point_count: 1,
            minimum_required: 2,
        })
    ));
}

#[test]
fn test_segment_requires_increasing_timestamps() {
    let equal = Segment::new(vec![
        TrackPoint::new(51.50, -0.12, 5.0),
        TrackPoint::new(51.51, -0.13, 5.0),
    ]);
    assert!(matches!(
        equal,
        Err(TripMatchError::NonIncreasingTimestamps { index: 1 })
    ));

    let decreasing = Segment::new(vec![
        TrackPoint::new(51.50, -0.12, 0.0),
        TrackPoint::new(51.51, -0.13, 10.0),
        TrackPoint::new(51.52, -0.14, 5.0),
    ]);
    assert!(matches!(
        decreasing,
        Err(TripMatchError::NonIncreasingTimestamps { index: 2 })
    ));
}

#[test]
fn test_segment_accessors() {
    let segment = Segment::new(sample_points()).unwrap();

    assert_eq!(segment.point_count(), 4);
    assert_eq!(segment.start().latitude, 51.5074);
    assert_eq!(segment.end().latitude, 51.5100);
    assert_eq!(segment.duration_seconds(), 30.0);

    let bounds = segment.bounds();
    assert_eq!(bounds.min_lat, 51.5074);
    assert_eq!(bounds.max_lat, 51.5100);
    assert_eq!(bounds.min_lng, -0.1310);
    assert_eq!(bounds.max_lng, -0.1278);
}

#[test]
fn test_segment_length_meters() {
    // Two fixes 0.01 degrees of latitude apart: ~1113 m
    let segment = Segment::new(vec![
        TrackPoint::new(51.50, -0.12, 0.0),
        TrackPoint::new(51.51, -0.12, 60.0),
    ])
    .unwrap();

    let length = segment.length_meters();
    assert!((length - 1113.0).abs() < 20.0);
}

#[test]
fn test_compute_speeds() {
    // Constant velocity: every derived speed is identical
    let segment = Segment::new(
        (0..5)
            .map(|i| TrackPoint::new(0.001 * i as f64, 0.0, i as f64 * 10.0))
            .collect::<Vec<_>>(),
    )
    .unwrap();

    let with_speeds = segment.compute_speeds();
    let speeds: Vec<f64> = with_speeds
        .points()
        .iter()
        .map(|p| p.speed.expect("speed populated"))
        .collect();

    for speed in &speeds {
        assert!((speed - 0.0001).abs() < 1e-12);
    }

    // Positions and timestamps are untouched
    for (orig, out) in segment.points().iter().zip(with_speeds.points()) {
        assert_eq!(orig.latitude, out.latitude);
        assert_eq!(orig.time, out.time);
    }
}

#[test]
fn test_bounds_from_points_empty() {
    assert!(Bounds::from_points(&[]).is_none());
}

#[test]
fn test_bounds_center() {
    let bounds = Bounds {
        min_lat: 51.50,
        max_lat: 51.52,
        min_lng: -0.12,
        max_lng: -0.10,
    };
    let center = bounds.center();
    assert!((center.latitude - 51.51).abs() < 1e-12);
    assert!((center.longitude - -0.11).abs() < 1e-12);
}

#[test]
fn test_segment_serde_round_trip() {
    let segment = Segment::new(sample_points()).unwrap().compute_speeds();

    let json = serde_json::to_string(&segment).unwrap();
    let back: Segment = serde_json::from_str(&json).unwrap();
    assert_eq!(back, segment);
}

#[test]
fn test_track_serde_round_trip() {
    let track = Track::new("commute", vec![Segment::new(sample_points()).unwrap()]);

    let json = serde_json::to_string(&track).unwrap();
    let back: Track = serde_json::from_str(&json).unwrap();
    assert_eq!(back, track);
}
