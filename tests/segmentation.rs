//! Tests for segmentation module

use tripmatch::{split_segment, Segment, TrackPoint, TripMatchError};

/// Trajectory used throughout the original system's fixtures.
fn trajectory_a() -> Segment {
    let coords = [
        (0.5, 0.5),
        (1.0, 1.5),
        (2.0, 2.5),
        (3.5, 3.5),
        (5.2, 4.5),
        (7.5, 6.5),
        (7.9, 8.0),
    ];
    Segment::new(
        coords
            .iter()
            .enumerate()
            .map(|(i, (lat, lng))| TrackPoint::new(*lat, *lng, i as f64))
            .collect(),
    )
    .unwrap()
}

fn two_clusters() -> Segment {
    Segment::new(vec![
        TrackPoint::new(0.0, 0.0, 0.0),
        TrackPoint::new(0.001, 0.0, 10.0),
        TrackPoint::new(0.002, 0.0, 20.0),
        TrackPoint::new(0.5, 0.0, 30.0), // large spatial jump before this point
        TrackPoint::new(0.501, 0.0, 40.0),
        TrackPoint::new(0.502, 0.0, 50.0),
    ])
    .unwrap()
}

#[test]
fn test_invalid_parameters_rejected() {
    let segment = trajectory_a();
    assert!(matches!(
        split_segment(&segment, 0.0, 60.0),
        Err(TripMatchError::InvalidParameter { name: "seg_eps", .. })
    ));
    assert!(matches!(
        split_segment(&segment, 0.01, -5.0),
        Err(TripMatchError::InvalidParameter { name: "seg_min_time", .. })
    ));
    assert!(split_segment(&segment, f64::NAN, 60.0).is_err());
}

#[test]
fn test_no_split_when_eps_exceeds_largest_gap() {
    // Largest consecutive gap in trajectory A is well under 5 degrees
    let segment = trajectory_a();
    let pieces = split_segment(&segment, 5.0, 60.0).unwrap();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0], segment);
}

#[test]
fn test_spatial_split() {
    let segment = two_clusters();
    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].point_count(), 3);
    assert_eq!(pieces[1].point_count(), 3);
}

#[test]
fn test_temporal_split() {
    let segment = Segment::new(vec![
        TrackPoint::new(0.0, 0.0, 0.0),
        TrackPoint::new(0.001, 0.0, 10.0),
        TrackPoint::new(0.002, 0.0, 900.0), // long stop before this point
        TrackPoint::new(0.003, 0.0, 910.0),
    ])
    .unwrap();

    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].point_count(), 2);
    assert_eq!(pieces[1].point_count(), 2);
}

#[test]
fn test_exact_threshold_does_not_split() {
    // Planar gap of exactly 1.0 degree and time gap of exactly 60 s stay
    // within bounds; the boundary is strictly greater
    let segment = Segment::new(vec![
        TrackPoint::new(0.0, 0.0, 0.0),
        TrackPoint::new(1.0, 0.0, 60.0),
        TrackPoint::new(2.0, 0.0, 120.0),
    ])
    .unwrap();

    let pieces = split_segment(&segment, 1.0, 60.0).unwrap();
    assert_eq!(pieces.len(), 1);
}

#[test]
fn test_leading_single_fragment_merges_forward() {
    let segment = Segment::new(vec![
        TrackPoint::new(10.0, 10.0, 0.0), // isolated leading fix
        TrackPoint::new(0.0, 0.0, 10.0),
        TrackPoint::new(0.001, 0.0, 20.0),
        TrackPoint::new(0.002, 0.0, 30.0),
    ])
    .unwrap();

    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].point_count(), 4);
}

#[test]
fn test_trailing_single_fragment_merges_backward() {
    let segment = Segment::new(vec![
        TrackPoint::new(0.0, 0.0, 0.0),
        TrackPoint::new(0.001, 0.0, 10.0),
        TrackPoint::new(0.002, 0.0, 20.0),
        TrackPoint::new(10.0, 10.0, 30.0), // isolated trailing fix
    ])
    .unwrap();

    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();
    assert_eq!(pieces.len(), 1);
    assert_eq!(pieces[0].point_count(), 4);
}

#[test]
fn test_interior_single_fragment_merges() {
    // The isolated fix between two clusters joins one of its neighbours
    // instead of forming a one-point segment
    let segment = Segment::new(vec![
        TrackPoint::new(0.0, 0.0, 0.0),
        TrackPoint::new(5.0, 5.0, 10.0), // isolated
        TrackPoint::new(10.0, 10.0, 20.0),
        TrackPoint::new(10.001, 10.0, 30.0),
    ])
    .unwrap();

    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].point_count(), 2);
    assert_eq!(pieces[1].point_count(), 2);
}

#[test]
fn test_output_partitions_input() {
    let segment = two_clusters();
    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();

    let rejoined: Vec<_> = pieces
        .iter()
        .flat_map(|s| s.points().iter().copied())
        .collect();
    assert_eq!(rejoined, segment.points());
}

#[test]
fn test_idempotent_on_own_output() {
    let segment = two_clusters();
    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();

    for piece in &pieces {
        let again = split_segment(piece, 0.01, 60.0).unwrap();
        assert_eq!(again, vec![piece.clone()]);
    }
}

#[test]
fn test_idempotent_after_fragment_merge() {
    // A merged fragment leaves an over-threshold pair inside the output;
    // re-splitting must still return the segment unchanged
    let segment = Segment::new(vec![
        TrackPoint::new(10.0, 10.0, 0.0),
        TrackPoint::new(0.0, 0.0, 10.0),
        TrackPoint::new(0.001, 0.0, 20.0),
        TrackPoint::new(0.002, 0.0, 30.0),
    ])
    .unwrap();

    let pieces = split_segment(&segment, 0.01, 60.0).unwrap();
    assert_eq!(pieces.len(), 1);

    let again = split_segment(&pieces[0], 0.01, 60.0).unwrap();
    assert_eq!(again, pieces);
}
