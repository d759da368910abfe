//! Trip classification against the canonical corpus.
//!
//! The dissimilarity between a candidate segment and a canonical segment is
//! the mean of the one-directional nearest-neighbour distances from each
//! candidate point to the canonical points (an asymmetric Hausdorff-style
//! measure, in degrees). Mean aggregation keeps the score robust to
//! point-count differences without letting a single outlier veto a match.

use log::debug;
use rstar::RTree;

use crate::error::ensure_positive;
use crate::{CanonicalCorpus, CanonicalEntry, MatchScore, Result, Segment, TripOutcome};

/// Build a nearest-neighbour tree over a segment's points.
pub(crate) fn point_tree(segment: &Segment) -> RTree<[f64; 2]> {
    RTree::bulk_load(
        segment
            .points()
            .iter()
            .map(|p| [p.longitude, p.latitude])
            .collect(),
    )
}

/// Planar distance from `[lng, lat]` to its nearest neighbour in the tree.
pub(crate) fn nearest_distance(tree: &RTree<[f64; 2]>, location: [f64; 2]) -> f64 {
    tree.nearest_neighbor(&location)
        .map(|nn| (nn[0] - location[0]).hypot(nn[1] - location[1]))
        .unwrap_or(f64::INFINITY)
}

/// One-directional mean nearest-neighbour distance between two segments,
/// in degrees.
///
/// Asymmetric: every candidate point is paired with its nearest canonical
/// point; the canonical segment's extra geometry is not penalized.
///
/// # Example
/// ```
/// use tripmatch::{segment_dissimilarity, Segment, TrackPoint};
///
/// let segment = Segment::new(vec![
///     TrackPoint::new(51.5074, -0.1278, 0.0),
///     TrackPoint::new(51.5090, -0.1300, 10.0),
/// ])?;
/// assert_eq!(segment_dissimilarity(&segment, &segment), 0.0);
/// # Ok::<(), tripmatch::TripMatchError>(())
/// ```
pub fn segment_dissimilarity(candidate: &Segment, canonical: &Segment) -> f64 {
    let tree = point_tree(canonical);
    let total: f64 = candidate
        .points()
        .iter()
        .map(|p| nearest_distance(&tree, [p.longitude, p.latitude]))
        .sum();
    total / candidate.point_count() as f64
}

/// Score a candidate against one corpus entry.
///
/// `coverage` is the fraction of candidate points whose nearest-neighbour
/// distance is within `point_radius`.
pub fn score_against(candidate: &Segment, entry: &CanonicalEntry, point_radius: f64) -> MatchScore {
    let distances: Vec<f64> = candidate
        .points()
        .iter()
        .map(|p| entry.nearest_distance(p))
        .collect();

    let covered = distances.iter().filter(|d| **d <= point_radius).count();

    MatchScore {
        trip_id: entry.trip_id().to_string(),
        dissimilarity: distances.iter().sum::<f64>() / distances.len() as f64,
        coverage: covered as f64 / distances.len() as f64,
    }
}

/// Classify a normalized segment against the canonical corpus.
///
/// Every corpus entry is scored (exhaustive, no early exit, so the
/// classification is deterministic) and the lowest dissimilarity wins; ties
/// resolve to the earliest entry. If the best dissimilarity is within
/// `distance_threshold` the outcome is [`TripOutcome::Matched`]; otherwise
/// [`TripOutcome::New`] carries the submitted segment back to the caller,
/// identified by the advisory `current_id` when supplied or a fresh
/// [`CanonicalCorpus::next_id`]. An empty corpus always yields `New`.
///
/// The corpus is read-only for the duration of the call; appending a new
/// trip is the caller's decision.
///
/// # Example
/// ```
/// use tripmatch::{learn_trip, CanonicalCorpus, Segment, TrackPoint, TripOutcome};
///
/// let segment = Segment::new(vec![
///     TrackPoint::new(51.5074, -0.1278, 0.0),
///     TrackPoint::new(51.5090, -0.1300, 10.0),
/// ])?;
///
/// let corpus = CanonicalCorpus::new();
/// let outcome = learn_trip(segment, None, &corpus, 0.001, 0.0005)?;
/// assert!(matches!(outcome, TripOutcome::New { .. }));
/// # Ok::<(), tripmatch::TripMatchError>(())
/// ```
pub fn learn_trip(
    segment: Segment,
    current_id: Option<&str>,
    corpus: &CanonicalCorpus,
    distance_threshold: f64,
    point_radius: f64,
) -> Result<TripOutcome> {
    ensure_positive("distance_threshold", distance_threshold)?;
    ensure_positive("point_radius", point_radius)?;

    let best = best_score(corpus, &segment, point_radius);

    match best {
        Some((index, score)) if score.dissimilarity <= distance_threshold => {
            debug!(
                "matched trip '{}' (dissimilarity {:.2e} deg, coverage {:.0}%)",
                score.trip_id,
                score.dissimilarity,
                score.coverage * 100.0
            );
            let entry = &corpus.entries()[index];
            Ok(TripOutcome::Matched {
                trip_id: entry.trip_id().to_string(),
                canonical: entry.segment().clone(),
                score,
            })
        }
        _ => {
            let trip_id = match current_id {
                Some(id) => id.to_string(),
                None => corpus.next_id(),
            };
            debug!("new trip '{}' ({} canonical entries scored)", trip_id, corpus.len());
            Ok(TripOutcome::New { trip_id, segment })
        }
    }
}

/// Exhaustively score the corpus and return the best entry with its index.
///
/// The comparison orders by (dissimilarity, entry index), so the winner is
/// unique and the serial and parallel paths agree.
#[cfg(not(feature = "parallel"))]
fn best_score(
    corpus: &CanonicalCorpus,
    candidate: &Segment,
    point_radius: f64,
) -> Option<(usize, MatchScore)> {
    corpus
        .entries()
        .iter()
        .enumerate()
        .map(|(index, entry)| (index, score_against(candidate, entry, point_radius)))
        .min_by(|a, b| compare_scored(a, b))
}

#[cfg(feature = "parallel")]
fn best_score(
    corpus: &CanonicalCorpus,
    candidate: &Segment,
    point_radius: f64,
) -> Option<(usize, MatchScore)> {
    use rayon::prelude::*;

    corpus
        .entries()
        .par_iter()
        .enumerate()
        .map(|(index, entry)| (index, score_against(candidate, entry, point_radius)))
        .min_by(|a, b| compare_scored(a, b))
}

fn compare_scored(a: &(usize, MatchScore), b: &(usize, MatchScore)) -> std::cmp::Ordering {
    a.1.dissimilarity
        .partial_cmp(&b.1.dissimilarity)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(a.0.cmp(&b.0))
}
