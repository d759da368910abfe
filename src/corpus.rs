//! Append-only store of learned canonical trips.
//!
//! The matcher treats the corpus as a read-only snapshot; growth happens
//! only through the caller's explicit [`CanonicalCorpus::append`] after a
//! [`TripOutcome::New`](crate::TripOutcome::New) outcome. Each entry owns a
//! nearest-neighbour tree over its points, built once at append time and
//! reused by every subsequent matching call.

use rstar::RTree;

use crate::matching::{nearest_distance, point_tree};
use crate::{Result, Segment, TrackPoint, TripId, TripMatchError};

/// One learned trip: a stable identifier, its canonical segment and the
/// prebuilt nearest-neighbour index.
#[derive(Debug, Clone)]
pub struct CanonicalEntry {
    trip_id: TripId,
    segment: Segment,
    tree: RTree<[f64; 2]>,
}

impl CanonicalEntry {
    fn new(trip_id: TripId, segment: Segment) -> Self {
        let tree = point_tree(&segment);
        Self {
            trip_id,
            segment,
            tree,
        }
    }

    /// The entry's stable identifier.
    pub fn trip_id(&self) -> &str {
        &self.trip_id
    }

    /// The canonical segment.
    pub fn segment(&self) -> &Segment {
        &self.segment
    }

    /// Planar distance from a point to its nearest canonical point, degrees.
    pub fn nearest_distance(&self, point: &TrackPoint) -> f64 {
        nearest_distance(&self.tree, [point.longitude, point.latitude])
    }
}

/// Insertion-ordered, append-only collection of learned trips.
///
/// Entry order defines tie-break priority during matching: earlier entries
/// win ties. Entries are never mutated or removed.
///
/// # Example
/// ```
/// use tripmatch::{CanonicalCorpus, Segment, TrackPoint};
///
/// let segment = Segment::new(vec![
///     TrackPoint::new(51.5074, -0.1278, 0.0),
///     TrackPoint::new(51.5090, -0.1300, 10.0),
/// ])?;
///
/// let mut corpus = CanonicalCorpus::new();
/// let id = corpus.next_id();
/// corpus.append(id, segment)?;
/// assert_eq!(corpus.len(), 1);
/// # Ok::<(), tripmatch::TripMatchError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CanonicalCorpus {
    entries: Vec<CanonicalEntry>,
}

impl CanonicalCorpus {
    /// Create an empty corpus.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Register a learned trip. Fails if the id is already present.
    pub fn append(&mut self, trip_id: TripId, segment: Segment) -> Result<()> {
        if self.contains(&trip_id) {
            return Err(TripMatchError::DuplicateTripId { trip_id });
        }
        self.entries.push(CanonicalEntry::new(trip_id, segment));
        Ok(())
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[CanonicalEntry] {
        &self.entries
    }

    /// Look up an entry by id.
    pub fn get(&self, trip_id: &str) -> Option<&CanonicalEntry> {
        self.entries.iter().find(|e| e.trip_id == trip_id)
    }

    /// Check whether an id is present.
    pub fn contains(&self, trip_id: &str) -> bool {
        self.get(trip_id).is_some()
    }

    /// Number of learned trips.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Produce an identifier not yet present in the corpus.
    ///
    /// Deterministic and read-only: the first free `trip-<n>` counting up
    /// from the current length, so repeated calls without an intervening
    /// append return the same id.
    pub fn next_id(&self) -> TripId {
        let mut n = self.entries.len();
        loop {
            let id = format!("trip-{}", n);
            if !self.contains(&id) {
                return id;
            }
            n += 1;
        }
    }
}
