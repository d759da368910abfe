//! Unified error handling for the normalization pipeline and trip matcher.

use thiserror::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, TripMatchError>;

/// Errors produced by pipeline stages, the matcher and the corpus.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TripMatchError {
    /// A segment with fewer than the required points was presented.
    #[error("segment has {point_count} points, at least {minimum_required} required")]
    InsufficientPoints {
        point_count: usize,
        minimum_required: usize,
    },

    /// Timestamps within a segment must be strictly increasing.
    #[error("timestamps must be strictly increasing (violated at point {index})")]
    NonIncreasingTimestamps { index: usize },

    /// A threshold or tuning parameter is outside its valid range.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// An id was appended to the corpus twice.
    #[error("trip id '{trip_id}' is already present in the corpus")]
    DuplicateTripId { trip_id: String },
}

/// Extension trait for converting `Option` into point-count errors.
pub trait OptionExt<T> {
    /// Convert `None` into [`TripMatchError::InsufficientPoints`].
    fn ok_or_insufficient_points(self, point_count: usize, minimum_required: usize) -> Result<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_insufficient_points(self, point_count: usize, minimum_required: usize) -> Result<T> {
        self.ok_or(TripMatchError::InsufficientPoints {
            point_count,
            minimum_required,
        })
    }
}

/// Reject non-finite or non-positive parameter values.
pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(TripMatchError::InvalidParameter {
            name,
            value,
            reason: "must be a positive finite number",
        })
    }
}

/// Reject non-finite or negative parameter values.
pub(crate) fn ensure_non_negative(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(TripMatchError::InvalidParameter {
            name,
            value,
            reason: "must be a non-negative finite number",
        })
    }
}
