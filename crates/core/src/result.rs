//! Scatter run result representation.

use crate::pose::Placement;
use nalgebra::RealField;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Result of one scatter placement run.
///
/// The run always completes: instances that could not be placed within the
/// retry budget are listed in `abandoned` rather than failing the run. The
/// `placements` vector is the placement set, in acceptance order, and is
/// pairwise non-overlapping by construction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScatterResult<S: RealField + Copy> {
    /// Accepted placements, in the order they were accepted.
    pub placements: Vec<Placement<S>>,

    /// Global indices (0-based, over all requested instances) that could not
    /// be placed within the retry budget.
    pub abandoned: Vec<usize>,

    /// Total pose samples drawn across the whole run.
    pub attempts: u64,

    /// Computation time in milliseconds.
    pub computation_time_ms: u64,
}

impl<S: RealField + Copy> ScatterResult<S> {
    /// Creates a new empty result.
    pub fn new() -> Self {
        Self {
            placements: Vec::new(),
            abandoned: Vec::new(),
            attempts: 0,
            computation_time_ms: 0,
        }
    }

    /// Returns true if every requested instance was placed.
    pub fn all_placed(&self) -> bool {
        self.abandoned.is_empty()
    }

    /// Returns the number of placed instances.
    pub fn placed_count(&self) -> usize {
        self.placements.len()
    }

    /// Returns the number of abandoned instances.
    pub fn abandoned_count(&self) -> usize {
        self.abandoned.len()
    }

    /// Returns the number of instances the run was asked to place.
    pub fn requested_count(&self) -> usize {
        self.placements.len() + self.abandoned.len()
    }

    /// Returns true if at least one instance was placed.
    pub fn is_successful(&self) -> bool {
        !self.placements.is_empty()
    }
}

impl<S: RealField + Copy> Default for ScatterResult<S> {
    fn default() -> Self {
        Self::new()
    }
}

/// Summary statistics for a scatter result.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScatterSummary {
    /// Total instances requested.
    pub total_requested: usize,
    /// Total instances placed.
    pub total_placed: usize,
    /// Total instances abandoned.
    pub total_abandoned: usize,
    /// Total pose samples drawn.
    pub attempts: u64,
    /// Computation time in milliseconds.
    pub time_ms: u64,
}

impl<S: RealField + Copy> From<&ScatterResult<S>> for ScatterSummary {
    fn from(result: &ScatterResult<S>) -> Self {
        Self {
            total_requested: result.requested_count(),
            total_placed: result.placed_count(),
            total_abandoned: result.abandoned_count(),
            attempts: result.attempts,
            time_ms: result.computation_time_ms,
        }
    }
}
