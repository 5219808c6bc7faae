//! Solver traits and configuration.

use crate::pose::Placement;
use crate::result::ScatterResult;
use crate::Result;
use nalgebra::RealField;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Common configuration for scatter solvers.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Retry budget per instance before it is abandoned.
    pub max_trials: u32,

    /// Random seed for reproducibility (None = random).
    pub seed: Option<u64>,

    /// Whether candidate poses carry a random rotation. When disabled,
    /// instances are placed with identity rotation.
    pub rotation: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_trials: 10,
            seed: None,
            rotation: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the retry budget per instance.
    pub fn with_max_trials(mut self, max_trials: u32) -> Self {
        self.max_trials = max_trials;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables random rotation sampling.
    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }
}

/// Progress callback for long-running scatter operations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information reported once per attempted instance.
#[derive(Debug, Clone, Default)]
pub struct ProgressInfo {
    /// Index of the instance just attempted (0-based).
    pub instance: usize,
    /// Total number of requested instances.
    pub total_instances: usize,
    /// Number of trials the instance consumed.
    pub trials: u32,
    /// Number of instances placed so far.
    pub placed: usize,
    /// Whether the solver is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates a new progress info marked as running.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the instance counters.
    pub fn with_instance(mut self, instance: usize, total: usize) -> Self {
        self.instance = instance;
        self.total_instances = total;
        self
    }

    /// Sets the consumed trial count.
    pub fn with_trials(mut self, trials: u32) -> Self {
        self.trials = trials;
        self
    }

    /// Sets the placed count.
    pub fn with_placed(mut self, placed: usize) -> Self {
        self.placed = placed;
        self
    }

    /// Marks the solver as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }

    /// Fraction of requested instances attempted so far (0.0 to 1.0).
    pub fn progress_percent(&self) -> f64 {
        if self.total_instances > 0 {
            (self.instance + 1) as f64 / self.total_instances as f64
        } else {
            0.0
        }
    }
}

/// Receives accepted placements as the run produces them.
///
/// The sink is the boundary to the host scene: linking an instance into a
/// collection, attaching a physics body, and similar per-instance work happen
/// here, strictly after acceptance. The engine never touches host state.
pub trait PlacementSink<S: RealField + Copy> {
    /// Called once for each accepted instance, in placement order.
    fn on_placed(&mut self, placement: &Placement<S>);

    /// Called once for each abandoned instance index.
    fn on_abandoned(&mut self, _instance: usize) {}
}

/// Trait for scatter placement solvers.
pub trait Solver {
    /// The geometry descriptor type this solver handles.
    type Geometry;
    /// The placement bounds type this solver handles.
    type Bounds;
    /// The scalar type for coordinates.
    type Scalar: RealField + Copy;

    /// Places all requested instances, returning the accepted placements.
    fn solve(
        &self,
        geometries: &[Self::Geometry],
        bounds: &Self::Bounds,
    ) -> Result<ScatterResult<Self::Scalar>>;

    /// Solves with a progress callback.
    fn solve_with_progress(
        &self,
        geometries: &[Self::Geometry],
        bounds: &Self::Bounds,
        callback: ProgressCallback,
    ) -> Result<ScatterResult<Self::Scalar>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_max_trials(25)
            .with_seed(42)
            .with_rotation(false);

        assert_eq!(config.max_trials, 25);
        assert_eq!(config.seed, Some(42));
        assert!(!config.rotation);
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.max_trials, 10);
        assert_eq!(config.seed, None);
        assert!(config.rotation);
    }

    #[test]
    fn test_progress_percent() {
        let info = ProgressInfo::new().with_instance(4, 10);
        assert!((info.progress_percent() - 0.5).abs() < 1e-12);

        let empty = ProgressInfo::new();
        assert_eq!(empty.progress_percent(), 0.0);
    }
}
