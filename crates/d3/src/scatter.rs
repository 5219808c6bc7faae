//! Retry-based scatter placement engine.

use crate::bounds::PlacementBounds;
use crate::bvh::BvhTree;
use crate::geometry::MeshGeometry;
use crate::sampler::PoseSampler;
use mesh_scatter_core::pose::Placement;
use mesh_scatter_core::solver::{Config, PlacementSink, ProgressCallback, ProgressInfo, Solver};
use mesh_scatter_core::{Result, ScatterResult};

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Instant;

/// One accepted instance: its placement plus the overlap structure it was
/// accepted with. The structure is kept for the rest of the run so later
/// candidates test against it without rebuilding.
struct PlacedInstance {
    placement: Placement<f64>,
    bvh: BvhTree,
}

/// Randomized collision-free placement engine.
///
/// Instances are placed strictly in order; each candidate pose is tested
/// against every previously accepted instance and retried up to the
/// configured trial budget. Instances that exhaust the budget are abandoned
/// and recorded, never treated as errors.
pub struct Scatterer {
    config: Config,
}

impl Scatterer {
    /// Creates a new engine with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Creates an engine with default configuration.
    pub fn default_config() -> Self {
        Self::new(Config::default())
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Places `copies` instances of a single geometry.
    pub fn place_all(
        &self,
        geometry: &MeshGeometry,
        copies: usize,
        bounds: &PlacementBounds,
    ) -> Result<ScatterResult<f64>> {
        let geometry = geometry.clone().with_quantity(copies);
        self.run(&[geometry], bounds, None, None)
    }

    /// Solves while forwarding each accepted placement to a sink.
    pub fn solve_with_sink<K: PlacementSink<f64>>(
        &self,
        geometries: &[MeshGeometry],
        bounds: &PlacementBounds,
        sink: &mut K,
    ) -> Result<ScatterResult<f64>> {
        self.run(geometries, bounds, None, Some(sink))
    }

    fn run(
        &self,
        geometries: &[MeshGeometry],
        bounds: &PlacementBounds,
        callback: Option<&ProgressCallback>,
        mut sink: Option<&mut dyn PlacementSink<f64>>,
    ) -> Result<ScatterResult<f64>> {
        // All validation happens before the first sample is drawn.
        bounds.validate()?;
        for geometry in geometries {
            geometry.validate()?;
        }

        let start = Instant::now();
        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let sampler = PoseSampler::new(*bounds).with_rotation(self.config.rotation);
        let total: usize = geometries.iter().map(|g| g.quantity()).sum();

        let mut result = ScatterResult::new();
        let mut placed: Vec<PlacedInstance> = Vec::new();
        let mut index = 0usize;

        for geometry in geometries {
            for instance in 0..geometry.quantity() {
                let mut accepted = false;
                let mut trials = 0u32;

                while trials < self.config.max_trials {
                    trials += 1;
                    result.attempts += 1;

                    let pose = sampler.sample(&mut rng);
                    let posed = geometry.posed(&pose);
                    let bvh = BvhTree::build(&posed);

                    if placed.iter().any(|p| bvh.overlaps(&p.bvh)) {
                        // Candidate rejected; its structure is discarded.
                        continue;
                    }

                    let placement = Placement::new(geometry.id().clone(), instance, pose);
                    if let Some(sink) = sink.as_mut() {
                        sink.on_placed(&placement);
                    }
                    log::debug!(
                        "Placed instance {} of '{}' after {} trial(s)",
                        index,
                        geometry.id(),
                        trials
                    );
                    placed.push(PlacedInstance { placement, bvh });
                    accepted = true;
                    break;
                }

                if !accepted {
                    log::warn!(
                        "Could not place instance {} after {} attempts",
                        index,
                        self.config.max_trials
                    );
                    result.abandoned.push(index);
                    if let Some(sink) = sink.as_mut() {
                        sink.on_abandoned(index);
                    }
                }

                if let Some(callback) = callback {
                    callback(
                        ProgressInfo::new()
                            .with_instance(index, total)
                            .with_trials(trials)
                            .with_placed(placed.len()),
                    );
                }

                index += 1;
            }
        }

        result.placements = placed.into_iter().map(|p| p.placement).collect();
        result.computation_time_ms = start.elapsed().as_millis() as u64;

        if let Some(callback) = callback {
            callback(
                ProgressInfo::new()
                    .with_instance(total.saturating_sub(1), total)
                    .with_placed(result.placements.len())
                    .finished(),
            );
        }

        Ok(result)
    }
}

impl Default for Scatterer {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Solver for Scatterer {
    type Geometry = MeshGeometry;
    type Bounds = PlacementBounds;
    type Scalar = f64;

    fn solve(
        &self,
        geometries: &[MeshGeometry],
        bounds: &PlacementBounds,
    ) -> Result<ScatterResult<f64>> {
        self.run(geometries, bounds, None, None)
    }

    fn solve_with_progress(
        &self,
        geometries: &[MeshGeometry],
        bounds: &PlacementBounds,
        callback: ProgressCallback,
    ) -> Result<ScatterResult<f64>> {
        self.run(geometries, bounds, Some(&callback), None)
    }
}
