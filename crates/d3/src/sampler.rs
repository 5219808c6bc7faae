//! Random pose sampling.

use crate::bounds::PlacementBounds;
use mesh_scatter_core::pose::Pose;
use nalgebra::Vector3;
use rand::Rng;
use std::f64::consts::TAU;

/// Draws candidate poses uniformly from a [`PlacementBounds`] volume.
///
/// Location coordinates are independent uniforms over the bounds intervals.
/// Rotation is an independent uniform per Euler axis over `[-2τ, 2τ]` (up to
/// two full turns in either direction); orientation is periodic, so the wide
/// interval only affects the stored angle values, not the orientations that
/// can be reached. The sampler is a pure function of the RNG stream and the
/// bounds.
#[derive(Debug, Clone, Copy)]
pub struct PoseSampler {
    bounds: PlacementBounds,
    rotation: bool,
}

impl PoseSampler {
    /// Creates a sampler over the given bounds, with rotation enabled.
    pub fn new(bounds: PlacementBounds) -> Self {
        Self {
            bounds,
            rotation: true,
        }
    }

    /// Enables or disables rotation sampling. When disabled, sampled poses
    /// carry the identity rotation.
    pub fn with_rotation(mut self, rotation: bool) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns the bounds this sampler draws from.
    pub fn bounds(&self) -> &PlacementBounds {
        &self.bounds
    }

    /// Draws one candidate pose.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Pose<f64> {
        let location = self.sample_location(rng);
        let rotation = if self.rotation {
            Self::sample_rotation(rng)
        } else {
            Vector3::zeros()
        };
        Pose::new(location, rotation)
    }

    fn sample_location<R: Rng>(&self, rng: &mut R) -> Vector3<f64> {
        let x = (rng.gen::<f64>() - 0.5) * 2.0 * self.bounds.half_extent_x();
        let y = (rng.gen::<f64>() - 0.5) * 2.0 * self.bounds.half_extent_y();
        let z = rng.gen::<f64>() * (self.bounds.z_max() - self.bounds.z_min())
            + self.bounds.z_min();
        Vector3::new(x, y, z)
    }

    fn sample_rotation<R: Rng>(rng: &mut R) -> Vector3<f64> {
        let mut axis = || (rng.gen::<f64>() - 0.5) * 2.0 * (2.0 * TAU);
        Vector3::new(axis(), axis(), axis())
    }
}
