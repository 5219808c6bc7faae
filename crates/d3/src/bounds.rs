//! Placement volume bounds.

use mesh_scatter_core::{Error, Result};
use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The bounded volume candidate locations are drawn from.
///
/// X and Y are symmetric half-extents about the origin; Z is an explicit
/// `[z_min, z_max]` interval so placements can float above a floor plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementBounds {
    half_extent_x: f64,
    half_extent_y: f64,
    z_min: f64,
    z_max: f64,
}

impl PlacementBounds {
    /// Creates new placement bounds.
    pub fn new(half_extent_x: f64, half_extent_y: f64, z_min: f64, z_max: f64) -> Self {
        Self {
            half_extent_x,
            half_extent_y,
            z_min,
            z_max,
        }
    }

    /// Returns the half-extent along X.
    pub fn half_extent_x(&self) -> f64 {
        self.half_extent_x
    }

    /// Returns the half-extent along Y.
    pub fn half_extent_y(&self) -> f64 {
        self.half_extent_y
    }

    /// Returns the minimum Z (floor offset).
    pub fn z_min(&self) -> f64 {
        self.z_min
    }

    /// Returns the maximum Z.
    pub fn z_max(&self) -> f64 {
        self.z_max
    }

    /// Validates the bounds.
    pub fn validate(&self) -> Result<()> {
        if self.half_extent_x < 0.0 || self.half_extent_y < 0.0 {
            return Err(Error::InvalidBounds(
                "Half-extents must be non-negative".into(),
            ));
        }

        if self.z_max < self.z_min {
            return Err(Error::InvalidBounds(format!(
                "z_max ({}) must not be below z_min ({})",
                self.z_max, self.z_min
            )));
        }

        if !(self.half_extent_x.is_finite()
            && self.half_extent_y.is_finite()
            && self.z_min.is_finite()
            && self.z_max.is_finite())
        {
            return Err(Error::InvalidBounds("Bounds must be finite".into()));
        }

        Ok(())
    }

    /// Returns true if a location lies within the bounds.
    pub fn contains(&self, location: &Vector3<f64>) -> bool {
        location.x.abs() <= self.half_extent_x
            && location.y.abs() <= self.half_extent_y
            && location.z >= self.z_min
            && location.z <= self.z_max
    }
}
