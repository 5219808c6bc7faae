//! Pose and placement representation for positioned instances.

use crate::geometry::GeometryId;
use nalgebra::{Isometry3, Matrix4, Point3, RealField, Rotation3, Translation3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A candidate or accepted rigid pose: a translation plus Euler rotation.
///
/// Rotation angles are in radians, applied as a single combined rotation
/// matrix. A pose is created fresh per placement attempt and is immutable
/// once assigned to an accepted instance.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose<S: RealField + Copy> {
    /// Translation of the instance.
    pub location: Vector3<S>,
    /// Euler rotation angles (x, y, z) in radians.
    pub rotation: Vector3<S>,
}

impl<S: RealField + Copy> Pose<S> {
    /// Creates a new pose from a location and Euler rotation.
    pub fn new(location: Vector3<S>, rotation: Vector3<S>) -> Self {
        Self { location, rotation }
    }

    /// Creates an identity pose (no translation, no rotation).
    pub fn identity() -> Self {
        Self {
            location: Vector3::zeros(),
            rotation: Vector3::zeros(),
        }
    }

    /// Creates a pose with translation only.
    pub fn translation(x: S, y: S, z: S) -> Self {
        Self {
            location: Vector3::new(x, y, z),
            rotation: Vector3::zeros(),
        }
    }

    /// Converts to a nalgebra `Isometry3`.
    pub fn to_isometry(&self) -> Isometry3<S> {
        let rotation = Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z);
        Isometry3::from_parts(Translation3::from(self.location), rotation.into())
    }

    /// Returns the homogeneous matrix `Translation(location) * Rotation(rotation)`.
    ///
    /// The translation is applied on the left so that composing with a base
    /// world matrix as `base * pose.to_homogeneous()` rotates the instance
    /// about its local origin before moving it into place.
    pub fn to_homogeneous(&self) -> Matrix4<S> {
        let translation = Translation3::from(self.location).to_homogeneous();
        let rotation =
            Rotation3::from_euler_angles(self.rotation.x, self.rotation.y, self.rotation.z)
                .to_homogeneous();
        translation * rotation
    }

    /// Transforms a point by this pose.
    pub fn transform_point(&self, point: &Point3<S>) -> Point3<S> {
        self.to_isometry().transform_point(point)
    }

    /// Checks if this is approximately an identity pose.
    pub fn is_identity(&self, epsilon: S) -> bool {
        self.location.x.abs() < epsilon
            && self.location.y.abs() < epsilon
            && self.location.z.abs() < epsilon
            && self.rotation.x.abs() < epsilon
            && self.rotation.y.abs() < epsilon
            && self.rotation.z.abs() < epsilon
    }
}

impl<S: RealField + Copy> Default for Pose<S> {
    fn default() -> Self {
        Self::identity()
    }
}

/// The placement of one accepted instance: which geometry, which copy, where.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placement<S: RealField + Copy> {
    /// The ID of the placed geometry.
    pub geometry_id: GeometryId,

    /// Instance index (0-based) when multiple copies exist.
    pub instance: usize,

    /// The accepted pose.
    pub pose: Pose<S>,
}

impl<S: RealField + Copy> Placement<S> {
    /// Creates a new placement.
    pub fn new(geometry_id: impl Into<GeometryId>, instance: usize, pose: Pose<S>) -> Self {
        Self {
            geometry_id: geometry_id.into(),
            instance,
            pose,
        }
    }

    /// Returns the location of this placement.
    pub fn location(&self) -> &Vector3<S> {
        &self.pose.location
    }

    /// Returns the Euler rotation of this placement.
    pub fn rotation(&self) -> &Vector3<S> {
        &self.pose.rotation
    }
}
