//! Mesh geometry descriptors.

use mesh_scatter_core::pose::Pose;
use mesh_scatter_core::{Error, GeometryId, GeometryProvider, Result};
use nalgebra::{Matrix4, Point3};
use rayon::prelude::*;
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle/polygon mesh that can be scattered.
///
/// Holds the raw vertex positions and polygon index lists of one base mesh,
/// plus its existing world transform. The descriptor is read-only as far as
/// the engine is concerned; poses never mutate it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MeshGeometry {
    /// Unique identifier.
    id: GeometryId,

    /// Vertex positions in local coordinates.
    vertices: Vec<Point3<f64>>,

    /// Polygon faces as vertex index lists (at least 3 indices each).
    faces: Vec<Vec<u32>>,

    /// Existing world transform of the base mesh. Any scale present here is
    /// passed through unmodified.
    base_transform: Matrix4<f64>,

    /// Number of copies to place.
    quantity: usize,
}

impl MeshGeometry {
    /// Creates a new mesh geometry with an identity base transform.
    pub fn new(
        id: impl Into<GeometryId>,
        vertices: Vec<Point3<f64>>,
        faces: Vec<Vec<u32>>,
    ) -> Self {
        Self {
            id: id.into(),
            vertices,
            faces,
            base_transform: Matrix4::identity(),
            quantity: 1,
        }
    }

    /// Sets the base world transform.
    pub fn with_base_transform(mut self, transform: Matrix4<f64>) -> Self {
        self.base_transform = transform;
        self
    }

    /// Sets the number of copies to place.
    pub fn with_quantity(mut self, n: usize) -> Self {
        self.quantity = n;
        self
    }

    /// Returns the geometry identifier.
    pub fn id(&self) -> &GeometryId {
        &self.id
    }

    /// Returns the local-space vertex positions.
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Returns the polygon index lists.
    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    /// Returns the base world transform.
    pub fn base_transform(&self) -> &Matrix4<f64> {
        &self.base_transform
    }

    /// Returns the number of copies to place.
    pub fn quantity(&self) -> usize {
        self.quantity
    }

    /// Validates the mesh data.
    pub fn validate(&self) -> Result<()> {
        if self.vertices.is_empty() {
            return Err(Error::InvalidGeometry(format!(
                "Mesh '{}' has no vertices",
                self.id
            )));
        }

        if self.quantity == 0 {
            return Err(Error::InvalidGeometry(format!(
                "Quantity for '{}' must be at least 1",
                self.id
            )));
        }

        let vertex_count = self.vertices.len() as u32;
        for (i, face) in self.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(Error::InvalidGeometry(format!(
                    "Face {} of '{}' has fewer than 3 vertices",
                    i, self.id
                )));
            }
            if let Some(&idx) = face.iter().find(|&&idx| idx >= vertex_count) {
                return Err(Error::InvalidGeometry(format!(
                    "Face {} of '{}' references vertex {} out of {}",
                    i, self.id, idx, vertex_count
                )));
            }
        }

        Ok(())
    }

    /// Applies a pose on top of the base transform, producing world-space
    /// vertex positions.
    ///
    /// The transform order is `base_transform * Translation(location) *
    /// Rotation(rotation)`: the instance rotates about its local origin, is
    /// moved into place, and finally inherits the base mesh's own world
    /// placement.
    pub fn posed(&self, pose: &Pose<f64>) -> PosedMesh<'_> {
        let world = self.base_transform * pose.to_homogeneous();
        let vertices = self
            .vertices
            .par_iter()
            .map(|v| world.transform_point(v))
            .collect();

        PosedMesh {
            vertices,
            faces: &self.faces,
        }
    }
}

/// A mesh under a candidate pose: world-space vertices plus the borrowed
/// face lists of its source geometry. Recomputed per placement attempt.
#[derive(Debug, Clone)]
pub struct PosedMesh<'a> {
    /// World-space vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Polygon faces of the source geometry.
    pub faces: &'a [Vec<u32>],
}

impl PosedMesh<'_> {
    /// Number of triangles after fan triangulation of the polygon faces.
    pub fn triangle_count(&self) -> usize {
        self.faces
            .iter()
            .map(|f| f.len().saturating_sub(2))
            .sum()
    }
}

/// In-memory geometry store, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    geometries: HashMap<GeometryId, MeshGeometry>,
}

impl MeshLibrary {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a geometry under its own id, replacing any previous entry.
    pub fn insert(&mut self, geometry: MeshGeometry) {
        self.geometries.insert(geometry.id().clone(), geometry);
    }

    /// Returns the number of registered geometries.
    pub fn len(&self) -> usize {
        self.geometries.len()
    }

    /// Returns true if no geometries are registered.
    pub fn is_empty(&self) -> bool {
        self.geometries.is_empty()
    }
}

impl GeometryProvider for MeshLibrary {
    type Geometry = MeshGeometry;

    fn geometry(&self, id: &str) -> Result<&MeshGeometry> {
        self.geometries
            .get(id)
            .ok_or_else(|| Error::GeometryNotFound(id.to_string()))
    }
}
