//! 3D scatter placement: randomized collision-free placement of triangle
//! mesh instances inside a bounded volume.

pub mod bounds;
pub mod bvh;
pub mod geometry;
pub mod overlap;
pub mod sampler;
pub mod scatter;

pub use bounds::PlacementBounds;
pub use bvh::{Aabb, BvhTree, Triangle};
pub use geometry::{MeshGeometry, MeshLibrary, PosedMesh};
pub use overlap::{overlaps, tri_tri_overlap};
pub use sampler::PoseSampler;
pub use scatter::Scatterer;
