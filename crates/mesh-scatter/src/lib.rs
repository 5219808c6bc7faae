//! # Mesh-Scatter
//!
//! Randomized collision-free scattering of rigid mesh instances inside a
//! bounded 3D volume.
//!
//! The engine samples random poses, builds a bounding volume hierarchy per
//! candidate, and accepts a candidate only if it overlaps none of the
//! previously accepted instances, retrying up to a configurable budget.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use mesh_scatter::core::{Config, Solver};
//! use mesh_scatter::d3::{MeshGeometry, PlacementBounds, Scatterer};
//!
//! let mesh = MeshGeometry::new("base_obj", vertices, faces);
//! let bounds = PlacementBounds::new(5.0, 5.0, 2.0, 10.0);
//!
//! let scatterer = Scatterer::new(Config::new().with_seed(42));
//! let result = scatterer.place_all(&mesh, 20, &bounds)?;
//! println!("placed {} of 20", result.placed_count());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support for poses, placements, and results.

/// Core types and traits.
pub use mesh_scatter_core as core;

/// 3D placement engine.
pub use mesh_scatter_d3 as d3;

// Re-export commonly used types at root level
pub use mesh_scatter_core::{Config, Placement, Pose, ScatterResult, Solver};
pub use mesh_scatter_d3::{MeshGeometry, PlacementBounds, Scatterer};
