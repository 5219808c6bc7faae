//! # Mesh-Scatter Core
//!
//! Core types and traits for the mesh-scatter placement engine.
//!
//! This crate provides the foundational types shared by the 3D scatter
//! module: poses and placements, solver configuration, run results, the
//! error taxonomy, and the collaborator traits at the host boundary.
//!
//! ## Core Components
//!
//! - **Pose types**: [`Pose`], [`Placement`]
//! - **Solver trait**: [`Solver`] - Common interface for placement engines
//! - **Host boundary**: [`GeometryProvider`], [`PlacementSink`]
//! - **Results**: [`ScatterResult`], [`ScatterSummary`]
//!
//! ## Configuration
//!
//! Use [`Config`] to configure solver behavior:
//!
//! ```rust
//! use mesh_scatter_core::Config;
//!
//! let config = Config::new()
//!     .with_max_trials(20)
//!     .with_seed(42);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod geometry;
pub mod pose;
pub mod result;
pub mod solver;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{GeometryId, GeometryProvider};
pub use pose::{Placement, Pose};
pub use result::{ScatterResult, ScatterSummary};
pub use solver::{Config, PlacementSink, ProgressCallback, ProgressInfo, Solver};
