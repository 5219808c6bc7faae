//! Error types for mesh-scatter.

use thiserror::Error;

/// Result type alias for mesh-scatter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during scatter placement operations.
///
/// All variants are fatal and surface before any placement attempt begins.
/// Exhausting the retry budget for an instance is *not* an error; it is
/// recorded in the run result instead.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid geometry provided.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Invalid placement bounds provided.
    #[error("Invalid bounds: {0}")]
    InvalidBounds(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A named geometry was not found by the provider.
    #[error("Geometry not found: {0}")]
    GeometryNotFound(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}
