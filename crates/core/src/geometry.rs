//! Geometry identity and acquisition traits.

use crate::Result;

/// Unique identifier for a geometry.
pub type GeometryId = String;

/// Supplies geometry descriptors by name.
///
/// This is the boundary to whatever owns the base meshes (an asset store, a
/// scene exporter, a test fixture). The engine itself never fetches geometry;
/// callers resolve descriptors up front and pass them in, so a provider
/// failure surfaces before any placement attempt begins.
pub trait GeometryProvider {
    /// The geometry descriptor type handed out by this provider.
    type Geometry;

    /// Returns the descriptor registered under `id`.
    ///
    /// Fails with [`Error::GeometryNotFound`](crate::Error::GeometryNotFound)
    /// if no such descriptor exists.
    fn geometry(&self, id: &str) -> Result<&Self::Geometry>;

    /// Returns true if a descriptor is registered under `id`.
    fn contains(&self, id: &str) -> bool {
        self.geometry(id).is_ok()
    }
}
