//! Collaborator trait seams.
//!
//! Fishnet generation and DEM height extraction live outside this
//! workspace (a GIS engine owns the geometry); these traits pin down the
//! interface the scan driver relies on. [`crate::testdata`] carries
//! in-memory implementations for tests and demos.

use voxel_common::{BoundingBox, Resolution, VoxelResult};

use crate::types::GridPoint;

/// Produces the horizontal point grid for an analysis extent.
pub trait GridProvider {
    /// Generate the point fishnet covering `bounds` at the horizontal
    /// resolution, with the in-area flag already set.
    ///
    /// The returned points must be ordered by ascending x then ascending
    /// y with stable, 4-decimal coordinates; the scan driver reconstructs
    /// grid indices from exactly that order.
    fn generate(&self, bounds: &BoundingBox, resolution: &Resolution) -> VoxelResult<Vec<GridPoint>>;
}

/// Attaches one optional height per catalog surface to every point.
pub trait HeightSampler {
    /// Enrich the points in place. Every surface in the sampler's catalog
    /// must end up as an entry on every point; a surface that does not
    /// cover a point gets `None`.
    fn sample(&self, points: &mut [GridPoint]) -> VoxelResult<()>;
}
