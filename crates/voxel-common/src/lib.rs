//! Shared value objects for the DEM voxel cube workspace.
//!
//! This crate holds the types every other crate agrees on: horizontal
//! bounding boxes, analysis extents and resolutions, the derived grid
//! dimensions, materialized coordinate axes, the NetCDF time epoch, and
//! the common error type.

pub mod axes;
pub mod bbox;
pub mod error;
pub mod extent;
pub mod grid;
pub mod time;

pub use axes::{build_axes, Axes};
pub use bbox::{round4, BoundingBox};
pub use error::{VoxelError, VoxelResult};
pub use extent::{Extent, Resolution, TimeSpan};
pub use grid::GridDimensions;
