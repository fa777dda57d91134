//! NetCDF persistence for the voxel cube.
//!
//! [`CubeStore`] owns the output file: it declares the dimensions and
//! variables up front, takes the coordinate axes once, accepts indexed
//! voxel writes, and finalizes on close. The `value` variable is a 1-byte
//! integer with dimension order `(time, z, y, x)` — or `(z, y, x)` without
//! a time axis — which the downstream volumetric viewer requires exactly.
//!
//! A store dropped without a successful [`CubeStore::close`] removes its
//! file, so a failed run leaves no partial artifact.

pub mod read;
pub mod store;

pub use read::{read_cube, CubeData};
pub use store::CubeStore;

pub(crate) fn nc_err(e: netcdf::Error) -> voxel_common::VoxelError {
    voxel_common::VoxelError::Storage(e.to_string())
}
