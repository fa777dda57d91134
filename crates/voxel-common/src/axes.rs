//! Coordinate axis materialization.
//!
//! Each axis is an evenly spaced ascending sequence starting at the
//! corresponding minimum, with exactly as many values as the computed
//! dimension. The time axis is encoded as days since the NetCDF epoch.

use crate::bbox::{round4, BoundingBox};
use crate::error::{VoxelError, VoxelResult};
use crate::extent::{Extent, Resolution};
use crate::grid::GridDimensions;
use crate::time::days_since_epoch;

/// Materialized coordinate values for every axis of the cube.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    /// Projected x coordinates, meters.
    pub x: Vec<f64>,
    /// Projected y coordinates, meters.
    pub y: Vec<f64>,
    /// Elevation levels, meters.
    pub z: Vec<f32>,
    /// Days since the epoch, present when the cube is temporal.
    pub t: Option<Vec<f32>>,
}

/// Build the coordinate axes for the given dimensions.
///
/// Lengths are checked against `dims` after generation; a mismatch
/// between the dimension formula and the sequence generator is a defect.
pub fn build_axes(
    extent: &Extent,
    resolution: &Resolution,
    bounds: &BoundingBox,
    dims: &GridDimensions,
) -> VoxelResult<Axes> {
    let x: Vec<f64> = (0..dims.nx)
        .map(|i| round4(bounds.min_x) + i as f64 * resolution.x)
        .collect();
    let y: Vec<f64> = (0..dims.ny)
        .map(|i| round4(bounds.min_y) + i as f64 * resolution.y)
        .collect();
    let z: Vec<f32> = (0..dims.nz)
        .map(|i| (extent.min_z + i as f64 * resolution.z.abs()) as f32)
        .collect();

    let t = match (&extent.time, dims.nt) {
        (Some(span), Some(nt)) => {
            let step = resolution
                .t
                .ok_or_else(|| VoxelError::dimension("temporal extent requires a t resolution"))?;
            let start = days_since_epoch(span.min_t);
            Some(
                (0..nt)
                    .map(|i| (start + i as f64 * step) as f32)
                    .collect::<Vec<f32>>(),
            )
        }
        (None, None) => None,
        _ => {
            return Err(VoxelError::dimension(
                "extent and dimensions disagree on the time axis",
            ))
        }
    };

    let axes = Axes { x, y, z, t };
    check_length("x", axes.x.len(), dims.nx)?;
    check_length("y", axes.y.len(), dims.ny)?;
    check_length("z", axes.z.len(), dims.nz)?;
    if let (Some(t), Some(nt)) = (&axes.t, dims.nt) {
        check_length("time", t.len(), nt)?;
    }
    Ok(axes)
}

fn check_length(axis: &'static str, actual: usize, expected: usize) -> VoxelResult<()> {
    if actual != expected {
        return Err(VoxelError::AxisLength {
            axis,
            expected,
            actual,
        });
    }
    Ok(())
}
