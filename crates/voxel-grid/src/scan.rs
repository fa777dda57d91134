//! Streaming scan driver.
//!
//! Consumes the point collection exactly once per timestep, in ascending
//! (x, y) order, reconstructing horizontal grid indices purely from
//! coordinate changes in the scan. All side effects go through the
//! [`VoxelSink`] the caller supplies.

use tracing::{debug, info};

use voxel_common::{round4, Extent, GridDimensions, Resolution, VoxelError, VoxelResult};

use crate::classify::{classify_change, classify_stack, ChangeClass, SurfaceHeights};
use crate::types::{GridPoint, StackSchema, TimestepSchema};

/// Position of one voxel in the output array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelIndex {
    /// Timestep index, present only for temporal cubes.
    pub t: Option<usize>,
    pub z: usize,
    pub y: usize,
    pub x: usize,
}

/// Destination for classified voxels.
///
/// Writing the same index twice is legal; the last write wins. Some
/// resolution/extent combinations revisit indices during the scan, and
/// that behavior is deliberately preserved.
pub trait VoxelSink {
    fn write_voxel(&mut self, index: &VoxelIndex, code: i8) -> VoxelResult<()>;
}

/// Horizontal cursor reconstructing (ix, iy) from the scan order.
///
/// A change in x advances the column and resets the row; otherwise a
/// change in y advances the row. Requires the points pre-sorted by
/// ascending x then ascending y; the driver does not sort.
#[derive(Debug, Default)]
struct ScanCursor {
    ix: usize,
    iy: usize,
    prev_x: f64,
    prev_y: f64,
    started: bool,
}

impl ScanCursor {
    fn new() -> Self {
        Self::default()
    }

    fn advance(&mut self, x: f64, y: f64) -> (usize, usize) {
        let (x, y) = (round4(x), round4(y));
        if !self.started {
            self.started = true;
            self.prev_x = x;
            self.prev_y = y;
        } else if x != self.prev_x {
            self.ix += 1;
            self.iy = 0;
            self.prev_x = x;
            self.prev_y = y;
        } else if y != self.prev_y {
            self.iy += 1;
            self.prev_y = y;
        }
        (self.ix, self.iy)
    }
}

/// Run the change-detection scan: one pass over the points per timestep,
/// selecting the current surface per the schema.
pub fn run_change_scan<S: VoxelSink>(
    points: &[GridPoint],
    schema: &TimestepSchema,
    dims: &GridDimensions,
    extent: &Extent,
    resolution: &Resolution,
    sink: &mut S,
) -> VoxelResult<()> {
    let nt = dims
        .nt
        .ok_or_else(|| VoxelError::dimension("change scan requires a time dimension"))?;
    schema.validate(points, nt)?;

    for it in 0..nt {
        let current = schema.current_surface(it);
        info!(timestep = it, surface = current, "scanning timestep");
        scan_pass(points, dims, extent, resolution, Some(it), sink, |point, z| {
            if !point.in_area {
                return Ok(ChangeClass::Outside.code());
            }
            let baseline = match point.height(schema.baseline())? {
                Some(v) => v,
                // No elevation datum here: nothing to classify against.
                None => return Ok(ChangeClass::Outside.code()),
            };
            let heights = SurfaceHeights {
                baseline,
                // The first timestep observes no change yet.
                current: if it == 0 { None } else { point.height(current)? },
                planned: match schema.planned() {
                    Some(name) => point.height(name)?,
                    None => None,
                },
            };
            Ok(classify_change(z, true, &heights).code())
        })?;
    }
    Ok(())
}

/// Run the stacked-horizon scan: a single pass, no time axis.
pub fn run_stack_scan<S: VoxelSink>(
    points: &[GridPoint],
    schema: &StackSchema,
    dims: &GridDimensions,
    extent: &Extent,
    resolution: &Resolution,
    sink: &mut S,
) -> VoxelResult<()> {
    if dims.nt.is_some() {
        return Err(VoxelError::dimension(
            "stack scan does not take a time dimension",
        ));
    }
    schema.validate(points)?;

    info!(surfaces = schema.surfaces().len(), "scanning surface stack");
    scan_pass(points, dims, extent, resolution, None, sink, |point, z| {
        if !point.in_area {
            return Ok(-1);
        }
        // Sea level is the synthetic shallowest surface.
        let mut stack: Vec<Option<f64>> = Vec::with_capacity(schema.surfaces().len() + 1);
        stack.push(Some(0.0));
        for surface in schema.surfaces() {
            stack.push(point.height(surface)?);
        }
        Ok(classify_stack(z, true, &stack))
    })
}

/// One ordered pass over the points, iterating every elevation level per
/// point and writing the classified code through the sink.
fn scan_pass<S, F>(
    points: &[GridPoint],
    dims: &GridDimensions,
    extent: &Extent,
    resolution: &Resolution,
    it: Option<usize>,
    sink: &mut S,
    classify: F,
) -> VoxelResult<()>
where
    S: VoxelSink,
    F: Fn(&GridPoint, f64) -> VoxelResult<i8>,
{
    let step = resolution.z.abs();
    let mut cursor = ScanCursor::new();

    for point in points {
        let (ix, iy) = cursor.advance(point.x, point.y);
        if ix >= dims.nx {
            return Err(VoxelError::Index {
                axis: "x",
                index: ix,
                len: dims.nx,
            });
        }
        if iy >= dims.ny {
            return Err(VoxelError::Index {
                axis: "y",
                index: iy,
                len: dims.ny,
            });
        }

        for iz in 0..dims.nz {
            let z = extent.min_z + iz as f64 * step;
            let code = classify(point, z)?;
            sink.write_voxel(
                &VoxelIndex {
                    t: it,
                    z: iz,
                    y: iy,
                    x: ix,
                },
                code,
            )?;
        }
    }
    debug!(points = points.len(), "scan pass complete");
    Ok(())
}
