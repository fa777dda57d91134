//! The writable cube store.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use voxel_common::time::{TIME_CALENDAR, TIME_UNITS};
use voxel_common::{Axes, GridDimensions, VoxelError, VoxelResult};
use voxel_grid::{VoxelIndex, VoxelSink};

use crate::nc_err;

/// Handle to an open NetCDF cube file.
///
/// Usage order is fixed: [`CubeStore::create`], then
/// [`CubeStore::write_axes`] exactly once, then any number of
/// [`CubeStore::write_voxel`] calls, then [`CubeStore::close`].
pub struct CubeStore {
    path: PathBuf,
    dims: GridDimensions,
    temporal: bool,
    axes_written: bool,
    file: Option<netcdf::FileMut>,
}

impl CubeStore {
    /// Create the output file and declare its dimensions and variables.
    ///
    /// With `temporal` the `time` dimension is unbounded and the `value`
    /// variable is `(time, z, y, x)`; otherwise `(z, y, x)`.
    pub fn create(path: impl AsRef<Path>, dims: &GridDimensions, temporal: bool) -> VoxelResult<Self> {
        let path = path.as_ref().to_path_buf();
        if temporal && dims.nt.is_none() {
            return Err(VoxelError::dimension(
                "temporal store requires a time dimension count",
            ));
        }
        if !temporal && dims.nt.is_some() {
            return Err(VoxelError::dimension(
                "non-temporal store given a time dimension count",
            ));
        }

        info!(path = %path.display(), ?dims, temporal, "creating NetCDF cube");
        let mut file = netcdf::create(&path).map_err(nc_err)?;

        if temporal {
            file.add_unlimited_dimension("time").map_err(nc_err)?;
        }
        file.add_dimension("x", dims.nx).map_err(nc_err)?;
        file.add_dimension("y", dims.ny).map_err(nc_err)?;
        file.add_dimension("z", dims.nz).map_err(nc_err)?;

        if temporal {
            let mut time = file.add_variable::<f32>("time", &["time"]).map_err(nc_err)?;
            time.put_attribute("units", TIME_UNITS).map_err(nc_err)?;
            time.put_attribute("calendar", TIME_CALENDAR).map_err(nc_err)?;
        }
        let mut x = file.add_variable::<f64>("x", &["x"]).map_err(nc_err)?;
        x.put_attribute("units", "Meter").map_err(nc_err)?;
        let mut y = file.add_variable::<f64>("y", &["y"]).map_err(nc_err)?;
        y.put_attribute("units", "Meter").map_err(nc_err)?;
        let mut z = file.add_variable::<f32>("z", &["z"]).map_err(nc_err)?;
        z.put_attribute("units", "Meter").map_err(nc_err)?;

        // The viewer expects exactly this dimension order.
        let mut value = if temporal {
            file.add_variable::<i8>("value", &["time", "z", "y", "x"])
                .map_err(nc_err)?
        } else {
            file.add_variable::<i8>("value", &["z", "y", "x"])
                .map_err(nc_err)?
        };
        value
            .put_attribute("units", "Unsigned integer")
            .map_err(nc_err)?;
        value
            .put_attribute("long_name", "classification code")
            .map_err(nc_err)?;

        Ok(Self {
            path,
            dims: *dims,
            temporal,
            axes_written: false,
            file: Some(file),
        })
    }

    /// Write the coordinate sequences. Must be called exactly once,
    /// before any voxel writes.
    pub fn write_axes(&mut self, axes: &Axes) -> VoxelResult<()> {
        if self.axes_written {
            return Err(VoxelError::storage("axes already written"));
        }
        check_axis_len("x", axes.x.len(), self.dims.nx)?;
        check_axis_len("y", axes.y.len(), self.dims.ny)?;
        check_axis_len("z", axes.z.len(), self.dims.nz)?;

        let file = self.file.as_mut().ok_or(VoxelError::ClosedStore)?;
        let dims = self.dims;

        if self.temporal {
            let nt = dims.nt.unwrap_or(0);
            let t = axes
                .t
                .as_ref()
                .ok_or_else(|| VoxelError::dimension("temporal store requires a time axis"))?;
            check_axis_len("time", t.len(), nt)?;
            var_mut(file, "time")?.put_values(t, 0..nt).map_err(nc_err)?;
        } else if axes.t.is_some() {
            return Err(VoxelError::dimension(
                "time axis supplied to a non-temporal store",
            ));
        }

        var_mut(file, "x")?
            .put_values(&axes.x, 0..dims.nx)
            .map_err(nc_err)?;
        var_mut(file, "y")?
            .put_values(&axes.y, 0..dims.ny)
            .map_err(nc_err)?;
        var_mut(file, "z")?
            .put_values(&axes.z, 0..dims.nz)
            .map_err(nc_err)?;

        self.axes_written = true;
        debug!("coordinate axes written");
        Ok(())
    }

    /// Write one classification code. Overwriting an index is legal; the
    /// last write wins.
    pub fn write_voxel(&mut self, index: &VoxelIndex, code: i8) -> VoxelResult<()> {
        if self.file.is_none() {
            return Err(VoxelError::ClosedStore);
        }
        if !self.axes_written {
            return Err(VoxelError::storage("axes must be written before voxel values"));
        }

        check_index("z", index.z, self.dims.nz)?;
        check_index("y", index.y, self.dims.ny)?;
        check_index("x", index.x, self.dims.nx)?;

        let file = self.file.as_mut().ok_or(VoxelError::ClosedStore)?;
        let mut value = var_mut(file, "value")?;
        match (self.temporal, index.t) {
            (true, Some(it)) => {
                check_index("time", it, self.dims.nt.unwrap_or(0))?;
                value
                    .put_value(code, [it, index.z, index.y, index.x])
                    .map_err(nc_err)?;
            }
            (false, None) => {
                value
                    .put_value(code, [index.z, index.y, index.x])
                    .map_err(nc_err)?;
            }
            (true, None) => {
                return Err(VoxelError::storage(
                    "temporal store requires a timestep index",
                ))
            }
            (false, Some(_)) => {
                return Err(VoxelError::storage(
                    "non-temporal store given a timestep index",
                ))
            }
        }
        Ok(())
    }

    /// Flush and finalize the file. Any later write fails with
    /// [`VoxelError::ClosedStore`], and the file survives drop.
    pub fn close(&mut self) -> VoxelResult<()> {
        let file = self.file.take().ok_or(VoxelError::ClosedStore)?;
        drop(file);
        info!(path = %self.path.display(), "cube finalized");
        Ok(())
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VoxelSink for CubeStore {
    fn write_voxel(&mut self, index: &VoxelIndex, code: i8) -> VoxelResult<()> {
        CubeStore::write_voxel(self, index, code)
    }
}

impl Drop for CubeStore {
    fn drop(&mut self) {
        // Never leave a partially written cube behind.
        if let Some(file) = self.file.take() {
            drop(file);
            warn!(path = %self.path.display(), "discarding partially written cube");
            if let Err(e) = std::fs::remove_file(&self.path) {
                warn!(path = %self.path.display(), error = %e, "failed to remove partial cube");
            }
        }
    }
}

fn var_mut<'f>(
    file: &'f mut netcdf::FileMut,
    name: &str,
) -> VoxelResult<netcdf::VariableMut<'f>> {
    file.variable_mut(name)
        .ok_or_else(|| VoxelError::storage(format!("missing variable '{name}'")))
}

fn check_axis_len(axis: &'static str, actual: usize, expected: usize) -> VoxelResult<()> {
    if actual != expected {
        return Err(VoxelError::AxisLength {
            axis,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_index(axis: &'static str, index: usize, len: usize) -> VoxelResult<()> {
    if index >= len {
        return Err(VoxelError::Index { axis, index, len });
    }
    Ok(())
}
