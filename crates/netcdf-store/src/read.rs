//! Reading a finished cube back, for verification and round-trip tests.

use std::path::Path;

use voxel_common::{VoxelError, VoxelResult};

use crate::nc_err;

/// Contents of a voxel cube file.
#[derive(Debug, Clone)]
pub struct CubeData {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f32>,
    /// Days since the epoch, present for temporal cubes.
    pub time: Option<Vec<f32>>,
    /// Units attribute of the `time` variable.
    pub time_units: Option<String>,
    /// Shape of the `value` variable, outermost dimension first.
    pub shape: Vec<usize>,
    /// Classification codes in row-major order matching `shape`.
    pub values: Vec<i8>,
}

impl CubeData {
    /// Code at `(z, y, x)` for a non-temporal cube.
    pub fn code(&self, z: usize, y: usize, x: usize) -> i8 {
        debug_assert_eq!(self.shape.len(), 3);
        self.values[(z * self.shape[1] + y) * self.shape[2] + x]
    }

    /// Code at `(t, z, y, x)` for a temporal cube.
    pub fn code_at(&self, t: usize, z: usize, y: usize, x: usize) -> i8 {
        debug_assert_eq!(self.shape.len(), 4);
        self.values[((t * self.shape[1] + z) * self.shape[2] + y) * self.shape[3] + x]
    }
}

/// Open a cube file and read its axes and codes.
pub fn read_cube(path: impl AsRef<Path>) -> VoxelResult<CubeData> {
    let file = netcdf::open(path.as_ref()).map_err(nc_err)?;

    let x: Vec<f64> = get_var(&file, "x")?.get_values(..).map_err(nc_err)?;
    let y: Vec<f64> = get_var(&file, "y")?.get_values(..).map_err(nc_err)?;
    let z: Vec<f32> = get_var(&file, "z")?.get_values(..).map_err(nc_err)?;

    let (time, time_units) = match file.variable("time") {
        Some(var) => {
            let values: Vec<f32> = var.get_values(..).map_err(nc_err)?;
            let units = var
                .attribute_value("units")
                .and_then(|v| v.ok())
                .and_then(|v| match v {
                    netcdf::AttributeValue::Str(s) => Some(s),
                    _ => None,
                });
            (Some(values), units)
        }
        None => (None, None),
    };

    let value = get_var(&file, "value")?;
    let shape: Vec<usize> = value.dimensions().iter().map(|d| d.len()).collect();
    let values: Vec<i8> = value.get_values(..).map_err(nc_err)?;

    Ok(CubeData {
        x,
        y,
        z,
        time,
        time_units,
        shape,
        values,
    })
}

fn get_var<'f>(file: &'f netcdf::File, name: &str) -> VoxelResult<netcdf::Variable<'f>> {
    file.variable(name)
        .ok_or_else(|| VoxelError::storage(format!("missing variable '{name}'")))
}
