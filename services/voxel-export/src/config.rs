//! Export job configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use voxel_common::{Extent, Resolution, VoxelError, VoxelResult};
use voxel_grid::{StackSchema, TimestepSchema};

/// Top-level export configuration, loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// NDJSON file holding the enriched fishnet points.
    pub points: PathBuf,

    /// Output NetCDF path. The resolution suffix is appended when the
    /// path contains `{res}`.
    pub output: PathBuf,

    /// Height and time extents.
    pub extent: ExtentConfig,

    /// Analysis resolution.
    pub resolution: ResolutionConfig,

    /// Which surfaces drive the classification.
    pub surfaces: SurfaceConfig,
}

/// Height and optional time extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtentConfig {
    pub min_z: f64,
    pub max_z: f64,
    pub min_t: Option<DateTime<Utc>>,
    pub max_t: Option<DateTime<Utc>>,
}

/// Cell sizes per axis; `t` is in days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionConfig {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: Option<f64>,
}

/// Surface schema selecting the classification policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SurfaceConfig {
    /// Time-series change detection against a baseline (and optionally a
    /// planned design surface).
    Change {
        baseline: String,
        planned: Option<String>,
        /// Surface per timestep past the first, in date order.
        timesteps: Vec<String>,
    },
    /// Ordered horizon stack, shallowest first, no time axis.
    Stack { order: Vec<String> },
}

impl ExportConfig {
    /// Load and parse the YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Build the analysis extent, checking time fields against the mode.
    pub fn extent(&self) -> VoxelResult<Extent> {
        let extent = match (self.extent.min_t, self.extent.max_t) {
            (Some(min_t), Some(max_t)) => {
                Extent::with_time(self.extent.min_z, self.extent.max_z, min_t, max_t)
            }
            (None, None) => Extent::new(self.extent.min_z, self.extent.max_z),
            _ => {
                return Err(VoxelError::config(
                    "min_t and max_t must be given together",
                ))
            }
        };
        match &self.surfaces {
            SurfaceConfig::Change { .. } if extent.time.is_none() => Err(VoxelError::config(
                "change mode requires min_t and max_t",
            )),
            SurfaceConfig::Stack { .. } if extent.time.is_some() => Err(VoxelError::config(
                "stack mode does not take a time extent",
            )),
            _ => Ok(extent),
        }
    }

    /// Build the analysis resolution.
    pub fn resolution(&self) -> Resolution {
        Resolution {
            x: self.resolution.x,
            y: self.resolution.y,
            z: self.resolution.z,
            t: self.resolution.t,
        }
    }

    /// Build the timestep schema for change mode.
    pub fn timestep_schema(&self) -> Option<TimestepSchema> {
        match &self.surfaces {
            SurfaceConfig::Change {
                baseline,
                planned,
                timesteps,
            } => Some(TimestepSchema::new(
                baseline.clone(),
                planned.clone(),
                timesteps.clone(),
            )),
            SurfaceConfig::Stack { .. } => None,
        }
    }

    /// Build the stack schema for stack mode.
    pub fn stack_schema(&self) -> Option<StackSchema> {
        match &self.surfaces {
            SurfaceConfig::Stack { order } => Some(StackSchema::new(order.clone())),
            SurfaceConfig::Change { .. } => None,
        }
    }

    /// Output path with the `{res}` placeholder expanded to the
    /// resolution suffix, e.g. `voxel{res}.nc` -> `voxel_1x1x05.nc`.
    pub fn output_path(&self) -> PathBuf {
        let raw = self.output.to_string_lossy();
        if raw.contains("{res}") {
            PathBuf::from(raw.replace("{res}", &self.resolution().file_suffix()))
        } else {
            self.output.clone()
        }
    }
}
