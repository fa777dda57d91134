//! Analysis extent and resolution records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{VoxelError, VoxelResult};

/// Calendar span of the temporal dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeSpan {
    pub min_t: DateTime<Utc>,
    pub max_t: DateTime<Utc>,
}

/// Vertical (and optionally temporal) extent of the analysis.
///
/// Elevation bounds use the same linear unit as the resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    pub min_z: f64,
    pub max_z: f64,
    /// Present when a time dimension is requested.
    pub time: Option<TimeSpan>,
}

impl Extent {
    /// Create a vertical-only extent.
    pub fn new(min_z: f64, max_z: f64) -> Self {
        Self {
            min_z,
            max_z,
            time: None,
        }
    }

    /// Create an extent with a temporal span.
    pub fn with_time(min_z: f64, max_z: f64, min_t: DateTime<Utc>, max_t: DateTime<Utc>) -> Self {
        Self {
            min_z,
            max_z,
            time: Some(TimeSpan { min_t, max_t }),
        }
    }

    /// Check the ordering invariants.
    pub fn validate(&self) -> VoxelResult<()> {
        if self.max_z < self.min_z {
            return Err(VoxelError::dimension(format!(
                "max_z ({}) is below min_z ({})",
                self.max_z, self.min_z
            )));
        }
        if let Some(span) = &self.time {
            if span.max_t < span.min_t {
                return Err(VoxelError::dimension(format!(
                    "max_t ({}) is before min_t ({})",
                    span.max_t, span.min_t
                )));
            }
        }
        Ok(())
    }
}

/// Analysis resolution.
///
/// `x` and `y` are the horizontal cell sizes, `z` the elevation step
/// (sign is ignored for stepping), `t` the time step in days when a
/// temporal dimension is requested.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub t: Option<f64>,
}

impl Resolution {
    /// Create a spatial-only resolution.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z, t: None }
    }

    /// Create a resolution with a time step in days.
    pub fn with_time(x: f64, y: f64, z: f64, t: f64) -> Self {
        Self {
            x,
            y,
            z,
            t: Some(t),
        }
    }

    /// Check the sign/zero invariants.
    pub fn validate(&self) -> VoxelResult<()> {
        if self.x <= 0.0 {
            return Err(VoxelError::dimension(format!(
                "x resolution must be positive, got {}",
                self.x
            )));
        }
        if self.y <= 0.0 {
            return Err(VoxelError::dimension(format!(
                "y resolution must be positive, got {}",
                self.y
            )));
        }
        if self.z == 0.0 {
            return Err(VoxelError::dimension("z resolution must be nonzero"));
        }
        if let Some(t) = self.t {
            if t <= 0.0 {
                return Err(VoxelError::dimension(format!(
                    "t resolution must be positive, got {t}"
                )));
            }
        }
        Ok(())
    }

    /// File-name token describing this resolution, e.g. `_1x1x05` for
    /// x=1, y=1, z=0.5. Non-word characters are stripped.
    pub fn file_suffix(&self) -> String {
        let clean = |v: f64| {
            v.to_string()
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
        };
        format!("_{}x{}x{}", clean(self.x), clean(self.y), clean(self.z))
    }
}
