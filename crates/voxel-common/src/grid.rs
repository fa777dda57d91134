//! Grid dimensioning: integer axis lengths derived from extent,
//! resolution, and the measured horizontal bounds.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bbox::{round4, BoundingBox};
use crate::error::{VoxelError, VoxelResult};
use crate::extent::{Extent, Resolution};

/// Integer axis lengths of the output cube.
///
/// Computed once and passed explicitly through every call; never shared
/// mutable state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDimensions {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// Present when the extent carries a time span.
    pub nt: Option<usize>,
}

impl GridDimensions {
    /// Derive the axis lengths.
    ///
    /// `bounds` must come from the point collection's measured envelope.
    /// Horizontal coordinates are rounded to 4 decimals before the
    /// subtraction so the step count does not drift from the declared
    /// bounds.
    pub fn dimension(
        extent: &Extent,
        resolution: &Resolution,
        bounds: &BoundingBox,
    ) -> VoxelResult<Self> {
        extent.validate()?;
        resolution.validate()?;
        if bounds.max_x < bounds.min_x || bounds.max_y < bounds.min_y {
            return Err(VoxelError::dimension(format!(
                "inverted horizontal bounds: {bounds:?}"
            )));
        }

        let nx = ((round4(bounds.max_x) - round4(bounds.min_x)) / resolution.x).floor() as usize + 1;
        let ny = ((round4(bounds.max_y) - round4(bounds.min_y)) / resolution.y).floor() as usize + 1;
        let nz = ((extent.max_z - extent.min_z) / resolution.z.abs()).floor() as usize + 1;

        let nt = match &extent.time {
            Some(span) => {
                let step = resolution.t.ok_or_else(|| {
                    VoxelError::dimension("temporal extent requires a t resolution")
                })?;
                let days = (span.max_t - span.min_t).num_days();
                // Deliberately no "+1" here, unlike the spatial axes.
                Some((days as f64 / step).floor() as usize)
            }
            None => None,
        };

        let dims = Self { nx, ny, nz, nt };
        debug!(?dims, "calculated grid dimensions");
        Ok(dims)
    }

    /// Shape of the `value` variable, outermost dimension first.
    pub fn value_shape(&self) -> Vec<usize> {
        match self.nt {
            Some(nt) => vec![nt, self.nz, self.ny, self.nx],
            None => vec![self.nz, self.ny, self.nx],
        }
    }

    /// Total voxel count, across all timesteps.
    pub fn len(&self) -> usize {
        self.value_shape().iter().product()
    }

    /// Check whether any axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn unit_bounds() -> BoundingBox {
        BoundingBox::new(0.0, 0.0, 9.0, 4.0)
    }

    #[test]
    fn test_vertical_dimension() {
        let extent = Extent::new(-115.0, 0.0);
        let res = Resolution::new(1.0, 1.0, 1.0);
        let dims = GridDimensions::dimension(&extent, &res, &unit_bounds()).unwrap();
        assert_eq!(dims.nz, 116);
        assert_eq!(dims.nx, 10);
        assert_eq!(dims.ny, 5);
        assert_eq!(dims.nt, None);
    }

    #[test]
    fn test_negative_z_step_ignores_sign() {
        let extent = Extent::new(-115.0, 0.0);
        let res = Resolution::new(1.0, 1.0, -1.0);
        let dims = GridDimensions::dimension(&extent, &res, &unit_bounds()).unwrap();
        assert_eq!(dims.nz, 116);
    }

    #[test]
    fn test_fractional_z_step() {
        let extent = Extent::new(160.0, 210.0);
        let res = Resolution::new(1.0, 1.0, 0.5);
        let dims = GridDimensions::dimension(&extent, &res, &unit_bounds()).unwrap();
        assert_eq!(dims.nz, 101);
    }

    #[test]
    fn test_temporal_count_has_no_plus_one() {
        let t0 = Utc.with_ymd_and_hms(2020, 6, 11, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2020, 6, 23, 0, 0, 0).unwrap();
        let extent = Extent::with_time(160.0, 210.0, t0, t1);
        let res = Resolution::with_time(1.0, 1.0, 0.5, 1.0);
        let dims = GridDimensions::dimension(&extent, &res, &unit_bounds()).unwrap();
        assert_eq!(dims.nt, Some(12));
    }

    #[test]
    fn test_temporal_extent_without_t_resolution_fails() {
        let t0 = Utc.with_ymd_and_hms(2020, 6, 11, 0, 0, 0).unwrap();
        let t1 = Utc.with_ymd_and_hms(2020, 6, 23, 0, 0, 0).unwrap();
        let extent = Extent::with_time(160.0, 210.0, t0, t1);
        let res = Resolution::new(1.0, 1.0, 0.5);
        assert!(GridDimensions::dimension(&extent, &res, &unit_bounds()).is_err());
    }

    #[test]
    fn test_zero_resolution_fails() {
        let extent = Extent::new(0.0, 10.0);
        let res = Resolution::new(1.0, 0.0, 1.0);
        assert!(GridDimensions::dimension(&extent, &res, &unit_bounds()).is_err());
    }

    #[test]
    fn test_inverted_extent_fails() {
        let extent = Extent::new(10.0, 0.0);
        let res = Resolution::new(1.0, 1.0, 1.0);
        assert!(GridDimensions::dimension(&extent, &res, &unit_bounds()).is_err());
    }

    #[test]
    fn test_value_shape_order() {
        let dims = GridDimensions {
            nx: 4,
            ny: 3,
            nz: 2,
            nt: Some(5),
        };
        assert_eq!(dims.value_shape(), vec![5, 2, 3, 4]);
        assert_eq!(dims.len(), 120);

        let dims = GridDimensions {
            nx: 4,
            ny: 3,
            nz: 2,
            nt: None,
        };
        assert_eq!(dims.value_shape(), vec![2, 3, 4]);
    }
}
