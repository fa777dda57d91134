//! In-memory collaborator implementations for tests and demos.
//!
//! [`FishnetProvider`] builds a fully ordered synthetic point grid and
//! [`FnSampler`] assigns surface heights from closures, so integration
//! tests can run the whole pipeline without a GIS engine.

use voxel_common::{BoundingBox, Resolution, VoxelResult};

use crate::provider::{GridProvider, HeightSampler};
use crate::types::GridPoint;

/// Predicate deciding whether a point falls inside the analysis polygon.
pub type AreaPredicate = Box<dyn Fn(f64, f64) -> bool + Send + Sync>;

/// Synthetic fishnet generator producing points in scan order
/// (x-major, ascending y within each column).
pub struct FishnetProvider {
    in_area: Option<AreaPredicate>,
}

impl FishnetProvider {
    /// Every generated point is inside the area of interest.
    pub fn new() -> Self {
        Self { in_area: None }
    }

    /// Tag points with the given area predicate instead.
    pub fn with_area(predicate: impl Fn(f64, f64) -> bool + Send + Sync + 'static) -> Self {
        Self {
            in_area: Some(Box::new(predicate)),
        }
    }
}

impl Default for FishnetProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl GridProvider for FishnetProvider {
    fn generate(&self, bounds: &BoundingBox, resolution: &Resolution) -> VoxelResult<Vec<GridPoint>> {
        let nx = (bounds.width() / resolution.x).floor() as usize + 1;
        let ny = (bounds.height() / resolution.y).floor() as usize + 1;
        let mut points = Vec::with_capacity(nx * ny);
        for ix in 0..nx {
            for iy in 0..ny {
                let x = bounds.min_x + ix as f64 * resolution.x;
                let y = bounds.min_y + iy as f64 * resolution.y;
                let in_area = self.in_area.as_ref().map_or(true, |p| p(x, y));
                points.push(GridPoint::new(x, y, in_area));
            }
        }
        Ok(points)
    }
}

/// Height field for one named surface.
pub type HeightFn = Box<dyn Fn(f64, f64) -> Option<f64> + Send + Sync>;

/// Height sampler whose catalog maps surface names to closures over
/// (x, y).
pub struct FnSampler {
    surfaces: Vec<(String, HeightFn)>,
}

impl FnSampler {
    pub fn new() -> Self {
        Self {
            surfaces: Vec::new(),
        }
    }

    /// Add a surface whose height varies with position.
    pub fn surface(
        mut self,
        name: impl Into<String>,
        height: impl Fn(f64, f64) -> Option<f64> + Send + Sync + 'static,
    ) -> Self {
        self.surfaces.push((name.into(), Box::new(height)));
        self
    }

    /// Add a surface with one height everywhere.
    pub fn flat_surface(self, name: impl Into<String>, height: f64) -> Self {
        self.surface(name, move |_, _| Some(height))
    }
}

impl Default for FnSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl HeightSampler for FnSampler {
    fn sample(&self, points: &mut [GridPoint]) -> VoxelResult<()> {
        for point in points.iter_mut() {
            for (name, height) in &self.surfaces {
                point.set_height(name.clone(), height(point.x, point.y));
            }
        }
        Ok(())
    }
}
