//! Point and surface-schema types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use voxel_common::{round4, VoxelError, VoxelResult};

/// One horizontal grid cell with its sampled surface heights.
///
/// Coordinates are rounded to 4 decimals on construction so equality
/// checks during the scan are exact. The height map holds one entry per
/// sampled surface; `None` means the surface does not cover this point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: f64,
    pub y: f64,
    /// Whether the point falls within the analysis polygon.
    pub in_area: bool,
    heights: HashMap<String, Option<f64>>,
}

impl GridPoint {
    /// Create a point with no sampled heights yet.
    pub fn new(x: f64, y: f64, in_area: bool) -> Self {
        Self {
            x: round4(x),
            y: round4(y),
            in_area,
            heights: HashMap::new(),
        }
    }

    /// Attach (or replace) the height sampled from a surface.
    pub fn set_height(&mut self, surface: impl Into<String>, value: Option<f64>) {
        self.heights.insert(surface.into(), value);
    }

    /// Look up a sampled height by surface name.
    ///
    /// A missing *entry* means the sampler never ran for that surface and
    /// is a schema error; a present entry with `None` means no data at
    /// this location.
    pub fn height(&self, surface: &str) -> VoxelResult<Option<f64>> {
        self.heights
            .get(surface)
            .copied()
            .ok_or_else(|| VoxelError::Schema {
                surface: surface.to_string(),
                x: self.x,
                y: self.y,
            })
    }

    /// Whether the sampler attached an entry for this surface.
    pub fn has_surface(&self, surface: &str) -> bool {
        self.heights.contains_key(surface)
    }

    /// Names of all sampled surfaces, in no particular order.
    pub fn surfaces(&self) -> impl Iterator<Item = &str> {
        self.heights.keys().map(String::as_str)
    }
}

/// Explicit binding from timestep index to surface attribute name for
/// the change-detection scan.
///
/// Timestep 0 always reads the baseline surface (no change observed
/// yet); timestep `i >= 1` reads `steps[i - 1]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimestepSchema {
    baseline: String,
    planned: Option<String>,
    steps: Vec<String>,
}

impl TimestepSchema {
    pub fn new(
        baseline: impl Into<String>,
        planned: Option<String>,
        steps: Vec<String>,
    ) -> Self {
        Self {
            baseline: baseline.into(),
            planned,
            steps,
        }
    }

    /// Surface holding the original (pre-change) ground height.
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Surface holding the planned/design height, if any.
    pub fn planned(&self) -> Option<&str> {
        self.planned.as_deref()
    }

    /// Surface representing the current ground at timestep `it`.
    pub fn current_surface(&self, it: usize) -> &str {
        if it == 0 {
            &self.baseline
        } else {
            &self.steps[it - 1]
        }
    }

    /// Validate the schema against the point collection and the timestep
    /// count before any output is created.
    ///
    /// Every named surface must be present on every point, and the schema
    /// must name a surface for every timestep past the first.
    pub fn validate(&self, points: &[GridPoint], nt: usize) -> VoxelResult<()> {
        if nt > self.steps.len() + 1 {
            return Err(VoxelError::config(format!(
                "{nt} timesteps requested but only {} timestep surfaces named (plus baseline)",
                self.steps.len()
            )));
        }
        let mut named: Vec<&str> = vec![self.baseline.as_str()];
        named.extend(self.planned.as_deref());
        named.extend(self.steps.iter().map(String::as_str));
        check_surfaces(points, &named)
    }
}

/// Ordered surface stack for the stratigraphy-style scan, shallowest
/// authority first. Sea level is prepended by the scan driver, not named
/// here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackSchema {
    surfaces: Vec<String>,
}

impl StackSchema {
    pub fn new(surfaces: Vec<String>) -> Self {
        Self { surfaces }
    }

    /// Surface names in stack order.
    pub fn surfaces(&self) -> &[String] {
        &self.surfaces
    }

    /// Validate that every named surface is present on every point.
    pub fn validate(&self, points: &[GridPoint]) -> VoxelResult<()> {
        if self.surfaces.is_empty() {
            return Err(VoxelError::config("surface stack is empty"));
        }
        let named: Vec<&str> = self.surfaces.iter().map(String::as_str).collect();
        check_surfaces(points, &named)
    }
}

fn check_surfaces(points: &[GridPoint], named: &[&str]) -> VoxelResult<()> {
    for point in points {
        for surface in named {
            if !point.has_surface(surface) {
                return Err(VoxelError::Schema {
                    surface: surface.to_string(),
                    x: point.x,
                    y: point.y,
                });
            }
        }
    }
    Ok(())
}
