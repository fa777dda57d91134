//! Voxel classifier policies.
//!
//! Both policies are pure functions of their inputs: an elevation, the
//! in-area flag, and a handful of surface heights. The change-detection
//! policy compares against baseline/current/planned surfaces; the stack
//! policy locates the elevation in an ordered list of horizon heights.

/// Classification codes for the change-detection policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum ChangeClass {
    /// Outside the area of interest, or no elevation datum here.
    Outside = -1,
    /// Above all relevant surfaces.
    Air = 0,
    /// Below the baseline surface, unclassified.
    Substrate = 1,
    /// Between current and baseline surface, current lower.
    Excavation = 2,
    /// Between baseline and current surface, current higher.
    Deposit = 3,
    /// Between planned and baseline surface, planned lower.
    PlannedExcavation = 4,
    /// Between baseline and planned surface, planned higher.
    PlannedDeposit = 5,
}

impl ChangeClass {
    /// The code written to the output array.
    pub fn code(self) -> i8 {
        self as i8
    }
}

impl From<ChangeClass> for i8 {
    fn from(class: ChangeClass) -> i8 {
        class.code()
    }
}

/// Surface heights at one horizontal location for the change policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceHeights {
    /// Original (pre-change) ground height.
    pub baseline: f64,
    /// Ground height at the active timestep; `None` falls back to the
    /// baseline (no change observed).
    pub current: Option<f64>,
    /// Planned/design height; `None` falls back to the baseline.
    pub planned: Option<f64>,
}

/// Classify one voxel against baseline, current, and planned surfaces.
///
/// The planned-zone codes are assigned first and then overridden where a
/// deposit or excavation against the current surface covers the same
/// elevation; that precedence is deliberate.
pub fn classify_change(z: f64, in_area: bool, heights: &SurfaceHeights) -> ChangeClass {
    if !in_area {
        return ChangeClass::Outside;
    }

    let baseline = heights.baseline;
    let current = heights.current.unwrap_or(baseline);
    let planned = heights.planned.unwrap_or(baseline);

    let mut class = ChangeClass::Substrate;

    // Zone between planned and original heights.
    if z > baseline && z < planned {
        class = ChangeClass::PlannedDeposit;
    } else if z > planned && z <= baseline {
        class = ChangeClass::PlannedExcavation;
    }

    // Zone between original and current heights takes precedence.
    if z > baseline && z <= current {
        class = ChangeClass::Deposit;
    } else if z < baseline && z >= current {
        class = ChangeClass::Excavation;
    } else if z > current {
        class = ChangeClass::Air;
    }

    class
}

/// Classify one voxel against an ordered surface stack.
///
/// `surfaces` runs shallowest first and already includes the synthetic
/// sea level; `None` entries (no data) are skipped as non-matching. The
/// result is the index of the first consecutive pair bracketing `z`, or
/// the index of the deepest band when `z` lies below the last defined
/// surface, or `-1`.
pub fn classify_stack(z: f64, in_area: bool, surfaces: &[Option<f64>]) -> i8 {
    if !in_area {
        return -1;
    }

    for i in 0..surfaces.len().saturating_sub(1) {
        if let (Some(upper), Some(lower)) = (surfaces[i], surfaces[i + 1]) {
            if z <= upper && z > lower {
                return i as i8;
            }
        }
    }

    // Below every bracketing pair: compare against the deepest defined
    // surface alone.
    if let Some(last) = surfaces.iter().rposition(|v| v.is_some()) {
        if last > 0 {
            if let Some(v) = surfaces[last] {
                if z <= v {
                    return (last - 1) as i8;
                }
            }
        }
    }

    -1
}
