//! Per-voxel classification of DEM change.
//!
//! This crate turns an ordered, attribute-carrying point grid into voxel
//! classification codes: the pure classifier policies, the streaming scan
//! driver that reconstructs grid indices from the scan order, the surface
//! schemas binding timesteps to height attributes, and the collaborator
//! trait seams for grid generation and height sampling.

pub mod classify;
pub mod provider;
pub mod scan;
pub mod testdata;
pub mod types;

pub use classify::{classify_change, classify_stack, ChangeClass, SurfaceHeights};
pub use provider::{GridProvider, HeightSampler};
pub use scan::{run_change_scan, run_stack_scan, VoxelIndex, VoxelSink};
pub use types::{GridPoint, StackSchema, TimestepSchema};
