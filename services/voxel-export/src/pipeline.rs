//! The export pipeline: points -> dimensions -> axes -> scan -> NetCDF.

use anyhow::{bail, Context, Result};
use tracing::info;

use netcdf_store::CubeStore;
use voxel_common::{build_axes, BoundingBox, GridDimensions};
use voxel_grid::{run_change_scan, run_stack_scan};

use crate::config::ExportConfig;
use crate::points::load_points;

/// Run one export job end to end.
///
/// Any failure after the store is created discards the partial output
/// file; only a fully scanned cube is finalized.
pub fn run(config: &ExportConfig) -> Result<()> {
    let points = load_points(&config.points)?;
    let bounds = BoundingBox::from_points(points.iter().map(|p| (p.x, p.y)))
        .context("point collection is empty")?;

    let extent = config.extent()?;
    let resolution = config.resolution();
    let dims = GridDimensions::dimension(&extent, &resolution, &bounds)?;
    info!(?dims, ?bounds, "dimensioned analysis grid");
    let axes = build_axes(&extent, &resolution, &bounds, &dims)?;

    let output = config.output_path();
    let temporal = dims.nt.is_some();
    let mut store = CubeStore::create(&output, &dims, temporal)?;
    store.write_axes(&axes)?;

    if let Some(schema) = config.timestep_schema() {
        run_change_scan(&points, &schema, &dims, &extent, &resolution, &mut store)?;
    } else if let Some(schema) = config.stack_schema() {
        run_stack_scan(&points, &schema, &dims, &extent, &resolution, &mut store)?;
    } else {
        bail!("no surface schema configured");
    }

    store.close()?;
    info!(path = %output.display(), "finished writing voxel cube");
    Ok(())
}
