//! NDJSON point loading.
//!
//! The fishnet generation and DEM sampling happen in the GIS toolchain;
//! its export is one JSON record per line with the point coordinates,
//! the area-of-interest flag, and one height entry per sampled surface
//! (`null` where a surface does not cover the point).

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::info;

use voxel_grid::GridPoint;

/// One exported fishnet point.
#[derive(Debug, Deserialize)]
struct PointRecord {
    x: f64,
    y: f64,
    /// Area-of-interest flag, 0 or 1.
    #[serde(default)]
    aoi: i32,
    #[serde(default)]
    heights: HashMap<String, Option<f64>>,
}

/// Load and sort the point collection into scan order (ascending x,
/// then ascending y).
pub fn load_points(path: impl AsRef<Path>) -> Result<Vec<GridPoint>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("opening points {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut points = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record: PointRecord = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", path.display(), lineno + 1))?;
        let mut point = GridPoint::new(record.x, record.y, record.aoi != 0);
        for (surface, height) in record.heights {
            point.set_height(surface, height);
        }
        points.push(point);
    }

    points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    info!(count = points.len(), path = %path.display(), "loaded fishnet points");
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_and_sort() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"x": 1.0, "y": 0.0, "aoi": 1, "heights": {{"Height": 10.0}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"x": 0.0, "y": 1.0, "aoi": 0, "heights": {{"Height": null}}}}"#
        )
        .unwrap();
        writeln!(
            file,
            r#"{{"x": 0.0, "y": 0.0, "aoi": 1, "heights": {{"Height": 9.5}}}}"#
        )
        .unwrap();

        let points = load_points(file.path()).unwrap();
        assert_eq!(points.len(), 3);
        assert_eq!((points[0].x, points[0].y), (0.0, 0.0));
        assert_eq!((points[1].x, points[1].y), (0.0, 1.0));
        assert_eq!((points[2].x, points[2].y), (1.0, 0.0));
        assert!(!points[1].in_area);
        assert_eq!(points[1].height("Height").unwrap(), None);
        assert_eq!(points[2].height("Height").unwrap(), Some(10.0));
    }

    #[test]
    fn test_malformed_line_reports_location() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{"x": 0.0, "y": 0.0}}"#).unwrap();
        writeln!(file, "not json").unwrap();

        let err = load_points(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains(":2"));
    }
}
