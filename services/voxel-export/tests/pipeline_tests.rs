//! End-to-end pipeline tests against NDJSON fixtures.

use std::io::Write;
use std::path::Path;

use netcdf_store::read_cube;
use voxel_export::{pipeline, ExportConfig};

fn write_points(path: &Path, lines: &[&str]) {
    let mut file = std::fs::File::create(path).unwrap();
    for line in lines {
        writeln!(file, "{line}").unwrap();
    }
}

fn change_config(dir: &Path) -> ExportConfig {
    let yaml = format!(
        r#"
points: {points}
output: {output}
extent:
  min_z: 0
  max_z: 4
  min_t: 2020-06-11T00:00:00Z
  max_t: 2020-06-13T00:00:00Z
resolution:
  x: 1
  y: 1
  z: 1
  t: 1
surfaces:
  mode: change
  baseline: Height
  planned: null
  timesteps: [Height_12_06_2020]
"#,
        points = dir.join("points.ndjson").display(),
        output = dir.join("cube.nc").display(),
    );
    serde_yaml::from_str(&yaml).unwrap()
}

#[test]
fn test_change_export_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_points(
        &dir.path().join("points.ndjson"),
        &[
            r#"{"x": 0.0, "y": 0.0, "aoi": 1, "heights": {"Height": 2.0, "Height_12_06_2020": 3.0}}"#,
            r#"{"x": 0.0, "y": 1.0, "aoi": 1, "heights": {"Height": 2.0, "Height_12_06_2020": 1.0}}"#,
            r#"{"x": 1.0, "y": 0.0, "aoi": 1, "heights": {"Height": 2.0, "Height_12_06_2020": 2.0}}"#,
            r#"{"x": 1.0, "y": 1.0, "aoi": 0, "heights": {"Height": 2.0, "Height_12_06_2020": 2.0}}"#,
        ],
    );
    let config = change_config(dir.path());

    pipeline::run(&config).unwrap();

    let cube = read_cube(dir.path().join("cube.nc")).unwrap();
    assert_eq!(cube.shape, vec![2, 5, 2, 2]);
    assert_eq!(cube.time_units.as_deref(), Some("days since 1990-01-01 00:00"));

    // Deposited cell at (y=0, x=0): one meter above the baseline.
    assert_eq!(cube.code_at(1, 3, 0, 0), 3);
    // Excavated cell at (y=1, x=0): band between current 1 and baseline 2.
    assert_eq!(cube.code_at(1, 1, 1, 0), 2);
    // Unchanged cell: substrate below, air above.
    assert_eq!(cube.code_at(1, 2, 0, 1), 1);
    assert_eq!(cube.code_at(1, 3, 0, 1), 0);
    // Outside the area of interest.
    assert_eq!(cube.code_at(1, 0, 1, 1), -1);
}

#[test]
fn test_schema_failure_leaves_no_output() {
    let dir = tempfile::tempdir().unwrap();
    // Second point is missing the timestep surface entirely.
    write_points(
        &dir.path().join("points.ndjson"),
        &[
            r#"{"x": 0.0, "y": 0.0, "aoi": 1, "heights": {"Height": 2.0, "Height_12_06_2020": 3.0}}"#,
            r#"{"x": 0.0, "y": 1.0, "aoi": 1, "heights": {"Height": 2.0}}"#,
        ],
    );
    let config = change_config(dir.path());

    assert!(pipeline::run(&config).is_err());
    assert!(!dir.path().join("cube.nc").exists());
}

#[test]
fn test_stack_export_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    write_points(
        &dir.path().join("points.ndjson"),
        &[
            r#"{"x": 0.0, "y": 0.0, "aoi": 1, "heights": {"Seabed": -2.0, "H01": -4.0}}"#,
            r#"{"x": 25.0, "y": 0.0, "aoi": 1, "heights": {"Seabed": -3.0, "H01": null}}"#,
        ],
    );
    let yaml = format!(
        r#"
points: {points}
output: "{output}/voxel{{res}}.nc"
extent:
  min_z: -5
  max_z: 0
resolution:
  x: 25
  y: 25
  z: -1
surfaces:
  mode: stack
  order: [Seabed, H01]
"#,
        points = dir.path().join("points.ndjson").display(),
        output = dir.path().display(),
    );
    let config: ExportConfig = serde_yaml::from_str(&yaml).unwrap();

    pipeline::run(&config).unwrap();

    let output = dir.path().join("voxel_25x25x1.nc");
    assert!(output.exists());
    let cube = read_cube(output).unwrap();
    assert_eq!(cube.shape, vec![6, 1, 2]);

    // Column 0: water above the seabed, sediment band between the horizons.
    assert_eq!(cube.code(5, 0, 0), 0); // z = 0
    assert_eq!(cube.code(2, 0, 0), 1); // z = -3
    // Column 1: undefined lower horizon falls back to the seabed band.
    assert_eq!(cube.code(4, 0, 1), 0); // z = -1
    assert_eq!(cube.code(1, 0, 1), 0); // z = -4, below seabed with no H01
}
