//! DEM voxel cube exporter.
//!
//! Converts a DEM-sampled point fishnet into a time- and depth-resolved
//! NetCDF voxel classification cube for volumetric viewing.

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use voxel_export::{pipeline, ExportConfig};

#[derive(Parser, Debug)]
#[command(name = "voxel-export")]
#[command(about = "DEM change-detection voxel cube exporter")]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config/export.yaml")]
    config: String,

    /// Override the configured output path
    #[arg(short, long)]
    output: Option<String>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting voxel cube export");

    let mut config = ExportConfig::load(&args.config)?;
    if let Some(output) = args.output {
        config.output = output.into();
    }

    pipeline::run(&config)?;

    info!("Export finished");
    Ok(())
}
