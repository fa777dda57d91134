//! Library surface of the voxel cube exporter, exposed for integration
//! tests and embedding.

pub mod config;
pub mod pipeline;
pub mod points;

pub use config::ExportConfig;
