//! Error types for the voxel cube workspace.

use thiserror::Error;

/// Result type alias using VoxelError.
pub type VoxelResult<T> = Result<T, VoxelError>;

/// Primary error type for voxel cube operations.
#[derive(Debug, Error)]
pub enum VoxelError {
    /// Invalid or inconsistent extent/resolution. Fatal before any file is created.
    #[error("invalid dimensions: {0}")]
    Dimension(String),

    /// A required surface-height attribute is missing from a point.
    /// Aborts the run rather than silently defaulting.
    #[error("missing surface attribute '{surface}' at point ({x}, {y})")]
    Schema { surface: String, x: f64, y: f64 },

    /// A computed grid index fell outside the declared axis length.
    /// Always a defect, never recovered.
    #[error("index {index} out of range for {axis} axis (length {len})")]
    Index {
        axis: &'static str,
        index: usize,
        len: usize,
    },

    /// An axis sequence does not match the computed dimension count.
    #[error("{axis} axis has {actual} values but dimensions require {expected}")]
    AxisLength {
        axis: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Write attempted after the store was finalized.
    #[error("store is closed")]
    ClosedStore,

    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// Underlying storage/format error.
    #[error("storage error: {0}")]
    Storage(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl VoxelError {
    /// Create a Dimension error.
    pub fn dimension(msg: impl Into<String>) -> Self {
        Self::Dimension(msg.into())
    }

    /// Create a Config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a Storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}
