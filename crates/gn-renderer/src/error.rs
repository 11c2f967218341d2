//! GPU dispatch errors

use gn_core::{ConfigError, GridError};

/// Errors raised while creating GPU resources or running the normals pass
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    /// No adapter matched the requested options
    #[error("no suitable GPU adapter found")]
    NoAdapter,
    /// Device creation failed
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    /// Grid shape or host buffer length mismatch
    #[error(transparent)]
    Grid(#[from] GridError),
    /// Invalid GPU configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// GPU buffer too small for the grid
    #[error("{label} buffer holds {actual} bytes, grid needs {expected}")]
    BufferSize {
        /// Which binding was checked
        label: &'static str,
        /// Required size in bytes
        expected: u64,
        /// Actual buffer size in bytes
        actual: u64,
    },
    /// Mapping a buffer for reading failed
    #[error("readback failed: {0}")]
    Readback(String),
}
