//! Grid Normals Renderer
//!
//! WGPU compute dispatch for per-vertex grid normals.
//!
//! # Module Structure
//!
//! ```text
//! gn-renderer/
//! ├── shaders/          # WGSL kernel
//! ├── config.rs         # GpuConfig (RON)
//! ├── context.rs        # Headless device/queue
//! ├── normals_pass.rs   # Compute pipeline and dispatch
//! ├── readback.rs       # Buffer readback
//! ├── surface_mesh.rs   # Grid index buffer
//! ├── vertex.rs         # Output vertex layout
//! └── error.rs          # GpuError
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod normals_pass;
pub mod readback;
pub mod surface_mesh;
pub mod vertex;

pub use config::{GpuConfig, PowerPreference};
pub use context::ComputeContext;
pub use error::GpuError;
pub use normals_pass::{SurfaceNormalsPass, create_position_buffer, create_vertex_buffer};
pub use readback::read_vertices;
pub use surface_mesh::SurfaceMesh;
pub use vertex::{SURFACE_VERTEX_ATTRIBUTES, surface_vertex_layout};

use gn_core::{GridDims, SurfaceVertex};

/// Create a context and pipeline, then run the normals pass once.
///
/// Convenience for one-shot use; hosts that recompute every frame keep a
/// [`ComputeContext`] and [`SurfaceNormalsPass`] around instead.
pub fn compute_surface_normals(
    config: &GpuConfig,
    dims: GridDims,
    positions: &[[f32; 4]],
) -> Result<Vec<SurfaceVertex>, GpuError> {
    let ctx = ComputeContext::new(config)?;
    let pass = SurfaceNormalsPass::new(&ctx.device, config)?;
    pass.compute(&ctx, dims, positions)
}
