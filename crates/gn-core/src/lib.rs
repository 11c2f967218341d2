//! Grid Normals Core
//!
//! Per-vertex surface normals for structured grids of 3D positions.
//!
//! # Module Structure
//!
//! ```text
//! gn-core/
//! ├── constants.rs   # Thresholds and layout constants
//! ├── grid.rs        # GridDims, row-major addressing
//! ├── stencil.rs     # Central / forward / backward differences
//! ├── record.rs      # SurfaceVertex output layout
//! ├── estimator.rs   # GridNormalEstimator (CPU, rayon)
//! ├── mesh.rs        # Grid triangulation
//! ├── surface.rs     # Parametric surface sampling
//! └── config.rs      # EstimatorConfig (RON)
//! ```

pub mod config;
pub mod constants;
pub mod estimator;
pub mod grid;
pub mod mesh;
pub mod record;
pub mod stencil;
pub mod surface;

pub use config::{ConfigError, EstimatorConfig};
pub use estimator::{GridNormalEstimator, estimate_grid_normals, surface_normal};
pub use grid::{GridDims, GridError, index};
pub use mesh::{Triangulation, generate_grid_indices};
pub use record::{SurfaceVertex, as_vec4_slice};
pub use stencil::Stencil;
pub use surface::{Interval, sample_heightfield, sample_surface};
