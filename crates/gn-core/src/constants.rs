//! Global constants for gn-core

/// Cross product magnitude at or below which a vertex normal is reported as zero
pub const DEGENERATE_NORMAL_EPSILON: f32 = 1e-4;

/// Number of `[f32; 4]` records written per grid vertex (position, normal, param)
pub const RECORDS_PER_VERTEX: usize = 3;

/// Minimum number of vertices along each grid axis
pub const MIN_GRID_EXTENT: u32 = 2;

/// Default workgroup size used when a grid is sized by its dispatch shape
pub const DEFAULT_WORKGROUP_SIZE: [u32; 2] = [16, 16];

/// Grids with fewer vertices than this run on the calling thread
pub const DEFAULT_MIN_PARALLEL_VERTICES: usize = 4096;
