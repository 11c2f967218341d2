//! Triangle index generation for structured grids
//!
//! Indices follow the same row-major order as the positions, so the
//! output of [`crate::GridNormalEstimator`] can be drawn directly as an
//! indexed triangle list.

use crate::grid::{GridDims, GridError, index};

/// How each grid quad is split into two triangles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Triangulation {
    /// Every quad is cut along the same diagonal
    Standard,
    /// Quads with odd `i + j` use the opposite diagonal, avoiding
    /// directional artifacts on shaded surfaces
    #[default]
    Flag,
}

/// Generate triangle-list indices covering every quad of the grid.
///
/// Produces `6 * (width - 1) * (height - 1)` indices. Grids whose
/// vertices cannot all be addressed by a `u32` index are rejected.
pub fn generate_grid_indices(
    dims: GridDims,
    pattern: Triangulation,
) -> Result<Vec<u32>, GridError> {
    dims.check_u32_indices()?;
    let (width, height) = (dims.width(), dims.height());
    let quads = (width as usize - 1) * (height as usize - 1);
    let mut indices = Vec::with_capacity(quads * 6);

    for j in 0..height - 1 {
        for i in 0..width - 1 {
            let bot_left = index(i, j, width) as u32;
            let bot_right = index(i + 1, j, width) as u32;
            let top_left = index(i, j + 1, width) as u32;
            let top_right = index(i + 1, j + 1, width) as u32;

            if pattern == Triangulation::Flag && (i + j) % 2 == 1 {
                indices.extend_from_slice(&[bot_left, bot_right, top_left]);
                indices.extend_from_slice(&[top_right, top_left, bot_right]);
            } else {
                indices.extend_from_slice(&[bot_left, bot_right, top_right]);
                indices.extend_from_slice(&[top_right, top_left, bot_left]);
            }
        }
    }

    Ok(indices)
}
