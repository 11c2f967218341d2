//! Grid dimensions and row-major addressing

use crate::constants::{MIN_GRID_EXTENT, RECORDS_PER_VERTEX};

/// Row-major linear index of grid cell `(i, j)`.
///
/// All stencil neighbors are addressed through this function so the x and
/// y axes always agree on storage order.
#[inline]
pub const fn index(i: u32, j: u32, width: u32) -> usize {
    i as usize + j as usize * width as usize
}

/// Dimensions of a structured vertex grid (`width` columns by `height` rows).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridDims {
    width: u32,
    height: u32,
}

impl GridDims {
    /// Create grid dimensions, rejecting grids with fewer than two vertices
    /// along either axis.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width < MIN_GRID_EXTENT || height < MIN_GRID_EXTENT {
            return Err(GridError::TooSmall { width, height });
        }
        Ok(Self { width, height })
    }

    /// Derive dimensions from a compute dispatch shape: one vertex per
    /// invocation, `groups[k] * group_size[k]` invocations along axis `k`.
    pub fn from_workgroups(groups: [u32; 2], group_size: [u32; 2]) -> Result<Self, GridError> {
        let width = groups[0]
            .checked_mul(group_size[0])
            .ok_or(GridError::WorkgroupOverflow)?;
        let height = groups[1]
            .checked_mul(group_size[1])
            .ok_or(GridError::WorkgroupOverflow)?;
        Self::new(width, height)
    }

    /// Number of columns
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of vertices (`width * height`)
    pub fn vertex_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Length of the flat output in `[f32; 4]` records (`3 * width * height`)
    pub fn output_len(&self) -> usize {
        RECORDS_PER_VERTEX * self.vertex_count()
    }

    /// Linear index of `(i, j)` in this grid
    #[inline]
    pub fn index(&self, i: u32, j: u32) -> usize {
        index(i, j, self.width)
    }

    /// Recover `(i, j)` from a linear index. Inverse of [`GridDims::index`].
    #[inline]
    pub fn coords(&self, idx: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((idx % width) as u32, (idx / width) as u32)
    }

    /// Normalized parametric coordinate `(i/(width-1), j/(height-1), 0, 0)`
    pub fn param_coord(&self, i: u32, j: u32) -> [f32; 4] {
        [
            i as f32 / (self.width - 1) as f32,
            j as f32 / (self.height - 1) as f32,
            0.0,
            0.0,
        ]
    }

    /// Number of workgroups needed to cover the grid with one invocation
    /// per vertex, rounding up along each axis.
    pub fn workgroup_count(&self, group_size: [u32; 2]) -> [u32; 2] {
        [
            self.width.div_ceil(group_size[0].max(1)),
            self.height.div_ceil(group_size[1].max(1)),
        ]
    }

    /// Check that every vertex can be addressed by a `u32` index buffer
    pub fn check_u32_indices(&self) -> Result<(), GridError> {
        let vertices = self.vertex_count();
        if vertices - 1 > u32::MAX as usize {
            return Err(GridError::IndexOverflow { vertices });
        }
        Ok(())
    }

    /// Check that an input buffer holds exactly one position per vertex
    pub fn check_input_len(&self, actual: usize) -> Result<(), GridError> {
        let expected = self.vertex_count();
        if actual != expected {
            return Err(GridError::InputLength { expected, actual });
        }
        Ok(())
    }

    /// Check that an output buffer holds exactly one record triple per vertex
    pub fn check_output_len(&self, actual: usize) -> Result<(), GridError> {
        let expected = self.vertex_count();
        if actual != expected {
            return Err(GridError::OutputLength { expected, actual });
        }
        Ok(())
    }
}

/// Grid shape and buffer-size errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("grid must be at least 2x2, got {width}x{height}")]
    TooSmall { width: u32, height: u32 },
    #[error("input holds {actual} positions, grid needs {expected}")]
    InputLength { expected: usize, actual: usize },
    #[error("output holds {actual} vertices, grid needs {expected}")]
    OutputLength { expected: usize, actual: usize },
    #[error("workgroup dispatch overflows u32 grid extent")]
    WorkgroupOverflow,
    #[error("vertex index {idx} out of range for {count} vertices")]
    VertexIndex { idx: usize, count: usize },
    #[error("grid has {vertices} vertices, more than u32 indices can address")]
    IndexOverflow { vertices: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_degenerate_extent() {
        assert_eq!(
            GridDims::new(1, 5),
            Err(GridError::TooSmall {
                width: 1,
                height: 5
            })
        );
        assert!(GridDims::new(5, 0).is_err());
        assert!(GridDims::new(2, 2).is_ok());
    }

    #[test]
    fn test_index_coords_bijective() {
        let dims = GridDims::new(7, 4).unwrap();
        for idx in 0..dims.vertex_count() {
            let (i, j) = dims.coords(idx);
            assert!(i < dims.width() && j < dims.height());
            assert_eq!(dims.index(i, j), idx);
        }
    }

    #[test]
    fn test_param_coord() {
        let dims = GridDims::new(4, 3).unwrap();
        assert_eq!(dims.param_coord(2, 1), [2.0 / 3.0, 0.5, 0.0, 0.0]);
        assert_eq!(dims.param_coord(0, 0), [0.0, 0.0, 0.0, 0.0]);
        assert_eq!(dims.param_coord(3, 2), [1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_from_workgroups() {
        let dims = GridDims::from_workgroups([2, 3], [16, 16]).unwrap();
        assert_eq!((dims.width(), dims.height()), (32, 48));
        assert_eq!(
            GridDims::from_workgroups([u32::MAX, 1], [16, 16]),
            Err(GridError::WorkgroupOverflow)
        );
    }

    #[test]
    fn test_workgroup_count_rounds_up() {
        let dims = GridDims::new(17, 16).unwrap();
        assert_eq!(dims.workgroup_count([16, 16]), [2, 1]);
    }

    #[test]
    fn test_lengths() {
        let dims = GridDims::new(5, 3).unwrap();
        assert_eq!(dims.vertex_count(), 15);
        assert_eq!(dims.output_len(), 45);
        assert!(dims.check_input_len(15).is_ok());
        assert_eq!(
            dims.check_input_len(14),
            Err(GridError::InputLength {
                expected: 15,
                actual: 14
            })
        );
        assert!(dims.check_output_len(16).is_err());
    }

    #[test]
    fn test_u32_index_limit() {
        assert!(GridDims::new(65536, 65536).unwrap().check_u32_indices().is_ok());
        assert_eq!(
            GridDims::new(u32::MAX, 2).unwrap().check_u32_indices(),
            Err(GridError::IndexOverflow {
                vertices: u32::MAX as usize * 2
            })
        );
    }
}
