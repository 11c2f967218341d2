//! Grid normal estimator
//!
//! Computes a unit normal for every vertex of a structured grid from
//! finite-difference tangents along both axes, and packs position,
//! normal and parametric coordinate into one [`SurfaceVertex`] each.
//!
//! Every vertex reads only the immutable input and writes only its own
//! record, so the grid is processed as a data-parallel map.

use glam::Vec3;
use rayon::prelude::*;

use crate::config::{ConfigError, EstimatorConfig};
use crate::grid::{GridDims, GridError};
use crate::record::SurfaceVertex;
use crate::stencil::Stencil;

/// Per-vertex normal estimator for a fixed grid shape
#[derive(Debug, Clone)]
pub struct GridNormalEstimator {
    dims: GridDims,
    config: EstimatorConfig,
}

impl GridNormalEstimator {
    /// Create an estimator with the default configuration
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            config: EstimatorConfig::default(),
        }
    }

    /// Create an estimator with an explicit configuration
    pub fn with_config(dims: GridDims, config: EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { dims, config })
    }

    /// Grid shape this estimator was built for
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Active configuration
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }

    /// Estimate every vertex, allocating the output.
    pub fn estimate(&self, positions: &[[f32; 4]]) -> Result<Vec<SurfaceVertex>, GridError> {
        let mut out = vec![SurfaceVertex::default(); self.dims.vertex_count()];
        self.estimate_into(positions, &mut out)?;
        Ok(out)
    }

    /// Estimate every vertex into a caller-provided buffer.
    ///
    /// `positions` must hold `width * height` entries in row-major order
    /// and `out` one record per vertex; both are checked before any
    /// vertex is touched.
    pub fn estimate_into(
        &self,
        positions: &[[f32; 4]],
        out: &mut [SurfaceVertex],
    ) -> Result<(), GridError> {
        self.dims.check_input_len(positions.len())?;
        self.dims.check_output_len(out.len())?;

        let parallel =
            self.config.parallel && self.dims.vertex_count() >= self.config.min_parallel_vertices;
        tracing::debug!(
            width = self.dims.width(),
            height = self.dims.height(),
            parallel,
            "estimating grid normals"
        );

        if parallel {
            out.par_iter_mut()
                .enumerate()
                .for_each(|(idx, record)| *record = self.vertex_record(positions, idx));
        } else {
            for (idx, record) in out.iter_mut().enumerate() {
                *record = self.vertex_record(positions, idx);
            }
        }

        if tracing::enabled!(tracing::Level::DEBUG) {
            let degenerate = out.iter().filter(|v| v.is_degenerate()).count();
            if degenerate > 0 {
                tracing::debug!(degenerate, "vertices with degenerate tangent pairs");
            }
        }
        Ok(())
    }

    /// Kernel for a single vertex at linear index `idx`.
    pub fn estimate_vertex(
        &self,
        positions: &[[f32; 4]],
        idx: usize,
    ) -> Result<SurfaceVertex, GridError> {
        self.dims.check_input_len(positions.len())?;
        if idx >= self.dims.vertex_count() {
            return Err(GridError::VertexIndex {
                idx,
                count: self.dims.vertex_count(),
            });
        }
        Ok(self.vertex_record(positions, idx))
    }

    /// `positions` must already be validated against the grid shape.
    fn vertex_record(&self, positions: &[[f32; 4]], idx: usize) -> SurfaceVertex {
        let (i, j) = self.dims.coords(idx);
        let width = self.dims.width() as usize;

        let x_tangent = Stencil::select(i, self.dims.width()).tangent(positions, idx, 1);
        let y_tangent = Stencil::select(j, self.dims.height()).tangent(positions, idx, width);
        let normal = surface_normal(y_tangent, x_tangent, self.config.degenerate_epsilon);

        SurfaceVertex::new(positions[idx], normal, self.dims.param_coord(i, j))
    }
}

/// Unit normal `cross(y_tangent, x_tangent) / len`, or zero when
/// `len <= epsilon`. Operand order fixes the facing direction.
pub fn surface_normal(y_tangent: Vec3, x_tangent: Vec3, epsilon: f32) -> Vec3 {
    let crossed = y_tangent.cross(x_tangent);
    let len = crossed.length();
    if len > epsilon {
        crossed / len
    } else {
        Vec3::ZERO
    }
}

/// Estimate a whole grid with the default configuration
pub fn estimate_grid_normals(
    positions: &[[f32; 4]],
    dims: GridDims,
) -> Result<Vec<SurfaceVertex>, GridError> {
    GridNormalEstimator::new(dims).estimate(positions)
}
