//! Parametric surface sampling
//!
//! Builds row-major position grids from a function `f(u, v)`, the usual
//! way hosts feed heightfields and parametric patches to the estimator.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::grid::GridDims;

/// Closed parameter interval sampled with evenly spaced points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub begin: f32,
    pub end: f32,
}

impl Interval {
    pub fn new(begin: f32, end: f32) -> Self {
        Self { begin, end }
    }

    /// Unit interval `[0, 1]`
    pub fn unit() -> Self {
        Self::new(0.0, 1.0)
    }

    /// Value of sample `k` out of `count` (`count >= 2`); the first and
    /// last samples land exactly on `begin` and `end`.
    pub fn sample(&self, k: u32, count: u32) -> f32 {
        if k + 1 == count {
            return self.end;
        }
        let delta = (self.end - self.begin) / (count - 1) as f32;
        self.begin + delta * k as f32
    }
}

/// Evaluate `f` over the grid, `u` along columns and `v` along rows.
///
/// Positions are returned with `w = 1`.
pub fn sample_surface(
    dims: GridDims,
    u: Interval,
    v: Interval,
    f: impl Fn(f32, f32) -> Vec3,
) -> Vec<[f32; 4]> {
    let mut positions = Vec::with_capacity(dims.vertex_count());
    for j in 0..dims.height() {
        let v_value = v.sample(j, dims.height());
        for i in 0..dims.width() {
            let u_value = u.sample(i, dims.width());
            positions.push(f(u_value, v_value).extend(1.0).to_array());
        }
    }
    positions
}

/// Sample a heightfield `z = h(x, y)` over the given extents
pub fn sample_heightfield(
    dims: GridDims,
    x: Interval,
    y: Interval,
    h: impl Fn(f32, f32) -> f32,
) -> Vec<[f32; 4]> {
    sample_surface(dims, x, y, |x, y| Vec3::new(x, y, h(x, y)))
}
