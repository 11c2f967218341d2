//! Finite-difference stencils along one grid axis

use glam::Vec3;

/// Which difference formula applies at a position along one axis.
///
/// Selected once per axis per vertex. The two edge variants use the
/// second-order three-point formulas so boundary tangents carry the same
/// accuracy as the central difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stencil {
    /// `0 < coord < extent - 1`: central difference
    Interior,
    /// `coord == 0`: forward difference
    LowEdge,
    /// `coord == extent - 1`: backward difference
    HighEdge,
    /// Axis with only two vertices: the two-point difference, identical
    /// at both ends
    Pair {
        /// Whether this vertex is the first of the two
        at_low: bool,
    },
}

impl Stencil {
    /// Select the stencil for `coord` on an axis of `extent` vertices.
    ///
    /// `extent` must be at least 2. Three-point edge formulas need three
    /// samples, so a two-vertex axis falls back to [`Stencil::Pair`].
    #[inline]
    pub fn select(coord: u32, extent: u32) -> Self {
        if extent == 2 {
            Stencil::Pair {
                at_low: coord == 0,
            }
        } else if coord == 0 {
            Stencil::LowEdge
        } else if coord + 1 == extent {
            Stencil::HighEdge
        } else {
            Stencil::Interior
        }
    }

    /// Estimate the tangent at linear index `idx` along the axis whose
    /// neighbors sit `stride` entries apart (1 for rows, `width` for columns).
    ///
    /// Only the xyz components of each position participate.
    #[inline]
    pub fn tangent(self, positions: &[[f32; 4]], idx: usize, stride: usize) -> Vec3 {
        let p = |k: usize| Vec3::from_slice(&positions[k][..3]);
        match self {
            Stencil::Interior => 0.5 * (p(idx + stride) - p(idx - stride)),
            Stencil::LowEdge => -1.5 * p(idx) + 2.0 * p(idx + stride) - 0.5 * p(idx + 2 * stride),
            Stencil::HighEdge => 1.5 * p(idx) - 2.0 * p(idx - stride) + 0.5 * p(idx - 2 * stride),
            Stencil::Pair { at_low: true } => p(idx + stride) - p(idx),
            Stencil::Pair { at_low: false } => p(idx) - p(idx - stride),
        }
    }
}
