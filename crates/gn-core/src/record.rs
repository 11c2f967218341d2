//! Interleaved per-vertex output records

use glam::Vec3;

/// Output for one grid vertex: three consecutive `[f32; 4]` records.
///
/// A slice of `SurfaceVertex` is bit-identical to the flat
/// `3 * width * height` vec4 layout consumed by shading pipelines.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    /// Input position, copied through unchanged (w included)
    pub position: [f32; 4],
    /// Unit normal with `w = 0`, or all zeros when degenerate
    pub normal: [f32; 4],
    /// Parametric coordinate `(u, v, 0, 0)` in `[0, 1]^2`
    pub param: [f32; 4],
}

impl SurfaceVertex {
    /// Pack a record from its parts
    pub fn new(position: [f32; 4], normal: Vec3, param: [f32; 4]) -> Self {
        Self {
            position,
            normal: normal.extend(0.0).to_array(),
            param,
        }
    }

    /// Normal as a `Vec3`
    pub fn normal(&self) -> Vec3 {
        Vec3::from_slice(&self.normal[..3])
    }

    /// True when the tangent pair was degenerate and no normal was produced
    pub fn is_degenerate(&self) -> bool {
        self.normal == [0.0; 4]
    }
}

/// View records as the flat vec4 sequence (`3` entries per vertex)
pub fn as_vec4_slice(vertices: &[SurfaceVertex]) -> &[[f32; 4]] {
    bytemuck::cast_slice(vertices)
}
