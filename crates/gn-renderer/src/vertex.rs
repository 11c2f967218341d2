//! Vertex layout of the normals pass output
//!
//! The records written by the compute pass are drawn directly as a
//! vertex buffer, so the attribute offsets follow [`SurfaceVertex`].

use gn_core::SurfaceVertex;

/// Creates a vertex attribute with the offset calculated from the struct field.
///
/// # Example
///
/// ```ignore
/// const ATTRIBUTES: &[wgpu::VertexAttribute] = &[
///     vertex_attr!(SurfaceVertex, position, 0, Float32x4),
///     vertex_attr!(SurfaceVertex, normal, 1, Float32x4),
/// ];
/// ```
#[macro_export]
macro_rules! vertex_attr {
    ($struct:ty, $field:ident, $location:expr, $format:ident) => {
        wgpu::VertexAttribute {
            offset: std::mem::offset_of!($struct, $field) as u64,
            shader_location: $location,
            format: wgpu::VertexFormat::$format,
        }
    };
}

/// Shader locations: 0 = position, 1 = normal, 2 = parametric coordinate.
pub const SURFACE_VERTEX_ATTRIBUTES: &[wgpu::VertexAttribute] = &[
    vertex_attr!(SurfaceVertex, position, 0, Float32x4),
    vertex_attr!(SurfaceVertex, normal, 1, Float32x4),
    vertex_attr!(SurfaceVertex, param, 2, Float32x4),
];

/// Vertex buffer layout for the normals pass output.
pub fn surface_vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<SurfaceVertex>() as u64,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: SURFACE_VERTEX_ATTRIBUTES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_offsets() {
        let offsets: Vec<u64> = SURFACE_VERTEX_ATTRIBUTES.iter().map(|a| a.offset).collect();
        assert_eq!(offsets, vec![0, 16, 32]);
        assert_eq!(surface_vertex_layout().array_stride, 48);
    }
}
