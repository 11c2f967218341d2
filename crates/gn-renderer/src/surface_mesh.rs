//! Index buffer for drawing a grid surface

use wgpu::util::DeviceExt;

use gn_core::{GridDims, Triangulation, generate_grid_indices};

use crate::error::GpuError;

/// Triangle index buffer for a grid shape.
///
/// Depends only on the grid dimensions, so it is built once and reused
/// every time the normals pass recomputes the vertices.
pub struct SurfaceMesh {
    /// `u32` triangle-list indices
    pub index_buffer: wgpu::Buffer,
    /// Number of indices in the buffer
    pub num_elements: u32,
    dims: GridDims,
}

impl SurfaceMesh {
    /// Upload the triangulation of `dims`.
    pub fn new(
        device: &wgpu::Device,
        dims: GridDims,
        pattern: Triangulation,
    ) -> Result<Self, GpuError> {
        let indices = generate_grid_indices(dims, pattern)?;
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Index Buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Ok(Self {
            index_buffer,
            num_elements: indices.len() as u32,
            dims,
        })
    }

    /// Grid shape the indices cover
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Bind the index buffer and draw `vertex_buffer` as triangles.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>, vertex_buffer: &'a wgpu::Buffer) {
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..self.num_elements, 0, 0..1);
    }
}
