//! GPU to host buffer readback

use futures::channel::oneshot;
use gn_core::SurfaceVertex;

use crate::error::GpuError;

/// Copy `count` records out of `source` and wait for the result.
///
/// `source` needs `COPY_SRC` usage.
pub fn read_vertices(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    source: &wgpu::Buffer,
    count: usize,
) -> Result<Vec<SurfaceVertex>, GpuError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let size = (count * std::mem::size_of::<SurfaceVertex>()) as wgpu::BufferAddress;
    if source.size() < size {
        return Err(GpuError::BufferSize {
            label: "readback source",
            expected: size,
            actual: source.size(),
        });
    }

    let staging = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Surface Normals Readback Buffer"),
        size,
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("Surface Normals Readback Encoder"),
    });
    encoder.copy_buffer_to_buffer(source, 0, &staging, 0, size);
    queue.submit(Some(encoder.finish()));

    let slice = staging.slice(..);
    let (tx, rx) = oneshot::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device.poll(wgpu::Maintain::Wait);

    pollster::block_on(rx)
        .map_err(|_| GpuError::Readback("map callback dropped".to_string()))?
        .map_err(|e| GpuError::Readback(e.to_string()))?;

    let data = slice.get_mapped_range();
    let vertices = bytemuck::cast_slice::<u8, SurfaceVertex>(&data).to_vec();
    drop(data);
    staging.unmap();
    Ok(vertices)
}
