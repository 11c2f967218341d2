//! Surface normals compute pass
//!
//! Runs the grid normal kernel on the GPU, one invocation per vertex.
//! The grid shape is passed explicitly in a uniform and out-of-range
//! invocations return early, so any `width x height` grid is dispatched
//! with `ceil(width / wx) x ceil(height / wy)` workgroups.

use wgpu::util::DeviceExt;

use gn_core::{ConfigError, GridDims, SurfaceVertex};

use crate::config::GpuConfig;
use crate::context::ComputeContext;
use crate::error::GpuError;
use crate::readback::read_vertices;

const SHADER_SOURCE: &str = include_str!("shaders/surface_normals.wgsl");

/// Bytes per input position (`vec4<f32>`)
const POSITION_SIZE: u64 = std::mem::size_of::<[f32; 4]>() as u64;

/// Bytes per output record triple
const VERTEX_SIZE: u64 = std::mem::size_of::<SurfaceVertex>() as u64;

/// Uniform block matching `Params` in the shader
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct NormalsParams {
    width: u32,
    height: u32,
    degenerate_epsilon: f32,
    _pad: u32,
}

/// Compute pipeline for per-vertex surface normals
pub struct SurfaceNormalsPass {
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    workgroup_size: [u32; 2],
    degenerate_epsilon: f32,
}

impl SurfaceNormalsPass {
    /// Build the pipeline for the configured workgroup size.
    ///
    /// The workgroup size is checked against the device limits so an
    /// oversized configuration is reported instead of failing pipeline
    /// validation.
    pub fn new(device: &wgpu::Device, config: &GpuConfig) -> Result<Self, GpuError> {
        config.validate()?;
        check_workgroup_limits(config.workgroup_size, &device.limits())?;
        let [wx, wy] = config.workgroup_size;
        tracing::debug!("Creating surface normals pipeline ({}x{})", wx, wy);

        let source = SHADER_SOURCE
            .replace("WORKGROUP_X", &wx.to_string())
            .replace("WORKGROUP_Y", &wy.to_string());
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Surface Normals Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Surface Normals Bind Group Layout"),
            entries: &[
                storage_entry(0, true),
                storage_entry(1, false),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Surface Normals Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Surface Normals Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("main"),
            compilation_options: wgpu::PipelineCompilationOptions::default(),
            cache: None,
        });

        Ok(Self {
            pipeline,
            bind_group_layout,
            workgroup_size: config.workgroup_size,
            degenerate_epsilon: config.degenerate_epsilon,
        })
    }

    /// Workgroup size the pipeline was built with
    pub fn workgroup_size(&self) -> [u32; 2] {
        self.workgroup_size
    }

    /// Record the pass into `encoder`.
    ///
    /// `input` must hold `width * height` positions and `output`
    /// `width * height` records; both sizes are checked before anything
    /// is encoded.
    pub fn encode(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        dims: GridDims,
        input: &wgpu::Buffer,
        output: &wgpu::Buffer,
    ) -> Result<(), GpuError> {
        let vertex_count = dims.vertex_count() as u64;
        check_size("input", vertex_count * POSITION_SIZE, input.size())?;
        check_size("output", vertex_count * VERTEX_SIZE, output.size())?;

        let params = NormalsParams {
            width: dims.width(),
            height: dims.height(),
            degenerate_epsilon: self.degenerate_epsilon,
            _pad: 0,
        };
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Surface Normals Params"),
            contents: bytemuck::bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Surface Normals Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: input.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: output.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });

        let [groups_x, groups_y] = dims.workgroup_count(self.workgroup_size);
        let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
            label: Some("Surface Normals Pass"),
            timestamp_writes: None,
        });
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &bind_group, &[]);
        pass.dispatch_workgroups(groups_x, groups_y, 1);
        Ok(())
    }

    /// Upload `positions`, run the pass and read the records back.
    pub fn compute(
        &self,
        ctx: &ComputeContext,
        dims: GridDims,
        positions: &[[f32; 4]],
    ) -> Result<Vec<SurfaceVertex>, GpuError> {
        dims.check_input_len(positions.len())?;
        tracing::debug!(
            width = dims.width(),
            height = dims.height(),
            "dispatching surface normals"
        );

        let input = create_position_buffer(&ctx.device, positions);
        let output = create_vertex_buffer(&ctx.device, dims);

        let mut encoder = ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Surface Normals Encoder"),
            });
        self.encode(&ctx.device, &mut encoder, dims, &input, &output)?;
        ctx.queue.submit(Some(encoder.finish()));

        read_vertices(&ctx.device, &ctx.queue, &output, dims.vertex_count())
    }
}

/// Create a read-only storage buffer holding grid positions
pub fn create_position_buffer(device: &wgpu::Device, positions: &[[f32; 4]]) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Surface Positions Buffer"),
        contents: bytemuck::cast_slice(positions),
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
    })
}

/// Create the output buffer: written by the pass, drawable as a vertex
/// buffer, and copyable for readback.
pub fn create_vertex_buffer(device: &wgpu::Device, dims: GridDims) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Surface Vertex Buffer"),
        size: dims.vertex_count() as u64 * VERTEX_SIZE,
        usage: wgpu::BufferUsages::STORAGE
            | wgpu::BufferUsages::VERTEX
            | wgpu::BufferUsages::COPY_SRC,
        mapped_at_creation: false,
    })
}

fn storage_entry(binding: u32, read_only: bool) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::COMPUTE,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Storage { read_only },
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn check_workgroup_limits(size: [u32; 2], limits: &wgpu::Limits) -> Result<(), ConfigError> {
    let [wx, wy] = size;
    if wx > limits.max_compute_workgroup_size_x || wy > limits.max_compute_workgroup_size_y {
        return Err(ConfigError::Invalid(format!(
            "workgroup size {}x{} exceeds device limit {}x{}",
            wx, wy, limits.max_compute_workgroup_size_x, limits.max_compute_workgroup_size_y
        )));
    }
    let invocations = wx as u64 * wy as u64;
    if invocations > limits.max_compute_invocations_per_workgroup as u64 {
        return Err(ConfigError::Invalid(format!(
            "workgroup size {}x{} has {} invocations, device allows {}",
            wx, wy, invocations, limits.max_compute_invocations_per_workgroup
        )));
    }
    Ok(())
}

fn check_size(label: &'static str, expected: u64, actual: u64) -> Result<(), GpuError> {
    if actual < expected {
        return Err(GpuError::BufferSize {
            label,
            expected,
            actual,
        });
    }
    Ok(())
}
