//! Headless GPU context

use crate::config::GpuConfig;
use crate::error::GpuError;

/// Device and queue used to run compute passes without a surface.
pub struct ComputeContext {
    /// WGPU device
    pub device: wgpu::Device,
    /// WGPU queue
    pub queue: wgpu::Queue,
    adapter_info: wgpu::AdapterInfo,
}

impl ComputeContext {
    /// Create a context, blocking until the adapter and device are ready.
    pub fn new(config: &GpuConfig) -> Result<Self, GpuError> {
        pollster::block_on(Self::new_async(config))
    }

    /// Create a context asynchronously.
    pub async fn new_async(config: &GpuConfig) -> Result<Self, GpuError> {
        config.validate()?;

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: config.power_preference.into(),
                force_fallback_adapter: config.force_fallback_adapter,
                compatible_surface: None,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let adapter_info = adapter.get_info();
        tracing::info!(
            "Using adapter '{}' ({:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("gn compute device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: adapter.limits(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        Ok(Self {
            device,
            queue,
            adapter_info,
        })
    }

    /// Information about the selected adapter
    pub fn adapter_info(&self) -> &wgpu::AdapterInfo {
        &self.adapter_info
    }
}
