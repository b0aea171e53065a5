use anyhow::{Context, Result};

use super::GpuInit;

/// Requests a device/queue pair with no surface, for compute work.
pub async fn request_headless(init: &GpuInit) -> Result<(wgpu::Device, wgpu::Queue)> {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    });

    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: init.power_preference,
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .context("failed to find a GPU adapter")?;

    let info = adapter.get_info();
    log::info!("headless adapter: {} ({:?})", info.name, info.backend);

    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("prism headless device"),
            required_features: init.required_features,
            required_limits: init.required_limits.clone(),
            experimental_features: wgpu::ExperimentalFeatures::disabled(),
            memory_hints: wgpu::MemoryHints::Performance,
            trace: wgpu::Trace::Off,
        })
        .await
        .context("failed to create wgpu device/queue")
}

/// Headless device for tests, or `None` when the machine has no adapter.
#[cfg(test)]
pub(crate) fn test_device() -> Option<(wgpu::Device, wgpu::Queue)> {
    match pollster::block_on(request_headless(&GpuInit::default())) {
        Ok(pair) => Some(pair),
        Err(err) => {
            eprintln!("skipping GPU test: {err:#}");
            None
        }
    }
}
