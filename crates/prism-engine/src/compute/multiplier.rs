use std::sync::mpsc;

use wgpu::util::DeviceExt;

use crate::program::{names, ProgramProvider, ProgramStage};

use super::ComputeError;

/// Invocations per workgroup; matches `@workgroup_size` in `multiply.wgsl`.
pub const WORKGROUP_SIZE: u32 = 64;

/// Workgroups needed to cover `len` elements.
pub fn workgroup_count(len: usize) -> Option<u32> {
    let len = u32::try_from(len).ok()?;
    Some(len.div_ceil(WORKGROUP_SIZE))
}

/// Doubles every element of an `f32` buffer on the GPU and reads it back.
pub struct BufferMultiplier {
    pipeline: wgpu::ComputePipeline,
    layout: wgpu::BindGroupLayout,
}

impl BufferMultiplier {
    pub fn new(
        device: &wgpu::Device,
        provider: &dyn ProgramProvider,
    ) -> Result<Self, ComputeError> {
        let program = provider.resolve(device, names::MULTIPLY_BY_TWO)?;
        if program.stage != ProgramStage::Compute {
            return Err(crate::program::ProgramError::WrongStage {
                name: program.name,
                expected: ProgramStage::Compute,
                found: program.stage,
            }
            .into());
        }

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("multiply pipeline"),
            layout: None,
            module: &program.module,
            entry_point: program.entry_point(),
            compilation_options: Default::default(),
            cache: None,
        });
        let layout = pipeline.get_bind_group_layout(0);

        Ok(Self { pipeline, layout })
    }

    /// Blocks until the GPU has finished and the result is mapped.
    pub fn run(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        input: &[f32],
    ) -> Result<Vec<f32>, ComputeError> {
        if input.is_empty() {
            return Ok(Vec::new());
        }
        let groups = workgroup_count(input.len())
            .filter(|&g| g <= device.limits().max_compute_workgroups_per_dimension)
            .ok_or(ComputeError::TooLarge(input.len()))?;

        let bytes: &[u8] = bytemuck::cast_slice(input);
        let size = bytes.len() as u64;

        let storage = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("multiply storage"),
            contents: bytes,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
        });
        let staging = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("multiply readback"),
            size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("multiply bind group"),
            layout: &self.layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: storage.as_entire_binding(),
            }],
        });

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("multiply encoder"),
        });
        {
            let mut cpass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("multiply pass"),
                timestamp_writes: None,
            });
            cpass.set_pipeline(&self.pipeline);
            cpass.set_bind_group(0, &bind_group, &[]);
            cpass.dispatch_workgroups(groups, 1, 1);
        }
        encoder.copy_buffer_to_buffer(&storage, 0, &staging, 0, size);
        queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (tx, rx) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });

        device.poll(wgpu::PollType::wait_indefinitely())?;
        rx.recv().map_err(|_| ComputeError::Disconnected)??;

        let output = {
            let mapped = slice.get_mapped_range();
            bytemuck::cast_slice::<u8, f32>(&mapped).to_vec()
        };
        staging.unmap();

        log::debug!("multiplied {} values in {groups} workgroups", output.len());
        Ok(output)
    }
}
