use std::marker::PhantomData;
use std::num::NonZeroU64;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use crate::geometry::{Mesh, MeshVertex};

use super::ResourceError;

/// Device-resident vertex + index buffers for one mesh.
///
/// Both buffers are created with their contents (mapped at creation), so no
/// staging copy is involved. Read-only after upload.
pub struct GpuMesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    pub fn upload<V: MeshVertex>(
        device: &wgpu::Device,
        mesh: &Mesh<V>,
        label: &str,
    ) -> Result<Self, ResourceError> {
        if mesh.is_empty() {
            return Err(ResourceError::EmptyMesh(label.to_string()));
        }

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} vbo")),
            contents: bytemuck::cast_slice(mesh.vertices()),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} ibo")),
            contents: bytemuck::cast_slice(mesh.indices()),
            usage: wgpu::BufferUsages::INDEX,
        });

        log::debug!(
            "uploaded mesh `{label}`: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );

        Ok(Self {
            vertex_buffer,
            index_buffer,
            index_count: mesh.index_count(),
        })
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.index_count
    }

    /// Binds both buffers and draws the full index range once.
    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

/// Fixed-size uniform buffer bound at group 0, binding 0.
///
/// Overwritten every frame through the queue; never reallocated.
pub struct UniformSlot<U> {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    _value: PhantomData<U>,
}

impl<U: Pod> UniformSlot<U> {
    pub fn new(
        device: &wgpu::Device,
        visibility: wgpu::ShaderStages,
        label: &str,
    ) -> Result<Self, ResourceError> {
        let size = NonZeroU64::new(std::mem::size_of::<U>() as u64)
            .ok_or_else(|| ResourceError::ZeroSizedUniform(label.to_string()))?;

        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{label} ubo")),
            size: size.get(),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} bgl")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: Some(size),
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            buffer,
            layout,
            bind_group,
            _value: PhantomData,
        })
    }

    #[inline]
    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    #[inline]
    pub fn write(&self, queue: &wgpu::Queue, value: &U) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    #[inline]
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_bind_group(0, &self.bind_group, &[]);
    }
}

/// Everything one renderer allocates on the device: geometry + uniforms.
///
/// Allocated once at renderer construction, released on drop.
pub struct MeshResources<U> {
    pub mesh: GpuMesh,
    pub uniforms: UniformSlot<U>,
}

impl<U: Pod> MeshResources<U> {
    pub fn new<V: MeshVertex>(
        device: &wgpu::Device,
        mesh: &Mesh<V>,
        label: &str,
    ) -> Result<Self, ResourceError> {
        Ok(Self {
            mesh: GpuMesh::upload(device, mesh, label)?,
            uniforms: UniformSlot::new(
                device,
                wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                label,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::test_device;
    use crate::geometry::{self, ColorVertex};

    #[test]
    fn empty_mesh_is_rejected() {
        let Some((device, _queue)) = test_device() else { return };
        let empty = Mesh::<ColorVertex>::new(vec![], vec![]).unwrap();

        let err = GpuMesh::upload(&device, &empty, "empty").err();
        assert_eq!(err, Some(ResourceError::EmptyMesh("empty".to_string())));
    }

    #[test]
    fn zero_sized_uniform_is_rejected() {
        let Some((device, _queue)) = test_device() else { return };

        let err = UniformSlot::<()>::new(&device, wgpu::ShaderStages::VERTEX, "unit").err();
        assert_eq!(err, Some(ResourceError::ZeroSizedUniform("unit".to_string())));
    }

    #[test]
    fn upload_records_full_index_range() {
        let Some((device, _queue)) = test_device() else { return };

        let mesh = GpuMesh::upload(&device, &geometry::cube(), "cube").unwrap();
        assert_eq!(mesh.index_count(), 36);
    }
}
