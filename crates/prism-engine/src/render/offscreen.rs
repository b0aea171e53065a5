//! Offscreen target for exercising draw passes on a headless device.

use crate::device::DepthTarget;

use super::{DrawPass, RenderCtx, TransformSet};

pub(crate) const SIZE: u32 = 64;
pub(crate) const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

// 64 texels × 4 bytes is already a multiple of COPY_BYTES_PER_ROW_ALIGNMENT.
const BYTES_PER_ROW: u32 = SIZE * 4;

pub(crate) fn render_ctx<'a>(device: &'a wgpu::Device, queue: &'a wgpu::Queue) -> RenderCtx<'a> {
    RenderCtx::new(device, queue, COLOR_FORMAT, Some(DEPTH_FORMAT))
}

/// Draws `pass` once over a transparent clear and returns the RGBA8 texels,
/// row-major. wgpu's default error handler panics on any validation error.
pub(crate) fn draw<P: DrawPass + ?Sized>(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    pass: &P,
    transforms: &TransformSet,
) -> Vec<u8> {
    let extent = wgpu::Extent3d {
        width: SIZE,
        height: SIZE,
        depth_or_array_layers: 1,
    };
    let color = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("offscreen color"),
        size: extent,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: COLOR_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    });
    let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
    let depth = pass.depth_format().map(|format| {
        DepthTarget::new(device, format, winit::dpi::PhysicalSize::new(SIZE, SIZE))
    });

    pass.prepare(queue, transforms, 1.0);

    let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("offscreen encoder"),
    });
    {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("offscreen pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: depth.as_ref().map(|d| {
                wgpu::RenderPassDepthStencilAttachment {
                    view: d.view(),
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        pass.record(&mut rpass);
    }

    let readback = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("offscreen readback"),
        size: u64::from(BYTES_PER_ROW * SIZE),
        usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture: &color,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &readback,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(BYTES_PER_ROW),
                rows_per_image: Some(SIZE),
            },
        },
        extent,
    );
    queue.submit(std::iter::once(encoder.finish()));

    let slice = readback.slice(..);
    let (tx, rx) = std::sync::mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    device
        .poll(wgpu::PollType::wait_indefinitely())
        .expect("device poll failed");
    rx.recv()
        .expect("map callback dropped")
        .expect("readback map failed");

    let texels = slice.get_mapped_range().to_vec();
    readback.unmap();
    texels
}

/// RGBA at texel `(x, y)`, origin top-left.
pub(crate) fn texel(texels: &[u8], x: u32, y: u32) -> [u8; 4] {
    let i = ((y * SIZE + x) * 4) as usize;
    [texels[i], texels[i + 1], texels[i + 2], texels[i + 3]]
}
