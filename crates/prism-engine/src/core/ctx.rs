use winit::window::Window;

use crate::device::{Gpu, GpuFrame};
use crate::render::{DrawPass, FrameDriver, FrameOutcome, FrameSink, TransformSet};
use crate::time::FrameTime;
use crate::window::RuntimeCtx;

use super::app::AppControl;

/// Per-frame context passed to `core::App::on_frame`.
///
/// Lifetimes:
/// - `'a` is the duration of the callback invocation
/// - `'w` is the window-borrow lifetime carried by `Gpu<'w>`
pub struct FrameCtx<'a, 'w> {
    pub window: &'a Window,
    pub gpu: &'a mut Gpu<'w>,
    pub time: FrameTime,
    pub runtime: &'a mut RuntimeCtx,
}

impl<'a, 'w> FrameCtx<'a, 'w> {
    /// Runs one tick of `driver` against the window surface: clears to
    /// `clear`, records `pass`, presents.
    ///
    /// Returns `Exit` only on a fatal surface error. A missing drawable just
    /// skips the frame.
    pub fn draw_frame<P: DrawPass + ?Sized>(
        &mut self,
        driver: &mut FrameDriver,
        pass: &P,
        clear: wgpu::Color,
    ) -> AppControl {
        let mut sink = SurfaceSink {
            gpu: &mut *self.gpu,
            window: self.window,
            pass,
            clear,
            fatal: false,
        };

        if driver.tick(&mut sink, self.time) == FrameOutcome::Skipped && sink.fatal {
            log::error!("fatal surface error; exiting");
            return AppControl::Exit;
        }

        AppControl::Continue
    }
}

/// Frame sink backed by the window surface.
struct SurfaceSink<'a, 'w, P: ?Sized> {
    gpu: &'a mut Gpu<'w>,
    window: &'a Window,
    pass: &'a P,
    clear: wgpu::Color,
    fatal: bool,
}

impl<P: DrawPass + ?Sized> FrameSink for SurfaceSink<'_, '_, P> {
    type Frame = GpuFrame;

    fn acquire(&mut self) -> Option<GpuFrame> {
        let size = self.gpu.size();
        if size.width == 0 || size.height == 0 {
            return None;
        }

        match self.gpu.begin_frame() {
            Ok(frame) => Some(frame),
            Err(err) => {
                self.fatal = self.gpu.handle_surface_error(err).is_fatal();
                None
            }
        }
    }

    fn aspect(&self) -> f32 {
        self.gpu.aspect()
    }

    fn draw(&mut self, frame: &mut GpuFrame, transforms: &TransformSet) {
        self.pass
            .prepare(self.gpu.queue(), transforms, self.gpu.aspect());

        let depth_view = self.pass.depth_format().and(self.gpu.depth_view());
        let depth_stencil_attachment =
            depth_view.map(|view| wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            });

        let mut rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("prism frame pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &frame.view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        self.pass.record(&mut rpass);
    }

    fn present(&mut self, frame: GpuFrame) {
        self.window.pre_present_notify();
        self.gpu.submit(frame);
    }
}
