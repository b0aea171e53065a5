use anyhow::{Context, Result};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use prism_engine::compute::BufferMultiplier;
use prism_engine::core::{App, AppControl, FrameCtx};
use prism_engine::device::{request_headless, Gpu, GpuInit};
use prism_engine::geometry::SphereParams;
use prism_engine::program::WgslLibrary;
use prism_engine::render::{
    AnimationStep, CircleParams, CircleRenderer, DrawPass, FrameDriver, MeshRenderer, SceneCamera,
};

/// What a window demo draws.
#[derive(Debug, Clone, Copy)]
pub enum Scene {
    Cube,
    Sphere(SphereParams),
    Circle(CircleParams),
}

impl Scene {
    pub fn name(&self) -> &'static str {
        match self {
            Scene::Cube => "cube",
            Scene::Sphere(_) => "sphere",
            Scene::Circle(_) => "circle",
        }
    }

    fn camera(&self) -> SceneCamera {
        match self {
            Scene::Sphere(_) => SceneCamera::sphere(),
            Scene::Cube | Scene::Circle(_) => SceneCamera::cube(),
        }
    }
}

/// One renderer, one frame driver, one window.
pub struct RenderDemo {
    scene: Scene,
    clear: wgpu::Color,
    library: WgslLibrary,
    driver: FrameDriver,
    pass: Option<Box<dyn DrawPass>>,
    max_frames: Option<u64>,
}

impl RenderDemo {
    pub fn new(scene: Scene, step: AnimationStep, clear: wgpu::Color) -> Result<Self> {
        Ok(Self {
            scene,
            clear,
            library: WgslLibrary::builtin(),
            driver: FrameDriver::new(scene.camera(), step)?,
            pass: None,
            max_frames: None,
        })
    }

    /// Exit after this many drawn frames.
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }
}

impl App for RenderDemo {
    fn on_gpu_ready(&mut self, gpu: &Gpu<'_>) -> Result<()> {
        let info = gpu.adapter_info();
        log::info!(
            "{} demo on {} ({:?}), surface {:?}",
            self.scene.name(),
            info.name,
            info.backend,
            gpu.surface_format()
        );

        let ctx = gpu.render_ctx();
        let pass: Box<dyn DrawPass> = match self.scene {
            Scene::Cube => Box::new(MeshRenderer::cube(&ctx, &self.library)?),
            Scene::Sphere(params) => Box::new(MeshRenderer::sphere(&ctx, &self.library, params)?),
            Scene::Circle(params) => Box::new(CircleRenderer::new(&ctx, &self.library, params)?),
        };

        self.pass = Some(pass);
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput { event, .. }
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape) =>
            {
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(pass) = self.pass.as_deref() else {
            return AppControl::Continue;
        };

        if ctx.draw_frame(&mut self.driver, pass, self.clear) == AppControl::Exit {
            return AppControl::Exit;
        }

        let stats = self.driver.stats();
        match self.max_frames {
            Some(max) if stats.drawn >= max => {
                log::info!("{} frames drawn, {} skipped; exiting", stats.drawn, stats.skipped);
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }
}

/// Doubles `values` on a headless device and logs the readback.
pub fn run_compute(gpu_init: &GpuInit, values: &[f32]) -> Result<Vec<f32>> {
    let (device, queue) = pollster::block_on(request_headless(gpu_init))?;
    let library = WgslLibrary::builtin();

    let multiplier =
        BufferMultiplier::new(&device, &library).context("failed to build compute pipeline")?;
    let output = multiplier
        .run(&device, &queue, values)
        .context("compute readback failed")?;

    log::info!("multiply_by_two: {values:?} -> {output:?}");
    Ok(output)
}
