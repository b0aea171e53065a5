use std::cell::Cell;

use bytemuck::{Pod, Zeroable};

use crate::geometry::{self, MeshVertex};
use crate::program::{names, ProgramProvider};

use super::{
    BlendMode, DrawPass, MeshPipeline, MeshResources, PipelineConfig, RenderCtx, RenderError,
    TransformSet,
};

/// A flat disc in normalized device coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CircleParams {
    pub center: [f32; 2],
    /// Radius in NDC height units; horizontally corrected by the aspect ratio.
    pub radius: f32,
    /// Straight (non-premultiplied) RGBA.
    pub color: [f32; 4],
}

impl Default for CircleParams {
    fn default() -> Self {
        Self {
            center: [0.1, -0.2],
            radius: 0.4,
            color: [0.2, 0.6, 1.0, 0.8],
        }
    }
}

/// Uniform block for `circle.wgsl` (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleUniform {
    center: [f32; 2],
    radius: f32,
    aspect: f32,
    color: [f32; 4],
}

impl CircleUniform {
    fn new(params: &CircleParams, aspect: f32) -> Self {
        Self {
            center: params.center,
            radius: params.radius.max(0.0),
            aspect: if aspect > 0.0 { aspect } else { 1.0 },
            color: params.color,
        }
    }
}

/// Draws one anti-aliased disc over the target. No depth.
pub struct CircleRenderer {
    resources: MeshResources<CircleUniform>,
    pipeline: MeshPipeline,
    params: Cell<CircleParams>,
}

impl CircleRenderer {
    pub fn new(
        ctx: &RenderCtx<'_>,
        provider: &dyn ProgramProvider,
        params: CircleParams,
    ) -> Result<Self, RenderError> {
        let quad = geometry::quad();
        let resources = MeshResources::new(ctx.device, &quad, "circle")?;

        let pipeline =
            PipelineConfig::new("circle", names::CIRCLE_VERTEX, names::CIRCLE_FRAGMENT, ctx)
                .with_blend(BlendMode::AlphaOver)
                .with_depth(None)
                .build(
                    ctx.device,
                    provider,
                    geometry::QuadVertex::layout(),
                    resources.uniforms.layout(),
                )?;

        Ok(Self {
            resources,
            pipeline,
            params: Cell::new(params),
        })
    }

    #[inline]
    pub fn params(&self) -> CircleParams {
        self.params.get()
    }

    /// Takes effect on the next `prepare`.
    pub fn set_params(&self, params: CircleParams) {
        self.params.set(params);
    }
}

impl DrawPass for CircleRenderer {
    fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        None
    }

    fn prepare(&self, queue: &wgpu::Queue, _transforms: &TransformSet, aspect: f32) {
        let uniform = CircleUniform::new(&self.params.get(), aspect);
        self.resources.uniforms.write(queue, &uniform);
    }

    fn record(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.pipeline.bind(rpass);
        self.resources.uniforms.bind(rpass);
        self.resources.mesh.draw(rpass);
    }
}
