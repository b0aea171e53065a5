use crate::geometry::{self, Mesh, MeshVertex, SphereParams};
use crate::program::{names, ProgramProvider};

use super::{
    BlendMode, DrawPass, MeshPipeline, MeshResources, MeshUniforms, PipelineConfig, RenderCtx,
    RenderError, TransformSet,
};

/// One mesh, one pipeline, one uniform block: a single indexed draw per frame.
pub struct MeshRenderer {
    resources: MeshResources<MeshUniforms>,
    pipeline: MeshPipeline,
}

impl MeshRenderer {
    /// Uploads `mesh` and builds a pipeline for it as described by `config`.
    pub fn new<V: MeshVertex>(
        ctx: &RenderCtx<'_>,
        provider: &dyn ProgramProvider,
        mesh: &Mesh<V>,
        config: &PipelineConfig,
    ) -> Result<Self, RenderError> {
        let resources = MeshResources::new(ctx.device, mesh, &config.label)?;
        let pipeline = config.build(
            ctx.device,
            provider,
            V::layout(),
            resources.uniforms.layout(),
        )?;

        Ok(Self {
            resources,
            pipeline,
        })
    }

    /// Per-face colored cube, opaque, depth tested.
    pub fn cube(ctx: &RenderCtx<'_>, provider: &dyn ProgramProvider) -> Result<Self, RenderError> {
        let config = PipelineConfig::new("cube", names::CUBE_VERTEX, names::CUBE_FRAGMENT, ctx)
            .with_blend(BlendMode::Opaque);
        Self::new(ctx, provider, &geometry::cube(), &config)
    }

    /// Lit UV sphere, alpha-over blended, depth tested.
    pub fn sphere(
        ctx: &RenderCtx<'_>,
        provider: &dyn ProgramProvider,
        params: SphereParams,
    ) -> Result<Self, RenderError> {
        let mesh = geometry::sphere(params)?;
        let config =
            PipelineConfig::new("sphere", names::SPHERE_VERTEX, names::SPHERE_FRAGMENT, ctx)
                .with_blend(BlendMode::AlphaOver);
        Self::new(ctx, provider, &mesh, &config)
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.resources.mesh.index_count()
    }
}

impl DrawPass for MeshRenderer {
    fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.pipeline.depth_format()
    }

    fn prepare(&self, queue: &wgpu::Queue, transforms: &TransformSet, _aspect: f32) {
        self.resources
            .uniforms
            .write(queue, &MeshUniforms::from(transforms));
    }

    fn record(&self, rpass: &mut wgpu::RenderPass<'_>) {
        self.pipeline.bind(rpass);
        self.resources.uniforms.bind(rpass);
        self.resources.mesh.draw(rpass);
    }
}
