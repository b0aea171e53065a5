use crate::program::{CompiledProgram, ProgramError, ProgramProvider, ProgramStage};

use super::RenderCtx;

/// Color blending for the single color target.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BlendMode {
    /// Source replaces destination.
    Opaque,
    /// Straight-alpha "over": `src·α + dst·(1−α)` on color and alpha alike.
    AlphaOver,
}

impl BlendMode {
    pub fn state(self) -> Option<wgpu::BlendState> {
        match self {
            BlendMode::Opaque => None,
            BlendMode::AlphaOver => Some(alpha_over_blend()),
        }
    }
}

pub fn alpha_over_blend() -> wgpu::BlendState {
    let over = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::SrcAlpha,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState {
        color: over,
        alpha: over,
    }
}

/// Everything needed to compile a mesh pipeline, minus the vertex layout and
/// bind group layout, which come from the vertex type and resource set.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub label: String,
    pub vertex_program: String,
    pub fragment_program: String,
    pub color_format: wgpu::TextureFormat,
    /// Enables a `Less` depth test with writes when set.
    pub depth_format: Option<wgpu::TextureFormat>,
    pub blend: BlendMode,
    pub cull_mode: Option<wgpu::Face>,
}

impl PipelineConfig {
    pub fn new(
        label: impl Into<String>,
        vertex_program: impl Into<String>,
        fragment_program: impl Into<String>,
        ctx: &RenderCtx<'_>,
    ) -> Self {
        Self {
            label: label.into(),
            vertex_program: vertex_program.into(),
            fragment_program: fragment_program.into(),
            color_format: ctx.surface_format,
            depth_format: ctx.depth_format,
            blend: BlendMode::Opaque,
            cull_mode: None,
        }
    }

    pub fn with_blend(mut self, blend: BlendMode) -> Self {
        self.blend = blend;
        self
    }

    pub fn with_depth(mut self, depth_format: Option<wgpu::TextureFormat>) -> Self {
        self.depth_format = depth_format;
        self
    }

    pub fn with_cull_mode(mut self, cull_mode: Option<wgpu::Face>) -> Self {
        self.cull_mode = cull_mode;
        self
    }

    pub fn depth_stencil_state(&self) -> Option<wgpu::DepthStencilState> {
        self.depth_format.map(|format| wgpu::DepthStencilState {
            format,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        })
    }

    pub fn primitive_state(&self) -> wgpu::PrimitiveState {
        wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: self.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    pub fn color_target(&self) -> wgpu::ColorTargetState {
        wgpu::ColorTargetState {
            format: self.color_format,
            blend: self.blend.state(),
            write_mask: wgpu::ColorWrites::ALL,
        }
    }

    /// Resolves both programs and compiles the pipeline. Synchronous, one-shot.
    pub fn build(
        &self,
        device: &wgpu::Device,
        provider: &dyn ProgramProvider,
        vertex_layout: wgpu::VertexBufferLayout<'_>,
        bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Result<MeshPipeline, ProgramError> {
        let vertex = resolve_stage(device, provider, &self.vertex_program, ProgramStage::Vertex)?;
        let fragment =
            resolve_stage(device, provider, &self.fragment_program, ProgramStage::Fragment)?;

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} pipeline layout", self.label)),
            bind_group_layouts: &[bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} pipeline", self.label)),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &vertex.module,
                entry_point: vertex.entry_point(),
                compilation_options: Default::default(),
                buffers: &[vertex_layout],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment.module,
                entry_point: fragment.entry_point(),
                compilation_options: Default::default(),
                targets: &[Some(self.color_target())],
            }),
            primitive: self.primitive_state(),
            depth_stencil: self.depth_stencil_state(),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        log::info!(
            "pipeline `{}` built ({} + {}, {:?}, depth {:?})",
            self.label,
            self.vertex_program,
            self.fragment_program,
            self.blend,
            self.depth_format
        );

        Ok(MeshPipeline {
            pipeline,
            depth_format: self.depth_format,
        })
    }
}

fn resolve_stage(
    device: &wgpu::Device,
    provider: &dyn ProgramProvider,
    name: &str,
    expected: ProgramStage,
) -> Result<CompiledProgram, ProgramError> {
    let program = provider.resolve(device, name)?;
    if program.stage != expected {
        return Err(ProgramError::WrongStage {
            name: name.to_string(),
            expected,
            found: program.stage,
        });
    }
    Ok(program)
}

/// Compiled, immutable pipeline state.
pub struct MeshPipeline {
    pipeline: wgpu::RenderPipeline,
    depth_format: Option<wgpu::TextureFormat>,
}

impl MeshPipeline {
    #[inline]
    pub fn depth_format(&self) -> Option<wgpu::TextureFormat> {
        self.depth_format
    }

    #[inline]
    pub fn bind(&self, rpass: &mut wgpu::RenderPass<'_>) {
        rpass.set_pipeline(&self.pipeline);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> PipelineConfig {
        PipelineConfig {
            label: "test".into(),
            vertex_program: "v".into(),
            fragment_program: "f".into(),
            color_format: wgpu::TextureFormat::Bgra8Unorm,
            depth_format: Some(wgpu::TextureFormat::Depth32Float),
            blend: BlendMode::Opaque,
            cull_mode: None,
        }
    }

    #[test]
    fn alpha_over_uses_source_alpha_on_both_channels() {
        let blend = alpha_over_blend();
        for c in [blend.color, blend.alpha] {
            assert_eq!(c.src_factor, wgpu::BlendFactor::SrcAlpha);
            assert_eq!(c.dst_factor, wgpu::BlendFactor::OneMinusSrcAlpha);
            assert_eq!(c.operation, wgpu::BlendOperation::Add);
        }
    }

    #[test]
    fn opaque_disables_blending() {
        assert!(config().color_target().blend.is_none());
        let blended = config().with_blend(BlendMode::AlphaOver).color_target();
        assert_eq!(blended.blend, Some(alpha_over_blend()));
    }

    #[test]
    fn depth_test_is_less_with_writes() {
        let depth = config().depth_stencil_state().unwrap();
        assert_eq!(depth.depth_compare, wgpu::CompareFunction::Less);
        assert!(depth.depth_write_enabled);
        assert_eq!(depth.format, wgpu::TextureFormat::Depth32Float);
    }

    #[test]
    fn no_depth_format_means_no_depth_state() {
        assert!(config().with_depth(None).depth_stencil_state().is_none());
    }

    #[test]
    fn primitives_are_triangle_lists() {
        let p = config().with_cull_mode(Some(wgpu::Face::Back)).primitive_state();
        assert_eq!(p.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(p.cull_mode, Some(wgpu::Face::Back));
    }
}
