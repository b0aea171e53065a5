use super::TransformSet;

/// Something a frame sink can record into a render pass.
pub trait DrawPass {
    /// Depth format the pipeline was built for; `None` renders color-only.
    fn depth_format(&self) -> Option<wgpu::TextureFormat>;

    /// Uploads per-frame uniforms. Called before the pass is recorded.
    fn prepare(&self, queue: &wgpu::Queue, transforms: &TransformSet, aspect: f32);

    /// Binds state and issues the draw call.
    fn record(&self, rpass: &mut wgpu::RenderPass<'_>);
}
