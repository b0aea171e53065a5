//! Mesh rendering.
//!
//! Setup is one-shot: geometry → [`MeshResources`] → [`PipelineConfig::build`].
//! Per frame, a [`FrameDriver`] computes the [`TransformSet`] and hands it to a
//! [`FrameSink`], which records one indexed draw through a [`DrawPass`].
//!
//! Convention: right-handed world space, camera looking down −Z, clip depth in
//! `[0, 1]`.

mod circle;
mod ctx;
mod driver;
mod error;
mod mesh;
mod pass;
mod pipeline;
mod resources;
mod transform;

#[cfg(test)]
mod offscreen;

pub use circle::{CircleParams, CircleRenderer};
pub use ctx::RenderCtx;
pub use driver::{
    Animation, AnimationStep, DriverState, FrameDriver, FrameOutcome, FrameSink, FrameStats,
};
pub use error::{AnimationError, RenderError, ResourceError};
pub use mesh::MeshRenderer;
pub use pass::DrawPass;
pub use pipeline::{alpha_over_blend, BlendMode, MeshPipeline, PipelineConfig};
pub use resources::{GpuMesh, MeshResources, UniformSlot};
pub use transform::{MeshUniforms, SceneCamera, TransformSet};
