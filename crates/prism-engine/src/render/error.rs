use thiserror::Error;

use crate::geometry::GeometryError;
use crate::program::ProgramError;

/// GPU resource allocation refused the input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResourceError {
    #[error("mesh `{0}` has no triangles")]
    EmptyMesh(String),

    #[error("uniform type for `{0}` has zero size")]
    ZeroSizedUniform(String),
}

/// Animation parameters that would break the `[0, 2π)` angle.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnimationError {
    #[error("animation step must be finite, got {0}")]
    NonFiniteStep(f32),
}

/// Renderer construction failure. Fatal for the renderer being built.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Program(#[from] ProgramError),

    #[error(transparent)]
    Resource(#[from] ResourceError),
}
