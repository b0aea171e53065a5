use thiserror::Error;

/// Rejected geometry input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    #[error("sphere needs at least one ring")]
    ZeroRings,

    #[error("sphere needs at least one sector")]
    ZeroSectors,

    #[error("radius must be finite and positive, got {0}")]
    InvalidRadius(f32),

    #[error("{count} vertices cannot be addressed with 16-bit indices")]
    TooManyVertices { count: u128 },

    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u16, vertex_count: usize },

    #[error("index count {0} is not a multiple of 3")]
    PartialTriangle(usize),
}
