use super::GeometryError;

/// Indexed triangle list with 16-bit indices.
///
/// Invariants (checked by [`Mesh::new`]):
/// - every index is `< vertex_count`
/// - index count is a multiple of 3
///
/// A mesh is read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh<V> {
    vertices: Vec<V>,
    indices: Vec<u16>,
}

impl<V> Mesh<V> {
    /// Largest vertex count addressable by `u16` indices.
    pub const MAX_VERTICES: usize = u16::MAX as usize + 1;

    pub fn new(vertices: Vec<V>, indices: Vec<u16>) -> Result<Self, GeometryError> {
        if vertices.len() > Self::MAX_VERTICES {
            return Err(GeometryError::TooManyVertices {
                count: vertices.len() as u128,
            });
        }
        if indices.len() % 3 != 0 {
            return Err(GeometryError::PartialTriangle(indices.len()));
        }
        if let Some(&index) = indices.iter().find(|&&i| usize::from(i) >= vertices.len()) {
            return Err(GeometryError::IndexOutOfRange {
                index,
                vertex_count: vertices.len(),
            });
        }

        Ok(Self { vertices, indices })
    }

    #[inline]
    pub fn vertices(&self) -> &[V] {
        &self.vertices
    }

    #[inline]
    pub fn indices(&self) -> &[u16] {
        &self.indices
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Index count as the draw call expects it.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
