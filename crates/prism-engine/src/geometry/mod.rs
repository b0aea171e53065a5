//! Geometry builders.
//!
//! Pure functions from shape parameters to a [`Mesh`]: no GPU access, no
//! hidden state. Calling a builder twice with the same input yields
//! bit-identical vertex and index data.

mod cube;
mod error;
mod mesh;
mod quad;
mod sphere;
mod vertex;

pub use cube::cube;
pub use error::GeometryError;
pub use mesh::Mesh;
pub use quad::quad;
pub use sphere::{sphere, sphere_color, SphereParams};
pub use vertex::{ColorVertex, MeshVertex, QuadVertex, ShadedVertex};
