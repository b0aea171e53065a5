use super::{Mesh, QuadVertex};

/// Unit quad covering `[-1, 1]²`, two counter-clockwise triangles.
pub fn quad() -> Mesh<QuadVertex> {
    let vertices = vec![
        QuadVertex { corner: [-1.0, -1.0] },
        QuadVertex { corner: [1.0, -1.0] },
        QuadVertex { corner: [1.0, 1.0] },
        QuadVertex { corner: [-1.0, 1.0] },
    ];
    let indices = vec![0, 1, 2, 2, 3, 0];

    Mesh::new(vertices, indices).expect("quad mesh is well-formed by construction")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_is_two_triangles() {
        let mesh = quad();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
    }
}
