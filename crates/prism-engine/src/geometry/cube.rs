use super::{ColorVertex, Mesh};

const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
const MAGENTA: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];

/// Four corners per face, faces in order front, back, left, right, top, bottom.
const FACES: [([[f32; 3]; 4], [f32; 4]); 6] = [
    (
        [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
        RED,
    ),
    (
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, 0.5, -0.5], [-0.5, 0.5, -0.5]],
        GREEN,
    ),
    (
        [[-0.5, -0.5, -0.5], [-0.5, -0.5, 0.5], [-0.5, 0.5, 0.5], [-0.5, 0.5, -0.5]],
        BLUE,
    ),
    (
        [[0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5]],
        YELLOW,
    ),
    (
        [[-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, 0.5, -0.5]],
        MAGENTA,
    ),
    (
        [[-0.5, -0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
        CYAN,
    ),
];

/// Two triangles per face, relative to the face's first vertex.
const FACE_INDICES: [[u16; 6]; 6] = [
    [0, 1, 2, 2, 3, 0], // front
    [0, 2, 1, 2, 0, 3], // back
    [0, 1, 2, 2, 3, 0], // left
    [0, 2, 1, 2, 0, 3], // right
    [0, 1, 2, 2, 3, 0], // top
    [0, 2, 1, 2, 0, 3], // bottom
];

/// Unit cube centered at the origin: 24 vertices, 36 indices.
///
/// Faces share no vertices so each carries its own flat color.
pub fn cube() -> Mesh<ColorVertex> {
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);

    for (face, ((corners, color), pattern)) in FACES.iter().zip(FACE_INDICES.iter()).enumerate() {
        let base = (face * 4) as u16;
        vertices.extend(corners.iter().map(|&position| ColorVertex {
            position,
            color: *color,
        }));
        indices.extend(pattern.iter().map(|&i| base + i));
    }

    Mesh::new(vertices, indices).expect("cube mesh is well-formed by construction")
}
