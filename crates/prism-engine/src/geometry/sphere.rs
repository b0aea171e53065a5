use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::{GeometryError, Mesh, ShadedVertex};

/// UV-sphere parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SphereParams {
    pub radius: f32,
    /// Latitude bands, pole to pole.
    pub rings: u32,
    /// Longitude slices around the Y axis.
    pub sectors: u32,
}

impl Default for SphereParams {
    fn default() -> Self {
        Self {
            radius: 0.5,
            rings: 40,
            sectors: 40,
        }
    }
}

/// Builds a UV-sphere centered at the origin.
///
/// Vertex grid is `(rings + 1) × (sectors + 1)`: the last sector column
/// duplicates the first one's positions and is not stitched back to it.
/// Index count is `rings × sectors × 6`.
///
/// Zero rings or sectors, a non-positive radius, and grids too large for
/// 16-bit indices are rejected.
pub fn sphere(params: SphereParams) -> Result<Mesh<ShadedVertex>, GeometryError> {
    let SphereParams { radius, rings, sectors } = params;

    if !radius.is_finite() || radius <= 0.0 {
        return Err(GeometryError::InvalidRadius(radius));
    }
    if rings == 0 {
        return Err(GeometryError::ZeroRings);
    }
    if sectors == 0 {
        return Err(GeometryError::ZeroSectors);
    }

    // (u32::MAX + 1)² does not fit in u64.
    let count = (u128::from(rings) + 1) * (u128::from(sectors) + 1);
    if count > Mesh::<ShadedVertex>::MAX_VERTICES as u128 {
        return Err(GeometryError::TooManyVertices { count });
    }
    let count = count as usize;
    let columns = sectors as usize + 1;

    let mut vertices = Vec::with_capacity(count);
    for ring in 0..=rings {
        let phi = PI * ring as f32 / rings as f32;
        let (sin_phi, cos_phi) = phi.sin_cos();

        for sector in 0..=sectors {
            let theta = TAU * sector as f32 / sectors as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            let direction = Vec3::new(sin_phi * cos_theta, cos_phi, sin_phi * sin_theta);
            let normal = direction.normalize();

            vertices.push(ShadedVertex {
                position: (direction * radius).to_array(),
                normal: normal.to_array(),
                color: sphere_color(normal),
            });
        }
    }

    let mut indices = Vec::with_capacity(rings as usize * sectors as usize * 6);
    for ring in 0..rings as usize {
        for sector in 0..sectors as usize {
            let first = (ring * columns + sector) as u16;
            let second = first + columns as u16;

            indices.extend_from_slice(&[first, second, first + 1]);
            indices.extend_from_slice(&[second, second + 1, first + 1]);
        }
    }

    Mesh::new(vertices, indices)
}

/// Smooth gradient derived from a unit normal, each channel clamped to `[0, 1]`.
pub fn sphere_color(normal: Vec3) -> [f32; 4] {
    [
        (0.3 + (normal.x + 1.0) * 0.35).clamp(0.0, 1.0),
        (0.4 + (normal.y + 1.0) * 0.3).clamp(0.0, 1.0),
        (0.6 + (normal.z + 1.0) * 0.4).clamp(0.0, 1.0),
        1.0,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(radius: f32, rings: u32, sectors: u32) -> SphereParams {
        SphereParams { radius, rings, sectors }
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn small_sphere_scenario() {
        let mesh = sphere(params(1.0, 2, 4)).unwrap();
        assert_eq!(mesh.vertex_count(), 15);
        assert_eq!(mesh.index_count(), 48);
        assert!(mesh.indices().iter().all(|&i| usize::from(i) < 15));
    }

    #[test]
    fn counts_follow_grid_formula() {
        for (rings, sectors) in [(1, 1), (3, 7), (60, 60), (17, 5)] {
            let mesh = sphere(params(0.3, rings, sectors)).unwrap();
            let (r, s) = (rings as usize, sectors as usize);
            assert_eq!(mesh.vertex_count(), (r + 1) * (s + 1));
            assert_eq!(mesh.index_count() as usize, r * s * 6);
        }
    }

    // ── vertex attributes ─────────────────────────────────────────────────

    #[test]
    fn normals_are_unit_length() {
        let mesh = sphere(params(2.5, 24, 36)).unwrap();
        for v in mesh.vertices() {
            let len = Vec3::from_array(v.normal).length();
            assert!((len - 1.0).abs() < 1e-5, "normal length {len}");
        }
    }

    #[test]
    fn positions_lie_on_the_radius() {
        let mesh = sphere(params(0.3, 12, 12)).unwrap();
        for v in mesh.vertices() {
            let len = Vec3::from_array(v.position).length();
            assert!((len - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn first_ring_is_the_north_pole() {
        let mesh = sphere(params(1.0, 4, 4)).unwrap();
        let pole = mesh.vertices()[0];
        assert!((pole.position[1] - 1.0).abs() < 1e-6);
        assert!((pole.normal[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn colors_stay_in_unit_range() {
        let mesh = sphere(params(1.0, 30, 30)).unwrap();
        for v in mesh.vertices() {
            assert!(v.color.iter().all(|c| (0.0..=1.0).contains(c)), "{:?}", v.color);
        }
    }

    #[test]
    fn color_map_is_bounded_for_extreme_normals() {
        for n in [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z] {
            let c = sphere_color(n);
            assert!(c.iter().all(|c| (0.0..=1.0).contains(c)));
        }
    }

    // ── seam ──────────────────────────────────────────────────────────────

    #[test]
    fn seam_column_duplicates_first_column() {
        let mesh = sphere(params(1.0, 4, 8)).unwrap();
        let columns = 9;
        for ring in 0..=4 {
            let first = mesh.vertices()[ring * columns].position;
            let last = mesh.vertices()[ring * columns + 8].position;
            for axis in 0..3 {
                assert!((first[axis] - last[axis]).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn last_cell_uses_seam_column_not_wraparound() {
        let mesh = sphere(params(1.0, 1, 4)).unwrap();
        // Cell (ring 0, sector 3): first = 3, second = 8.
        assert_eq!(&mesh.indices()[18..], &[3, 8, 4, 8, 9, 4]);
    }

    // ── purity + rejection ────────────────────────────────────────────────

    #[test]
    fn builder_is_pure() {
        let a = sphere(params(0.7, 13, 21)).unwrap();
        let b = sphere(params(0.7, 13, 21)).unwrap();
        let bytes_a: &[u8] = bytemuck::cast_slice(a.vertices());
        let bytes_b: &[u8] = bytemuck::cast_slice(b.vertices());
        assert_eq!(bytes_a, bytes_b);
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn zero_rings_rejected() {
        assert_eq!(sphere(params(1.0, 0, 4)).unwrap_err(), GeometryError::ZeroRings);
    }

    #[test]
    fn zero_sectors_rejected() {
        assert_eq!(sphere(params(1.0, 4, 0)).unwrap_err(), GeometryError::ZeroSectors);
    }

    #[test]
    fn bad_radius_rejected() {
        assert!(matches!(sphere(params(0.0, 4, 4)), Err(GeometryError::InvalidRadius(_))));
        assert!(matches!(sphere(params(f32::NAN, 4, 4)), Err(GeometryError::InvalidRadius(_))));
    }

    #[test]
    fn oversized_grid_rejected() {
        let err = sphere(params(1.0, 300, 300)).unwrap_err();
        assert_eq!(err, GeometryError::TooManyVertices { count: 301 * 301 });
    }

    #[test]
    fn huge_grid_reports_exact_vertex_count() {
        let err = sphere(params(1.0, u32::MAX, u32::MAX)).unwrap_err();
        let side = u128::from(u32::MAX) + 1;
        assert_eq!(err, GeometryError::TooManyVertices { count: side * side });
        assert!(err.to_string().starts_with("18446744073709551616 vertices"));
    }

    #[test]
    fn largest_addressable_grid_is_accepted() {
        // 256 × 256 = 65536 vertices, exactly the u16 limit.
        let mesh = sphere(params(1.0, 255, 255)).unwrap();
        assert_eq!(mesh.vertex_count(), 65536);
        assert_eq!(*mesh.indices().iter().max().unwrap(), u16::MAX);
    }
}
