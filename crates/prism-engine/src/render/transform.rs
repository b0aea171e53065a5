use bytemuck::{Pod, Zeroable};
use glam::{Mat3, Mat4, Vec3};

/// Per-frame transforms. Computed, uploaded, discarded.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TransformSet {
    /// Object space → clip space.
    pub mvp: Mat4,
    /// Inverse-transpose of the model's upper 3×3; present for shaded meshes.
    pub normal: Option<Mat3>,
}

/// Fixed camera orbiting nothing: the model spins about `axis`, the eye sits
/// `distance` units down +Z looking at the origin.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct SceneCamera {
    pub axis: Vec3,
    pub distance: f32,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Whether to compute a normal matrix.
    pub normals: bool,
}

impl SceneCamera {
    /// Cube demo: tumbling about (1, 1, 0), 60° field of view.
    pub fn cube() -> Self {
        Self {
            axis: Vec3::new(1.0, 1.0, 0.0),
            distance: 5.0,
            fov_y: 60f32.to_radians(),
            near: 0.1,
            far: 100.0,
            normals: false,
        }
    }

    /// Sphere demo: spinning about Y, 45° field of view, with normals.
    pub fn sphere() -> Self {
        Self {
            axis: Vec3::Y,
            distance: 3.0,
            fov_y: std::f32::consts::FRAC_PI_4,
            near: 0.1,
            far: 100.0,
            normals: true,
        }
    }

    pub fn model(&self, angle: f32) -> Mat4 {
        let axis = self.axis.try_normalize().unwrap_or(Vec3::Y);
        Mat4::from_axis_angle(axis, angle)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.distance))
    }

    pub fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, aspect.max(1e-3), self.near, self.far)
    }

    pub fn transforms(&self, angle: f32, aspect: f32) -> TransformSet {
        let model = self.model(angle);
        let mvp = self.projection(aspect) * self.view() * model;
        let normal = self
            .normals
            .then(|| Mat3::from_mat4(model).inverse().transpose());

        TransformSet { mvp, normal }
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::cube()
    }
}

/// Uniform block shared by the mesh programs (112 bytes):
///
///  offset  0  mvp      mat4x4<f32>
///  offset 64  normal   mat3x3<f32>  (three 16-byte columns)
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct MeshUniforms {
    pub mvp: [[f32; 4]; 4],
    pub normal: [[f32; 4]; 3],
}

impl From<&TransformSet> for MeshUniforms {
    fn from(t: &TransformSet) -> Self {
        let n = t.normal.unwrap_or(Mat3::IDENTITY);
        Self {
            mvp: t.mvp.to_cols_array_2d(),
            normal: [
                n.x_axis.extend(0.0).to_array(),
                n.y_axis.extend(0.0).to_array(),
                n.z_axis.extend(0.0).to_array(),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        assert_eq!(std::mem::size_of::<MeshUniforms>(), 112);
    }

    #[test]
    fn origin_lands_at_camera_distance() {
        let t = SceneCamera::cube().transforms(0.7, 1.5);
        let clip = t.mvp * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!((clip.w - 5.0).abs() < 1e-5);
        assert!(clip.x.abs() < 1e-5 && clip.y.abs() < 1e-5);
        let depth = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&depth));
    }

    #[test]
    fn cube_has_no_normal_matrix() {
        assert!(SceneCamera::cube().transforms(0.3, 1.0).normal.is_none());
    }

    #[test]
    fn normal_matrix_equals_rotation_for_rigid_model() {
        let camera = SceneCamera::sphere();
        let angle = 1.1;
        let normal = camera.transforms(angle, 1.0).normal.unwrap();
        let rotation = Mat3::from_mat4(camera.model(angle));
        for v in [Vec3::X, Vec3::Y, Vec3::Z] {
            assert!(approx(normal * v, rotation * v));
        }
    }

    #[test]
    fn rotation_about_y_moves_x_towards_minus_z() {
        let camera = SceneCamera::sphere();
        let model = camera.model(std::f32::consts::FRAC_PI_2);
        assert!(approx(model.transform_vector3(Vec3::X), Vec3::NEG_Z));
    }

    #[test]
    fn zero_axis_falls_back_to_y() {
        let camera = SceneCamera { axis: Vec3::ZERO, ..SceneCamera::sphere() };
        let model = camera.model(0.5);
        assert!(approx(model.transform_vector3(Vec3::Y), Vec3::Y));
    }

    #[test]
    fn missing_normal_matrix_uploads_identity() {
        let t = SceneCamera::cube().transforms(0.0, 1.0);
        let u = MeshUniforms::from(&t);
        assert_eq!(u.normal[0], [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(u.normal[2], [0.0, 0.0, 1.0, 0.0]);
    }
}
