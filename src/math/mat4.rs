//! 4x4 transformation matrix using column-major convention.
//!
//! # Convention
//! - Vectors are **column vectors** on the right: `Mat4 * Vec`
//! - Translation is stored in the **last column**
//! - Transforms chain **right-to-left**: `A * B * v` applies B first, then A
//!
//! The constructors reproduce the classic fixed-function helpers
//! (`glTranslate`, `glRotate`, `gluPerspective`, `glOrtho`, `gluLookAt`) so
//! that matrix stacks written against that API read the same here:
//!
//! ```ignore
//! // glTranslatef(0, -2, -z); glRotatef(-spin_y, 1, 0, 0);
//! let view = Mat4::translation(0.0, -2.0, -z) * Mat4::rotation_x(-spin_y.to_radians());
//! ```

use std::ops::Mul;

use super::vec3::Vec3;
use super::vec4::Vec4;

/// 4x4 matrix stored as `data[row][col]` with column-major convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    data: [[f32; 4]; 4],
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mat4 {
    pub const fn new(data: [[f32; 4]; 4]) -> Self {
        Mat4 { data }
    }

    pub const fn identity() -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [1.0, 0.0, 0.0, x],
            [0.0, 1.0, 0.0, y],
            [0.0, 0.0, 1.0, z],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn translation_v(v: Vec3) -> Self {
        Self::translation(v.x, v.y, v.z)
    }

    pub fn scaling(x: f32, y: f32, z: f32) -> Self {
        Mat4::new([
            [x, 0.0, 0.0, 0.0],
            [0.0, y, 0.0, 0.0],
            [0.0, 0.0, z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +X (looking down the axis).
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Counter-clockwise rotation around +Y.
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Mat4::new([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Rotation by `angle` radians around an arbitrary axis (`glRotate`).
    pub fn rotation_axis(angle: f32, axis: Vec3) -> Self {
        let Vec3 { x, y, z } = axis.normalize();
        let (s, c) = angle.sin_cos();
        let t = 1.0 - c;
        Mat4::new([
            [x * x * t + c, x * y * t - z * s, x * z * t + y * s, 0.0],
            [y * x * t + z * s, y * y * t + c, y * z * t - x * s, 0.0],
            [x * z * t - y * s, y * z * t + x * s, z * z * t + c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed perspective projection (`gluPerspective`).
    ///
    /// `fov_y` is in radians. Eye-space depths `-near` and `-far` map to NDC
    /// `-1` and `+1`.
    pub fn perspective(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let f = 1.0 / (fov_y / 2.0).tan();
        let depth = near - far;
        Mat4::new([
            [f / aspect_ratio, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) / depth, 2.0 * far * near / depth],
            [0.0, 0.0, -1.0, 0.0],
        ])
    }

    /// Orthographic projection (`glOrtho`).
    pub fn orthographic(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Self {
        Mat4::new([
            [2.0 / (right - left), 0.0, 0.0, -(right + left) / (right - left)],
            [0.0, 2.0 / (top - bottom), 0.0, -(top + bottom) / (top - bottom)],
            [0.0, 0.0, -2.0 / (far - near), -(far + near) / (far - near)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Right-handed view matrix (`gluLookAt`).
    ///
    /// The eye ends up at the origin looking down `-Z` with `up` projected
    /// onto `+Y`.
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let forward = (target - eye).normalize();
        let side = forward.cross(up).normalize();
        let up = side.cross(forward);

        Self::new([
            [side.x, side.y, side.z, -side.dot(eye)],
            [up.x, up.y, up.z, -up.dot(eye)],
            [-forward.x, -forward.y, -forward.z, forward.dot(eye)],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Maps clip-space `[-1, 1]` on all three axes onto texture space `[0, 1]`.
    ///
    /// Equivalent to `glTranslatef(0.5, 0.5, 0.5); glScalef(0.5, 0.5, 0.5)`.
    pub fn shadow_bias() -> Self {
        Self::translation(0.5, 0.5, 0.5) * Self::scaling(0.5, 0.5, 0.5)
    }

    pub fn transpose(&self) -> Self {
        let mut data = [[0.0f32; 4]; 4];
        for (row, values) in data.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = self.data[col][row];
            }
        }
        Mat4::new(data)
    }

    /// Transform a point (w = 1) and drop the resulting w.
    ///
    /// Only meaningful for affine matrices; use `* Vec4` for projections.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        (*self * Vec4::point(p)).xyz()
    }

    /// Transform a direction (w = 0); translation is ignored.
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        (*self * Vec4::direction(v)).xyz()
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }
}

/// Matrix multiplication: Mat4 * Mat4.
///
/// For column-major convention, `A * B * v` applies B first, then A.
impl Mul<Mat4> for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Self::Output {
        let mut result = [[0.0f32; 4]; 4];

        for (row, values) in result.iter_mut().enumerate() {
            for (col, value) in values.iter_mut().enumerate() {
                *value = (0..4).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }

        Mat4::new(result)
    }
}

/// Transform a Vec4 by a matrix: Mat4 * Vec4 (column vector).
impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    fn mul(self, v: Vec4) -> Self::Output {
        let row = |r: [f32; 4]| r[0] * v.x + r[1] * v.y + r[2] * v.z + r[3] * v.w;
        Vec4::new(
            row(self.data[0]),
            row(self.data[1]),
            row(self.data[2]),
            row(self.data[3]),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_2;

    fn assert_vec3_eq(a: Vec3, b: Vec3) {
        assert_relative_eq!(a.x, b.x, epsilon = 1e-5);
        assert_relative_eq!(a.y, b.y, epsilon = 1e-5);
        assert_relative_eq!(a.z, b.z, epsilon = 1e-5);
    }

    #[test]
    fn rotation_x_turns_y_into_z() {
        let v = Mat4::rotation_x(FRAC_PI_2).transform_vector(Vec3::Y);
        assert_vec3_eq(v, Vec3::Z);
    }

    #[test]
    fn rotation_y_turns_z_into_x() {
        let v = Mat4::rotation_y(FRAC_PI_2).transform_vector(Vec3::Z);
        assert_vec3_eq(v, Vec3::X);
    }

    #[test]
    fn rotation_axis_matches_principal_rotations() {
        let a = Mat4::rotation_axis(0.7, Vec3::Y);
        let b = Mat4::rotation_y(0.7);
        let p = Vec3::new(1.0, 2.0, 3.0);
        assert_vec3_eq(a.transform_point(p), b.transform_point(p));
    }

    #[test]
    fn perspective_maps_near_and_far_to_ndc_bounds() {
        let proj = Mat4::perspective(75f32.to_radians(), 4.0 / 3.0, 0.1, 100.0);
        let near = (proj * Vec4::new(0.0, 0.0, -0.1, 1.0)).perspective_divide().unwrap();
        let far = (proj * Vec4::new(0.0, 0.0, -100.0, 1.0)).perspective_divide().unwrap();
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-4);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn orthographic_maps_box_to_unit_cube() {
        let ortho = Mat4::orthographic(-4.0, 4.0, -3.0, 3.0, -40.0, 40.0);
        assert_vec3_eq(ortho.transform_point(Vec3::new(4.0, 3.0, -40.0)), Vec3::ONE);
        assert_vec3_eq(ortho.transform_point(Vec3::new(-4.0, -3.0, 40.0)), -Vec3::ONE);
    }

    #[test]
    fn look_at_places_target_on_negative_z() {
        let eye = Vec3::new(2.0, 6.5, 0.0);
        let target = Vec3::new(0.0, 2.5, 0.0);
        let view = Mat4::look_at(eye, target, Vec3::Y);

        assert_vec3_eq(view.transform_point(eye), Vec3::ZERO);
        let t = view.transform_point(target);
        assert_relative_eq!(t.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(t.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(t.z, -(target - eye).magnitude(), epsilon = 1e-5);
    }

    #[test]
    fn shadow_bias_maps_clip_cube_to_unit_cube() {
        let bias = Mat4::shadow_bias();
        assert_vec3_eq(bias.transform_point(-Vec3::ONE), Vec3::ZERO);
        assert_vec3_eq(bias.transform_point(Vec3::ONE), Vec3::ONE);
        assert_vec3_eq(bias.transform_point(Vec3::ZERO), Vec3::ONE * 0.5);
    }

    #[test]
    fn transpose_is_an_involution() {
        let m = Mat4::look_at(Vec3::new(1.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y);
        assert_eq!(m.transpose().transpose(), m);
        assert_eq!(m.transpose().get(0, 3), m.get(3, 0));
    }
}
