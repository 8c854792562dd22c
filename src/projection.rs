//! Camera and light projections.
//!
//! [`Projection`] is a symmetric perspective frustum, used both for the
//! perspective view and for the light. [`OrthoProjection`] is the box behind
//! the three axis-aligned views.

use crate::math::{Mat4, Vec3};

/// Symmetric perspective frustum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Vertical field of view, radians.
    fov_y: f32,
    aspect_ratio: f32,
    z_near: f32,
    z_far: f32,
}

impl Projection {
    /// `fov_y` in radians; `0 < z_near < z_far`.
    pub fn new(fov_y: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self {
            fov_y,
            aspect_ratio,
            z_near,
            z_far,
        }
    }

    pub fn from_degrees(fov_y_degrees: f32, aspect_ratio: f32, z_near: f32, z_far: f32) -> Self {
        Self::new(fov_y_degrees.to_radians(), aspect_ratio, z_near, z_far)
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn z_near(&self) -> f32 {
        self.z_near
    }

    pub fn z_far(&self) -> f32 {
        self.z_far
    }

    /// `gluPerspective`-style matrix mapping eye space to clip space.
    pub fn matrix(&self) -> Mat4 {
        Mat4::perspective(self.fov_y, self.aspect_ratio, self.z_near, self.z_far)
    }

    /// Eye-space corners of the frustum outline, near rectangle first.
    ///
    /// Each rectangle has half-width `spread * distance * tan(fov_y / 2)` and
    /// half-height of that over the aspect ratio; the far one is further
    /// scaled by `far_scale`. With `spread` equal to the aspect ratio the
    /// corners sit exactly on the frustum edges. Corner order within each
    /// rectangle is bottom-left, bottom-right, top-right, top-left.
    pub fn outline_corners(&self, spread: f32, far_scale: f32) -> [Vec3; 8] {
        let tan = (self.fov_y / 2.0).tan();
        let rect = |distance: f32, scale: f32| {
            let half_w = scale * spread * distance * tan;
            let half_h = half_w / self.aspect_ratio;
            [
                Vec3::new(-half_w, -half_h, -distance),
                Vec3::new(half_w, -half_h, -distance),
                Vec3::new(half_w, half_h, -distance),
                Vec3::new(-half_w, half_h, -distance),
            ]
        };
        let near = rect(self.z_near, 1.0);
        let far = rect(self.z_far, far_scale);
        [near[0], near[1], near[2], near[3], far[0], far[1], far[2], far[3]]
    }
}

/// Symmetric orthographic box (`glOrtho(-hw, hw, -hh, hh, near, far)`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoProjection {
    pub half_width: f32,
    pub half_height: f32,
    pub z_near: f32,
    pub z_far: f32,
}

impl OrthoProjection {
    /// Viewport pixels per unit of half-extent.
    pub const PIXELS_PER_UNIT: u32 = 50;

    /// Box sized from a viewport.
    ///
    /// The extents are whole units, as with integer viewport division.
    pub fn for_viewport(width: u32, height: u32) -> Self {
        Self {
            half_width: (width / Self::PIXELS_PER_UNIT) as f32,
            half_height: (height / Self::PIXELS_PER_UNIT) as f32,
            z_near: -40.0,
            z_far: 40.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::orthographic(
            -self.half_width,
            self.half_width,
            -self.half_height,
            self.half_height,
            self.z_near,
            self.z_far,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;
    use std::f32::consts::FRAC_PI_4;

    #[test]
    fn near_and_far_planes_map_to_the_depth_range_ends() {
        let proj = Projection::new(FRAC_PI_4, 4.0 / 3.0, 0.5, 20.0);
        let m = proj.matrix();
        let near = (m * Vec4::point(Vec3::new(0.0, 0.0, -0.5))).perspective_divide().unwrap();
        let far = (m * Vec4::point(Vec3::new(0.0, 0.0, -20.0))).perspective_divide().unwrap();
        assert_relative_eq!(near.z, -1.0, epsilon = 1e-5);
        assert_relative_eq!(far.z, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn from_degrees_converts_correctly() {
        let proj = Projection::from_degrees(45.0, 1.0, 0.1, 100.0);
        assert_relative_eq!(proj.fov_y(), FRAC_PI_4, epsilon = 1e-6);
    }

    #[test]
    fn aspect_spread_outline_corners_lie_on_the_frustum() {
        let proj = Projection::from_degrees(45.0, 4.0 / 3.0, 0.1, 100.0);
        let m = proj.matrix();
        for corner in proj.outline_corners(proj.aspect_ratio(), 1.0) {
            let ndc = (m * Vec4::point(corner)).perspective_divide().unwrap();
            assert_relative_eq!(ndc.x.abs(), 1.0, epsilon = 1e-3);
            assert_relative_eq!(ndc.y.abs(), 1.0, epsilon = 1e-3);
            assert_relative_eq!(ndc.z.abs(), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn ortho_box_uses_whole_units() {
        let ortho = OrthoProjection::for_viewport(320, 240);
        assert_eq!(ortho.half_width, 6.0);
        assert_eq!(ortho.half_height, 4.0);
    }
}
