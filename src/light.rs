//! The shadow-casting point light.
//!
//! The light sits at a movable position and always looks at the teapot's
//! resting place. Each frame its view and projection are computed once into
//! a [`LightSpace`], which both the depth capture and the shadow lookup read,
//! so the two passes can never disagree about the light transform.

use crate::config::ShadowConfig;
use crate::math::{Mat4, Vec3};
use crate::projection::Projection;

/// Point the light looks at.
pub const LIGHT_TARGET: Vec3 = Vec3::new(0.0, 2.5, 0.0);
/// Starting light position.
pub const DEFAULT_LIGHT_POSITION: Vec3 = Vec3::new(2.0, 6.5, 0.0);

/// A point light with a perspective frustum for shadow capture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    /// Diffuse intensity (the light is white).
    pub diffuse: f32,
}

impl PointLight {
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            target: LIGHT_TARGET,
            up: Vec3::Y,
            diffuse: 1.0,
        }
    }

    /// World-to-light look-at transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at(self.position, self.target, self.up)
    }

    /// Lambert term at `point` for a surface with normal `normal`.
    ///
    /// One-sided: surfaces facing away from the light get zero.
    pub fn diffuse_factor(&self, point: Vec3, normal: Vec3) -> f32 {
        let to_light = (self.position - point).normalize();
        normal.normalize().dot(to_light).max(0.0) * self.diffuse
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(DEFAULT_LIGHT_POSITION)
    }
}

/// Light transforms for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSpace {
    pub view: Mat4,
    pub projection: Mat4,
    /// `bias * projection * view`: world space to depth-target texture space.
    pub shadow_matrix: Mat4,
}

impl LightSpace {
    pub fn new(light: &PointLight, frustum: &Projection) -> Self {
        let view = light.view_matrix();
        let projection = frustum.matrix();
        Self {
            view,
            projection,
            shadow_matrix: Mat4::shadow_bias() * projection * view,
        }
    }
}

/// Light frustum described by the shadow configuration.
pub fn light_frustum(config: &ShadowConfig) -> Projection {
    Projection::from_degrees(
        config.light_fov_degrees,
        config.light_aspect,
        config.light_near,
        config.light_far,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec4;
    use approx::assert_relative_eq;

    #[test]
    fn light_looks_down_negative_z_at_its_target() {
        let light = PointLight::default();
        let target_in_light = light.view_matrix().transform_point(LIGHT_TARGET);
        let distance = (LIGHT_TARGET - light.position).magnitude();
        assert_relative_eq!(target_in_light.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target_in_light.y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(target_in_light.z, -distance, epsilon = 1e-5);
    }

    #[test]
    fn target_projects_to_center_of_texture_space() {
        let light = PointLight::default();
        let space = LightSpace::new(&light, &light_frustum(&ShadowConfig::default()));
        let coord = (space.shadow_matrix * Vec4::point(LIGHT_TARGET))
            .perspective_divide()
            .unwrap();
        assert_relative_eq!(coord.x, 0.5, epsilon = 1e-5);
        assert_relative_eq!(coord.y, 0.5, epsilon = 1e-5);
        assert!(coord.z > 0.0 && coord.z < 1.0);
    }

    #[test]
    fn diffuse_is_one_sided() {
        let light = PointLight::new(Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(light.diffuse_factor(Vec3::ZERO, Vec3::Y), 1.0);
        assert_eq!(light.diffuse_factor(Vec3::ZERO, -Vec3::Y), 0.0);
    }
}
