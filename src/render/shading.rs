//! Lighting for shadow-receiving surfaces.
//!
//! The lighting model is the fixed-function one with a single white point
//! light and no specular term:
//!
//! ```text
//! color = material.ambient * scene_ambient
//!       + material.diffuse * light.diffuse * max(N.L, 0) * visibility
//! ```
//!
//! `visibility` comes from the shadow lookup and is either 0 or 1, so a
//! shadowed fragment keeps its ambient term. Fog is applied last.

use super::config::Fog;
use super::rasterizer::{Fragment, FragmentShader};
use super::shadow::ShadowSampler;
use crate::colors::Color;
use crate::light::PointLight;

/// Surface reflectance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub ambient: Color,
    pub diffuse: Color,
}

impl Material {
    /// The fixed-function default: 0.2 ambient, 0.8 diffuse gray.
    pub const DEFAULT: Material = Material {
        ambient: Color::gray(0.2),
        diffuse: Color::gray(0.8),
    };
}

impl Default for Material {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Scene-wide ambient light intensity.
pub const SCENE_AMBIENT: Color = Color::gray(0.25);

/// Per-fragment diffuse lighting with an optional shadow lookup and fog.
pub struct LitShader<'a> {
    light: PointLight,
    material: Material,
    ambient: Color,
    shadow: Option<&'a ShadowSampler<'a>>,
    fog: Option<Fog>,
}

impl<'a> LitShader<'a> {
    pub fn new(light: PointLight) -> Self {
        Self {
            light,
            material: Material::DEFAULT,
            ambient: SCENE_AMBIENT,
            shadow: None,
            fog: None,
        }
    }

    pub fn with_shadow(mut self, sampler: &'a ShadowSampler<'a>) -> Self {
        self.shadow = Some(sampler);
        self
    }

    pub fn with_fog(mut self, fog: Option<Fog>) -> Self {
        self.fog = fog;
        self
    }
}

impl FragmentShader for LitShader<'_> {
    fn shade(&self, fragment: &Fragment) -> Color {
        let v = &fragment.varyings;
        let visibility = self
            .shadow
            .map(|sampler| sampler.visibility(v.world))
            .unwrap_or(1.0);

        let mut color = self.material.ambient * self.ambient;
        if visibility > 0.0 {
            let diffuse = self.light.diffuse_factor(v.world, v.normal) * visibility;
            color = color + self.material.diffuse * diffuse;
        }

        match &self.fog {
            Some(fog) => fog.apply(color, v.eye_depth),
            None => color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;
    use crate::render::rasterizer::Varyings;
    use approx::assert_relative_eq;

    fn fragment(world: Vec3, normal: Vec3) -> Fragment {
        Fragment {
            x: 0,
            y: 0,
            depth: 0.5,
            varyings: Varyings {
                world,
                normal,
                eye_depth: 5.0,
                ..Default::default()
            },
        }
    }

    #[test]
    fn surface_facing_the_light_gets_full_diffuse() {
        let shader = LitShader::new(PointLight::new(Vec3::new(0.0, 10.0, 0.0)));
        let color = shader.shade(&fragment(Vec3::ZERO, Vec3::Y));
        assert_relative_eq!(color.r, 0.2 * 0.25 + 0.8, epsilon = 1e-6);
    }

    #[test]
    fn surface_facing_away_keeps_only_ambient() {
        let shader = LitShader::new(PointLight::new(Vec3::new(0.0, 10.0, 0.0)));
        let color = shader.shade(&fragment(Vec3::ZERO, -Vec3::Y));
        assert_relative_eq!(color.g, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn fog_pulls_toward_fog_color() {
        let fog = Fog::exponential();
        let shader =
            LitShader::new(PointLight::new(Vec3::new(0.0, 10.0, 0.0))).with_fog(Some(fog));
        let color = shader.shade(&fragment(Vec3::ZERO, Vec3::Y));
        let unfogged = 0.85;
        let f = fog.factor(5.0);
        assert_relative_eq!(color.r, fog.color.r + (unfogged - fog.color.r) * f, epsilon = 1e-5);
    }
}
