//! Fragment shaders.
//!
//! The rasterizer calls [`FragmentShader::shade`] once for every fragment that
//! survives the depth test, passing the perspective-correct interpolated
//! [`Varyings`](super::Varyings). Lit, shadow-receiving surfaces are shaded by
//! [`LitShader`](crate::render::shading::LitShader); the two shaders here cover
//! the depth-only capture pass and unlit geometry.

use super::Fragment;
use crate::colors::Color;
use crate::render::config::Fog;

pub trait FragmentShader {
    fn shade(&self, fragment: &Fragment) -> Color;
}

/// Writes no meaningful color; used when only depth matters.
pub struct DepthOnlyShader;

impl FragmentShader for DepthOnlyShader {
    #[inline]
    fn shade(&self, _fragment: &Fragment) -> Color {
        Color::BLACK
    }
}

/// Passes the interpolated vertex color through, optionally fogged.
///
/// Used for axis and frustum lines and the light marker, none of which take
/// part in lighting or shadowing.
pub struct UnlitShader {
    fog: Option<Fog>,
}

impl UnlitShader {
    pub fn new(fog: Option<Fog>) -> Self {
        Self { fog }
    }
}

impl FragmentShader for UnlitShader {
    #[inline]
    fn shade(&self, fragment: &Fragment) -> Color {
        let color = fragment.varyings.color;
        match &self.fog {
            Some(fog) => fog.apply(color, fragment.varyings.eye_depth),
            None => color,
        }
    }
}
