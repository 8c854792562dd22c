//! Triangle and line rasterization.
//!
//! The rasterizer turns window-space primitives into fragments. It owns the
//! fixed-function parts (coverage, depth interpolation, polygon offset, depth
//! test) and hands each surviving fragment to a [`FragmentShader`] for its
//! color, the same split a GPU makes between rasterizer and fragment program.
//!
//! Everything here works in window coordinates: x right, y **up**, depth in
//! `[0, 1]` with smaller values closer.

mod edgefunction;
mod line;
mod shader;

pub use edgefunction::EdgeFunctionRasterizer;
pub use line::LineStyle;
pub use shader::{DepthOnlyShader, FragmentShader, UnlitShader};

use crate::colors::Color;
use crate::math::Vec3;

/// Smallest depth step of a 24-bit depth buffer, the unit of the constant
/// polygon offset term.
pub const DEPTH_RESOLUTION: f32 = 1.0 / 16_777_216.0;

/// Anything the rasterizer can draw into.
///
/// Coordinates are window pixels with `(0, 0)` at the bottom-left. Callers
/// guarantee `x < width` and `y < height`.
pub trait RasterTarget {
    fn size(&self) -> (u32, u32);

    /// Depth test (`LESS`): whether a fragment at `depth` is closer than what
    /// is stored.
    fn depth_passes(&self, x: u32, y: u32, depth: f32) -> bool;

    /// Stores depth and color. `coverage` below 1 blends the color over the
    /// existing pixel.
    fn write(&mut self, x: u32, y: u32, depth: f32, color: Color, coverage: f32);
}

/// Per-vertex attributes interpolated across a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Varyings {
    /// World-space position, used for the light-space shadow lookup.
    pub world: Vec3,
    /// World-space normal (not renormalized by interpolation).
    pub normal: Vec3,
    /// Base color for unlit primitives.
    pub color: Color,
    /// Distance from the eye along the view axis, used for fog.
    pub eye_depth: f32,
}

impl Varyings {
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            world: self.world.lerp(other.world, t),
            normal: self.normal.lerp(other.normal, t),
            color: self.color.lerp(other.color, t),
            eye_depth: self.eye_depth + (other.eye_depth - self.eye_depth) * t,
        }
    }

    /// Weighted sum of three attribute sets. Weights should sum to 1.
    #[inline]
    pub fn blend(v: [&Varyings; 3], w: [f32; 3]) -> Self {
        Self {
            world: v[0].world * w[0] + v[1].world * w[1] + v[2].world * w[2],
            normal: v[0].normal * w[0] + v[1].normal * w[1] + v[2].normal * w[2],
            color: v[0].color * w[0] + v[1].color * w[1] + v[2].color * w[2],
            eye_depth: v[0].eye_depth * w[0] + v[1].eye_depth * w[1] + v[2].eye_depth * w[2],
        }
    }
}

/// A vertex after clipping, perspective divide and viewport mapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenVertex {
    /// Window x/y in pixels, z in the `[0, 1]` depth range.
    pub window: Vec3,
    /// Reciprocal of clip-space w, for perspective-correct interpolation.
    pub inv_w: f32,
    pub varyings: Varyings,
}

/// A rasterized sample that passed coverage and depth testing.
#[derive(Debug, Clone, Copy)]
pub struct Fragment {
    pub x: u32,
    pub y: u32,
    pub depth: f32,
    pub varyings: Varyings,
}

/// Depth offset applied to filled primitives (`glPolygonOffset`).
///
/// The offset is `factor * max_slope + units * DEPTH_RESOLUTION`, where
/// `max_slope` is the larger of the triangle's window-space depth gradients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonOffset {
    pub factor: f32,
    pub units: f32,
}

impl PolygonOffset {
    pub const fn new(factor: f32, units: f32) -> Self {
        Self { factor, units }
    }

    #[inline]
    pub fn offset(&self, max_slope: f32) -> f32 {
        self.factor * max_slope + self.units * DEPTH_RESOLUTION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn offset_combines_slope_and_units() {
        let offset = PolygonOffset::new(2.0, 2.0);
        assert_relative_eq!(offset.offset(0.0), 2.0 * DEPTH_RESOLUTION);
        assert_relative_eq!(offset.offset(0.01), 0.02 + 2.0 * DEPTH_RESOLUTION);
    }

    #[test]
    fn blend_with_unit_weight_selects_vertex() {
        let a = Varyings {
            eye_depth: 1.0,
            ..Default::default()
        };
        let b = Varyings {
            eye_depth: 5.0,
            color: Color::new(1.0, 0.0, 0.0),
            ..Default::default()
        };
        let mixed = Varyings::blend([&a, &b, &a], [0.0, 1.0, 0.0]);
        assert_eq!(mixed.eye_depth, 5.0);
        assert_eq!(mixed.color, b.color);
    }
}
