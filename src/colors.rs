//! Color helpers.
//!
//! Pixels are stored packed as ARGB8888 `u32` (the SDL streaming texture
//! format). Shading math runs on [`Color`], a linear RGB triple in `[0, 1]`.

use std::ops::{Add, Mul};

/// Sky blue used as clear color and linear fog color.
pub const BACKGROUND: u32 = 0xFF5987B3;
/// Gray used as clear color and exponential fog color in the alternate fog mode.
pub const FOG_GRAY: u32 = 0xFF808080;

pub const RED: Color = Color::new(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::new(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::new(0.0, 0.0, 1.0);
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
/// Pale yellow of the light marker sphere.
pub const LIGHT_MARKER: Color = Color::new(1.0, 1.0, 0.5);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(value: f32) -> Self {
        Self::new(value, value, value)
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_argb(self) -> u32 {
        pack_color(self.r, self.g, self.b, 1.0)
    }

    pub fn from_argb(color: u32) -> Self {
        let (r, g, b) = unpack_color(color);
        Self::new(r, g, b)
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        Color::new(self.r + rhs.r, self.g + rhs.g, self.b + rhs.b)
    }
}

impl Mul<f32> for Color {
    type Output = Color;

    fn mul(self, rhs: f32) -> Color {
        Color::new(self.r * rhs, self.g * rhs, self.b * rhs)
    }
}

/// Component-wise product (material times light).
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        Color::new(self.r * rhs.r, self.g * rhs.g, self.b * rhs.b)
    }
}

#[inline]
fn to_channel(value: f32) -> u32 {
    (value.clamp(0.0, 1.0) * 255.0 + 0.5) as u32
}

/// Packs `[0, 1]` floats into ARGB8888, clamping out-of-range values.
#[inline]
pub fn pack_color(r: f32, g: f32, b: f32, a: f32) -> u32 {
    (to_channel(a) << 24) | (to_channel(r) << 16) | (to_channel(g) << 8) | to_channel(b)
}

/// Unpacks the RGB channels of an ARGB8888 value into `[0, 1]` floats.
#[inline]
pub fn unpack_color(color: u32) -> (f32, f32, f32) {
    let r = ((color >> 16) & 0xFF) as f32 / 255.0;
    let g = ((color >> 8) & 0xFF) as f32 / 255.0;
    let b = (color & 0xFF) as f32 / 255.0;
    (r, g, b)
}

/// Alpha-blends `src` over `dst` (`GL_SRC_ALPHA, GL_ONE_MINUS_SRC_ALPHA`).
#[inline]
pub fn blend(dst: u32, src: Color, alpha: f32) -> u32 {
    Color::from_argb(dst).lerp(src, alpha.clamp(0.0, 1.0)).to_argb()
}
