//! Per-frame pipeline configuration.
//!
//! Fog, clear color and line rasterization are resolved once per frame into a
//! [`RenderConfig`] before any drawing starts. The passes read it; nothing
//! toggles pipeline state while primitives are being drawn.

use crate::colors::{self, Color};
use crate::render::rasterizer::LineStyle;

/// How fog density grows with distance from the eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FogMode {
    /// `f = (end - z) / (end - start)`
    Linear { start: f32, end: f32 },
    /// `f = exp(-density * z)`
    Exp { density: f32 },
}

/// Distance fog blended toward a constant color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fog {
    pub mode: FogMode,
    pub color: Color,
}

impl Fog {
    pub const LINEAR_START: f32 = 1.0;
    pub const LINEAR_END: f32 = 30.0;
    pub const EXP_DENSITY: f32 = 0.35;

    /// Blue linear fog between 1 and 30 units.
    pub fn linear() -> Self {
        Self {
            mode: FogMode::Linear {
                start: Self::LINEAR_START,
                end: Self::LINEAR_END,
            },
            color: Color::from_argb(colors::BACKGROUND),
        }
    }

    /// Gray exponential fog.
    pub fn exponential() -> Self {
        Self {
            mode: FogMode::Exp {
                density: Self::EXP_DENSITY,
            },
            color: Color::from_argb(colors::FOG_GRAY),
        }
    }

    /// Fraction of the fragment color that survives at `eye_depth`, in
    /// `[0, 1]`. The distance is the absolute eye-space z.
    pub fn factor(&self, eye_depth: f32) -> f32 {
        let z = eye_depth.abs();
        let f = match self.mode {
            FogMode::Linear { start, end } => {
                if (end - start).abs() <= f32::EPSILON {
                    if z < end {
                        1.0
                    } else {
                        0.0
                    }
                } else {
                    (end - z) / (end - start)
                }
            }
            FogMode::Exp { density } => (-density * z).exp(),
        };
        f.clamp(0.0, 1.0)
    }

    #[inline]
    pub fn apply(&self, color: Color, eye_depth: f32) -> Color {
        self.color.lerp(color, self.factor(eye_depth))
    }
}

/// Everything the passes need to know about fixed-function state for one
/// frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Packed ARGB clear color of the window framebuffer.
    pub clear_color: u32,
    pub fog: Option<Fog>,
    pub lines: LineStyle,
}

impl RenderConfig {
    /// Resolves the configuration from the display toggles.
    ///
    /// With `alternate_fog`, fog turns exponential and gray and the clear
    /// color follows it; otherwise fog is linear and matches the blue
    /// background.
    pub fn resolve(fog: bool, alternate_fog: bool, smooth_lines: bool) -> Self {
        let (clear_color, fog) = match (fog, alternate_fog) {
            (false, _) => (colors::BACKGROUND, None),
            (true, false) => (colors::BACKGROUND, Some(Fog::linear())),
            (true, true) => (colors::FOG_GRAY, Some(Fog::exponential())),
        };
        Self {
            clear_color,
            fog,
            lines: LineStyle::new(LineStyle::DEFAULT_WIDTH, smooth_lines),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::resolve(false, false, false)
    }
}
