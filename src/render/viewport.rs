//! Viewport rectangles.
//!
//! Viewports use window coordinates with the origin at the **bottom-left**
//! corner and y pointing up, the same convention the depth target uses. The
//! window framebuffer flips rows when it stores pixels.

use crate::math::Vec3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport covering a whole `width x height` surface.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Splits a surface into a 2x2 grid.
    ///
    /// Index `i` sits at `(w/2 * (i % 2), h/2 * (i >= 2))`: 0 bottom-left,
    /// 1 bottom-right, 2 top-left, 3 top-right.
    pub fn split_quad(width: u32, height: u32) -> [Viewport; 4] {
        let (w, h) = (width / 2, height / 2);
        [0u32, 1, 2, 3].map(|i| Viewport::new(w * (i % 2), h * u32::from(i >= 2), w, h))
    }

    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Maps normalized device coordinates to window coordinates.
    ///
    /// x and y land in pixels, z is mapped from `[-1, 1]` to the `[0, 1]`
    /// depth range.
    #[inline]
    pub fn ndc_to_window(&self, ndc: Vec3) -> Vec3 {
        Vec3::new(
            self.x as f32 + (ndc.x + 1.0) * 0.5 * self.width as f32,
            self.y as f32 + (ndc.y + 1.0) * 0.5 * self.height as f32,
            ndc.z * 0.5 + 0.5,
        )
    }

    /// Pixel bounds as inclusive-exclusive ranges `(x0, x1, y0, y1)`.
    pub fn pixel_bounds(&self) -> (i32, i32, i32, i32) {
        (
            self.x as i32,
            (self.x + self.width) as i32,
            self.y as i32,
            (self.y + self.height) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quad_split_of_default_window() {
        let views = Viewport::split_quad(640, 480);
        assert_eq!(views[0], Viewport::new(0, 0, 320, 240));
        assert_eq!(views[1], Viewport::new(320, 0, 320, 240));
        assert_eq!(views[2], Viewport::new(0, 240, 320, 240));
        assert_eq!(views[3], Viewport::new(320, 240, 320, 240));
    }

    #[test]
    fn ndc_corners_map_to_viewport_edges() {
        let view = Viewport::new(320, 240, 320, 240);
        let low = view.ndc_to_window(Vec3::new(-1.0, -1.0, -1.0));
        let high = view.ndc_to_window(Vec3::new(1.0, 1.0, 1.0));
        assert_relative_eq!(low.x, 320.0);
        assert_relative_eq!(low.y, 240.0);
        assert_relative_eq!(low.z, 0.0);
        assert_relative_eq!(high.x, 640.0);
        assert_relative_eq!(high.y, 480.0);
        assert_relative_eq!(high.z, 1.0);
    }

    #[test]
    fn degenerate_viewport_has_unit_aspect() {
        assert_eq!(Viewport::new(0, 0, 10, 0).aspect(), 1.0);
        assert!(Viewport::new(0, 0, 10, 0).is_empty());
    }
}
