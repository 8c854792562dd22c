//! Wide line rasterization.
//!
//! Aliased lines walk the major axis one pixel at a time and fill a span of
//! `width` pixels along the minor axis, the fixed-function rule for wide
//! lines. Smooth lines treat the segment as a `width`-wide rectangle and give
//! every nearby pixel a coverage from its distance to the segment; coverage
//! below one is blended over the existing color.
//!
//! Window depth is affine along the segment, so it is interpolated with the
//! screen-space parameter. Varyings use the same `1/w` weighting as
//! triangles.

use super::{EdgeFunctionRasterizer, Fragment, FragmentShader, RasterTarget, ScreenVertex, Varyings};
use crate::render::viewport::Viewport;

/// Width and antialiasing of rasterized lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    /// Width in pixels.
    pub width: f32,
    /// Coverage-based antialiasing with blending.
    pub smooth: bool,
}

impl LineStyle {
    pub const DEFAULT_WIDTH: f32 = 3.0;

    pub const fn new(width: f32, smooth: bool) -> Self {
        Self { width, smooth }
    }
}

impl Default for LineStyle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WIDTH, false)
    }
}

/// Pixel rectangle a line may touch: the viewport clipped to the target.
#[derive(Clone, Copy)]
struct PixelBounds {
    x0: i32,
    x1: i32,
    y0: i32,
    y1: i32,
}

impl PixelBounds {
    fn new(viewport: &Viewport, target_size: (u32, u32)) -> Self {
        let (vx0, vx1, vy0, vy1) = viewport.pixel_bounds();
        Self {
            x0: vx0.max(0),
            x1: vx1.min(target_size.0 as i32),
            y0: vy0.max(0),
            y1: vy1.min(target_size.1 as i32),
        }
    }

    #[inline]
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

impl EdgeFunctionRasterizer {
    /// Rasterizes the segment `a`-`b`. Returns the number of fragments
    /// written.
    pub fn draw_line<T, S>(
        &self,
        a: &ScreenVertex,
        b: &ScreenVertex,
        style: LineStyle,
        viewport: &Viewport,
        target: &mut T,
        shader: &S,
    ) -> usize
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        let bounds = PixelBounds::new(viewport, target.size());
        if bounds.x0 >= bounds.x1 || bounds.y0 >= bounds.y1 {
            return 0;
        }
        let width = style.width.max(1.0);
        if style.smooth {
            Self::draw_smooth(a, b, width, bounds, target, shader)
        } else {
            Self::draw_aliased(a, b, width, bounds, target, shader)
        }
    }

    fn draw_aliased<T, S>(
        a: &ScreenVertex,
        b: &ScreenVertex,
        width: f32,
        bounds: PixelBounds,
        target: &mut T,
        shader: &S,
    ) -> usize
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        let (pa, pb) = (a.window, b.window);
        let x_major = (pb.x - pa.x).abs() >= (pb.y - pa.y).abs();
        let (major_a, major_b, minor_a, minor_b) = if x_major {
            (pa.x, pb.x, pa.y, pb.y)
        } else {
            (pa.y, pb.y, pa.x, pb.x)
        };
        let length = major_b - major_a;
        if length.abs() < f32::EPSILON {
            return 0;
        }

        // Pixel centers c + 0.5 inside [lo, hi).
        let (lo, hi) = (major_a.min(major_b), major_a.max(major_b));
        let first = (lo - 0.5).ceil() as i32;
        let last = (hi - 0.5).ceil() as i32 - 1;
        let span = width.round().max(1.0) as i32;

        let mut written = 0;
        for m in first..=last {
            let t = (m as f32 + 0.5 - major_a) / length;
            let minor = minor_a + (minor_b - minor_a) * t;
            let start = (minor - width * 0.5).round() as i32;
            for k in start..start + span {
                let (x, y) = if x_major { (m, k) } else { (k, m) };
                if Self::plot(x, y, t, 1.0, a, b, bounds, target, shader) {
                    written += 1;
                }
            }
        }
        written
    }

    fn draw_smooth<T, S>(
        a: &ScreenVertex,
        b: &ScreenVertex,
        width: f32,
        bounds: PixelBounds,
        target: &mut T,
        shader: &S,
    ) -> usize
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        let (pa, pb) = (a.window, b.window);
        let (dx, dy) = (pb.x - pa.x, pb.y - pa.y);
        let length_sq = dx * dx + dy * dy;
        if length_sq < f32::EPSILON {
            return 0;
        }
        let length = length_sq.sqrt();
        let half = width * 0.5;
        let reach = half + 1.0;

        let min_x = ((pa.x.min(pb.x) - reach).floor() as i32).max(bounds.x0);
        let max_x = ((pa.x.max(pb.x) + reach).ceil() as i32).min(bounds.x1 - 1);
        let min_y = ((pa.y.min(pb.y) - reach).floor() as i32).max(bounds.y0);
        let max_y = ((pa.y.max(pb.y) + reach).ceil() as i32).min(bounds.y1 - 1);

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (px, py) = (x as f32 + 0.5 - pa.x, y as f32 + 0.5 - pa.y);
                let t = (px * dx + py * dy) / length_sq;
                let across = (px * dy - py * dx).abs() / length;
                // Signed distance past the nearer endpoint, negative inside.
                let beyond_end = (-t * length).max((t - 1.0) * length);

                let coverage =
                    (half + 0.5 - across).clamp(0.0, 1.0) * (0.5 - beyond_end).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                if Self::plot(x, y, t.clamp(0.0, 1.0), coverage, a, b, bounds, target, shader) {
                    written += 1;
                }
            }
        }
        written
    }

    /// Depth-tests and shades one line fragment at parameter `t`.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    fn plot<T, S>(
        x: i32,
        y: i32,
        t: f32,
        coverage: f32,
        a: &ScreenVertex,
        b: &ScreenVertex,
        bounds: PixelBounds,
        target: &mut T,
        shader: &S,
    ) -> bool
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        if !bounds.contains(x, y) {
            return false;
        }
        let (px, py) = (x as u32, y as u32);
        let depth = (a.window.z + (b.window.z - a.window.z) * t).clamp(0.0, 1.0);
        if !target.depth_passes(px, py, depth) {
            return false;
        }

        let wa = (1.0 - t) * a.inv_w;
        let wb = t * b.inv_w;
        let sum = wa + wb;
        let s = if sum.abs() > f32::EPSILON { wb / sum } else { t };

        let fragment = Fragment {
            x: px,
            y: py,
            depth,
            varyings: Varyings::lerp(&a.varyings, &b.varyings, s),
        };
        let color = shader.shade(&fragment);
        target.write(px, py, depth, color, coverage);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use crate::math::Vec3;
    use crate::render::rasterizer::DepthOnlyShader;

    struct Grid {
        w: u32,
        h: u32,
        depth: Vec<f32>,
        coverage: Vec<f32>,
    }

    impl Grid {
        fn new(w: u32, h: u32) -> Self {
            Self {
                w,
                h,
                depth: vec![1.0; (w * h) as usize],
                coverage: vec![0.0; (w * h) as usize],
            }
        }

        fn column(&self, x: u32) -> Vec<u32> {
            (0..self.h)
                .filter(|&y| self.coverage[(y * self.w + x) as usize] > 0.0)
                .collect()
        }
    }

    impl RasterTarget for Grid {
        fn size(&self) -> (u32, u32) {
            (self.w, self.h)
        }

        fn depth_passes(&self, x: u32, y: u32, depth: f32) -> bool {
            depth < self.depth[(y * self.w + x) as usize]
        }

        fn write(&mut self, x: u32, y: u32, depth: f32, _color: Color, coverage: f32) {
            let i = (y * self.w + x) as usize;
            self.depth[i] = depth;
            self.coverage[i] = coverage;
        }
    }

    fn vertex(x: f32, y: f32) -> ScreenVertex {
        ScreenVertex {
            window: Vec3::new(x, y, 0.5),
            inv_w: 1.0,
            varyings: Varyings::default(),
        }
    }

    #[test]
    fn aliased_horizontal_line_is_three_pixels_tall() {
        let mut grid = Grid::new(16, 16);
        let n = EdgeFunctionRasterizer::new().draw_line(
            &vertex(2.0, 8.5),
            &vertex(12.0, 8.5),
            LineStyle::default(),
            &Viewport::full(16, 16),
            &mut grid,
            &DepthOnlyShader,
        );
        assert_eq!(n, 30);
        assert_eq!(grid.column(5), vec![7, 8, 9]);
        assert!(grid.column(1).is_empty());
        assert!(grid.column(12).is_empty());
    }

    #[test]
    fn steep_line_walks_rows() {
        let mut grid = Grid::new(16, 16);
        let n = EdgeFunctionRasterizer::new().draw_line(
            &vertex(8.5, 1.0),
            &vertex(8.5, 15.0),
            LineStyle::new(1.0, false),
            &Viewport::full(16, 16),
            &mut grid,
            &DepthOnlyShader,
        );
        assert_eq!(n, 14);
        assert_eq!(grid.column(8).len(), 14);
    }

    #[test]
    fn smooth_line_fades_at_the_edges() {
        let mut grid = Grid::new(16, 16);
        EdgeFunctionRasterizer::new().draw_line(
            &vertex(2.5, 8.0),
            &vertex(13.5, 8.0),
            LineStyle::new(3.0, true),
            &Viewport::full(16, 16),
            &mut grid,
            &DepthOnlyShader,
        );
        let at = |x: u32, y: u32| grid.coverage[(y * 16 + x) as usize];
        // Rows 7 and 8 straddle the center line; 6 and 9 are on the rim.
        assert_eq!(at(8, 7), 1.0);
        assert_eq!(at(8, 8), 1.0);
        assert!(at(8, 9) > 0.0 && at(8, 9) < 1.0);
        assert!(at(8, 6) > 0.0 && at(8, 6) < 1.0);
        assert_eq!(at(8, 11), 0.0);
        // The pixel centered on an endpoint is half covered along the line.
        assert_eq!(at(1, 7), 0.0);
        assert!(at(2, 7) > 0.0 && at(2, 7) < 1.0);
    }

    #[test]
    fn lines_are_clipped_to_the_viewport() {
        let mut grid = Grid::new(16, 16);
        EdgeFunctionRasterizer::new().draw_line(
            &vertex(0.0, 4.5),
            &vertex(16.0, 4.5),
            LineStyle::new(1.0, false),
            &Viewport::new(0, 0, 8, 8),
            &mut grid,
            &DepthOnlyShader,
        );
        assert_eq!(grid.column(7), vec![4]);
        assert!(grid.column(8).is_empty());
    }
}
