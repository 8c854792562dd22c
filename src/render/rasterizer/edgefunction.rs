//! Edge function-based triangle rasterization.
//!
//! For an edge from point A to point B, the edge function at point P is:
//!
//! ```text
//! E(P) = (P.x - A.x) * (B.y - A.y) - (P.y - A.y) * (B.x - A.x)
//! ```
//!
//! A pixel center is covered when all three edge functions share the sign of
//! the triangle's signed area, so both windings are accepted. The normalized
//! edge values are the barycentric weights:
//!
//! ```text
//! lambda_i = E_i(P) / (E_0 + E_1 + E_2)
//! ```
//!
//! Window depth is interpolated linearly in screen space (it is affine in
//! window coordinates after the perspective divide). Varyings are
//! interpolated perspective-correctly by weighting with `1/w`.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)

use super::{Fragment, FragmentShader, PolygonOffset, RasterTarget, ScreenVertex, Varyings};
use crate::math::Vec3;
use crate::render::viewport::Viewport;

/// Triangle rasterizer using the edge function algorithm.
///
/// Iterates the pixels of the triangle's bounding box (clipped to the
/// viewport and target) and tests each pixel center against the three edges.
#[derive(Debug, Default, Clone, Copy)]
pub struct EdgeFunctionRasterizer;

impl EdgeFunctionRasterizer {
    pub fn new() -> Self {
        EdgeFunctionRasterizer
    }

    #[inline]
    fn edge_function(a: Vec3, b: Vec3, p: Vec3) -> f32 {
        (p.x - a.x) * (b.y - a.y) - (p.y - a.y) * (b.x - a.x)
    }

    /// Largest absolute window-space depth gradient of a triangle.
    pub fn max_depth_slope(v0: Vec3, v1: Vec3, v2: Vec3) -> f32 {
        let (e1, e2) = (v1 - v0, v2 - v0);
        let det = e1.x * e2.y - e2.x * e1.y;
        if det.abs() < f32::EPSILON {
            return 0.0;
        }
        let dz_dx = (e1.z * e2.y - e2.z * e1.y) / det;
        let dz_dy = (e1.x * e2.z - e2.x * e1.z) / det;
        dz_dx.abs().max(dz_dy.abs())
    }

    /// Rasterizes one triangle into `target`.
    ///
    /// `offset`, when given, is added to every fragment depth before the
    /// depth test. Returns the number of fragments written.
    pub fn fill_triangle<T, S>(
        &self,
        vertices: &[ScreenVertex; 3],
        viewport: &Viewport,
        offset: Option<PolygonOffset>,
        target: &mut T,
        shader: &S,
    ) -> usize
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        let [v0, v1, v2] = vertices.map(|v| v.window);

        let area = Self::edge_function(v0, v1, v2);
        if area.abs() < f32::EPSILON {
            return 0;
        }
        let inv_area = 1.0 / area;

        // Bounding box clipped to both the viewport and the target.
        let (target_w, target_h) = target.size();
        let (vx0, vx1, vy0, vy1) = viewport.pixel_bounds();
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(vx0).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(vx1.min(target_w as i32) - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(vy0).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(vy1.min(target_h as i32) - 1);
        if min_x > max_x || min_y > max_y {
            return 0;
        }

        let depth_offset = offset
            .map(|o| o.offset(Self::max_depth_slope(v0, v1, v2)))
            .unwrap_or(0.0);

        let inv_w = vertices.map(|v| v.inv_w);
        let attrs: [&Varyings; 3] = [
            &vertices[0].varyings,
            &vertices[1].varyings,
            &vertices[2].varyings,
        ];

        let mut written = 0;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);

                let w0 = Self::edge_function(v1, v2, p);
                let w1 = Self::edge_function(v2, v0, p);
                let w2 = Self::edge_function(v0, v1, p);

                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if !inside {
                    continue;
                }

                let lambda = [w0 * inv_area, w1 * inv_area, w2 * inv_area];
                let depth = (lambda[0] * v0.z + lambda[1] * v1.z + lambda[2] * v2.z + depth_offset)
                    .clamp(0.0, 1.0);

                let (px, py) = (x as u32, y as u32);
                if !target.depth_passes(px, py, depth) {
                    continue;
                }

                // Perspective-correct weights.
                let pw = [lambda[0] * inv_w[0], lambda[1] * inv_w[1], lambda[2] * inv_w[2]];
                let sum = pw[0] + pw[1] + pw[2];
                let weights = if sum.abs() > f32::EPSILON {
                    [pw[0] / sum, pw[1] / sum, pw[2] / sum]
                } else {
                    lambda
                };

                let fragment = Fragment {
                    x: px,
                    y: py,
                    depth,
                    varyings: Varyings::blend(attrs, weights),
                };
                let color = shader.shade(&fragment);
                target.write(px, py, depth, color, 1.0);
                written += 1;
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::Color;
    use crate::render::rasterizer::DepthOnlyShader;
    use approx::assert_relative_eq;

    /// Minimal depth+color target for rasterizer tests.
    struct Grid {
        w: u32,
        h: u32,
        depth: Vec<f32>,
        color: Vec<Color>,
    }

    impl Grid {
        fn new(w: u32, h: u32) -> Self {
            Self {
                w,
                h,
                depth: vec![1.0; (w * h) as usize],
                color: vec![Color::BLACK; (w * h) as usize],
            }
        }

        fn covered(&self) -> usize {
            self.depth.iter().filter(|&&d| d < 1.0).count()
        }
    }

    impl RasterTarget for Grid {
        fn size(&self) -> (u32, u32) {
            (self.w, self.h)
        }

        fn depth_passes(&self, x: u32, y: u32, depth: f32) -> bool {
            depth < self.depth[(y * self.w + x) as usize]
        }

        fn write(&mut self, x: u32, y: u32, depth: f32, color: Color, _coverage: f32) {
            let i = (y * self.w + x) as usize;
            self.depth[i] = depth;
            self.color[i] = color;
        }
    }

    fn vertex(x: f32, y: f32, z: f32) -> ScreenVertex {
        ScreenVertex {
            window: Vec3::new(x, y, z),
            inv_w: 1.0,
            varyings: Varyings::default(),
        }
    }

    #[test]
    fn both_windings_are_filled() {
        let view = Viewport::full(8, 8);
        let ccw = [vertex(0.0, 0.0, 0.5), vertex(8.0, 0.0, 0.5), vertex(0.0, 8.0, 0.5)];
        let cw = [ccw[0], ccw[2], ccw[1]];

        let mut a = Grid::new(8, 8);
        let mut b = Grid::new(8, 8);
        let raster = EdgeFunctionRasterizer::new();
        raster.fill_triangle(&ccw, &view, None, &mut a, &DepthOnlyShader);
        raster.fill_triangle(&cw, &view, None, &mut b, &DepthOnlyShader);
        assert_eq!(a.covered(), b.covered());
        assert!(a.covered() >= 28);
    }

    #[test]
    fn nearer_triangle_wins_depth_test() {
        let view = Viewport::full(4, 4);
        let mut grid = Grid::new(4, 4);
        let raster = EdgeFunctionRasterizer::new();
        let quad = |z| {
            [
                [vertex(0.0, 0.0, z), vertex(4.0, 0.0, z), vertex(4.0, 4.0, z)],
                [vertex(0.0, 0.0, z), vertex(4.0, 4.0, z), vertex(0.0, 4.0, z)],
            ]
        };
        for tri in quad(0.3) {
            raster.fill_triangle(&tri, &view, None, &mut grid, &DepthOnlyShader);
        }
        let mut late = 0;
        for tri in quad(0.6) {
            late += raster.fill_triangle(&tri, &view, None, &mut grid, &DepthOnlyShader);
        }
        assert_eq!(late, 0);
        assert!(grid.depth.iter().all(|&d| (d - 0.3).abs() < 1e-6));
    }

    #[test]
    fn viewport_limits_coverage() {
        let mut grid = Grid::new(8, 8);
        let tri = [vertex(0.0, 0.0, 0.5), vertex(8.0, 0.0, 0.5), vertex(0.0, 8.0, 0.5)];
        EdgeFunctionRasterizer::new().fill_triangle(
            &tri,
            &Viewport::new(0, 0, 2, 2),
            None,
            &mut grid,
            &DepthOnlyShader,
        );
        assert_eq!(grid.covered(), 4);
    }

    #[test]
    fn polygon_offset_pushes_depth_back() {
        let view = Viewport::full(4, 4);
        let tri = [vertex(0.0, 0.0, 0.2), vertex(4.0, 0.0, 0.6), vertex(0.0, 4.0, 0.2)];
        let slope = EdgeFunctionRasterizer::max_depth_slope(
            tri[0].window,
            tri[1].window,
            tri[2].window,
        );
        assert_relative_eq!(slope, 0.1, epsilon = 1e-6);

        let mut plain = Grid::new(4, 4);
        let mut offset = Grid::new(4, 4);
        let raster = EdgeFunctionRasterizer::new();
        raster.fill_triangle(&tri, &view, None, &mut plain, &DepthOnlyShader);
        raster.fill_triangle(
            &tri,
            &view,
            Some(PolygonOffset::new(2.0, 0.0)),
            &mut offset,
            &DepthOnlyShader,
        );
        assert_relative_eq!(offset.depth[0] - plain.depth[0], 0.2, epsilon = 1e-5);
    }

    #[test]
    fn degenerate_triangle_writes_nothing() {
        let mut grid = Grid::new(4, 4);
        let tri = [vertex(0.0, 0.0, 0.5), vertex(2.0, 2.0, 0.5), vertex(4.0, 4.0, 0.5)];
        let n = EdgeFunctionRasterizer::new().fill_triangle(
            &tri,
            &Viewport::full(4, 4),
            None,
            &mut grid,
            &DepthOnlyShader,
        );
        assert_eq!(n, 0);
    }
}
