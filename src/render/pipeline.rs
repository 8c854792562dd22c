//! Geometry stage: transform, clip, divide, map to the viewport, rasterize.
//!
//! ```text
//! model -> world -> eye -> clip -> (clip) -> NDC -> window -> rasterizer
//! ```
//!
//! Each vertex carries its world position and normal through to the
//! fragment shader, so lighting and the shadow lookup happen per fragment in
//! world space.

use super::draw::{DrawItem, Space};
use super::rasterizer::{
    EdgeFunctionRasterizer, FragmentShader, LineStyle, PolygonOffset, RasterTarget, ScreenVertex,
    Varyings,
};
use super::viewport::Viewport;
use crate::clipper::{ClipSpaceClipper, ClipSpacePolygon, ClipSpaceVertex};
use crate::colors::Color;
use crate::geometry::{Mesh, Topology, Vertex};
use crate::math::{Mat4, Vec4};

/// Camera transforms for one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    pub view: Mat4,
    pub projection: Mat4,
}

impl ViewTransform {
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }
}

/// Fixed-function state for one draw call.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DrawState {
    /// Applied to filled primitives only.
    pub polygon_offset: Option<PolygonOffset>,
    pub lines: LineStyle,
    /// Vertex color handed to the shader.
    pub color: Color,
}

/// Counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub primitives_in: usize,
    pub primitives_clipped_away: usize,
    pub fragments: usize,
}

impl std::ops::AddAssign for DrawStats {
    fn add_assign(&mut self, rhs: Self) {
        self.primitives_in += rhs.primitives_in;
        self.primitives_clipped_away += rhs.primitives_clipped_away;
        self.fragments += rhs.fragments;
    }
}

/// Runs meshes through the geometry stage into a raster target.
#[derive(Debug, Default, Clone, Copy)]
pub struct Pipeline {
    clipper: ClipSpaceClipper,
    rasterizer: EdgeFunctionRasterizer,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws one item, choosing the view matrix according to its space.
    pub fn draw_item<T, S>(
        &self,
        item: &DrawItem<'_>,
        camera: &ViewTransform,
        viewport: &Viewport,
        state: &DrawState,
        target: &mut T,
        shader: &S,
    ) -> DrawStats
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        let view = match item.space {
            Space::World => camera.view,
            Space::Eye => Mat4::identity(),
        };
        self.draw_mesh(
            &item.mesh,
            &item.model,
            &ViewTransform::new(view, camera.projection),
            viewport,
            state,
            target,
            shader,
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_mesh<T, S>(
        &self,
        mesh: &Mesh,
        model: &Mat4,
        camera: &ViewTransform,
        viewport: &Viewport,
        state: &DrawState,
        target: &mut T,
        shader: &S,
    ) -> DrawStats
    where
        T: RasterTarget + ?Sized,
        S: FragmentShader + ?Sized,
    {
        let mut stats = DrawStats::default();
        if viewport.is_empty() {
            return stats;
        }
        let eye_from_model = camera.view * *model;
        let clip_from_eye = camera.projection;
        let to_clip = |v: &Vertex| {
            let world = model.transform_point(v.position);
            let eye = eye_from_model * Vec4::point(v.position);
            ClipSpaceVertex::new(
                clip_from_eye * eye,
                Varyings {
                    world,
                    // Model matrices are rigid, so normals transform like directions.
                    normal: model.transform_vector(v.normal),
                    color: state.color,
                    eye_depth: -eye.z,
                },
            )
        };

        match mesh.topology() {
            Topology::Triangles => {
                for tri in mesh.triangles() {
                    stats.primitives_in += 1;
                    let polygon =
                        ClipSpacePolygon::from_triangle(to_clip(&tri[0]), to_clip(&tri[1]), to_clip(&tri[2]));
                    let clipped = self.clipper.clip_polygon(polygon);
                    if clipped.is_empty() {
                        stats.primitives_clipped_away += 1;
                        continue;
                    }
                    for [a, b, c] in clipped.triangulate() {
                        let (Some(a), Some(b), Some(c)) = (
                            to_screen(&a, viewport),
                            to_screen(&b, viewport),
                            to_screen(&c, viewport),
                        ) else {
                            continue;
                        };
                        stats.fragments += self.rasterizer.fill_triangle(
                            &[a, b, c],
                            viewport,
                            state.polygon_offset,
                            target,
                            shader,
                        );
                    }
                }
            }
            Topology::Lines => {
                for [a, b] in mesh.lines() {
                    stats.primitives_in += 1;
                    let Some((a, b)) = self.clipper.clip_line(to_clip(&a), to_clip(&b)) else {
                        stats.primitives_clipped_away += 1;
                        continue;
                    };
                    if let (Some(a), Some(b)) = (to_screen(&a, viewport), to_screen(&b, viewport)) {
                        stats.fragments += self
                            .rasterizer
                            .draw_line(&a, &b, state.lines, viewport, target, shader);
                    }
                }
            }
        }
        stats
    }
}

/// Perspective divide and viewport mapping.
///
/// `None` for vertices on the eye plane, which clipping against the near
/// plane normally prevents.
fn to_screen(v: &ClipSpaceVertex, viewport: &Viewport) -> Option<ScreenVertex> {
    let ndc = v.position.perspective_divide()?;
    Some(ScreenVertex {
        window: viewport.ndc_to_window(ndc),
        inv_w: 1.0 / v.position.w,
        varyings: v.varyings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{cube, Style};
    use crate::render::rasterizer::DepthOnlyShader;
    use crate::render::target::{DepthTarget, RenderBackend, SoftwareBackend};
    use crate::render::{draw::DrawItem, FrameBuffer};
    use approx::assert_relative_eq;

    fn camera() -> ViewTransform {
        ViewTransform::new(
            Mat4::translation(0.0, 0.0, -5.0),
            Mat4::perspective(60f32.to_radians(), 1.0, 0.1, 100.0),
        )
    }

    fn target(size: u32) -> DepthTarget {
        SoftwareBackend::new().create_depth_target(size, size).unwrap()
    }

    #[test]
    fn cube_in_front_of_camera_covers_the_center() {
        let mesh = cube(2.0, Style::Solid);
        let mut depth = target(64);
        let stats = Pipeline::new().draw_mesh(
            &mesh,
            &Mat4::identity(),
            &camera(),
            &Viewport::full(64, 64),
            &DrawState::default(),
            &mut depth,
            &DepthOnlyShader,
        );
        assert_eq!(stats.primitives_in, 12);
        assert_eq!(stats.primitives_clipped_away, 0);
        assert!(stats.fragments > 0);

        // Front face at eye z = -4 maps to the perspective window depth.
        let m = camera().projection;
        let expected = (m * Vec4::new(0.0, 0.0, -4.0, 1.0)).perspective_divide().unwrap().z * 0.5 + 0.5;
        assert_relative_eq!(depth.texel(32, 32), expected, epsilon = 1e-5);
    }

    #[test]
    fn geometry_behind_the_camera_is_clipped_away() {
        let mesh = cube(1.0, Style::Solid);
        let mut depth = target(16);
        let stats = Pipeline::new().draw_mesh(
            &mesh,
            &Mat4::translation(0.0, 0.0, 10.0),
            &camera(),
            &Viewport::full(16, 16),
            &DrawState::default(),
            &mut depth,
            &DepthOnlyShader,
        );
        assert_eq!(stats.primitives_clipped_away, 12);
        assert_eq!(depth.written_range(), None);
    }

    #[test]
    fn eye_space_items_ignore_the_view_matrix() {
        let mesh = cube(1.0, Style::Solid);
        let item = DrawItem::lit(&mesh, Mat4::translation(0.0, 0.0, -3.0)).in_eye_space();
        // This view would push the cube behind the camera if applied.
        let camera = ViewTransform::new(Mat4::translation(0.0, 0.0, 20.0), camera().projection);
        let mut fb = FrameBuffer::new(16, 16);
        let stats = Pipeline::new().draw_item(
            &item,
            &camera,
            &Viewport::full(16, 16),
            &DrawState::default(),
            &mut fb,
            &DepthOnlyShader,
        );
        assert!(stats.fragments > 0);
    }

    #[test]
    fn wire_meshes_are_drawn_as_lines() {
        let mesh = cube(2.0, Style::Wire);
        let mut fb = FrameBuffer::new(32, 32);
        let stats = Pipeline::new().draw_mesh(
            &mesh,
            &Mat4::identity(),
            &camera(),
            &Viewport::full(32, 32),
            &DrawState::default(),
            &mut fb,
            &DepthOnlyShader,
        );
        assert_eq!(stats.primitives_in, 24);
        assert!(stats.fragments > 0);
        // The middle of the front face stays empty.
        assert_eq!(fb.get_depth(16, 16), Some(FrameBuffer::CLEAR_DEPTH));
    }
}
