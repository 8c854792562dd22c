//! Shadow mapping: depth capture and comparison.
//!
//! The capture pass renders every shadow caster from the light into a
//! [`DepthTarget`], storing only window-space depth. The comparison pass
//! renders the scene from the camera; for each lit fragment the
//! [`ShadowSampler`] maps the fragment's world position through
//! `bias * light_projection * light_view`, divides by w, and compares the
//! resulting depth with the stored one. Both sides are the same non-linear
//! window depth, taken from the same [`LightSpace`].
//!
//! Fragments that land outside the light frustum are lit.

use super::config::RenderConfig;
use super::draw::{DrawList, Shading};
use super::pipeline::{DrawState, DrawStats, Pipeline, ViewTransform};
use super::rasterizer::{DepthOnlyShader, PolygonOffset, RasterTarget, UnlitShader};
use super::shading::LitShader;
use super::target::DepthTarget;
use super::viewport::Viewport;
use crate::light::{LightSpace, PointLight};
use crate::math::{Mat4, Vec3, Vec4};

/// Outcome of a shadow lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowTest {
    /// Nothing captured is closer to the light.
    Lit,
    /// A captured surface is closer to the light.
    Shadowed,
    /// The point projects outside the light frustum and counts as lit.
    OutsideFrustum,
}

impl ShadowTest {
    pub fn is_shadowed(self) -> bool {
        self == ShadowTest::Shadowed
    }
}

/// Projective depth-target lookup.
pub struct ShadowSampler<'a> {
    target: &'a DepthTarget,
    matrix: Mat4,
}

impl<'a> ShadowSampler<'a> {
    pub fn new(target: &'a DepthTarget, light: &LightSpace) -> Self {
        Self {
            target,
            matrix: light.shadow_matrix,
        }
    }

    /// Texture-space coordinate `(s, t, r)` of a world position, or `None`
    /// behind the light.
    pub fn project(&self, world: Vec3) -> Option<Vec3> {
        let coord = self.matrix * Vec4::point(world);
        if coord.w <= 0.0 {
            return None;
        }
        coord.perspective_divide()
    }

    pub fn classify(&self, world: Vec3) -> ShadowTest {
        let Some(coord) = self.project(world) else {
            return ShadowTest::OutsideFrustum;
        };
        let inside = |v: f32| (0.0..=1.0).contains(&v);
        if !(inside(coord.x) && inside(coord.y) && inside(coord.z)) {
            return ShadowTest::OutsideFrustum;
        }
        if self.target.sample(coord.x, coord.y) < coord.z {
            ShadowTest::Shadowed
        } else {
            ShadowTest::Lit
        }
    }

    /// 0 in shadow, 1 otherwise.
    #[inline]
    pub fn visibility(&self, world: Vec3) -> f32 {
        if self.classify(world).is_shadowed() {
            0.0
        } else {
            1.0
        }
    }
}

/// Renders shadow casters from the light into the depth target.
#[derive(Debug, Clone, Copy)]
pub struct DepthCapturePass {
    pipeline: Pipeline,
    offset: PolygonOffset,
}

impl DepthCapturePass {
    pub fn new(offset: PolygonOffset) -> Self {
        Self {
            pipeline: Pipeline::new(),
            offset,
        }
    }

    /// Clears `target` and fills it with the nearest caster depth.
    pub fn render(&self, target: &mut DepthTarget, light: &LightSpace, draws: &DrawList<'_>) -> DrawStats {
        target.clear();
        let (width, height) = target.size();
        let viewport = Viewport::full(width, height);
        let camera = ViewTransform::new(light.view, light.projection);
        let state = DrawState {
            polygon_offset: Some(self.offset),
            ..DrawState::default()
        };

        let mut stats = DrawStats::default();
        for item in draws.shadow_casters() {
            stats += self.pipeline.draw_item(item, &camera, &viewport, &state, target, &DepthOnlyShader);
        }
        log::trace!(
            "captured {} primitives ({} clipped), {} fragments",
            stats.primitives_in,
            stats.primitives_clipped_away,
            stats.fragments
        );
        stats
    }
}

/// Renders a draw list from the camera with shadowed lighting.
#[derive(Debug, Default, Clone, Copy)]
pub struct ComparisonPass {
    pipeline: Pipeline,
}

impl ComparisonPass {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws every item of `draws` into `target` within `viewport`.
    ///
    /// Lit items sample the depth target through `sampler`; unlit items are
    /// drawn with their flat color.
    #[allow(clippy::too_many_arguments)]
    pub fn render<T: RasterTarget + ?Sized>(
        &self,
        target: &mut T,
        viewport: &Viewport,
        camera: &ViewTransform,
        draws: &DrawList<'_>,
        light: &PointLight,
        sampler: &ShadowSampler<'_>,
        config: &RenderConfig,
    ) -> DrawStats {
        let lit = LitShader::new(*light).with_shadow(sampler).with_fog(config.fog);
        let unlit = UnlitShader::new(config.fog);

        let mut stats = DrawStats::default();
        for item in draws {
            let mut state = DrawState {
                polygon_offset: None,
                lines: config.lines,
                ..DrawState::default()
            };
            stats += match item.shading {
                Shading::Lit => self.pipeline.draw_item(item, camera, viewport, &state, target, &lit),
                Shading::Unlit(color) => {
                    state.color = color;
                    self.pipeline.draw_item(item, camera, viewport, &state, target, &unlit)
                }
            };
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ShadowConfig;
    use crate::geometry::{cube, Mesh, MeshBuilder, Style, Vertex};
    use crate::light::light_frustum;
    use crate::render::draw::DrawItem;
    use crate::render::target::{RenderBackend, SoftwareBackend};

    fn floor() -> Mesh {
        let v = |x: f32, z: f32| Vertex::new(Vec3::new(x, 0.0, z), Vec3::Y);
        let mut builder = MeshBuilder::new(Style::Solid);
        builder.quad(v(-5.0, -5.0), v(-5.0, 5.0), v(5.0, 5.0), v(5.0, -5.0));
        builder.build()
    }

    fn overhead_light() -> (PointLight, LightSpace) {
        let mut light = PointLight::new(Vec3::new(2.0, 8.0, 1.0));
        light.target = Vec3::ZERO;
        let space = LightSpace::new(&light, &light_frustum(&ShadowConfig::default()));
        (light, space)
    }

    #[test]
    fn occluder_shadows_the_floor_below_it() {
        let floor = floor();
        let block = cube(1.0, Style::Solid);
        let mut draws = DrawList::new();
        draws.push(DrawItem::lit(&floor, Mat4::identity()));
        draws.push(DrawItem::lit(&block, Mat4::translation(0.0, 2.0, 0.0)));

        let (_, space) = overhead_light();
        let mut target = SoftwareBackend::new().create_depth_target(256, 256).unwrap();
        DepthCapturePass::new(PolygonOffset::new(2.0, 2.0)).render(&mut target, &space, &draws);

        let sampler = ShadowSampler::new(&target, &space);
        assert_eq!(sampler.classify(Vec3::new(0.0, 0.0, 0.0)), ShadowTest::Shadowed);
        assert_eq!(sampler.classify(Vec3::new(3.0, 0.0, 3.0)), ShadowTest::Lit);
        // The top of the block is the nearest surface itself.
        assert_eq!(sampler.classify(Vec3::new(0.0, 2.5, 0.0)), ShadowTest::Lit);
    }

    #[test]
    fn points_outside_the_light_frustum_are_lit() {
        let (_, space) = overhead_light();
        let mut target = SoftwareBackend::new().create_depth_target(16, 16).unwrap();
        // Everything captured as very close: any in-frustum point would be shadowed.
        for y in 0..16 {
            for x in 0..16 {
                target.write(x, y, 0.0, crate::colors::Color::BLACK, 1.0);
            }
        }
        let sampler = ShadowSampler::new(&target, &space);
        assert_eq!(sampler.classify(Vec3::new(0.0, 20.0, 0.0)), ShadowTest::OutsideFrustum);
        assert_eq!(sampler.classify(Vec3::new(500.0, 0.0, 0.0)), ShadowTest::OutsideFrustum);
        assert_eq!(sampler.visibility(Vec3::new(500.0, 0.0, 0.0)), 1.0);
        assert_eq!(sampler.classify(Vec3::ZERO), ShadowTest::Shadowed);
    }

    #[test]
    fn capture_skips_lines_and_unlit_items() {
        let (_, space) = overhead_light();
        let wire = cube(1.0, Style::Wire);
        let solid = cube(1.0, Style::Solid);
        let mut draws = DrawList::new();
        draws.push(DrawItem::lit(&wire, Mat4::identity()));
        draws.push(DrawItem::unlit(&solid, Mat4::identity(), crate::colors::LIGHT_MARKER));

        let mut target = SoftwareBackend::new().create_depth_target(32, 32).unwrap();
        let stats = DepthCapturePass::new(PolygonOffset::new(2.0, 2.0)).render(&mut target, &space, &draws);
        assert_eq!(stats.primitives_in, 0);
        assert_eq!(target.written_range(), None);
    }

    /// Floor plus a unit block hovering at y = 2, captured from the tilted
    /// light. Returns the draws, the light and its filled depth target.
    fn captured_block<'a>(
        floor: &'a Mesh,
        block: &'a Mesh,
    ) -> (DrawList<'a>, PointLight, LightSpace, DepthTarget) {
        let mut draws = DrawList::new();
        draws.push(DrawItem::lit(floor, Mat4::identity()));
        draws.push(DrawItem::lit(block, Mat4::translation(0.0, 2.0, 0.0)));
        let (light, space) = overhead_light();
        let mut target = SoftwareBackend::new().create_depth_target(256, 256).unwrap();
        DepthCapturePass::new(PolygonOffset::new(2.0, 2.0)).render(&mut target, &space, &draws);
        (draws, light, space, target)
    }

    #[test]
    fn shadowed_floor_keeps_only_ambient() {
        use crate::colors::Color;
        use crate::render::framebuffer::FrameBuffer;
        use crate::render::shading::{Material, SCENE_AMBIENT};
        use approx::assert_relative_eq;

        let (floor, block) = (floor(), cube(1.0, Style::Solid));
        let (draws, light, space, depth) = captured_block(&floor, &block);
        let sampler = ShadowSampler::new(&depth, &space);

        // Looking straight down; one pixel covers 0.1 x 0.1 world units.
        let camera = ViewTransform::new(
            Mat4::look_at(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, -Vec3::Z),
            Mat4::orthographic(-5.0, 5.0, -5.0, 5.0, 1.0, 20.0),
        );
        let viewport = Viewport::full(100, 100);
        let mut framebuffer = FrameBuffer::new(100, 100);
        ComparisonPass::new().render(
            &mut framebuffer,
            &viewport,
            &camera,
            &draws,
            &light,
            &sampler,
            &RenderConfig::default(),
        );

        let pixel_at = |world: Vec3| {
            let clip = camera.projection * camera.view * Vec4::point(world);
            let window = viewport.ndc_to_window(clip.perspective_divide().unwrap());
            let argb = framebuffer
                .get_pixel(window.x.floor() as i32, window.y.floor() as i32)
                .unwrap();
            Color::from_argb(argb)
        };

        // Beside the block from above, behind it from the light.
        let shaded = Vec3::new(-0.95, 0.0, -0.45);
        assert_eq!(sampler.classify(shaded), ShadowTest::Shadowed);
        let ambient = (Material::DEFAULT.ambient * SCENE_AMBIENT).r;
        assert_relative_eq!(ambient, 0.05, epsilon = 1e-6);
        assert_relative_eq!(pixel_at(shaded).r, ambient, epsilon = 1.0 / 255.0);

        let open = Vec3::new(3.05, 0.0, 2.95);
        assert_eq!(sampler.classify(open), ShadowTest::Lit);
        let lit = ambient + Material::DEFAULT.diffuse.r * light.diffuse_factor(open, Vec3::Y);
        assert!(lit > ambient + 0.5);
        assert_relative_eq!(pixel_at(open).r, lit, epsilon = 2.0 / 255.0);
    }

    #[test]
    fn lit_shader_drops_diffuse_in_shadow() {
        use crate::render::rasterizer::{Fragment, FragmentShader, Varyings};
        use crate::render::shading::LitShader;
        use approx::assert_relative_eq;

        let (floor, block) = (floor(), cube(1.0, Style::Solid));
        let (_, light, space, depth) = captured_block(&floor, &block);
        let sampler = ShadowSampler::new(&depth, &space);
        let shadowed = LitShader::new(light).with_shadow(&sampler);
        let unshadowed = LitShader::new(light);

        let fragment = |world: Vec3| Fragment {
            x: 0,
            y: 0,
            depth: 0.5,
            varyings: Varyings {
                world,
                normal: Vec3::Y,
                eye_depth: 10.0,
                ..Default::default()
            },
        };

        let below = fragment(Vec3::ZERO);
        assert_relative_eq!(shadowed.shade(&below).g, 0.05, epsilon = 1e-6);
        assert!(unshadowed.shade(&below).g > 0.5);

        let open = fragment(Vec3::new(3.0, 0.0, 3.0));
        assert_relative_eq!(shadowed.shade(&open).g, unshadowed.shade(&open).g, epsilon = 1e-6);
    }
}
