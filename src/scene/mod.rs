//! Scene layouts.
//!
//! The scene has no persistent objects: every frame the current
//! [`SceneLayout`] emits a fresh [`DrawList`] that borrows the meshes of a
//! [`MeshLibrary`] built once at startup.

mod overlay;

pub use overlay::{axes_items, frustum_outline, light_marker};

use crate::camera::View;
use crate::geometry::{sphere, teapot, Mesh, MeshBuilder, Style, Vertex, SOLID_TEAPOT_GRID};
use crate::math::{Mat4, Vec3};
use crate::render::{DrawItem, DrawList};
use crate::state::FrameContext;

/// Where the teapot rests in the default layout; the light looks here.
pub const TEAPOT_POSITION: Vec3 = Vec3::new(0.0, 2.5, 0.0);
/// Resting places of the two teapots in [`SceneLayout::TwinTeapots`].
pub const TWIN_TEAPOT_POSITIONS: [Vec3; 2] = [Vec3::new(-2.5, 0.8, -2.5), Vec3::new(2.5, 0.8, 2.5)];

const FLOOR_HALF_EXTENT: f32 = 5.0;
const RAMP_RAISE: f32 = 3.0;
const AXIS_LENGTH: f32 = 100.0;
const AXIS_ADJUST_Z: f32 = -0.1;

/// Meshes shared by every frame.
#[derive(Debug, Clone)]
pub struct MeshLibrary {
    pub teapot: Mesh,
    pub sphere: Mesh,
    pub light_marker: Mesh,
    pub floor: Mesh,
    /// Floor with its `(5, 0, -5)` corner lifted.
    pub ramp: Mesh,
    /// X, Y and Z axis lines.
    pub axes: [Mesh; 3],
    /// Axis lines with the X and Y axes and the Z origin pulled back along Z.
    pub adjusted_axes: [Mesh; 3],
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self {
            teapot: teapot(1.0, SOLID_TEAPOT_GRID, Style::Solid),
            sphere: sphere(0.5, 32, 8, Style::Solid),
            light_marker: sphere(0.1, 8, 8, Style::Solid),
            floor: floor_quad(0.0),
            ramp: floor_quad(RAMP_RAISE),
            axes: axis_lines(0.0),
            adjusted_axes: axis_lines(AXIS_ADJUST_Z),
        }
    }

    pub fn axes(&self, adjusted: bool) -> &[Mesh; 3] {
        if adjusted {
            &self.adjusted_axes
        } else {
            &self.axes
        }
    }
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}

/// 10x10 quad at y = 0 facing up; `raise` lifts the `(5, 0, -5)` corner.
///
/// All four normals point straight up even when the corner is raised.
fn floor_quad(raise: f32) -> Mesh {
    let e = FLOOR_HALF_EXTENT;
    let v = |x: f32, y: f32, z: f32| Vertex::new(Vec3::new(x, y, z), Vec3::Y);
    let mut builder = MeshBuilder::new(Style::Solid);
    builder.quad(v(-e, 0.0, -e), v(-e, 0.0, e), v(e, 0.0, e), v(e, raise, -e));
    builder.build()
}

fn axis_lines(origin_z: f32) -> [Mesh; 3] {
    let line = |from: Vec3, to: Vec3| {
        let mut builder = MeshBuilder::new(Style::Wire);
        builder.line(Vertex::new(from, Vec3::Z), Vertex::new(to, Vec3::Z));
        builder.build()
    };
    let origin = Vec3::new(0.0, 0.0, origin_z);
    [
        line(origin, Vec3::new(AXIS_LENGTH, 0.0, origin_z)),
        line(origin, Vec3::new(0.0, AXIS_LENGTH, origin_z)),
        line(origin, Vec3::new(0.0, 0.0, AXIS_LENGTH)),
    ]
}

/// The fixed set of scenes the demo cycles through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SceneLayout {
    /// Spinning teapot above a floor with a small sphere.
    #[default]
    TeapotOnFloor,
    /// A single quad; "adjust" turns it into a ramp.
    Ramp,
    /// Two teapots, each with axis lines, over the floor.
    TwinTeapots,
}

impl SceneLayout {
    pub const ALL: [SceneLayout; 3] = [
        SceneLayout::TeapotOnFloor,
        SceneLayout::Ramp,
        SceneLayout::TwinTeapots,
    ];

    pub fn index(self) -> usize {
        match self {
            SceneLayout::TeapotOnFloor => 0,
            SceneLayout::Ramp => 1,
            SceneLayout::TwinTeapots => 2,
        }
    }

    /// Layout at `index`, wrapping in both directions.
    pub fn from_index(index: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[index.rem_euclid(len) as usize]
    }

    pub fn next(self) -> Self {
        Self::from_index(self.index() as isize + 1)
    }

    pub fn previous(self) -> Self {
        Self::from_index(self.index() as isize - 1)
    }

    /// Appends the layout's items to `draws`.
    ///
    /// Solid geometry is lit and casts shadows; axis lines are unlit.
    pub fn build<'a>(self, meshes: &'a MeshLibrary, frame: &FrameContext, draws: &mut DrawList<'a>) {
        let adjust = frame.flags.adjust;
        match self {
            SceneLayout::TeapotOnFloor => {
                let model = Mat4::translation_v(TEAPOT_POSITION) * frame.camera.object_rotation();
                draws.push(DrawItem::lit(&meshes.teapot, model));
                draws.push(DrawItem::lit(&meshes.sphere, Mat4::identity()));
                draws.push(DrawItem::lit(&meshes.floor, Mat4::identity()));
            }
            SceneLayout::Ramp => {
                let quad = if adjust { &meshes.ramp } else { &meshes.floor };
                draws.push(DrawItem::lit(quad, Mat4::identity()));
            }
            SceneLayout::TwinTeapots => {
                for position in TWIN_TEAPOT_POSITIONS {
                    let model = Mat4::translation_v(position);
                    draws.extend(axes_items(meshes, model, adjust));
                    draws.push(DrawItem::lit(&meshes.teapot, model));
                }
                draws.extend(axes_items(meshes, Mat4::identity(), adjust));
                draws.push(DrawItem::lit(&meshes.floor, Mat4::identity()));
            }
        }
    }

    /// The layout's items on their own.
    pub fn draw_list<'a>(self, meshes: &'a MeshLibrary, frame: &FrameContext) -> DrawList<'a> {
        let mut draws = DrawList::new();
        self.build(meshes, frame, &mut draws);
        draws
    }
}

/// Complete draw list of one view: overlays around the scene, in drawing
/// order.
pub fn view_draw_list<'a>(
    meshes: &'a MeshLibrary,
    frame: &FrameContext,
    view: &View,
) -> DrawList<'a> {
    let mut draws = DrawList::new();
    if frame.flags.frustum {
        if let Some(projection) = &view.projection {
            draws.extend(frustum_outline(projection, frame.flags.adjust));
        }
    }
    if frame.flags.light_marker {
        draws.push(light_marker(meshes, frame.light.position));
    }
    frame.scene.build(meshes, frame, &mut draws);
    if frame.flags.axes {
        let axes = axes_items(meshes, Mat4::identity(), frame.flags.adjust);
        if frame.flags.axes_object_space {
            draws.extend(axes);
        } else {
            draws.extend(axes.map(DrawItem::in_eye_space));
        }
    }
    draws
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LimitsConfig;
    use crate::geometry::Topology;
    use crate::input::Intent;
    use crate::render::Shading;
    use crate::state::{DemoState, Toggle};

    fn frame_with(toggles: &[Toggle]) -> FrameContext {
        let mut state = DemoState::new(640, 480, &LimitsConfig::default());
        for &toggle in toggles {
            state.apply(Intent::Toggle(toggle));
        }
        state.frame()
    }

    #[test]
    fn scene_index_wraps_both_ways() {
        assert_eq!(SceneLayout::TwinTeapots.next(), SceneLayout::TeapotOnFloor);
        assert_eq!(SceneLayout::TeapotOnFloor.previous(), SceneLayout::TwinTeapots);
        assert_eq!(SceneLayout::from_index(-4), SceneLayout::TwinTeapots);
        let mut scene = SceneLayout::default();
        for _ in 0..SceneLayout::ALL.len() {
            scene = scene.next();
        }
        assert_eq!(scene, SceneLayout::default());
    }

    #[test]
    fn default_layout_casts_three_shadows() {
        let meshes = MeshLibrary::new();
        let draws = SceneLayout::TeapotOnFloor.draw_list(&meshes, &frame_with(&[]));
        assert_eq!(draws.len(), 3);
        assert_eq!(draws.shadow_casters().count(), 3);
    }

    #[test]
    fn adjust_raises_one_ramp_corner() {
        let meshes = MeshLibrary::new();
        let (_, max) = meshes.floor.bounds().unwrap();
        assert_eq!(max.y, 0.0);
        let (_, max) = meshes.ramp.bounds().unwrap();
        assert_eq!(max.y, 3.0);

        let draws = SceneLayout::Ramp.draw_list(&meshes, &frame_with(&[Toggle::Adjust]));
        let item = draws.iter().next().unwrap();
        assert_eq!(item.mesh.bounds(), meshes.ramp.bounds());
    }

    #[test]
    fn twin_teapots_carry_unlit_axis_lines() {
        let meshes = MeshLibrary::new();
        let draws = SceneLayout::TwinTeapots.draw_list(&meshes, &frame_with(&[]));
        // Three gizmos of three lines, two teapots, one floor.
        assert_eq!(draws.len(), 12);
        assert_eq!(draws.shadow_casters().count(), 3);
        let lines = draws
            .iter()
            .filter(|item| item.mesh.topology() == Topology::Lines)
            .count();
        assert_eq!(lines, 9);
        assert!(draws
            .iter()
            .filter(|item| item.mesh.topology() == Topology::Lines)
            .all(|item| matches!(item.shading, Shading::Unlit(_))));
    }

    #[test]
    fn overlays_follow_the_flags() {
        let meshes = MeshLibrary::new();
        let frame = frame_with(&[Toggle::Frustum, Toggle::Axes, Toggle::LightMarker]);
        let views = frame.views();

        // Light marker off, frustum only in the perspective view.
        let front = view_draw_list(&meshes, &frame, &views[0]);
        let perspective = view_draw_list(&meshes, &frame, &views[1]);
        assert_eq!(front.len(), 3 + 3);
        assert_eq!(perspective.len(), 3 + 3 + 3);
        assert_eq!(perspective.shadow_casters().count(), 3);
    }
}
