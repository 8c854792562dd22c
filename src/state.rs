//! Demo state and per-frame snapshots.
//!
//! [`DemoState`] is the only mutable state of the demo. Input arrives as
//! [`Intent`]s; rendering reads an immutable [`FrameContext`] taken from the
//! state once per frame.

use crate::camera::{layout_views, OrbitCamera, View};
use crate::config::LimitsConfig;
use crate::input::Intent;
use crate::light::PointLight;
use crate::math::Vec3;
use crate::render::RenderConfig;
use crate::scene::SceneLayout;

/// One display flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    DepthPreview,
    LightMarker,
    Axes,
    AxesObjectSpace,
    Adjust,
    Frustum,
    SmoothLines,
    Fog,
    MultiView,
}

/// Display flags. None of them changes geometry placement or the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFlags {
    pub depth_preview: bool,
    pub light_marker: bool,
    pub axes: bool,
    /// Axes follow the current view; otherwise they are fixed in eye space.
    pub axes_object_space: bool,
    /// Scene-dependent variant (raised ramp corner, offset axes, gray fog).
    pub adjust: bool,
    pub frustum: bool,
    pub smooth_lines: bool,
    pub fog: bool,
    pub multiview: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self {
            depth_preview: false,
            light_marker: true,
            axes: false,
            axes_object_space: true,
            adjust: false,
            frustum: false,
            smooth_lines: false,
            fog: false,
            multiview: true,
        }
    }
}

impl DisplayFlags {
    pub fn toggle(&mut self, toggle: Toggle) {
        let flag = match toggle {
            Toggle::DepthPreview => &mut self.depth_preview,
            Toggle::LightMarker => &mut self.light_marker,
            Toggle::Axes => &mut self.axes,
            Toggle::AxesObjectSpace => &mut self.axes_object_space,
            Toggle::Adjust => &mut self.adjust,
            Toggle::Frustum => &mut self.frustum,
            Toggle::SmoothLines => &mut self.smooth_lines,
            Toggle::Fog => &mut self.fog,
            Toggle::MultiView => &mut self.multiview,
        };
        *flag = !*flag;
    }
}

/// What the caller should do after an intent was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Redraw,
    Unchanged,
    Quit,
    SaveSnapshot,
    ShowHelp,
}

#[derive(Debug, Clone)]
pub struct DemoState {
    camera: OrbitCamera,
    light: PointLight,
    flags: DisplayFlags,
    scene: SceneLayout,
    width: u32,
    height: u32,
    light_extent: f32,
}

impl DemoState {
    pub fn new(width: u32, height: u32, limits: &LimitsConfig) -> Self {
        Self {
            camera: OrbitCamera::new(limits),
            light: PointLight::default(),
            flags: DisplayFlags::default(),
            scene: SceneLayout::default(),
            width,
            height,
            light_extent: limits.light_extent,
        }
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn flags(&self) -> DisplayFlags {
        self.flags
    }

    pub fn scene(&self) -> SceneLayout {
        self.scene
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn apply(&mut self, intent: Intent) -> Outcome {
        match intent {
            Intent::Quit => return Outcome::Quit,
            Intent::SaveSnapshot => return Outcome::SaveSnapshot,
            Intent::ShowHelp => return Outcome::ShowHelp,
            Intent::Toggle(toggle) => {
                self.flags.toggle(toggle);
                log::debug!("{:?} toggled", toggle);
            }
            Intent::PreviousScene => {
                self.scene = self.scene.previous();
                log::info!("scene: {:?}", self.scene);
            }
            Intent::NextScene => {
                self.scene = self.scene.next();
                log::info!("scene: {:?}", self.scene);
            }
            Intent::NarrowFov => self.camera.narrow_fov(),
            Intent::WidenFov => self.camera.widen_fov(),
            Intent::NudgeLight(offset) => {
                let e = self.light_extent;
                self.light.position = (self.light.position + offset)
                    .clamp(Vec3::new(-e, -e, -e), Vec3::new(e, e, e));
                log::debug!("light at {:?}", self.light.position);
            }
            Intent::Orbit { dx, dy } => self.camera.orbit(dx, dy),
            Intent::SpinObject { dx, dy } => self.camera.spin_object(dx, dy),
            Intent::Dolly(steps) => self.camera.dolly_in(steps),
            Intent::Resize { width, height } => {
                if (width, height) == (self.width, self.height) {
                    return Outcome::Unchanged;
                }
                self.width = width;
                self.height = height;
            }
        }
        Outcome::Redraw
    }

    pub fn frame(&self) -> FrameContext {
        FrameContext {
            camera: self.camera.clone(),
            light: self.light,
            flags: self.flags,
            scene: self.scene,
            width: self.width,
            height: self.height,
        }
    }
}

/// Immutable snapshot of everything one frame is rendered from.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameContext {
    pub camera: OrbitCamera,
    pub light: PointLight,
    pub flags: DisplayFlags,
    pub scene: SceneLayout,
    pub width: u32,
    pub height: u32,
}

impl FrameContext {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig::resolve(self.flags.fog, self.flags.adjust, self.flags.smooth_lines)
    }

    pub fn views(&self) -> Vec<View> {
        layout_views(&self.camera, self.width, self.height, self.flags.multiview)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;

    fn state() -> DemoState {
        DemoState::new(640, 480, &LimitsConfig::default())
    }

    #[test]
    fn toggles_leave_camera_light_and_scene_alone() {
        let mut state = state();
        let before = state.frame();
        for key in [Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F10] {
            assert_eq!(state.apply(Intent::from_key(key)), Outcome::Redraw);
        }
        let after = state.frame();
        assert_eq!(after.camera, before.camera);
        assert_eq!(after.light, before.light);
        assert_eq!(after.scene, before.scene);
        assert_ne!(after.flags, before.flags);
    }

    #[test]
    fn toggling_twice_restores_the_flags() {
        let mut state = state();
        let before = state.flags();
        state.apply(Intent::Toggle(Toggle::Fog));
        assert!(state.flags().fog);
        state.apply(Intent::Toggle(Toggle::Fog));
        assert_eq!(state.flags(), before);
    }

    #[test]
    fn light_moves_in_steps_and_stays_in_bounds() {
        let mut state = state();
        state.apply(Intent::from_key(Key::PageUp));
        assert!((state.light().position.y - 6.6).abs() < 1e-5);

        for _ in 0..1000 {
            state.apply(Intent::from_key(Key::Right));
        }
        assert_eq!(state.light().position.x, LimitsConfig::default().light_extent);
    }

    #[test]
    fn side_effects_are_left_to_the_caller() {
        let mut state = state();
        assert_eq!(state.apply(Intent::Quit), Outcome::Quit);
        assert_eq!(state.apply(Intent::from_key(Key::F9)), Outcome::SaveSnapshot);
        assert_eq!(state.apply(Intent::from_key(Key::Other)), Outcome::ShowHelp);
        assert_eq!(
            state.apply(Intent::Resize { width: 640, height: 480 }),
            Outcome::Unchanged
        );
    }

    #[test]
    fn adjusted_fog_resolves_to_gray_exponential() {
        let mut state = state();
        state.apply(Intent::Toggle(Toggle::Fog));
        state.apply(Intent::Toggle(Toggle::Adjust));
        let config = state.frame().render_config();
        assert_eq!(config.clear_color, crate::colors::FOG_GRAY);
        assert!(matches!(
            config.fog.map(|fog| fog.mode),
            Some(crate::render::FogMode::Exp { .. })
        ));
    }
}
