//! Platform-neutral input and the intents it maps to.
//!
//! The window layer translates SDL events into [`Key`]s, mouse buttons and
//! positions; this module turns those into [`Intent`]s that
//! [`DemoState`](crate::state::DemoState) applies.

use crate::math::Vec3;
use crate::state::Toggle;

/// Distance the light moves per key press.
pub const LIGHT_STEP: f32 = 0.1;

pub const HELP_TEXT: &str = "\
F1 - show the depth target
F2 - show the light marker
F3 - show the axes
F4 - axes in object or eye space
F5 - adjusted variant (depends on the scene)
F6 - show the view frustum
F7 - antialiased lines
F8 - fog
F9 - save the depth target as PNG
F10 - four views or one
F11, F12 - previous / next scene
1 - narrow the field of view
2 - widen the field of view
Arrow keys, PageUp, PageDown - move the light
Left drag - orbit the view
Right drag - spin the teapot
Mouse wheel - move closer or further";

/// Keys the demo distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Num1,
    Num2,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
    Escape,
    /// Any key without a binding.
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

/// What an input event asks the demo to do.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Quit,
    Toggle(Toggle),
    PreviousScene,
    NextScene,
    NarrowFov,
    WidenFov,
    /// Move the light by this offset.
    NudgeLight(Vec3),
    /// Left drag by `(dx, dy)` pixels.
    Orbit { dx: f32, dy: f32 },
    /// Right drag by `(dx, dy)` pixels.
    SpinObject { dx: f32, dy: f32 },
    /// Wheel steps; positive moves closer.
    Dolly(f32),
    Resize { width: u32, height: u32 },
    SaveSnapshot,
    ShowHelp,
}

impl Intent {
    pub fn from_key(key: Key) -> Self {
        match key {
            Key::F1 => Intent::Toggle(Toggle::DepthPreview),
            Key::F2 => Intent::Toggle(Toggle::LightMarker),
            Key::F3 => Intent::Toggle(Toggle::Axes),
            Key::F4 => Intent::Toggle(Toggle::AxesObjectSpace),
            Key::F5 => Intent::Toggle(Toggle::Adjust),
            Key::F6 => Intent::Toggle(Toggle::Frustum),
            Key::F7 => Intent::Toggle(Toggle::SmoothLines),
            Key::F8 => Intent::Toggle(Toggle::Fog),
            Key::F9 => Intent::SaveSnapshot,
            Key::F10 => Intent::Toggle(Toggle::MultiView),
            Key::F11 => Intent::PreviousScene,
            Key::F12 => Intent::NextScene,
            Key::Num1 => Intent::NarrowFov,
            Key::Num2 => Intent::WidenFov,
            Key::PageUp => Intent::NudgeLight(Vec3::Y * LIGHT_STEP),
            Key::PageDown => Intent::NudgeLight(Vec3::Y * -LIGHT_STEP),
            Key::Up => Intent::NudgeLight(Vec3::Z * LIGHT_STEP),
            Key::Down => Intent::NudgeLight(Vec3::Z * -LIGHT_STEP),
            Key::Left => Intent::NudgeLight(Vec3::X * -LIGHT_STEP),
            Key::Right => Intent::NudgeLight(Vec3::X * LIGHT_STEP),
            Key::Escape => Intent::Quit,
            Key::Other => Intent::ShowHelp,
        }
    }

    /// Wheel rotation; only the sign of `delta` matters.
    pub fn from_wheel(delta: i32) -> Self {
        if delta > 0 {
            Intent::Dolly(1.0)
        } else {
            Intent::Dolly(-1.0)
        }
    }
}

/// Tracks which buttons are dragging and where the pointer was last seen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragState {
    left: bool,
    right: bool,
    last: (i32, i32),
}

impl DragState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, button: MouseButton, x: i32, y: i32) {
        match button {
            MouseButton::Left => self.left = true,
            MouseButton::Right => self.right = true,
        }
        self.last = (x, y);
    }

    pub fn release(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.left = false,
            MouseButton::Right => self.right = false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.left || self.right
    }

    /// Pointer moved to `(x, y)`; yields one intent per held button.
    pub fn motion(&mut self, x: i32, y: i32) -> impl Iterator<Item = Intent> {
        let dx = (x - self.last.0) as f32;
        let dy = (y - self.last.1) as f32;
        self.last = (x, y);
        let orbit = self.left.then_some(Intent::Orbit { dx, dy });
        let spin = self.right.then_some(Intent::SpinObject { dx, dy });
        orbit.into_iter().chain(spin)
    }
}
