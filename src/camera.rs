//! Orbit camera and the view layout.
//!
//! # Coordinate System
//!
//! Uses the **right-handed** GL convention:
//! - X: positive right
//! - Y: positive up
//! - Z: positive toward the viewer (the camera looks down -Z)
//!
//! # Orientation
//!
//! The camera never moves in world space. Instead the scene is pushed away
//! from it and rotated by two spin angles, stored in degrees because they
//! come straight from mouse deltas in pixels:
//!
//! ```text
//! view = T(0, -2, -dolly) * Rx(-spin_y) * Ry(-spin_x)
//! ```
//!
//! The teapot has its own pair of spin angles, applied around its resting
//! place.

use crate::config::LimitsConfig;
use crate::math::Mat4;
use crate::projection::{OrthoProjection, Projection};
use crate::render::{Viewport, ViewTransform};

/// Near plane of the perspective view.
pub const VIEW_NEAR: f32 = 0.1;
/// Far plane of the perspective view.
pub const VIEW_FAR: f32 = 100.0;

const FOV_STEP: f32 = 0.9;
const CAMERA_HEIGHT: f32 = 2.0;

/// Scene-orbiting camera with a separately spun object.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    spin_x: f32,
    spin_y: f32,
    object_spin_x: f32,
    object_spin_y: f32,
    dolly: f32,
    fov_degrees: f32,

    min_fov: f32,
    max_fov: f32,
    min_dolly: f32,
    max_dolly: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(&LimitsConfig::default())
    }
}

impl OrbitCamera {
    pub const DEFAULT_DOLLY: f32 = 15.0;
    pub const DEFAULT_FOV: f32 = 45.0;

    /// Camera slightly above the floor, 15 units back, with a 45° field of
    /// view.
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            spin_x: 0.0,
            spin_y: -10.0,
            object_spin_x: 0.0,
            object_spin_y: 0.0,
            dolly: Self::DEFAULT_DOLLY.clamp(limits.min_dolly, limits.max_dolly),
            fov_degrees: Self::DEFAULT_FOV.clamp(limits.min_fov_degrees, limits.max_fov_degrees),
            min_fov: limits.min_fov_degrees,
            max_fov: limits.max_fov_degrees,
            min_dolly: limits.min_dolly,
            max_dolly: limits.max_dolly,
        }
    }

    // =========================================================================
    // Adjustments
    // =========================================================================

    /// Rotates the view by a mouse drag of `(dx, dy)` pixels.
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.spin_x -= dx;
        self.spin_y -= dy;
    }

    /// Rotates the teapot by a mouse drag of `(dx, dy)` pixels.
    pub fn spin_object(&mut self, dx: f32, dy: f32) {
        self.object_spin_x -= dx;
        self.object_spin_y -= dy;
    }

    /// Moves the camera along its view axis; positive is closer.
    pub fn dolly_in(&mut self, steps: f32) {
        self.dolly = (self.dolly - steps).clamp(self.min_dolly, self.max_dolly);
    }

    pub fn narrow_fov(&mut self) {
        self.fov_degrees = (self.fov_degrees * FOV_STEP).clamp(self.min_fov, self.max_fov);
    }

    pub fn widen_fov(&mut self) {
        self.fov_degrees = (self.fov_degrees / FOV_STEP).clamp(self.min_fov, self.max_fov);
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// View spin angles `(x, y)` in degrees.
    pub fn spin(&self) -> (f32, f32) {
        (self.spin_x, self.spin_y)
    }

    /// Teapot spin angles `(x, y)` in degrees.
    pub fn object_spin(&self) -> (f32, f32) {
        (self.object_spin_x, self.object_spin_y)
    }

    pub fn dolly(&self) -> f32 {
        self.dolly
    }

    /// Vertical field of view in degrees.
    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    // =========================================================================
    // Matrices
    // =========================================================================

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::translation(0.0, -CAMERA_HEIGHT, -self.dolly)
            * Mat4::rotation_x((-self.spin_y).to_radians())
            * Mat4::rotation_y((-self.spin_x).to_radians())
    }

    /// Rotation of the teapot about its own origin.
    pub fn object_rotation(&self) -> Mat4 {
        Mat4::rotation_x((-self.object_spin_y).to_radians())
            * Mat4::rotation_y((-self.object_spin_x).to_radians())
    }

    /// Perspective projection for a viewport of the given aspect ratio.
    pub fn projection(&self, aspect_ratio: f32) -> Projection {
        Projection::from_degrees(self.fov_degrees, aspect_ratio, VIEW_NEAR, VIEW_FAR)
    }
}

/// What a viewport shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    /// Orthographic, looking down -Z.
    Front,
    /// The orbit camera.
    Perspective,
    /// Orthographic, rotated 90° about X.
    Top,
    /// Orthographic, rotated 90° about Y.
    Side,
}

impl ViewKind {
    /// Kinds of the 2x2 layout in viewport order.
    pub const QUAD: [ViewKind; 4] = [
        ViewKind::Front,
        ViewKind::Perspective,
        ViewKind::Top,
        ViewKind::Side,
    ];
}

/// One viewport of the window and the camera transforms used in it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub viewport: Viewport,
    pub transform: ViewTransform,
    /// Set for the perspective view only.
    pub projection: Option<Projection>,
}

impl View {
    pub fn new(kind: ViewKind, viewport: Viewport, camera: &OrbitCamera) -> Self {
        match kind {
            ViewKind::Perspective => {
                let projection = camera.projection(viewport.aspect());
                Self {
                    kind,
                    viewport,
                    transform: ViewTransform::new(camera.view_matrix(), projection.matrix()),
                    projection: Some(projection),
                }
            }
            ViewKind::Front | ViewKind::Top | ViewKind::Side => {
                let view = match kind {
                    ViewKind::Top => Mat4::rotation_x(90f32.to_radians()),
                    ViewKind::Side => Mat4::rotation_y(90f32.to_radians()),
                    _ => Mat4::identity(),
                };
                let ortho = OrthoProjection::for_viewport(viewport.width, viewport.height);
                Self {
                    kind,
                    viewport,
                    transform: ViewTransform::new(view, ortho.matrix()),
                    projection: None,
                }
            }
        }
    }
}

/// Views covering a `width x height` window.
///
/// With `multiview` the window is split into four quadrants; otherwise the
/// perspective view fills it.
pub fn layout_views(camera: &OrbitCamera, width: u32, height: u32, multiview: bool) -> Vec<View> {
    if multiview {
        Viewport::split_quad(width, height)
            .into_iter()
            .zip(ViewKind::QUAD)
            .map(|(viewport, kind)| View::new(kind, viewport, camera))
            .collect()
    } else {
        vec![View::new(
            ViewKind::Perspective,
            Viewport::full(width, height),
            camera,
        )]
    }
}
