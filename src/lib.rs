//! A CPU-rendered shadow-mapping demo.
//!
//! The scene is rendered twice per frame: once from the light into an
//! off-screen depth target, then from the camera with every lit fragment
//! compared against that target. SDL2 is used only for the window, input
//! events and presenting the finished framebuffer; all rendering happens on
//! the CPU.
//!
//! # Quick Start
//!
//! ```ignore
//! use shadowcast::prelude::*;
//!
//! let config = DemoConfig::default();
//! let mut engine = Engine::new(&SoftwareBackend::new(), &config.shadow, 640, 480)?;
//! let state = DemoState::new(640, 480, &config.limits);
//! engine.render_frame(&state.frame());
//! ```

// Public API - exposed to library consumers
pub mod camera;
pub mod colors;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod light;
pub mod logging;
pub mod math;
pub mod projection;
pub mod render;
pub mod scene;
pub mod state;
pub mod window;

// Internal modules - used within the crate only
pub(crate) mod clipper;

// Re-export commonly needed types at crate root for convenience
pub use engine::Engine;
pub use error::{CapabilityError, DemoError};
pub use projection::Projection;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use shadowcast::prelude::*;
/// ```
pub mod prelude {
    // Camera
    pub use crate::camera::{layout_views, OrbitCamera, View, ViewKind};

    // Configuration
    pub use crate::config::DemoConfig;

    // Engine
    pub use crate::engine::{Engine, FrameStats};

    // Input & state
    pub use crate::input::{DragState, Intent, Key, MouseButton};
    pub use crate::state::{DemoState, DisplayFlags, FrameContext, Outcome, Toggle};

    // Light
    pub use crate::light::{LightSpace, PointLight};

    // Math
    pub use crate::math::mat4::Mat4;
    pub use crate::math::vec3::Vec3;
    pub use crate::math::vec4::Vec4;

    // Rendering
    pub use crate::render::{DepthTarget, RenderBackend, ShadowSampler, ShadowTest, SoftwareBackend};

    // Scene
    pub use crate::scene::{MeshLibrary, SceneLayout};

    // Window
    pub use crate::window::{Window, WindowEvent};
}
