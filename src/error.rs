//! Error types.
//!
//! Every failure in this crate is a startup/configuration failure: the demo
//! checks what it needs once, and a missing capability ends the program.

use crate::config::ConfigError;

/// A rendering capability the off-screen depth target needs is unavailable.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CapabilityError {
    #[error("backend does not support depth render targets")]
    DepthTargetUnsupported,

    #[error("depth targets cannot be sampled as textures on this backend")]
    DepthSamplingUnsupported,

    #[error("depth target size {width}x{height} is invalid (max {max}x{max})")]
    InvalidTargetSize { width: u32, height: u32, max: u32 },
}

/// Top-level error returned by the demo binary.
#[derive(thiserror::Error, Debug)]
pub enum DemoError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("missing rendering capability: {0}")]
    Capability(#[from] CapabilityError),

    #[error("window system error: {0}")]
    Window(String),

    #[error("failed to write snapshot: {0}")]
    Snapshot(#[from] image::ImageError),
}

impl From<sdl2::video::WindowBuildError> for DemoError {
    fn from(err: sdl2::video::WindowBuildError) -> Self {
        DemoError::Window(err.to_string())
    }
}

impl From<sdl2::IntegerOrSdlError> for DemoError {
    fn from(err: sdl2::IntegerOrSdlError) -> Self {
        DemoError::Window(err.to_string())
    }
}

impl From<sdl2::render::TextureValueError> for DemoError {
    fn from(err: sdl2::render::TextureValueError) -> Self {
        DemoError::Window(err.to_string())
    }
}

impl From<sdl2::render::UpdateTextureError> for DemoError {
    fn from(err: sdl2::render::UpdateTextureError) -> Self {
        DemoError::Window(err.to_string())
    }
}
