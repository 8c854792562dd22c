//! Software rendering: raster targets, the geometry pipeline and the two
//! shadow-mapping passes.

pub mod config;
pub mod draw;
pub mod framebuffer;
pub mod pipeline;
pub mod rasterizer;
pub mod shading;
pub mod shadow;
pub mod target;
pub mod viewport;

pub use config::{Fog, FogMode, RenderConfig};
pub use draw::{DrawItem, DrawList, Shading, Space};
pub use framebuffer::FrameBuffer;
pub use pipeline::{DrawState, DrawStats, Pipeline, ViewTransform};
pub use rasterizer::{EdgeFunctionRasterizer, LineStyle, PolygonOffset};
pub use shading::{LitShader, Material};
pub use shadow::{ComparisonPass, DepthCapturePass, ShadowSampler, ShadowTest};
pub use target::{Capabilities, DepthTarget, RenderBackend, SoftwareBackend};
pub use viewport::Viewport;
