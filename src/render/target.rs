//! Off-screen depth targets and backend capability negotiation.
//!
//! A [`DepthTarget`] is a fixed-size grid of window-space depth values in
//! `[0, 1]`. It is created once through a [`RenderBackend`], which checks up
//! front that the backend can both render depth off-screen and sample the
//! result as a texture. Any missing capability is reported as a
//! [`CapabilityError`]; nothing is retried or emulated.

use crate::colors::Color;
use crate::error::CapabilityError;
use crate::render::rasterizer::RasterTarget;

/// What a rendering backend can do with off-screen depth buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Depth can be rendered to a target other than the window.
    pub depth_targets: bool,
    /// A rendered depth target can be read back as a comparison texture.
    pub depth_sampling: bool,
    /// Largest supported edge length in texels.
    pub max_target_size: u32,
}

impl Capabilities {
    pub const SOFTWARE: Capabilities = Capabilities {
        depth_targets: true,
        depth_sampling: true,
        max_target_size: 8192,
    };
}

/// Creates off-screen render resources after checking capabilities.
pub trait RenderBackend {
    fn name(&self) -> &str;

    fn capabilities(&self) -> Capabilities;

    /// Creates a depth target of the requested size.
    ///
    /// Fails if the backend cannot render or sample depth, or if either
    /// dimension is zero or above the backend limit.
    fn create_depth_target(&self, width: u32, height: u32) -> Result<DepthTarget, CapabilityError> {
        let caps = self.capabilities();
        if !caps.depth_targets {
            return Err(CapabilityError::DepthTargetUnsupported);
        }
        if !caps.depth_sampling {
            return Err(CapabilityError::DepthSamplingUnsupported);
        }
        if width == 0 || height == 0 || width > caps.max_target_size || height > caps.max_target_size {
            return Err(CapabilityError::InvalidTargetSize {
                width,
                height,
                max: caps.max_target_size,
            });
        }
        log::debug!("{}: created {}x{} depth target", self.name(), width, height);
        Ok(DepthTarget::new(width, height))
    }
}

/// The in-process CPU backend.
#[derive(Debug, Clone)]
pub struct SoftwareBackend {
    capabilities: Capabilities,
}

impl SoftwareBackend {
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::SOFTWARE)
    }

    /// Backend reporting a restricted capability set.
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for SoftwareBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderBackend for SoftwareBackend {
    fn name(&self) -> &str {
        "software"
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

/// Square-or-rectangular grid of depth values.
///
/// Texel `(0, 0)` is the bottom-left corner. Texture coordinates `(s, t)` in
/// `[0, 1]` map onto the whole grid; lookups outside clamp to the edge texel.
#[derive(Debug, Clone)]
pub struct DepthTarget {
    width: u32,
    height: u32,
    depth: Vec<f32>,
}

impl DepthTarget {
    /// Depth value of an empty texel (the far plane).
    pub const CLEAR_DEPTH: f32 = 1.0;

    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            depth: vec![Self::CLEAR_DEPTH; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Resets every texel to the far plane.
    pub fn clear(&mut self) {
        self.depth.fill(Self::CLEAR_DEPTH);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y * self.width + x) as usize
    }

    /// Depth at a texel, clamped to the edge.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> f32 {
        let x = x.clamp(0, self.width as i64 - 1) as u32;
        let y = y.clamp(0, self.height as i64 - 1) as u32;
        self.depth[self.index(x, y)]
    }

    /// Nearest-texel lookup at texture coordinates `(s, t)`.
    #[inline]
    pub fn sample(&self, s: f32, t: f32) -> f32 {
        let x = (s * self.width as f32).floor() as i64;
        let y = (t * self.height as f32).floor() as i64;
        self.texel(x, y)
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.depth
    }

    /// Depth quantized to 8-bit luminance, rows ordered top to bottom.
    pub fn to_luma8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.depth.len());
        for row in self.depth.chunks_exact(self.width as usize).rev() {
            out.extend(row.iter().map(|d| (d.clamp(0.0, 1.0) * 255.0 + 0.5) as u8));
        }
        out
    }

    /// Smallest and largest depth actually written since the last clear.
    pub fn written_range(&self) -> Option<(f32, f32)> {
        self.depth
            .iter()
            .copied()
            .filter(|&d| d < Self::CLEAR_DEPTH)
            .fold(None, |range, d| match range {
                None => Some((d, d)),
                Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
            })
    }
}

impl RasterTarget for DepthTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn depth_passes(&self, x: u32, y: u32, depth: f32) -> bool {
        depth < self.depth[self.index(x, y)]
    }

    /// Only depth is stored; color and coverage are dropped.
    #[inline]
    fn write(&mut self, x: u32, y: u32, depth: f32, _color: Color, _coverage: f32) {
        let idx = self.index(x, y);
        self.depth[idx] = depth;
    }
}
