//! Frame orchestration.
//!
//! The [`Engine`] owns every render resource: the window framebuffer, the
//! off-screen depth target and the mesh library. Each frame it runs
//!
//! 1. the light transform for the frame's light position,
//! 2. the depth capture pass into the depth target,
//! 3. the comparison pass for every view into the framebuffer,
//! 4. the optional depth-target preview.

use std::path::Path;

use crate::config::ShadowConfig;
use crate::error::CapabilityError;
use crate::light::{light_frustum, LightSpace};
use crate::projection::Projection;
use crate::render::{
    ComparisonPass, DepthCapturePass, DepthTarget, DrawStats, FrameBuffer, PolygonOffset,
    RenderBackend, ShadowSampler,
};
use crate::scene::{view_draw_list, MeshLibrary};
use crate::state::FrameContext;

/// Counters for one rendered frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub capture: DrawStats,
    pub views: usize,
    pub main: DrawStats,
}

pub struct Engine {
    framebuffer: FrameBuffer,
    depth_target: DepthTarget,
    capture: DepthCapturePass,
    comparison: ComparisonPass,
    meshes: MeshLibrary,
    light_frustum: Projection,
}

impl Engine {
    /// Creates the engine, negotiating the depth target with `backend`.
    pub fn new(
        backend: &dyn RenderBackend,
        shadow: &ShadowConfig,
        width: u32,
        height: u32,
    ) -> Result<Self, CapabilityError> {
        let depth_target = backend.create_depth_target(shadow.target_size, shadow.target_size)?;
        log::info!(
            "{} backend: {}x{} depth target",
            backend.name(),
            depth_target.width(),
            depth_target.height()
        );
        Ok(Self {
            framebuffer: FrameBuffer::new(width, height),
            depth_target,
            capture: DepthCapturePass::new(PolygonOffset::new(
                shadow.polygon_offset_factor,
                shadow.polygon_offset_units,
            )),
            comparison: ComparisonPass::new(),
            meshes: MeshLibrary::new(),
            light_frustum: light_frustum(shadow),
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if (width, height) != (self.framebuffer.width(), self.framebuffer.height()) {
            log::debug!("framebuffer resized to {}x{}", width, height);
            self.framebuffer.resize(width, height);
        }
    }

    pub fn render_frame(&mut self, frame: &FrameContext) -> FrameStats {
        self.resize(frame.width, frame.height);

        let light_space = LightSpace::new(&frame.light, &self.light_frustum);
        let casters = frame.scene.draw_list(&self.meshes, frame);
        let capture = self.capture.render(&mut self.depth_target, &light_space, &casters);

        let config = frame.render_config();
        self.framebuffer.clear(config.clear_color);

        let sampler = ShadowSampler::new(&self.depth_target, &light_space);
        let views = frame.views();
        let mut main = DrawStats::default();
        for view in &views {
            let draws = view_draw_list(&self.meshes, frame, view);
            main += self.comparison.render(
                &mut self.framebuffer,
                &view.viewport,
                &view.transform,
                &draws,
                &frame.light,
                &sampler,
                &config,
            );
        }

        if frame.flags.depth_preview {
            self.framebuffer.draw_depth_preview(&self.depth_target);
        }

        let stats = FrameStats {
            capture,
            views: views.len(),
            main,
        };
        log::trace!("{:?}", stats);
        stats
    }

    /// The last frame as ARGB8888 bytes.
    pub fn frame_buffer(&self) -> &[u8] {
        self.framebuffer.as_bytes()
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn depth_target(&self) -> &DepthTarget {
        &self.depth_target
    }

    pub fn meshes(&self) -> &MeshLibrary {
        &self.meshes
    }

    /// Writes the depth target as an 8-bit grayscale PNG.
    pub fn save_depth_snapshot(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        let path = path.as_ref();
        image::save_buffer(
            path,
            &self.depth_target.to_luma8(),
            self.depth_target.width(),
            self.depth_target.height(),
            image::ExtendedColorType::L8,
        )?;
        log::info!("depth target saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::config::LimitsConfig;
    use crate::input::Intent;
    use crate::render::SoftwareBackend;
    use crate::state::{DemoState, Toggle};

    fn small_shadow() -> ShadowConfig {
        ShadowConfig {
            target_size: 128,
            ..ShadowConfig::default()
        }
    }

    #[test]
    fn frame_captures_depth_and_draws_every_view() {
        let mut engine = Engine::new(&SoftwareBackend::new(), &small_shadow(), 160, 120).unwrap();
        let state = DemoState::new(160, 120, &LimitsConfig::default());
        let stats = engine.render_frame(&state.frame());

        assert_eq!(stats.views, 4);
        assert!(stats.capture.fragments > 0);
        assert!(stats.main.fragments > 0);
        assert!(engine.depth_target().written_range().is_some());
        // Something other than the background got drawn.
        assert!(engine
            .framebuffer()
            .color_buffer()
            .iter()
            .any(|&c| c != colors::BACKGROUND));
    }

    #[test]
    fn frame_follows_window_size() {
        let mut engine = Engine::new(&SoftwareBackend::new(), &small_shadow(), 64, 48).unwrap();
        let mut state = DemoState::new(64, 48, &LimitsConfig::default());
        state.apply(Intent::Resize { width: 80, height: 60 });
        state.apply(Intent::Toggle(Toggle::MultiView));
        let stats = engine.render_frame(&state.frame());
        assert_eq!(stats.views, 1);
        assert_eq!(engine.framebuffer().width(), 80);
        assert_eq!(engine.frame_buffer().len(), 80 * 60 * 4);
    }

    #[test]
    fn unsupported_backend_fails_at_startup() {
        let backend = SoftwareBackend::with_capabilities(crate::render::Capabilities {
            depth_sampling: false,
            ..crate::render::Capabilities::SOFTWARE
        });
        let err = Engine::new(&backend, &small_shadow(), 64, 48).err();
        assert_eq!(err, Some(CapabilityError::DepthSamplingUnsupported));
    }
}
