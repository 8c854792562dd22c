//! Window framebuffer: color and depth.
//!
//! Pixel access uses window coordinates with `(0, 0)` at the bottom-left.
//! Rows are stored top to bottom so the color buffer can be handed to the
//! display texture as is.

use super::rasterizer::RasterTarget;
use super::target::DepthTarget;
use crate::colors::{self, Color};

/// Owning color + depth buffers for the window.
///
/// # Depth Buffer
///
/// Stores window-space depth in `[0, 1]`, cleared to 1 (the far plane).
/// Smaller values are closer; the depth test is strict `LESS`.
pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    depth_buffer: Vec<f32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub const CLEAR_DEPTH: f32 = 1.0;

    pub fn new(width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND; size],
            depth_buffer: vec![Self::CLEAR_DEPTH; size],
            width,
            height,
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Clears color to `color` and depth to the far plane.
    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
        self.depth_buffer.fill(Self::CLEAR_DEPTH);
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        ((self.height - 1 - y) * self.width + x) as usize
    }

    #[inline]
    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Set a pixel without depth testing (for overlays).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as u32, y as u32);
            self.color_buffer[idx] = color;
        }
    }

    /// Get the color at window coordinates (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.in_bounds(x, y)
            .then(|| self.color_buffer[self.index(x as u32, y as u32)])
    }

    /// Get the depth at window coordinates (x, y), or None if out of bounds.
    #[inline]
    pub fn get_depth(&self, x: i32, y: i32) -> Option<f32> {
        self.in_bounds(x, y)
            .then(|| self.depth_buffer[self.index(x as u32, y as u32)])
    }

    /// Color buffer, rows top to bottom.
    pub fn color_buffer(&self) -> &[u32] {
        &self.color_buffer
    }

    /// Returns the color buffer as bytes (ARGB8888 format)
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and any byte pattern is a valid u8; the
        // slice covers exactly the buffer's memory and borrows `self`.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Draws the depth target as grayscale, one texel per pixel, anchored at
    /// the bottom-left corner and cut off at the window edge.
    pub fn draw_depth_preview(&mut self, depth: &DepthTarget) {
        let w = depth.width().min(self.width);
        let h = depth.height().min(self.height);
        for y in 0..h {
            for x in 0..w {
                let value = depth.texel(x as i64, y as i64);
                let idx = self.index(x, y);
                self.color_buffer[idx] = Color::gray(value).to_argb();
            }
        }
    }
}

impl RasterTarget for FrameBuffer {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[inline]
    fn depth_passes(&self, x: u32, y: u32, depth: f32) -> bool {
        depth < self.depth_buffer[self.index(x, y)]
    }

    #[inline]
    fn write(&mut self, x: u32, y: u32, depth: f32, color: Color, coverage: f32) {
        let idx = self.index(x, y);
        self.depth_buffer[idx] = depth;
        self.color_buffer[idx] = if coverage >= 1.0 {
            color.to_argb()
        } else {
            colors::blend(self.color_buffer[idx], color, coverage)
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::target::{RenderBackend, SoftwareBackend};

    #[test]
    fn bottom_left_pixel_is_stored_in_last_row() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.clear(0xFF000000);
        fb.set_pixel(0, 0, 0xFFFFFFFF);
        assert_eq!(fb.color_buffer()[8], 0xFFFFFFFF);
        assert_eq!(fb.get_pixel(0, 0), Some(0xFFFFFFFF));
        assert_eq!(fb.get_pixel(0, 2), Some(0xFF000000));
        assert_eq!(fb.get_pixel(4, 0), None);
    }

    #[test]
    fn partial_coverage_blends_over_existing_color() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.clear(0xFF000000);
        fb.write(1, 1, 0.5, colors::WHITE, 0.5);
        assert_eq!(fb.get_pixel(1, 1), Some(0xFF808080));
        assert_eq!(fb.get_depth(1, 1), Some(0.5));
        assert!(!fb.depth_passes(1, 1, 0.5));
        assert!(fb.depth_passes(1, 1, 0.25));
    }

    #[test]
    fn depth_preview_is_clipped_to_the_window() {
        let mut depth = SoftwareBackend::new().create_depth_target(8, 8).unwrap();
        depth.write(0, 0, 0.0, Color::BLACK, 1.0);
        let mut fb = FrameBuffer::new(4, 4);
        fb.clear(colors::BACKGROUND);
        fb.draw_depth_preview(&depth);
        assert_eq!(fb.get_pixel(0, 0), Some(0xFF000000));
        assert_eq!(fb.get_pixel(3, 3), Some(0xFFFFFFFF));
    }

    #[test]
    fn clear_resets_depth() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.write(0, 0, 0.1, colors::RED, 1.0);
        fb.clear(colors::BACKGROUND);
        assert_eq!(fb.get_depth(0, 0), Some(FrameBuffer::CLEAR_DEPTH));
        assert_eq!(fb.get_pixel(0, 0), Some(colors::BACKGROUND));
    }
}
