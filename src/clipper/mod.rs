//! Primitive clipping.
//!
//! Clipping happens in homogeneous clip space (after projection, before the
//! perspective divide) with the Sutherland-Hodgman algorithm for polygons
//! and a parametric trim for line segments.

pub mod clip_space;

pub use clip_space::{ClipSpaceClipper, ClipSpacePolygon, ClipSpaceVertex};
