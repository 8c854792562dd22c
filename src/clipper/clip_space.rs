//! Clipping against the homogeneous view volume.
//!
//! Runs on clip coordinates, before the divide by `w`. A point is kept when
//!
//! ```text
//! -w <= x, y, z <= w
//! ```
//!
//! which is the same test for the light frustum, the perspective view and the
//! orthographic views. Triangles are clipped as convex polygons and fanned
//! back into triangles; segments are trimmed parametrically.

use crate::math::Vec4;
use crate::render::rasterizer::Varyings;

/// Clip-space position plus the varyings carried to the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipSpaceVertex {
    pub position: Vec4,
    pub varyings: Varyings,
}

impl ClipSpaceVertex {
    pub fn new(position: Vec4, varyings: Varyings) -> Self {
        Self { position, varyings }
    }

    /// Point at `t` along the edge to `other`, varyings included.
    pub fn lerp(&self, other: &Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, t),
            varyings: self.varyings.lerp(&other.varyings, t),
        }
    }

    fn inside_all(&self) -> bool {
        ClipPlane::ALL.iter().all(|plane| plane.signed_distance(self) >= 0.0)
    }
}

/// One face of the view volume.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClipPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl ClipPlane {
    pub const ALL: [ClipPlane; 6] = [
        ClipPlane::Left,
        ClipPlane::Right,
        ClipPlane::Bottom,
        ClipPlane::Top,
        ClipPlane::Near,
        ClipPlane::Far,
    ];

    /// `w` plus or minus one coordinate; non-negative on the kept side.
    pub fn signed_distance(&self, v: &ClipSpaceVertex) -> f32 {
        let Vec4 { x, y, z, w } = v.position;
        match self {
            Self::Left => w + x,
            Self::Right => w - x,
            Self::Bottom => w + y,
            Self::Top => w - y,
            Self::Near => w + z,
            Self::Far => w - z,
        }
    }

    /// Where the edge `a`-`b` crosses this plane, given both distances.
    fn crossing(a: &ClipSpaceVertex, b: &ClipSpaceVertex, da: f32, db: f32) -> ClipSpaceVertex {
        a.lerp(b, da / (da - db))
    }
}

/// Convex polygon produced while clipping one triangle.
#[derive(Debug, Clone)]
pub struct ClipSpacePolygon {
    pub vertices: Vec<ClipSpaceVertex>,
}

impl ClipSpacePolygon {
    pub fn from_triangle(v0: ClipSpaceVertex, v1: ClipSpaceVertex, v2: ClipSpaceVertex) -> Self {
        Self {
            vertices: vec![v0, v1, v2],
        }
    }

    /// Fewer than three vertices left: nothing to rasterize.
    pub fn is_empty(&self) -> bool {
        self.vertices.len() < 3
    }

    /// Keeps the part of the polygon on the inner side of `plane`.
    ///
    /// Walks every edge once: an inside start vertex is kept, and an edge
    /// that changes side contributes its crossing point.
    pub fn clip_against_plane(&self, plane: ClipPlane) -> Self {
        if self.is_empty() {
            return Self { vertices: Vec::new() };
        }

        let count = self.vertices.len();
        let mut kept = Vec::with_capacity(count + 1);
        let mut start = &self.vertices[count - 1];
        let mut d_start = plane.signed_distance(start);

        for end in &self.vertices {
            let d_end = plane.signed_distance(end);
            if (d_start >= 0.0) != (d_end >= 0.0) {
                kept.push(ClipPlane::crossing(start, end, d_start, d_end));
            }
            if d_end >= 0.0 {
                kept.push(*end);
            }
            start = end;
            d_start = d_end;
        }

        Self { vertices: kept }
    }

    /// Fans the polygon into triangles around its first vertex.
    pub fn triangulate(&self) -> impl Iterator<Item = [ClipSpaceVertex; 3]> + '_ {
        let pivot = self.vertices.first().copied();
        self.vertices
            .windows(2)
            .skip(1)
            .filter_map(move |pair| pivot.map(|p| [p, pair[0], pair[1]]))
    }
}

/// Stateless clipper for triangles and segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClipSpaceClipper;

impl ClipSpaceClipper {
    pub fn new() -> Self {
        ClipSpaceClipper
    }

    /// Clips against every plane in turn; the result may be empty.
    pub fn clip_polygon(&self, polygon: ClipSpacePolygon) -> ClipSpacePolygon {
        if polygon.vertices.iter().all(ClipSpaceVertex::inside_all) {
            return polygon;
        }

        ClipPlane::ALL.iter().fold(polygon, |clipped, &plane| {
            if clipped.is_empty() {
                clipped
            } else {
                clipped.clip_against_plane(plane)
            }
        })
    }

    /// Trims the segment `a`-`b` to the volume, or `None` if none of it is
    /// inside.
    pub fn clip_line(
        &self,
        a: ClipSpaceVertex,
        b: ClipSpaceVertex,
    ) -> Option<(ClipSpaceVertex, ClipSpaceVertex)> {
        let (mut t0, mut t1) = (0.0f32, 1.0f32);

        for plane in ClipPlane::ALL {
            let da = plane.signed_distance(&a);
            let db = plane.signed_distance(&b);
            match (da >= 0.0, db >= 0.0) {
                (true, true) => {}
                (false, false) => return None,
                (true, false) => t1 = t1.min(da / (da - db)),
                (false, true) => t0 = t0.max(da / (da - db)),
            }
            if t0 > t1 {
                return None;
            }
        }

        let start = if t0 > 0.0 { a.lerp(&b, t0) } else { a };
        let end = if t1 < 1.0 { a.lerp(&b, t1) } else { b };
        Some((start, end))
    }
}
