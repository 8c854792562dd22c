//! Procedural mesh generation.
//!
//! Every emitter takes shape parameters (and, for curved shapes, a
//! tessellation resolution) and returns a [`Mesh`]: a flat, non-indexed
//! stream of position/normal pairs with a fixed [`Topology`]. Solid meshes are
//! triangle lists, wire meshes are line lists. Nothing here holds state between
//! calls.
//!
//! The shapes mirror the classic GLUT set:
//!
//! | Emitter | Module |
//! |---------|--------|
//! | [`sphere`], [`cone`], [`cylinder`], [`torus`] | `round` |
//! | [`cube`], [`tetrahedron`], [`octahedron`], [`icosahedron`], [`dodecahedron`], [`rhombic_dodecahedron`] | `polyhedra` |
//! | [`sierpinski_sponge`] | `sponge` |
//! | [`teapot`] | `teapot` |

mod polyhedra;
mod round;
mod sponge;
mod teapot;

pub use polyhedra::{
    cube, dodecahedron, icosahedron, octahedron, rhombic_dodecahedron, tetrahedron,
};
pub use round::{cone, cylinder, sphere, torus};
pub use sponge::sierpinski_sponge;
pub use teapot::{teapot, SOLID_TEAPOT_GRID, WIRE_TEAPOT_GRID};

use crate::math::Vec3;

/// Whether an emitter produces filled surfaces or outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Solid,
    Wire,
}

/// How consecutive vertices of a [`Mesh`] group into primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topology {
    /// Every 3 vertices form a triangle.
    Triangles,
    /// Every 2 vertices form a line segment.
    Lines,
}

impl Topology {
    pub fn vertices_per_primitive(self) -> usize {
        match self {
            Topology::Triangles => 3,
            Topology::Lines => 2,
        }
    }
}

impl From<Style> for Topology {
    fn from(style: Style) -> Self {
        match style {
            Style::Solid => Topology::Triangles,
            Style::Wire => Topology::Lines,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
}

impl Vertex {
    pub const fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    topology: Topology,
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub fn new(topology: Topology, vertices: Vec<Vertex>) -> Self {
        debug_assert_eq!(
            vertices.len() % topology.vertices_per_primitive(),
            0,
            "vertex count doesn't match topology"
        );
        Self { topology, vertices }
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn primitive_count(&self) -> usize {
        self.vertices.len() / self.topology.vertices_per_primitive()
    }

    /// Iterates triangles as vertex triples. Empty for line meshes.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.of_topology(Topology::Triangles)
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
    }

    /// Iterates line segments as vertex pairs. Empty for triangle meshes.
    pub fn lines(&self) -> impl Iterator<Item = [Vertex; 2]> + '_ {
        self.of_topology(Topology::Lines)
            .chunks_exact(2)
            .map(|c| [c[0], c[1]])
    }

    fn of_topology(&self, topology: Topology) -> &[Vertex] {
        if self.topology == topology {
            &self.vertices
        } else {
            &[]
        }
    }

    /// Axis-aligned bounds of all positions, or `None` for an empty mesh.
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = self.vertices.first()?.position;
        Some(self.vertices.iter().fold((first, first), |(min, max), v| {
            let p = v.position;
            (
                Vec3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z)),
                Vec3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z)),
            )
        }))
    }
}

/// Accumulates primitives the way immediate-mode `glBegin` blocks do.
///
/// Solid builders accept the polygon helpers (`triangle`, `quad`, `fan`,
/// `quad_strip`, `polygon`); wire builders accept the line helpers
/// (`line`, `line_loop`, `line_strip`). Each helper decomposes its input
/// into the builder's topology.
pub struct MeshBuilder {
    topology: Topology,
    vertices: Vec<Vertex>,
}

impl MeshBuilder {
    pub fn new(style: Style) -> Self {
        Self {
            topology: style.into(),
            vertices: Vec::new(),
        }
    }

    pub fn style(&self) -> Style {
        match self.topology {
            Topology::Triangles => Style::Solid,
            Topology::Lines => Style::Wire,
        }
    }

    pub fn triangle(&mut self, a: Vertex, b: Vertex, c: Vertex) -> &mut Self {
        debug_assert_eq!(self.topology, Topology::Triangles);
        self.vertices.extend_from_slice(&[a, b, c]);
        self
    }

    /// Triangle with one shared normal.
    pub fn flat_triangle(&mut self, normal: Vec3, a: Vec3, b: Vec3, c: Vec3) -> &mut Self {
        self.triangle(
            Vertex::new(a, normal),
            Vertex::new(b, normal),
            Vertex::new(c, normal),
        )
    }

    /// Quad `a b c d` split along the `a c` diagonal.
    pub fn quad(&mut self, a: Vertex, b: Vertex, c: Vertex, d: Vertex) -> &mut Self {
        self.triangle(a, b, c).triangle(a, c, d)
    }

    /// Triangle fan around `center` (`GL_TRIANGLE_FAN`).
    pub fn fan(&mut self, center: Vertex, ring: &[Vertex]) -> &mut Self {
        for pair in ring.windows(2) {
            self.triangle(center, pair[0], pair[1]);
        }
        self
    }

    /// Convex polygon, fanned from its first vertex (`GL_POLYGON`).
    pub fn polygon(&mut self, points: &[Vertex]) -> &mut Self {
        if let Some((&first, rest)) = points.split_first() {
            self.fan(first, rest);
        }
        self
    }

    /// Quad strip over interleaved vertex pairs (`GL_QUAD_STRIP`).
    pub fn quad_strip(&mut self, strip: &[Vertex]) -> &mut Self {
        let mut i = 0;
        while i + 3 < strip.len() {
            let (v0, v1, v2, v3) = (strip[i], strip[i + 1], strip[i + 2], strip[i + 3]);
            self.triangle(v0, v1, v3).triangle(v0, v3, v2);
            i += 2;
        }
        self
    }

    pub fn line(&mut self, a: Vertex, b: Vertex) -> &mut Self {
        debug_assert_eq!(self.topology, Topology::Lines);
        self.vertices.extend_from_slice(&[a, b]);
        self
    }

    /// Open polyline (`GL_LINE_STRIP`).
    pub fn line_strip(&mut self, points: &[Vertex]) -> &mut Self {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1]);
        }
        self
    }

    /// Closed polyline (`GL_LINE_LOOP`).
    pub fn line_loop(&mut self, points: &[Vertex]) -> &mut Self {
        self.line_strip(points);
        if let (Some(&first), Some(&last)) = (points.first(), points.last()) {
            if points.len() > 2 {
                self.line(last, first);
            }
        }
        self
    }

    /// Emits a face either filled or outlined depending on the builder style.
    pub fn face(&mut self, points: &[Vertex]) -> &mut Self {
        match self.style() {
            Style::Solid => self.polygon(points),
            Style::Wire => self.line_loop(points),
        }
    }

    pub fn build(self) -> Mesh {
        Mesh::new(self.topology, self.vertices)
    }
}

/// Cosine/sine samples around a circle.
///
/// Holds `|n| + 1` samples; the last repeats the first so loops close. A
/// negative `n` walks the circle clockwise.
pub(crate) struct CircleTable {
    pub sin: Vec<f64>,
    pub cos: Vec<f64>,
}

impl CircleTable {
    pub fn new(n: i32) -> Self {
        let size = n.unsigned_abs() as usize;
        let angle = if n == 0 {
            0.0
        } else {
            2.0 * std::f64::consts::PI / n as f64
        };

        let mut sin: Vec<f64> = (0..size).map(|i| (angle * i as f64).sin()).collect();
        let mut cos: Vec<f64> = (0..size).map(|i| (angle * i as f64).cos()).collect();
        sin.push(sin.first().copied().unwrap_or(0.0));
        cos.push(cos.first().copied().unwrap_or(1.0));

        Self { sin, cos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn v(x: f32, y: f32, z: f32) -> Vertex {
        Vertex::new(Vec3::new(x, y, z), Vec3::Z)
    }

    #[test]
    fn quad_strip_emits_two_triangles_per_step() {
        let mut builder = MeshBuilder::new(Style::Solid);
        builder.quad_strip(&[
            v(0.0, 0.0, 0.0),
            v(0.0, 1.0, 0.0),
            v(1.0, 0.0, 0.0),
            v(1.0, 1.0, 0.0),
            v(2.0, 0.0, 0.0),
            v(2.0, 1.0, 0.0),
        ]);
        assert_eq!(builder.build().primitive_count(), 4);
    }

    #[test]
    fn line_loop_closes_the_outline() {
        let mut builder = MeshBuilder::new(Style::Wire);
        builder.line_loop(&[v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0), v(1.0, 1.0, 0.0)]);
        let mesh = builder.build();
        assert_eq!(mesh.topology(), Topology::Lines);
        assert_eq!(mesh.primitive_count(), 3);
        let last = mesh.lines().last().unwrap();
        assert_eq!(last[1].position, Vec3::ZERO);
    }

    #[test]
    fn triangles_iterator_is_empty_for_wire_meshes() {
        let mut builder = MeshBuilder::new(Style::Wire);
        builder.line(v(0.0, 0.0, 0.0), v(1.0, 0.0, 0.0));
        let mesh = builder.build();
        assert_eq!(mesh.triangles().count(), 0);
        assert_eq!(mesh.lines().count(), 1);
    }

    #[test]
    fn circle_table_closes_and_respects_direction() {
        let ccw = CircleTable::new(4);
        assert_eq!(ccw.sin.len(), 5);
        assert_relative_eq!(ccw.sin[1], 1.0, epsilon = 1e-12);
        assert_eq!(ccw.sin[4], ccw.sin[0]);

        let cw = CircleTable::new(-4);
        assert_relative_eq!(cw.sin[1], -1.0, epsilon = 1e-12);
    }
}
