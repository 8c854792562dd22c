//! Platonic solids and friends, built from fixed vertex tables.
//!
//! Each face is emitted with a flat normal. Solid faces are fanned into
//! triangles, wire faces become closed outlines.

use super::{Mesh, MeshBuilder, Style, Vertex};
use crate::math::Vec3;

fn faces(style: Style, faces: impl IntoIterator<Item = (Vec3, Vec<Vec3>)>) -> Mesh {
    let mut builder = MeshBuilder::new(style);
    for (normal, corners) in faces {
        let points: Vec<Vertex> = corners.into_iter().map(|p| Vertex::new(p, normal)).collect();
        builder.face(&points);
    }
    builder.build()
}

fn v(p: [f64; 3]) -> Vec3 {
    Vec3::from_f64(p)
}

/// Axis-aligned cube of edge length `size` centered on the origin.
pub fn cube(size: f32, style: Style) -> Mesh {
    let h = size * 0.5;
    let corner = |sx: f32, sy: f32, sz: f32| Vec3::new(sx * h, sy * h, sz * h);

    let table = [
        (Vec3::X, [(1., -1., 1.), (1., -1., -1.), (1., 1., -1.), (1., 1., 1.)]),
        (Vec3::Y, [(1., 1., 1.), (1., 1., -1.), (-1., 1., -1.), (-1., 1., 1.)]),
        (Vec3::Z, [(1., 1., 1.), (-1., 1., 1.), (-1., -1., 1.), (1., -1., 1.)]),
        (-Vec3::X, [(-1., -1., 1.), (-1., 1., 1.), (-1., 1., -1.), (-1., -1., -1.)]),
        (-Vec3::Y, [(-1., -1., 1.), (-1., -1., -1.), (1., -1., -1.), (1., -1., 1.)]),
        (-Vec3::Z, [(-1., -1., -1.), (-1., 1., -1.), (1., 1., -1.), (1., -1., -1.)]),
    ];

    faces(
        style,
        table.iter().map(|(normal, quad)| {
            (*normal, quad.iter().map(|&(x, y, z)| corner(x, y, z)).collect())
        }),
    )
}

const TETRA: [[f64; 3]; 4] = [
    [1.0, 0.0, 0.0],
    [-0.333333333333, 0.942809041582, 0.0],
    [-0.333333333333, -0.471404520791, 0.816496580928],
    [-0.333333333333, -0.471404520791, -0.816496580928],
];

/// Regular tetrahedron inscribed in the unit sphere.
///
/// Each face normal is the negated position of the opposite vertex.
pub fn tetrahedron(style: Style) -> Mesh {
    const FACES: [(usize, [usize; 3]); 4] =
        [(0, [1, 3, 2]), (1, [0, 2, 3]), (2, [0, 3, 1]), (3, [0, 1, 2])];
    faces(
        style,
        FACES.iter().map(|&(opposite, tri)| {
            (-v(TETRA[opposite]), tri.iter().map(|&i| v(TETRA[i])).collect())
        }),
    )
}

/// Regular octahedron with its vertices on the unit axes.
pub fn octahedron(style: Style) -> Mesh {
    const N: f32 = 0.577350269189;
    let mut list = Vec::with_capacity(8);
    for sx in [1.0f32, -1.0] {
        for sy in [1.0f32, -1.0] {
            for sz in [1.0f32, -1.0] {
                list.push((
                    Vec3::new(sx * N, sy * N, sz * N),
                    vec![Vec3::new(sx, 0.0, 0.0), Vec3::new(0.0, sy, 0.0), Vec3::new(0.0, 0.0, sz)],
                ));
            }
        }
    }
    faces(style, list)
}

const ICOS_R: [[f64; 3]; 12] = [
    [1.0, 0.0, 0.0],
    [0.447213595500, 0.894427191000, 0.0],
    [0.447213595500, 0.276393202252, 0.850650808354],
    [0.447213595500, -0.723606797748, 0.525731112119],
    [0.447213595500, -0.723606797748, -0.525731112119],
    [0.447213595500, 0.276393202252, -0.850650808354],
    [-0.447213595500, -0.894427191000, 0.0],
    [-0.447213595500, -0.276393202252, 0.850650808354],
    [-0.447213595500, 0.723606797748, 0.525731112119],
    [-0.447213595500, 0.723606797748, -0.525731112119],
    [-0.447213595500, -0.276393202252, -0.850650808354],
    [-1.0, 0.0, 0.0],
];

const ICOS_V: [[usize; 3]; 20] = [
    [0, 1, 2], [0, 2, 3], [0, 3, 4], [0, 4, 5], [0, 5, 1],
    [1, 8, 2], [2, 7, 3], [3, 6, 4], [4, 10, 5], [5, 9, 1],
    [1, 9, 8], [2, 8, 7], [3, 7, 6], [4, 6, 10], [5, 10, 9],
    [11, 9, 10], [11, 8, 9], [11, 7, 8], [11, 6, 7], [11, 10, 6],
];

/// Regular icosahedron inscribed in the unit sphere.
///
/// Normals are the unnormalized cross product of the face edges.
pub fn icosahedron(style: Style) -> Mesh {
    faces(
        style,
        ICOS_V.iter().map(|&tri| {
            let [a, b, c] = tri.map(|i| v(ICOS_R[i]));
            ((b - a).cross(c - a), vec![a, b, c])
        }),
    )
}

const RDOD_R: [[f64; 3]; 14] = [
    [0.0, 0.0, 1.0],
    [0.707106781187, 0.0, 0.5],
    [0.0, 0.707106781187, 0.5],
    [-0.707106781187, 0.0, 0.5],
    [0.0, -0.707106781187, 0.5],
    [0.707106781187, 0.707106781187, 0.0],
    [-0.707106781187, 0.707106781187, 0.0],
    [-0.707106781187, -0.707106781187, 0.0],
    [0.707106781187, -0.707106781187, 0.0],
    [0.707106781187, 0.0, -0.5],
    [0.0, 0.707106781187, -0.5],
    [-0.707106781187, 0.0, -0.5],
    [0.0, -0.707106781187, -0.5],
    [0.0, 0.0, -1.0],
];

const RDOD_V: [[usize; 4]; 12] = [
    [0, 1, 5, 2], [0, 2, 6, 3], [0, 3, 7, 4], [0, 4, 8, 1],
    [5, 10, 6, 2], [6, 11, 7, 3], [7, 12, 8, 4], [8, 9, 5, 1],
    [5, 9, 13, 10], [6, 10, 13, 11], [7, 11, 13, 12], [8, 12, 13, 9],
];

const RDOD_N: [[f64; 3]; 12] = [
    [0.353553390594, 0.353553390594, 0.5],
    [-0.353553390594, 0.353553390594, 0.5],
    [-0.353553390594, -0.353553390594, 0.5],
    [0.353553390594, -0.353553390594, 0.5],
    [0.0, 1.0, 0.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.353553390594, 0.353553390594, -0.5],
    [-0.353553390594, 0.353553390594, -0.5],
    [-0.353553390594, -0.353553390594, -0.5],
    [0.353553390594, -0.353553390594, -0.5],
];

pub fn rhombic_dodecahedron(style: Style) -> Mesh {
    faces(
        style,
        RDOD_V
            .iter()
            .zip(RDOD_N.iter())
            .map(|(quad, &n)| (v(n), quad.iter().map(|&i| v(RDOD_R[i])).collect())),
    )
}

/// Regular dodecahedron built by capping each face of the `(±1, ±1, ±1)`
/// cube with two pentagons.
pub fn dodecahedron(style: Style) -> Mesh {
    const X: f64 = 0.61803398875;
    const Z: f64 = 1.61803398875;
    const A: f64 = 0.525731112119;
    const B: f64 = 0.850650808354;

    let table: [([f64; 3], [[f64; 3]; 5]); 12] = [
        ([0.0, A, B], [[0.0, Z, X], [-1.0, 1.0, 1.0], [-X, 0.0, Z], [X, 0.0, Z], [1.0, 1.0, 1.0]]),
        ([0.0, A, -B], [[0.0, Z, -X], [1.0, 1.0, -1.0], [X, 0.0, -Z], [-X, 0.0, -Z], [-1.0, 1.0, -1.0]]),
        ([0.0, -A, B], [[0.0, -Z, X], [1.0, -1.0, 1.0], [X, 0.0, Z], [-X, 0.0, Z], [-1.0, -1.0, 1.0]]),
        ([0.0, -A, -B], [[0.0, -Z, -X], [-1.0, -1.0, -1.0], [-X, 0.0, -Z], [X, 0.0, -Z], [1.0, -1.0, -1.0]]),
        ([B, 0.0, A], [[X, 0.0, Z], [1.0, -1.0, 1.0], [Z, -X, 0.0], [Z, X, 0.0], [1.0, 1.0, 1.0]]),
        ([-B, 0.0, A], [[-X, 0.0, Z], [-1.0, 1.0, 1.0], [-Z, X, 0.0], [-Z, -X, 0.0], [-1.0, -1.0, 1.0]]),
        ([B, 0.0, -A], [[X, 0.0, -Z], [1.0, 1.0, -1.0], [Z, X, 0.0], [Z, -X, 0.0], [1.0, -1.0, -1.0]]),
        ([-B, 0.0, -A], [[-X, 0.0, -Z], [-1.0, -1.0, -1.0], [-Z, -X, 0.0], [-Z, X, 0.0], [-1.0, 1.0, -1.0]]),
        ([A, B, 0.0], [[Z, X, 0.0], [1.0, 1.0, -1.0], [0.0, Z, -X], [0.0, Z, X], [1.0, 1.0, 1.0]]),
        ([A, -B, 0.0], [[Z, -X, 0.0], [1.0, -1.0, 1.0], [0.0, -Z, X], [0.0, -Z, -X], [1.0, -1.0, -1.0]]),
        ([-A, B, 0.0], [[-Z, X, 0.0], [-1.0, 1.0, 1.0], [0.0, Z, X], [0.0, Z, -X], [-1.0, 1.0, -1.0]]),
        ([-A, -B, 0.0], [[-Z, -X, 0.0], [-1.0, -1.0, -1.0], [0.0, -Z, -X], [0.0, -Z, X], [-1.0, -1.0, 1.0]]),
    ];

    faces(
        style,
        table
            .iter()
            .map(|(n, pentagon)| (v(*n), pentagon.iter().map(|&p| v(p)).collect())),
    )
}
