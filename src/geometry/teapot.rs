//! The Utah teapot as 10 bicubic Bézier patches.
//!
//! Rim, body, lid and bottom patches are mirrored across both the x and y
//! axes; handle and spout only across y. Each patch is evaluated on a
//! `grid x grid` lattice with analytic normals (`dP/du x dP/dv`).

use super::{Mesh, MeshBuilder, Style, Vertex};
use crate::math::{Mat4, Vec3};

/// Grid resolution used for the filled teapot.
pub const SOLID_TEAPOT_GRID: u32 = 7;
/// Grid resolution used for the wire teapot.
pub const WIRE_TEAPOT_GRID: u32 = 10;

/// Patches below this index are mirrored four ways, the rest two ways.
const FOUR_WAY_PATCHES: usize = 6;

const PATCHES: [[usize; 16]; 10] = [
    // rim
    [102, 103, 104, 105, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    // body
    [12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27],
    [24, 25, 26, 27, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40],
    // lid
    [96, 96, 96, 96, 97, 98, 99, 100, 101, 101, 101, 101, 0, 1, 2, 3],
    [0, 1, 2, 3, 106, 107, 108, 109, 110, 111, 112, 113, 114, 115, 116, 117],
    // bottom
    [118, 118, 118, 118, 124, 122, 119, 121, 123, 126, 125, 120, 40, 39, 38, 37],
    // handle
    [41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56],
    [53, 54, 55, 56, 57, 58, 59, 60, 61, 62, 63, 64, 28, 65, 66, 67],
    // spout
    [68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79, 80, 81, 82, 83],
    [80, 81, 82, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95],
];

#[rustfmt::skip]
const CONTROL_POINTS: [[f64; 3]; 127] = [
    [0.2, 0.0, 2.7], [0.2, -0.112, 2.7], [0.112, -0.2, 2.7], [0.0, -0.2, 2.7],
    [1.3375, 0.0, 2.53125], [1.3375, -0.749, 2.53125], [0.749, -1.3375, 2.53125], [0.0, -1.3375, 2.53125],
    [1.4375, 0.0, 2.53125], [1.4375, -0.805, 2.53125], [0.805, -1.4375, 2.53125], [0.0, -1.4375, 2.53125],
    [1.5, 0.0, 2.4], [1.5, -0.84, 2.4], [0.84, -1.5, 2.4], [0.0, -1.5, 2.4],
    [1.75, 0.0, 1.875], [1.75, -0.98, 1.875], [0.98, -1.75, 1.875], [0.0, -1.75, 1.875],
    [2.0, 0.0, 1.35], [2.0, -1.12, 1.35], [1.12, -2.0, 1.35], [0.0, -2.0, 1.35],
    [2.0, 0.0, 0.9], [2.0, -1.12, 0.9], [1.12, -2.0, 0.9], [0.0, -2.0, 0.9],
    [-2.0, 0.0, 0.9],
    [2.0, 0.0, 0.45], [2.0, -1.12, 0.45], [1.12, -2.0, 0.45], [0.0, -2.0, 0.45],
    [1.5, 0.0, 0.225], [1.5, -0.84, 0.225], [0.84, -1.5, 0.225], [0.0, -1.5, 0.225],
    [1.5, 0.0, 0.15], [1.5, -0.84, 0.15], [0.84, -1.5, 0.15], [0.0, -1.5, 0.15],
    [-1.6, 0.0, 2.025], [-1.6, -0.3, 2.025], [-1.5, -0.3, 2.25], [-1.5, 0.0, 2.25],
    [-2.3, 0.0, 2.025], [-2.3, -0.3, 2.025], [-2.5, -0.3, 2.25], [-2.5, 0.0, 2.25],
    [-2.7, 0.0, 2.025], [-2.7, -0.3, 2.025], [-3.0, -0.3, 2.25], [-3.0, 0.0, 2.25],
    [-2.7, 0.0, 1.8], [-2.7, -0.3, 1.8], [-3.0, -0.3, 1.8], [-3.0, 0.0, 1.8],
    [-2.7, 0.0, 1.575], [-2.7, -0.3, 1.575], [-3.0, -0.3, 1.35], [-3.0, 0.0, 1.35],
    [-2.5, 0.0, 1.125], [-2.5, -0.3, 1.125], [-2.65, -0.3, 0.9375], [-2.65, 0.0, 0.9375],
    [-2.0, -0.3, 0.9], [-1.9, -0.3, 0.6], [-1.9, 0.0, 0.6],
    [1.7, 0.0, 1.425], [1.7, -0.66, 1.425], [1.7, -0.66, 0.6], [1.7, 0.0, 0.6],
    [2.6, 0.0, 1.425], [2.6, -0.66, 1.425], [3.1, -0.66, 0.825], [3.1, 0.0, 0.825],
    [2.3, 0.0, 2.1], [2.3, -0.25, 2.1], [2.4, -0.25, 2.025], [2.4, 0.0, 2.025],
    [2.7, 0.0, 2.4], [2.7, -0.25, 2.4], [3.3, -0.25, 2.4], [3.3, 0.0, 2.4],
    [2.8, 0.0, 2.475], [2.8, -0.25, 2.475], [3.525, -0.25, 2.49375], [3.525, 0.0, 2.49375],
    [2.9, 0.0, 2.475], [2.9, -0.15, 2.475], [3.45, -0.15, 2.5125], [3.45, 0.0, 2.5125],
    [2.8, 0.0, 2.4], [2.8, -0.15, 2.4], [3.2, -0.15, 2.4], [3.2, 0.0, 2.4],
    [0.0, 0.0, 3.15], [0.8, 0.0, 3.15], [0.8, -0.45, 3.15], [0.45, -0.8, 3.15],
    [0.0, -0.8, 3.15], [0.0, 0.0, 2.85],
    [1.4, 0.0, 2.4], [1.4, -0.784, 2.4], [0.784, -1.4, 2.4], [0.0, -1.4, 2.4],
    [0.4, 0.0, 2.55], [0.4, -0.224, 2.55], [0.224, -0.4, 2.55], [0.0, -0.4, 2.55],
    [1.3, 0.0, 2.55], [1.3, -0.728, 2.55], [0.728, -1.3, 2.55], [0.0, -1.3, 2.55],
    [1.3, 0.0, 2.4], [1.3, -0.728, 2.4], [0.728, -1.3, 2.4], [0.0, -1.3, 2.4],
    [0.0, 0.0, 0.0], [1.425, -0.798, 0.0], [1.5, 0.0, 0.075], [1.425, 0.0, 0.0],
    [0.798, -1.425, 0.0], [0.0, -1.5, 0.075], [0.0, -1.425, 0.0], [1.5, -0.84, 0.075],
    [0.84, -1.5, 0.075],
];

/// 4x4 control net indexed `[v][u]`.
type Patch = [[Vec3; 4]; 4];

/// Builds the control net of `patch`, optionally reversing the `u` order and
/// negating x and/or y.
fn control_net(patch: &[usize; 16], reverse_u: bool, flip_x: bool, flip_y: bool) -> Patch {
    let mut net = [[Vec3::ZERO; 4]; 4];
    for (j, row) in net.iter_mut().enumerate() {
        for (k, point) in row.iter_mut().enumerate() {
            let u = if reverse_u { 3 - k } else { k };
            let [x, y, z] = CONTROL_POINTS[patch[j * 4 + u]];
            let x = if flip_x { -x } else { x };
            let y = if flip_y { -y } else { y };
            *point = Vec3::from_f64([x, y, z]);
        }
    }
    net
}

/// Cubic Bernstein weights and their derivatives at `t`.
fn bernstein(t: f32) -> ([f32; 4], [f32; 4]) {
    let s = 1.0 - t;
    (
        [s * s * s, 3.0 * t * s * s, 3.0 * t * t * s, t * t * t],
        [
            -3.0 * s * s,
            3.0 * s * s - 6.0 * t * s,
            6.0 * t * s - 3.0 * t * t,
            3.0 * t * t,
        ],
    )
}

/// Position and partial derivatives of the patch at `(u, v)`.
fn evaluate(net: &Patch, u: f32, v: f32) -> (Vec3, Vec3, Vec3) {
    let (bu, du) = bernstein(u);
    let (bv, dv) = bernstein(v);
    let mut position = Vec3::ZERO;
    let mut d_u = Vec3::ZERO;
    let mut d_v = Vec3::ZERO;
    for j in 0..4 {
        for k in 0..4 {
            let p = net[j][k];
            position += p * (bu[k] * bv[j]);
            d_u += p * (du[k] * bv[j]);
            d_v += p * (bu[k] * dv[j]);
        }
    }
    (position, d_u, d_v)
}

/// Evaluates a surface vertex with a unit normal.
///
/// Collapsed patch edges (the lid knob, the bottom center) have a vanishing
/// partial derivative there; the normal is then taken slightly inside the
/// patch.
fn surface_vertex(net: &Patch, u: f32, v: f32) -> Vertex {
    const NUDGE: f32 = 1e-3;
    let (position, d_u, d_v) = evaluate(net, u, v);
    let mut normal = d_u.cross(d_v);
    if normal.magnitude() <= 1e-6 {
        let nu = u + if u < 0.5 { NUDGE } else { -NUDGE };
        let nv = v + if v < 0.5 { NUDGE } else { -NUDGE };
        let (_, d_u, d_v) = evaluate(net, nu, nv);
        normal = d_u.cross(d_v);
    }
    Vertex::new(position, normal.normalize())
}

fn emit_patch(builder: &mut MeshBuilder, net: &Patch, grid: usize, transform: &Mat4) {
    let step = 1.0 / grid as f32;
    let lattice: Vec<Vec<Vertex>> = (0..=grid)
        .map(|j| {
            (0..=grid)
                .map(|i| {
                    let vertex = surface_vertex(net, i as f32 * step, j as f32 * step);
                    Vertex::new(
                        transform.transform_point(vertex.position),
                        transform.transform_vector(vertex.normal).normalize(),
                    )
                })
                .collect()
        })
        .collect();

    match builder.style() {
        Style::Solid => {
            for rows in lattice.windows(2) {
                let strip: Vec<Vertex> = (0..=grid).flat_map(|i| [rows[0][i], rows[1][i]]).collect();
                builder.quad_strip(&strip);
            }
        }
        Style::Wire => {
            for row in &lattice {
                builder.line_strip(row);
            }
            for i in 0..=grid {
                let column: Vec<Vertex> = lattice.iter().map(|row| row[i]).collect();
                builder.line_strip(&column);
            }
        }
    }
}

/// Teapot resting on the xz plane's neighbourhood with its lid pointing up
/// (+y) and spout towards +x. `size` scales it uniformly; a unit teapot is
/// about 3 units wide.
pub fn teapot(size: f32, grid: u32, style: Style) -> Mesh {
    let mut builder = MeshBuilder::new(style);
    if grid == 0 {
        return builder.build();
    }
    let s = 0.5 * size;
    let transform = Mat4::rotation_x(270f32.to_radians())
        * Mat4::scaling(s, s, s)
        * Mat4::translation(0.0, 0.0, -1.5);
    let grid = grid as usize;

    for (index, patch) in PATCHES.iter().enumerate() {
        emit_patch(&mut builder, &control_net(patch, false, false, false), grid, &transform);
        emit_patch(&mut builder, &control_net(patch, true, false, true), grid, &transform);
        if index < FOUR_WAY_PATCHES {
            emit_patch(&mut builder, &control_net(patch, true, true, false), grid, &transform);
            emit_patch(&mut builder, &control_net(patch, false, true, true), grid, &transform);
        }
    }
    builder.build()
}
