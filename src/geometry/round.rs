use super::{CircleTable, Mesh, MeshBuilder, Style, Vertex};
use crate::math::Vec3;

#[inline]
fn vertex(position: [f64; 3], normal: [f64; 3]) -> Vertex {
    Vertex::new(Vec3::from_f64(position), Vec3::from_f64(normal))
}

fn empty(style: Style) -> Mesh {
    MeshBuilder::new(style).build()
}

/// Sphere centered on the origin with its poles on the z axis.
///
/// `slices` subdivide around the z axis, `stacks` along it. A zero
/// resolution yields an empty mesh.
pub fn sphere(radius: f32, slices: u32, stacks: u32, style: Style) -> Mesh {
    if slices == 0 || stacks == 0 {
        return empty(style);
    }
    let radius = radius as f64;
    let slices_i = slices as i32;
    let around = CircleTable::new(-slices_i);
    let along = CircleTable::new(stacks as i32 * 2);
    let slices = slices as usize;
    let stacks = stacks as usize;

    let ring = |z: f64, r: f64, j: usize| {
        let (c, s) = (around.cos[j], around.sin[j]);
        vertex([c * r * radius, s * r * radius, z * radius], [c * r, s * r, z])
    };

    let mut builder = MeshBuilder::new(style);
    match style {
        Style::Solid => {
            let mut z1 = along.cos[1];
            let mut r1 = along.sin[1];

            let cap: Vec<Vertex> = (0..=slices).rev().map(|j| ring(z1, r1, j)).collect();
            builder.fan(vertex([0.0, 0.0, radius], [0.0, 0.0, 1.0]), &cap);

            for i in 1..stacks.saturating_sub(1) {
                let (z0, r0) = (z1, r1);
                z1 = along.cos[i + 1];
                r1 = along.sin[i + 1];

                let strip: Vec<Vertex> = (0..=slices)
                    .flat_map(|j| [ring(z1, r1, j), ring(z0, r0, j)])
                    .collect();
                builder.quad_strip(&strip);
            }

            let cap: Vec<Vertex> = (0..=slices).map(|j| ring(z1, r1, j)).collect();
            builder.fan(vertex([0.0, 0.0, -radius], [0.0, 0.0, -1.0]), &cap);
        }
        Style::Wire => {
            for i in 1..stacks {
                let (z, r) = (along.cos[i], along.sin[i]);
                let circle: Vec<Vertex> = (0..=slices)
                    .map(|j| {
                        let (x, y) = (around.cos[j], around.sin[j]);
                        vertex([x * r * radius, y * r * radius, z * radius], [x, y, z])
                    })
                    .collect();
                builder.line_loop(&circle);
            }

            for i in 0..slices {
                let meridian: Vec<Vertex> = (0..=stacks)
                    .map(|j| {
                        let x = around.cos[i] * along.sin[j];
                        let y = around.sin[i] * along.sin[j];
                        let z = along.cos[j];
                        vertex([x * radius, y * radius, z * radius], [x, y, z])
                    })
                    .collect();
                builder.line_strip(&meridian);
            }
        }
    }
    builder.build()
}

/// Cone with its base disc on the z = 0 plane and its apex at `z = height`.
pub fn cone(base: f32, height: f32, slices: u32, stacks: u32, style: Style) -> Mesh {
    if slices == 0 || stacks == 0 {
        return empty(style);
    }
    let (base, height) = (base as f64, height as f64);
    let table = CircleTable::new(-(slices as i32));
    let slices = slices as usize;
    let stacks = stacks as usize;

    let z_step = height / stacks as f64;
    let r_step = base / stacks as f64;

    let slant = (height * height + base * base).sqrt();
    let (cosn, sinn) = if slant > 0.0 {
        (height / slant, base / slant)
    } else {
        (1.0, 0.0)
    };
    let side_normal = |j: usize| [table.cos[j] * sinn, table.sin[j] * sinn, cosn];
    let at = |r: f64, z: f64, j: usize| [table.cos[j] * r, table.sin[j] * r, z];

    let mut builder = MeshBuilder::new(style);
    match style {
        Style::Solid => {
            let down = [0.0, 0.0, -1.0];
            let rim: Vec<Vertex> = (0..=slices).map(|j| vertex(at(base, 0.0, j), down)).collect();
            builder.fan(vertex([0.0, 0.0, 0.0], down), &rim);

            let (mut z0, mut z1) = (0.0, z_step);
            let (mut r0, mut r1) = (base, base - r_step);

            for _ in 0..stacks - 1 {
                let strip: Vec<Vertex> = (0..=slices)
                    .flat_map(|j| {
                        let n = side_normal(j);
                        [vertex(at(r0, z0, j), n), vertex(at(r1, z1, j), n)]
                    })
                    .collect();
                builder.quad_strip(&strip);

                z0 = z1;
                z1 += z_step;
                r0 = r1;
                r1 -= r_step;
            }

            for j in 0..slices {
                let n = side_normal(j);
                builder.triangle(
                    vertex(at(r0, z0, j), n),
                    vertex([0.0, 0.0, height], n),
                    vertex(at(r0, z0, j + 1), side_normal(j + 1)),
                );
            }
        }
        Style::Wire => {
            let (mut z, mut r) = (0.0, base);
            for _ in 0..stacks {
                let circle: Vec<Vertex> = (0..slices)
                    .map(|j| vertex(at(r, z, j), side_normal(j)))
                    .collect();
                builder.line_loop(&circle);
                z += z_step;
                r -= r_step;
            }

            for j in 0..slices {
                let n = side_normal(j);
                builder.line(vertex(at(base, 0.0, j), n), vertex([0.0, 0.0, height], n));
            }
        }
    }
    builder.build()
}

/// Capped cylinder from z = 0 to `z = height`.
pub fn cylinder(radius: f32, height: f32, slices: u32, stacks: u32, style: Style) -> Mesh {
    if slices == 0 || stacks == 0 {
        return empty(style);
    }
    let (radius, height) = (radius as f64, height as f64);
    let table = CircleTable::new(-(slices as i32));
    let slices = slices as usize;
    let z_step = height / stacks as f64;

    let side_normal = |j: usize| [table.cos[j], table.sin[j], 0.0];
    let at = |z: f64, j: usize| [table.cos[j] * radius, table.sin[j] * radius, z];

    let mut builder = MeshBuilder::new(style);
    match style {
        Style::Solid => {
            let down = [0.0, 0.0, -1.0];
            let rim: Vec<Vertex> = (0..=slices).map(|j| vertex(at(0.0, j), down)).collect();
            builder.fan(vertex([0.0, 0.0, 0.0], down), &rim);

            let up = [0.0, 0.0, 1.0];
            let rim: Vec<Vertex> = (0..=slices).rev().map(|j| vertex(at(height, j), up)).collect();
            builder.fan(vertex([0.0, 0.0, height], up), &rim);

            let (mut z0, mut z1) = (0.0, z_step);
            for i in 1..=stacks {
                if i == stacks {
                    z1 = height;
                }
                let strip: Vec<Vertex> = (0..=slices)
                    .flat_map(|j| {
                        let n = side_normal(j);
                        [vertex(at(z0, j), n), vertex(at(z1, j), n)]
                    })
                    .collect();
                builder.quad_strip(&strip);
                z0 = z1;
                z1 += z_step;
            }
        }
        Style::Wire => {
            let mut z = 0.0;
            for i in 0..=stacks {
                if i == stacks {
                    z = height;
                }
                let circle: Vec<Vertex> =
                    (0..slices).map(|j| vertex(at(z, j), side_normal(j))).collect();
                builder.line_loop(&circle);
                z += z_step;
            }

            for j in 0..slices {
                let n = side_normal(j);
                builder.line(vertex(at(0.0, j), n), vertex(at(height, j), n));
            }
        }
    }
    builder.build()
}

/// Torus around the z axis.
///
/// `inner_radius` is the tube radius, `outer_radius` the distance from the
/// axis to the tube center. `sides` subdivide the tube cross-section, `rings`
/// subdivide around the axis.
pub fn torus(inner_radius: f32, outer_radius: f32, sides: u32, rings: u32, style: Style) -> Mesh {
    if sides == 0 || rings == 0 {
        return empty(style);
    }
    let (iradius, oradius) = (inner_radius as f64, outer_radius as f64);

    // Solid grids repeat the seam row and column so quads can close the loop.
    let extra = match style {
        Style::Solid => 1,
        Style::Wire => 0,
    };
    let sides = sides as usize + extra;
    let rings = rings as usize + extra;
    let dpsi = 2.0 * std::f64::consts::PI / (rings - extra) as f64;
    let dphi = -2.0 * std::f64::consts::PI / (sides - extra) as f64;

    let mut grid = Vec::with_capacity(sides * rings);
    for j in 0..rings {
        let psi = dpsi * j as f64;
        let (spsi, cpsi) = psi.sin_cos();
        for i in 0..sides {
            let phi = dphi * i as f64;
            let (sphi, cphi) = phi.sin_cos();
            grid.push(vertex(
                [
                    cpsi * (oradius + cphi * iradius),
                    spsi * (oradius + cphi * iradius),
                    sphi * iradius,
                ],
                [cpsi * cphi, spsi * cphi, sphi],
            ));
        }
    }
    let at = |j: usize, i: usize| grid[j * sides + i];

    let mut builder = MeshBuilder::new(style);
    match style {
        Style::Solid => {
            for i in 0..sides - 1 {
                for j in 0..rings - 1 {
                    builder.quad(at(j, i), at(j, i + 1), at(j + 1, i + 1), at(j + 1, i));
                }
            }
        }
        Style::Wire => {
            for i in 0..sides {
                let tube: Vec<Vertex> = (0..rings).map(|j| at(j, i)).collect();
                builder.line_loop(&tube);
            }
            for j in 0..rings {
                let ring: Vec<Vertex> = (0..sides).map(|i| at(j, i)).collect();
                builder.line_loop(&ring);
            }
        }
    }
    builder.build()
}
