use super::{Mesh, MeshBuilder, Style, Vertex};
use crate::math::Vec3;

const TETRA_V: [[f64; 3]; 4] = [
    [-0.5, -0.288675134595, -0.144337567297],
    [0.5, -0.288675134595, -0.144337567297],
    [0.0, 0.577350269189, -0.144337567297],
    [0.0, 0.0, 0.672159013631],
];

const TETRA_I: [[usize; 3]; 4] = [[0, 1, 2], [0, 2, 3], [0, 3, 1], [1, 3, 2]];

const TETRA_N: [[f64; 3]; 4] = [
    [0.0, 0.0, -1.0],
    [-0.816496580928, 0.471404520791, 0.333333333333],
    [0.0, -0.942809041582, 0.333333333333],
    [0.816496580928, 0.471404520791, 0.333333333333],
];

/// Sierpinski tetrahedron of `levels` recursive subdivisions.
///
/// At level 0 a single tetrahedron of edge length `scale` is placed at
/// `offset`. Each level halves the scale and places four copies at the
/// corners of the parent.
pub fn sierpinski_sponge(levels: u32, offset: [f64; 3], scale: f64, style: Style) -> Mesh {
    let mut builder = MeshBuilder::new(style);
    emit(&mut builder, levels, offset, scale);
    builder.build()
}

fn emit(builder: &mut MeshBuilder, levels: u32, offset: [f64; 3], scale: f64) {
    if levels == 0 {
        for (face, normal) in TETRA_I.iter().zip(TETRA_N.iter()) {
            let normal = Vec3::from_f64(*normal);
            let corners: Vec<Vertex> = face
                .iter()
                .map(|&i| {
                    let p = TETRA_V[i];
                    Vertex::new(
                        Vec3::from_f64([
                            offset[0] + scale * p[0],
                            offset[1] + scale * p[1],
                            offset[2] + scale * p[2],
                        ]),
                        normal,
                    )
                })
                .collect();
            builder.face(&corners);
        }
        return;
    }

    let scale = scale / 2.0;
    // Each child position is derived from this call's offset, not accumulated
    // across siblings of the parent.
    let mut local = [
        offset[0] + scale * TETRA_V[0][0],
        offset[1] + scale * TETRA_V[0][1],
        offset[2] + scale * TETRA_V[0][2],
    ];
    emit(builder, levels - 1, local, scale);

    local[0] += scale;
    emit(builder, levels - 1, local, scale);

    local[0] -= 0.5 * scale;
    local[1] += 0.866025403784 * scale;
    emit(builder, levels - 1, local, scale);

    local[1] -= 0.577350269189 * scale;
    local[2] += 0.816496580928 * scale;
    emit(builder, levels - 1, local, scale);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn each_level_quadruples_the_faces() {
        for levels in 0..4 {
            let mesh = sierpinski_sponge(levels, [0.0; 3], 1.0, Style::Solid);
            assert_eq!(mesh.primitive_count(), 4 * 4usize.pow(levels));
        }
    }

    #[test]
    fn subdivision_stays_inside_the_parent() {
        let parent = sierpinski_sponge(0, [1.0, 2.0, 3.0], 2.0, Style::Solid);
        let child = sierpinski_sponge(3, [1.0, 2.0, 3.0], 2.0, Style::Solid);
        let (pmin, pmax) = parent.bounds().unwrap();
        let (cmin, cmax) = child.bounds().unwrap();
        assert_relative_eq!(pmin.x, cmin.x, epsilon = 1e-5);
        assert_relative_eq!(pmax.x, cmax.x, epsilon = 1e-5);
        assert_relative_eq!(pmin.y, cmin.y, epsilon = 1e-5);
        assert_relative_eq!(pmax.z, cmax.z, epsilon = 1e-5);
    }

    #[test]
    fn wire_base_case_outlines_four_triangles() {
        let mesh = sierpinski_sponge(0, [0.0; 3], 1.0, Style::Wire);
        assert_eq!(mesh.primitive_count(), 12);
    }
}
