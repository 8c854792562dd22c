//! Unlit helper geometry drawn on top of the scene.

use super::MeshLibrary;
use crate::colors::{self, Color};
use crate::geometry::{Mesh, MeshBuilder, Style, Vertex};
use crate::math::{Mat4, Vec3};
use crate::projection::Projection;
use crate::render::DrawItem;

/// The frustum outline is drawn this much wider than the frustum itself.
const FRUSTUM_SPREAD: f32 = std::f32::consts::SQRT_2;
/// Far-rectangle shrink of the adjusted outline.
const FRUSTUM_ADJUST_SCALE: f32 = 0.95;

const AXIS_COLORS: [Color; 3] = [colors::RED, colors::GREEN, colors::BLUE];

/// Small sphere at the light position. Never lit and never captured.
pub fn light_marker(meshes: &MeshLibrary, position: Vec3) -> DrawItem<'_> {
    DrawItem::unlit(
        &meshes.light_marker,
        Mat4::translation_v(position),
        colors::LIGHT_MARKER,
    )
}

/// X, Y and Z axis lines in red, green and blue under `model`.
pub fn axes_items(meshes: &MeshLibrary, model: Mat4, adjusted: bool) -> [DrawItem<'_>; 3] {
    let axes = meshes.axes(adjusted);
    [0, 1, 2].map(|i| DrawItem::unlit(&axes[i], model, AXIS_COLORS[i]))
}

/// Eye-space outline of a perspective frustum.
///
/// Near edges are red, the edges joining near and far are green, far edges
/// are blue.
pub fn frustum_outline(projection: &Projection, adjusted: bool) -> [DrawItem<'static>; 3] {
    let far_scale = if adjusted { FRUSTUM_ADJUST_SCALE } else { 1.0 };
    let corners = projection.outline_corners(FRUSTUM_SPREAD, far_scale);
    let (near, far) = corners.split_at(4);

    let near_edges = edge_mesh((0..4).map(|i| (near[i], near[(i + 1) % 4])));
    let side_edges = edge_mesh((0..4).map(|i| (near[i], far[i])));
    let far_edges = edge_mesh((0..4).map(|i| (far[i], far[(i + 1) % 4])));

    [
        (near_edges, colors::RED),
        (side_edges, colors::GREEN),
        (far_edges, colors::BLUE),
    ]
    .map(|(mesh, color)| DrawItem::unlit_owned(mesh, Mat4::identity(), color).in_eye_space())
}

fn edge_mesh(edges: impl Iterator<Item = (Vec3, Vec3)>) -> Mesh {
    let mut builder = MeshBuilder::new(Style::Wire);
    for (a, b) in edges {
        builder.line(Vertex::new(a, Vec3::Z), Vertex::new(b, Vec3::Z));
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Shading, Space};

    #[test]
    fn frustum_outline_has_four_edges_per_color() {
        let projection = Projection::from_degrees(45.0, 4.0 / 3.0, 0.1, 100.0);
        let items = frustum_outline(&projection, false);
        for (item, color) in items.iter().zip([colors::RED, colors::GREEN, colors::BLUE]) {
            assert_eq!(item.mesh.primitive_count(), 4);
            assert_eq!(item.space, Space::Eye);
            assert_eq!(item.shading, Shading::Unlit(color));
            assert!(!item.is_captured());
        }
    }

    #[test]
    fn far_edges_form_a_closed_rectangle() {
        let projection = Projection::from_degrees(45.0, 1.0, 1.0, 10.0);
        let [_, _, far] = frustum_outline(&projection, true);
        let lines: Vec<_> = far.mesh.lines().collect();
        for (i, line) in lines.iter().enumerate() {
            let next = &lines[(i + 1) % lines.len()];
            assert_eq!(line[1].position, next[0].position);
            assert_eq!(line[0].position.z, -10.0);
        }
    }

    #[test]
    fn light_marker_is_unlit_at_the_light() {
        let meshes = MeshLibrary::new();
        let item = light_marker(&meshes, Vec3::new(2.0, 6.5, 0.0));
        assert_eq!(item.shading, Shading::Unlit(colors::LIGHT_MARKER));
        assert_eq!(item.model.get(0, 3), 2.0);
        assert_eq!(item.model.get(1, 3), 6.5);
        assert!(!item.is_captured());
    }
}
