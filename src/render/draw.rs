//! Per-frame draw lists.
//!
//! A [`DrawList`] is rebuilt every frame from the frame context. Items borrow
//! meshes that live for the whole program and own the few that are generated
//! per frame (the frustum outline).

use std::borrow::Cow;

use crate::colors::Color;
use crate::geometry::{Mesh, Topology};
use crate::math::Mat4;

/// How an item's fragments get their color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shading {
    /// Diffuse + ambient lighting with shadow lookup.
    Lit,
    /// Flat color; never lit or shadowed.
    Unlit(Color),
}

/// Which space the item's model matrix maps into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Space {
    /// Model matrix maps to world space; the view matrix is applied after.
    World,
    /// Model matrix maps straight to eye space; the view matrix is skipped.
    Eye,
}

#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    pub mesh: Cow<'a, Mesh>,
    pub model: Mat4,
    pub shading: Shading,
    pub space: Space,
    /// Written into the depth target by the capture pass.
    pub casts_shadow: bool,
}

impl<'a> DrawItem<'a> {
    /// Lit, shadow-casting world-space item.
    pub fn lit(mesh: &'a Mesh, model: Mat4) -> Self {
        Self {
            mesh: Cow::Borrowed(mesh),
            model,
            shading: Shading::Lit,
            space: Space::World,
            casts_shadow: true,
        }
    }

    /// Unlit world-space item.
    pub fn unlit(mesh: &'a Mesh, model: Mat4, color: Color) -> Self {
        Self::unlit_cow(Cow::Borrowed(mesh), model, color)
    }

    /// Unlit item owning a mesh generated for this frame.
    pub fn unlit_owned(mesh: Mesh, model: Mat4, color: Color) -> Self {
        Self::unlit_cow(Cow::Owned(mesh), model, color)
    }

    fn unlit_cow(mesh: Cow<'a, Mesh>, model: Mat4, color: Color) -> Self {
        Self {
            mesh,
            model,
            shading: Shading::Unlit(color),
            space: Space::World,
            casts_shadow: false,
        }
    }

    pub fn in_eye_space(mut self) -> Self {
        self.space = Space::Eye;
        self
    }

    /// Whether the depth capture pass draws this item.
    ///
    /// Only filled world-space geometry is captured.
    pub fn is_captured(&self) -> bool {
        self.casts_shadow
            && self.space == Space::World
            && self.mesh.topology() == Topology::Triangles
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawList<'a> {
    items: Vec<DrawItem<'a>>,
}

impl<'a> DrawList<'a> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: DrawItem<'a>) {
        self.items.push(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawItem<'a>> {
        self.items.iter()
    }

    /// Items the depth capture pass draws.
    pub fn shadow_casters(&self) -> impl Iterator<Item = &DrawItem<'a>> {
        self.items.iter().filter(|item| item.is_captured())
    }
}

impl<'a> Extend<DrawItem<'a>> for DrawList<'a> {
    fn extend<I: IntoIterator<Item = DrawItem<'a>>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}

impl<'a, 'b> IntoIterator for &'b DrawList<'a> {
    type Item = &'b DrawItem<'a>;
    type IntoIter = std::slice::Iter<'b, DrawItem<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::geometry::{cube, Style};

    #[test]
    fn only_lit_solid_world_items_cast_shadows() {
        let solid = cube(1.0, Style::Solid);
        let wire = cube(1.0, Style::Wire);

        let mut list = DrawList::new();
        list.push(DrawItem::lit(&solid, Mat4::identity()));
        list.push(DrawItem::lit(&wire, Mat4::identity()));
        list.push(DrawItem::unlit(&solid, Mat4::identity(), colors::LIGHT_MARKER));
        list.push(DrawItem::lit(&solid, Mat4::identity()).in_eye_space());
        list.push(DrawItem::unlit_owned(wire.clone(), Mat4::identity(), colors::RED));

        assert_eq!(list.len(), 5);
        assert_eq!(list.shadow_casters().count(), 1);
        assert!(matches!(list.iter().last().unwrap().mesh, Cow::Owned(_)));
    }
}
