//! Core ECS components shared by terrain, flora and the avatar.
//!
//! Every world entity carries a [`Tag`], a [`Bounds`] rectangle in screen
//! coordinates (y grows downwards) and, if it is drawn, a [`Fill`].

use bevy_ecs::prelude::*;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::color::Color;

/// What kind of world object an entity is.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    Ground,
    Tree,
    Leaf,
    Fruit,
    Avatar,
}

impl Tag {
    /// Lowercase name used in logs and snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Ground => "ground",
            Tag::Tree => "tree",
            Tag::Leaf => "leaf",
            Tag::Fruit => "fruit",
            Tag::Avatar => "avatar",
        }
    }
}

/// Axis-aligned rectangle: top-left corner plus size.
///
/// A rectangle with zero width or height has no extent and never overlaps
/// anything. Hidden fruit relies on this to stay uncollectable.
#[derive(Component, Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    pub top_left: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(top_left: Vec2, size: Vec2) -> Self {
        Self { top_left, size }
    }

    /// A `side` × `side` square at `top_left`.
    pub fn square(top_left: Vec2, side: f32) -> Self {
        Self::new(top_left, Vec2::splat(side))
    }

    pub fn center(&self) -> Vec2 {
        self.top_left + self.size * 0.5
    }

    pub fn bottom_right(&self) -> Vec2 {
        self.top_left + self.size
    }

    /// True when the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Strict overlap test. Touching edges do not count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        let a_max = self.bottom_right();
        let b_max = other.bottom_right();
        self.top_left.x < b_max.x
            && other.top_left.x < a_max.x
            && self.top_left.y < b_max.y
            && other.top_left.y < a_max.y
    }
}

/// Outline the renderer should draw a [`Fill`] with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle,
    Oval,
}

/// Visual fill of an entity.
///
/// `revision` counts repaints, so a repaint is observable even when the new
/// color happens to equal the old one.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Fill {
    pub color: Color,
    pub shape: Shape,
    pub revision: u32,
}

impl Fill {
    pub fn rectangle(color: Color) -> Self {
        Self {
            color,
            shape: Shape::Rectangle,
            revision: 0,
        }
    }

    pub fn oval(color: Color) -> Self {
        Self {
            color,
            shape: Shape::Oval,
            revision: 0,
        }
    }

    /// Replace the color and bump the revision.
    pub fn repaint(&mut self, color: Color) {
        self.color = color;
        self.revision = self.revision.wrapping_add(1);
    }
}

/// Marker for static geometry that other bodies cannot pass through.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Immovable;

/// Bundle for a static, drawn world object.
#[derive(Bundle)]
pub struct StaticBundle {
    pub tag: Tag,
    pub bounds: Bounds,
    pub fill: Fill,
    pub immovable: Immovable,
}

impl StaticBundle {
    pub fn new(tag: Tag, bounds: Bounds, fill: Fill) -> Self {
        Self {
            tag,
            bounds,
            fill,
            immovable: Immovable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_center() {
        let b = Bounds::new(Vec2::new(30.0, 60.0), Vec2::new(30.0, 120.0));
        assert_eq!(b.center(), Vec2::new(45.0, 120.0));
    }

    #[test]
    fn test_overlapping_bounds() {
        let a = Bounds::square(Vec2::ZERO, 10.0);
        let b = Bounds::square(Vec2::new(5.0, 5.0), 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Bounds::square(Vec2::ZERO, 10.0);
        let b = Bounds::square(Vec2::new(10.0, 0.0), 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_zero_extent_never_overlaps() {
        let hidden = Bounds::new(Vec2::new(5.0, 5.0), Vec2::ZERO);
        let avatar = Bounds::square(Vec2::ZERO, 50.0);
        assert!(hidden.is_empty());
        assert!(!hidden.overlaps(&avatar));
        assert!(!avatar.overlaps(&hidden));
    }

    #[test]
    fn test_repaint_bumps_revision() {
        let mut fill = Fill::oval(Color::RED);
        fill.repaint(Color::RED);
        fill.repaint(Color::YELLOW);
        assert_eq!(fill.revision, 2);
        assert_eq!(fill.color, Color::YELLOW);
        assert_eq!(fill.shape, Shape::Oval);
    }

    #[test]
    fn test_spawn_static_bundle() {
        let mut world = World::new();
        let e = world
            .spawn(StaticBundle::new(
                Tag::Ground,
                Bounds::square(Vec2::new(0.0, 390.0), 30.0),
                Fill::rectangle(Color::GROUND),
            ))
            .id();
        assert_eq!(world.get::<Tag>(e), Some(&Tag::Ground));
        assert!(world.get::<Immovable>(e).is_some());
    }
}
