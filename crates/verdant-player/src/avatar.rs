//! The avatar's body in the registry.
//!
//! Movement is kinematic: the caller supplies the ground height and the
//! avatar is stood on it. There is no physics.

use bevy_ecs::prelude::*;
use glam::Vec2;
use verdant_ecs::{Bounds, Tag};

/// Marker for the player-controlled avatar.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Avatar;

#[derive(Bundle)]
pub struct AvatarBundle {
    pub avatar: Avatar,
    pub tag: Tag,
    pub bounds: Bounds,
}

/// Bounds of a `size` square standing at `x` with its feet on `ground`.
fn standing_bounds(x: f32, ground: f32, size: f32) -> Bounds {
    Bounds::square(Vec2::new(x, ground - size), size)
}

/// Spawn the avatar standing on the ground at `x`.
pub fn spawn_avatar(world: &mut World, x: f32, ground: f32, size: f32) -> Entity {
    world
        .spawn(AvatarBundle {
            avatar: Avatar,
            tag: Tag::Avatar,
            bounds: standing_bounds(x, ground, size),
        })
        .id()
}

/// Current bounds of `avatar`.
pub fn avatar_bounds(world: &World, avatar: Entity) -> Option<Bounds> {
    world.get::<Bounds>(avatar).copied()
}

/// Shift `avatar` by `dx` and stand it on the ground height `ground_at`
/// reports for its new position. Returns the new bounds.
pub fn move_avatar(
    world: &mut World,
    avatar: Entity,
    dx: f32,
    ground_at: impl Fn(f32) -> f32,
) -> Option<Bounds> {
    let mut bounds = world.get_mut::<Bounds>(avatar)?;
    let size = bounds.size.y;
    let x = bounds.top_left.x + dx;
    *bounds = standing_bounds(x, ground_at(x + bounds.size.x * 0.5), size);
    Some(*bounds)
}
