//! Registry query helpers.

use bevy_ecs::prelude::*;

use crate::components::Tag;

/// Count entities carrying `tag`.
pub fn count_tagged(world: &mut World, tag: Tag) -> usize {
    world.query::<&Tag>().iter(world).filter(|t| **t == tag).count()
}
