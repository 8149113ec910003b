//! World factory function and core resource registration.

use bevy_ecs::prelude::*;

use crate::{Scheduler, TimeRes};

/// Registers all core resources into the given world with default values.
pub fn register_core_resources(world: &mut World) {
    world.insert_resource(TimeRes::default());
    world.insert_resource(Scheduler::default());
}

/// Creates the entity registry: an empty world with [`TimeRes`] and
/// [`Scheduler`] inserted.
pub fn create_world() -> World {
    let mut world = World::new();
    register_core_resources(&mut world);
    world
}
