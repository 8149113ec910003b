//! Fruit collection and respawn.
//!
//! A visible fruit touched by the avatar grants its reward at once, shrinks to
//! zero size and schedules its own respawn. Zero-size bounds never overlap,
//! so a hidden fruit cannot be collected twice.

use bevy_ecs::prelude::*;
use glam::Vec2;
use tracing::{debug, trace};
use verdant_ecs::{Bounds, EnergyGain, schedule_after};

use crate::components::Fruit;

/// Collect `fruit` on behalf of `energy`.
///
/// Returns `true` if the fruit was visible and has now been collected. A
/// hidden fruit, or an entity that is not a fruit, is left untouched.
pub fn collect_fruit(world: &mut World, fruit: Entity, energy: &mut dyn EnergyGain) -> bool {
    let Some(mut state) = world.get_mut::<Fruit>(fruit) else {
        return false;
    };
    let Some(reward) = state.on_collision() else {
        trace!(?fruit, "fruit already hidden");
        return false;
    };
    let delay = state.respawn_delay;

    if let Some(mut bounds) = world.get_mut::<Bounds>(fruit) {
        bounds.size = Vec2::ZERO;
    }
    energy.grant(reward);
    schedule_after(world, fruit, delay, "fruit_respawn", respawn_fruit);

    debug!(?fruit, reward, respawn_in = delay, "fruit collected");
    true
}

/// Bring a hidden fruit back at full size in its original position.
pub fn respawn_fruit(world: &mut World, fruit: Entity) {
    let Some(mut state) = world.get_mut::<Fruit>(fruit) else {
        return;
    };
    if !state.restore() {
        return;
    }
    let size = state.full_size;
    if let Some(mut bounds) = world.get_mut::<Bounds>(fruit) {
        bounds.size = Vec2::splat(size);
    }
    trace!(?fruit, "fruit respawned");
}

/// Fruit whose bounds overlap `avatar`. Hidden fruit never match.
pub fn fruit_touching(world: &mut World, avatar: &Bounds) -> Vec<Entity> {
    world
        .query_filtered::<(Entity, &Bounds), With<Fruit>>()
        .iter(world)
        .filter(|(_, bounds)| bounds.overlaps(avatar))
        .map(|(entity, _)| entity)
        .collect()
}
