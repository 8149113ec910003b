//! Entity removal.
//!
//! Generation only ever adds entities. The registry owner removes them, either
//! one at a time or by culling a horizontal range that scrolled out of view.

use bevy_ecs::prelude::*;
use tracing::debug;

use crate::components::{Bounds, Tag};

/// Despawns an entity immediately. Returns `false` if the entity was already
/// despawned or never existed.
pub fn despawn_entity(world: &mut World, entity: Entity) -> bool {
    world.despawn(entity)
}

/// Despawn every world object whose left edge lies in `[min_x, max_x)`.
///
/// The avatar is never culled. Pending scheduled tasks of culled entities
/// become no-ops. Returns how many entities were removed.
pub fn despawn_in_range(world: &mut World, min_x: f32, max_x: f32) -> usize {
    let doomed: Vec<Entity> = world
        .query::<(Entity, &Tag, &Bounds)>()
        .iter(world)
        .filter(|(_, tag, bounds)| {
            **tag != Tag::Avatar && (min_x..max_x).contains(&bounds.top_left.x)
        })
        .map(|(entity, _, _)| entity)
        .collect();

    let removed = doomed.into_iter().filter(|&e| world.despawn(e)).count();
    debug!(min_x, max_x, removed, "range culled");
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Scheduler, create_world, fire_due_tasks, schedule_after};
    use glam::Vec2;

    fn spawn_at(world: &mut World, tag: Tag, x: f32) -> Entity {
        world.spawn((tag, Bounds::square(Vec2::new(x, 300.0), 30.0))).id()
    }

    #[test]
    fn test_despawn_removes_entity() {
        let mut world = World::new();
        let entity = spawn_at(&mut world, Tag::Ground, 0.0);

        assert!(despawn_entity(&mut world, entity));
        assert!(world.get_entity(entity).is_err());
        assert!(!despawn_entity(&mut world, entity), "second despawn is a no-op");
    }

    #[test]
    fn test_cull_removes_only_the_range() {
        let mut world = World::new();
        let left = spawn_at(&mut world, Tag::Ground, -30.0);
        let inside = spawn_at(&mut world, Tag::Tree, 0.0);
        let leaf = spawn_at(&mut world, Tag::Leaf, 59.5);
        let edge = spawn_at(&mut world, Tag::Fruit, 60.0);

        assert_eq!(despawn_in_range(&mut world, 0.0, 60.0), 2);
        assert!(world.get_entity(inside).is_err());
        assert!(world.get_entity(leaf).is_err());
        assert!(world.get_entity(left).is_ok());
        assert!(world.get_entity(edge).is_ok(), "max_x is exclusive");
    }

    #[test]
    fn test_cull_spares_the_avatar() {
        let mut world = World::new();
        let avatar = spawn_at(&mut world, Tag::Avatar, 10.0);
        assert_eq!(despawn_in_range(&mut world, 0.0, 100.0), 0);
        assert!(world.get_entity(avatar).is_ok());
    }

    #[test]
    fn test_culled_owner_drops_pending_task() {
        #[derive(Resource, Default)]
        struct Fired(u32);

        let mut world = create_world();
        world.insert_resource(Fired::default());
        let fruit = spawn_at(&mut world, Tag::Fruit, 0.0);
        schedule_after(&mut world, fruit, 1.0, "count", |world, _| {
            world.resource_mut::<Fired>().0 += 1;
        });

        despawn_in_range(&mut world, -100.0, 100.0);
        world.resource_mut::<crate::TimeRes>().advance(2.0);

        assert_eq!(fire_due_tasks(&mut world), 0);
        assert_eq!(world.resource::<Fired>().0, 0);
        assert!(world.resource::<Scheduler>().is_empty());
    }
}
