//! Serializable dump of the live world.

use bevy_ecs::prelude::*;
use serde::{Deserialize, Serialize};
use verdant_ecs::{Bounds, Color, Fill, Tag, TimeRes};

/// One entity as seen by an outside observer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    pub tag: Tag,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Option<Color>,
    /// Number of repaints since spawn.
    pub revision: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub seed: u64,
    /// Session time in seconds.
    pub elapsed: f64,
    pub energy: f32,
    pub entities: Vec<EntitySnapshot>,
}

impl WorldSnapshot {
    /// Capture every tagged entity in registry order.
    pub fn capture(world: &mut World, seed: u64, energy: f32) -> Self {
        let elapsed = world.get_resource::<TimeRes>().map_or(0.0, |t| t.elapsed);
        let entities = world
            .query::<(&Tag, &Bounds, Option<&Fill>)>()
            .iter(world)
            .map(|(tag, bounds, fill)| EntitySnapshot {
                tag: *tag,
                x: bounds.top_left.x,
                y: bounds.top_left.y,
                width: bounds.size.x,
                height: bounds.size.y,
                color: fill.map(|f| f.color),
                revision: fill.map_or(0, |f| f.revision),
            })
            .collect();
        Self {
            seed,
            elapsed,
            energy,
            entities,
        }
    }

    pub fn count(&self, tag: Tag) -> usize {
        self.entities.iter().filter(|e| e.tag == tag).count()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
