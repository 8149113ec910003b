//! Entity registry, shared components, frame schedule, deferred tasks and
//! event dispatch.
//!
//! Provides the registry [`World`](bevy_ecs::world::World) factory, the
//! [`FrameSchedules`] runner, the [`Scheduler`] for one-shot delayed tasks,
//! and the [`EventBus`] observers subscribe to.

mod color;
mod components;
mod energy;
mod events;
mod lifecycle;
mod queries;
mod schedule;
mod scheduler;
mod time;
mod world;

pub use color::{Color, ColorJitter, ColorVariance, FRUIT_PALETTE};
pub use components::{Bounds, Fill, Immovable, Shape, StaticBundle, Tag};
pub use energy::{EnergyGain, EnergyTally};
pub use events::{EventBus, JumpEvent, Observer};
pub use lifecycle::{despawn_entity, despawn_in_range};
pub use queries::count_tagged;
pub use schedule::{FrameSchedules, Stage};
pub use scheduler::{Scheduler, fire_due_tasks, run_due_tasks, schedule_after};
pub use time::TimeRes;
pub use world::{create_world, register_core_resources};
