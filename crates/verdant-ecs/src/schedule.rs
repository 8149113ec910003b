//! Frame stage labels and the ordered stage runner.

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::{IntoSystemConfigs, ScheduleLabel};

use crate::scheduler::run_due_tasks;
use crate::time::TimeRes;

/// Labels for each frame stage.
///
/// Stages run in the order listed, top to bottom, every frame.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Input and avatar bookkeeping.
    PreUpdate,
    /// Deferred tasks and gameplay logic.
    Update,
    /// End-of-frame bookkeeping such as retiring finished animations.
    PostUpdate,
}

/// Ordered collection of [`Schedule`]s that drives one frame.
///
/// Frames are cooperative: every stage runs to completion before the next
/// one starts and nothing blocks.
pub struct FrameSchedules {
    schedules: Vec<(Stage, Schedule)>,
}

impl FrameSchedules {
    /// Stages with the core system registered: due scheduled tasks fire in
    /// `Update`.
    pub fn new() -> Self {
        let mut schedules = Self::empty();
        schedules.add_system(Stage::Update, run_due_tasks);
        schedules
    }

    /// Stages with no systems at all.
    pub fn empty() -> Self {
        let schedules = [Stage::PreUpdate, Stage::Update, Stage::PostUpdate]
            .into_iter()
            .map(|label| (label, Schedule::default()))
            .collect();
        Self { schedules }
    }

    /// Register a system (or system tuple) into a specific stage.
    pub fn add_system<M>(&mut self, stage: Stage, system: impl IntoSystemConfigs<M>) {
        if let Some(schedule) = self.get_schedule_mut(&stage) {
            schedule.add_systems(system);
        }
    }

    /// Advance [`TimeRes`] by `frame_dt` and run every stage once, in order.
    pub fn run(&mut self, world: &mut World, frame_dt: f64) {
        if let Some(mut time) = world.get_resource_mut::<TimeRes>() {
            time.advance(frame_dt);
        }
        for (_label, schedule) in &mut self.schedules {
            schedule.run(world);
        }
    }

    /// Returns a mutable reference to the schedule for a given stage.
    pub fn get_schedule_mut(&mut self, stage: &Stage) -> Option<&mut Schedule> {
        self.schedules
            .iter_mut()
            .find(|(label, _)| label == stage)
            .map(|(_, schedule)| schedule)
    }
}

impl Default for FrameSchedules {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Tag, create_world, schedule_after};

    #[derive(Resource, Default)]
    struct ExecutionLog {
        stages: Vec<String>,
    }

    fn log_system(stage_name: &'static str) -> impl Fn(ResMut<'_, ExecutionLog>) {
        move |mut log: ResMut<'_, ExecutionLog>| {
            log.stages.push(stage_name.to_string());
        }
    }

    #[test]
    fn test_world_starts_with_no_entities() {
        let world = create_world();
        assert_eq!(world.entities().len(), 0);
    }

    #[test]
    fn test_schedule_runs_all_stages_in_order() {
        let mut world = create_world();
        world.insert_resource(ExecutionLog::default());

        let mut schedules = FrameSchedules::empty();
        schedules.add_system(Stage::PreUpdate, log_system("PreUpdate"));
        schedules.add_system(Stage::Update, log_system("Update"));
        schedules.add_system(Stage::PostUpdate, log_system("PostUpdate"));

        schedules.run(&mut world, 1.0 / 60.0);

        let log = world.resource::<ExecutionLog>();
        assert_eq!(log.stages, vec!["PreUpdate", "Update", "PostUpdate"]);
    }

    #[test]
    fn test_run_advances_time() {
        let mut world = create_world();
        let mut schedules = FrameSchedules::new();
        for _ in 0..4 {
            schedules.run(&mut world, 0.25);
        }
        let time = world.resource::<TimeRes>();
        assert_eq!(time.tick, 4);
        assert!((time.elapsed - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scheduled_tasks_fire_during_frames() {
        #[derive(Resource, Default)]
        struct Fired(u32);

        let mut world = create_world();
        world.insert_resource(Fired::default());
        let owner = world.spawn(Tag::Fruit).id();
        schedule_after(&mut world, owner, 1.0, "count", |world, _| {
            world.resource_mut::<Fired>().0 += 1;
        });

        let mut schedules = FrameSchedules::new();
        for _ in 0..3 {
            schedules.run(&mut world, 0.3);
        }
        assert_eq!(world.resource::<Fired>().0, 0, "0.9s is before the fire time");

        schedules.run(&mut world, 0.3);
        assert_eq!(world.resource::<Fired>().0, 1);
    }

    #[test]
    fn test_stage_labels_are_distinct() {
        let labels = [Stage::PreUpdate, Stage::Update, Stage::PostUpdate];
        for (i, a) in labels.iter().enumerate() {
            for (j, b) in labels.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b);
                }
            }
        }
    }
}
