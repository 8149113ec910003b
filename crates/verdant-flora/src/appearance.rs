//! Event-driven cosmetic pass over all live flora.
//!
//! On every jump, trunks get a fresh color near the trunk color, fruit gets a
//! random palette color and every leaf starts a one-shot rotation sweep.
//! Geometry is never touched.

use bevy_ecs::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use verdant_ecs::{
    Color, ColorJitter, ColorVariance, FRUIT_PALETTE, Fill, JumpEvent, Observer, Tag, TimeRes,
};
use verdant_terrain::{SeedStream, stream_rng};

use crate::components::{LeafMotion, RotationSweep};

/// Leaf rotation started by each appearance pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepParams {
    /// Start and end angle in degrees.
    pub angle: (f32, f32),
    /// Seconds.
    pub duration: f32,
}

impl Default for SweepParams {
    fn default() -> Self {
        Self {
            angle: (0.0, 90.0),
            duration: 2.0,
        }
    }
}

/// What one appearance pass touched.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutationReport {
    pub trees: usize,
    pub fruit: usize,
    pub leaves: usize,
}

pub struct AppearanceMutator {
    rng: ChaCha8Rng,
    colors: Box<dyn ColorVariance>,
    sweep: SweepParams,
}

impl AppearanceMutator {
    pub fn new(seed: u64, sweep: SweepParams) -> Self {
        Self {
            rng: stream_rng(seed, SeedStream::Appearance),
            colors: Box::new(ColorJitter::default()),
            sweep,
        }
    }

    pub fn with_colors(mut self, colors: Box<dyn ColorVariance>) -> Self {
        self.colors = colors;
        self
    }

    /// Mutate every tree, fruit and leaf that exists right now.
    ///
    /// A leaf spawned without [`LeafMotion`] is given one, so every leaf
    /// gets its sweep.
    pub fn apply(&mut self, world: &mut World) -> MutationReport {
        let now = world.get_resource::<TimeRes>().map_or(0.0, |t| t.elapsed);
        let mut report = MutationReport::default();

        let still: Vec<Entity> = world
            .query_filtered::<(Entity, &Tag), Without<LeafMotion>>()
            .iter(world)
            .filter(|(_, tag)| **tag == Tag::Leaf)
            .map(|(entity, _)| entity)
            .collect();
        for leaf in still {
            world.entity_mut(leaf).insert(LeafMotion::default());
        }

        let mut fills = world.query::<(&Tag, &mut Fill)>();
        for (tag, mut fill) in fills.iter_mut(world) {
            match tag {
                Tag::Tree => {
                    fill.repaint(self.colors.approximate(Color::TRUNK, &mut self.rng));
                    report.trees += 1;
                }
                Tag::Fruit => {
                    let color = FRUIT_PALETTE[self.rng.random_range(0..FRUIT_PALETTE.len())];
                    fill.repaint(color);
                    report.fruit += 1;
                }
                Tag::Ground | Tag::Leaf | Tag::Avatar => {}
            }
        }

        let sweep = RotationSweep {
            started_at: now,
            from: self.sweep.angle.0,
            to: self.sweep.angle.1,
            duration: self.sweep.duration,
        };
        let mut leaves = world.query::<(&Tag, &mut LeafMotion)>();
        for (tag, mut motion) in leaves.iter_mut(world) {
            if *tag == Tag::Leaf {
                motion.sweeps.push(sweep);
                report.leaves += 1;
            }
        }
        report
    }
}

impl Observer<JumpEvent> for AppearanceMutator {
    fn name(&self) -> &str {
        "appearance_mutator"
    }

    fn on_event(&mut self, _event: &JumpEvent, world: &mut World) {
        let report = self.apply(world);
        debug!(
            trees = report.trees,
            fruit = report.fruit,
            leaves = report.leaves,
            "flora appearance changed"
        );
    }
}

/// Drop leaf sweeps that have run their full duration.
pub fn retire_finished_sweeps(time: Res<'_, TimeRes>, mut leaves: Query<'_, '_, &mut LeafMotion>) {
    let now = time.elapsed;
    for mut motion in &mut leaves {
        if motion.sweeps.iter().any(|s| s.is_finished(now)) {
            motion.sweeps.retain(|s| !s.is_finished(now));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Leaf, LeafBundle};
    use glam::Vec2;
    use verdant_ecs::{Bounds, EventBus, FrameSchedules, Stage, StaticBundle, create_world};

    struct Scene {
        world: World,
        ground: Entity,
        tree: Entity,
        leaf: Entity,
        fruit: Entity,
    }

    fn scene() -> Scene {
        let mut world = create_world();
        let ground = world
            .spawn(StaticBundle::new(
                Tag::Ground,
                Bounds::square(Vec2::new(0.0, 390.0), 30.0),
                Fill::rectangle(Color::GROUND),
            ))
            .id();
        let tree = world
            .spawn(StaticBundle::new(
                Tag::Tree,
                Bounds::new(Vec2::new(0.0, 240.0), Vec2::new(30.0, 150.0)),
                Fill::rectangle(Color::TRUNK),
            ))
            .id();
        let leaf = world
            .spawn(LeafBundle {
                tag: Tag::Leaf,
                bounds: Bounds::square(Vec2::new(-105.0, 120.0), 30.0),
                fill: Fill::rectangle(Color::LEAF),
                leaf: Leaf::default(),
                motion: LeafMotion::default(),
            })
            .id();
        let fruit = world
            .spawn((
                Tag::Fruit,
                Bounds::square(Vec2::new(-75.0, 150.0), 25.0),
                Fill::oval(Color::RED),
            ))
            .id();
        Scene {
            world,
            ground,
            tree,
            leaf,
            fruit,
        }
    }

    fn all_bounds(world: &mut World) -> Vec<Bounds> {
        world.query::<&Bounds>().iter(world).copied().collect()
    }

    #[test]
    fn test_apply_touches_each_flora_kind() {
        let mut s = scene();
        let mut mutator = AppearanceMutator::new(42, SweepParams::default());

        let report = mutator.apply(&mut s.world);
        assert_eq!(
            report,
            MutationReport {
                trees: 1,
                fruit: 1,
                leaves: 1
            }
        );

        assert_eq!(s.world.get::<Fill>(s.tree).unwrap().revision, 1);
        assert_eq!(s.world.get::<Fill>(s.fruit).unwrap().revision, 1);
        assert_eq!(s.world.get::<Fill>(s.ground).unwrap().revision, 0, "ground untouched");
        assert_eq!(s.world.get::<Fill>(s.leaf).unwrap().revision, 0, "leaves are not repainted");
        assert_eq!(s.world.get::<LeafMotion>(s.leaf).unwrap().sweeps.len(), 1);
    }

    #[test]
    fn test_apply_never_moves_anything() {
        let mut s = scene();
        let before = all_bounds(&mut s.world);
        let mut mutator = AppearanceMutator::new(1, SweepParams::default());
        for _ in 0..5 {
            mutator.apply(&mut s.world);
        }
        assert_eq!(all_bounds(&mut s.world), before);
    }

    #[test]
    fn test_fruit_colors_come_from_palette() {
        let mut s = scene();
        let mut mutator = AppearanceMutator::new(8, SweepParams::default());
        for _ in 0..30 {
            mutator.apply(&mut s.world);
            let color = s.world.get::<Fill>(s.fruit).unwrap().color;
            assert!(FRUIT_PALETTE.contains(&color), "{color:?} not in palette");
        }
    }

    #[test]
    fn test_trunk_color_stays_near_trunk() {
        let mut s = scene();
        let mut mutator = AppearanceMutator::new(8, SweepParams::default());
        for _ in 0..30 {
            mutator.apply(&mut s.world);
            let c = s.world.get::<Fill>(s.tree).unwrap().color;
            assert!((i16::from(c.r) - 100).abs() <= 10);
            assert!((i16::from(c.g) - 50).abs() <= 10);
            assert!((i16::from(c.b) - 20).abs() <= 10);
        }
    }

    #[test]
    fn test_leaf_without_motion_still_sweeps() {
        let mut s = scene();
        let bare = s
            .world
            .spawn((Tag::Leaf, Bounds::square(Vec2::new(-75.0, 120.0), 30.0)))
            .id();
        let mut mutator = AppearanceMutator::new(6, SweepParams::default());

        let report = mutator.apply(&mut s.world);
        assert_eq!(report.leaves, 2);
        let motion = s
            .world
            .get::<LeafMotion>(bare)
            .expect("bare leaf gains a motion component");
        assert_eq!(motion.sweeps.len(), 1);
        assert_eq!(motion.sweeps[0].to, 90.0);
    }

    #[test]
    fn test_repeated_events_overlap_sweeps() {
        let mut s = scene();
        let mut mutator = AppearanceMutator::new(3, SweepParams::default());
        let mut schedules = FrameSchedules::new();
        schedules.add_system(Stage::PostUpdate, retire_finished_sweeps);

        mutator.apply(&mut s.world);
        schedules.run(&mut s.world, 1.0);
        mutator.apply(&mut s.world);
        assert_eq!(
            s.world.get::<LeafMotion>(s.leaf).unwrap().sweeps.len(),
            2,
            "second sweep starts while the first is running"
        );

        schedules.run(&mut s.world, 1.0);
        assert_eq!(s.world.get::<LeafMotion>(s.leaf).unwrap().sweeps.len(), 1);

        schedules.run(&mut s.world, 1.0);
        assert!(s.world.get::<LeafMotion>(s.leaf).unwrap().sweeps.is_empty());
    }

    #[test]
    fn test_later_entities_unaffected_until_next_event() {
        let mut s = scene();
        let mut mutator = AppearanceMutator::new(5, SweepParams::default());
        mutator.apply(&mut s.world);

        let late = s
            .world
            .spawn((Tag::Tree, Fill::rectangle(Color::TRUNK)))
            .id();
        assert_eq!(s.world.get::<Fill>(late).unwrap().revision, 0);

        mutator.apply(&mut s.world);
        assert_eq!(s.world.get::<Fill>(late).unwrap().revision, 1);
        assert_eq!(s.world.get::<Fill>(s.tree).unwrap().revision, 2);
    }

    #[test]
    fn test_jump_event_drives_mutation() {
        let mut s = scene();
        let mut bus: EventBus<JumpEvent> = EventBus::new();
        bus.subscribe(Box::new(AppearanceMutator::new(9, SweepParams::default())));

        bus.publish(&JumpEvent, &mut s.world);
        bus.publish(&JumpEvent, &mut s.world);
        assert_eq!(s.world.get::<Fill>(s.fruit).unwrap().revision, 2);
        assert_eq!(s.world.get::<LeafMotion>(s.leaf).unwrap().sweeps.len(), 2);
    }

    #[test]
    fn test_same_seed_same_colors() {
        let mut a = scene();
        let mut b = scene();
        let mut ma = AppearanceMutator::new(77, SweepParams::default());
        let mut mb = AppearanceMutator::new(77, SweepParams::default());
        for _ in 0..10 {
            ma.apply(&mut a.world);
            mb.apply(&mut b.world);
            assert_eq!(
                a.world.get::<Fill>(a.tree).unwrap().color,
                b.world.get::<Fill>(b.tree).unwrap().color
            );
            assert_eq!(
                a.world.get::<Fill>(a.fruit).unwrap().color,
                b.world.get::<Fill>(b.fruit).unwrap().color
            );
        }
    }
}
