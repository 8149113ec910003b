//! The world-generation session.
//!
//! A [`WorldSession`] owns the seed, the entity registry, the frame schedule,
//! the generators, the jump event bus and the avatar's energy. Nothing in the
//! generation engine is process-global, so two sessions never interfere.

use bevy_ecs::prelude::*;
use tracing::{debug, info};
use verdant_config::Config;
use verdant_ecs::{
    Bounds, ColorJitter, EventBus, Fill, FrameSchedules, JumpEvent, Observer, Stage, StaticBundle,
    Tag, TimeRes, count_tagged, create_world, despawn_in_range,
};
use verdant_flora::{
    AppearanceMutator, FloraPlacer, Tree, collect_fruit, fruit_touching, retire_finished_sweeps,
};
use verdant_player::{
    ActionOutcome, AvatarAction, AvatarEnergy, avatar_bounds, move_avatar, spawn_avatar,
};
use verdant_terrain::{TerrainGrid, random_seed};

use crate::error::WorldError;
use crate::params::{flora_params, player_params, sweep_params, terrain_params};
use crate::snapshot::WorldSnapshot;

/// Entities added by one [`WorldSession::build_range`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildReport {
    pub blocks: usize,
    pub trees: Vec<Tree>,
    pub leaves: usize,
    pub fruit: usize,
}

pub struct WorldSession {
    seed: u64,
    world: World,
    schedules: FrameSchedules,
    terrain: TerrainGrid,
    flora: FloraPlacer,
    jump_events: EventBus<JumpEvent>,
    energy: AvatarEnergy,
    avatar: Option<Entity>,
}

impl WorldSession {
    /// Validate `config` and set up an empty world. A missing seed is drawn
    /// at random.
    pub fn new(config: &Config) -> Result<Self, WorldError> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(random_seed);

        let terrain = TerrainGrid::new(seed, terrain_params(config));
        let flora = FloraPlacer::new(seed, flora_params(config))?;

        let mut schedules = FrameSchedules::new();
        schedules.add_system(Stage::PostUpdate, retire_finished_sweeps);

        let mut jump_events: EventBus<JumpEvent> = EventBus::new();
        let mutator = AppearanceMutator::new(seed, sweep_params(config))
            .with_colors(Box::new(ColorJitter::new(config.terrain.color_delta)));
        jump_events.subscribe(Box::new(mutator));

        info!(seed, "world session created");
        Ok(Self {
            seed,
            world: create_world(),
            schedules,
            terrain,
            flora,
            jump_events,
            energy: AvatarEnergy::new(player_params(config)),
            avatar: None,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn ground_height_at(&self, x: f32) -> f32 {
        self.terrain.ground_height_at(x)
    }

    pub fn terrain(&self) -> &TerrainGrid {
        &self.terrain
    }

    /// Generate ground, trees, leaves and fruit for `[min_x, max_x)`.
    pub fn build_range(&mut self, min_x: i32, max_x: i32) -> BuildReport {
        let blocks = self.terrain.create_in_range(min_x, max_x);
        for block in &blocks {
            self.world.spawn(StaticBundle::new(
                Tag::Ground,
                block.bounds(),
                Fill::rectangle(block.color),
            ));
        }

        let leaves_before = count_tagged(&mut self.world, Tag::Leaf);
        let fruit_before = count_tagged(&mut self.world, Tag::Fruit);
        let trees = self
            .flora
            .create_in_range(&self.terrain, &mut self.world, min_x, max_x);

        let report = BuildReport {
            blocks: blocks.len(),
            leaves: count_tagged(&mut self.world, Tag::Leaf) - leaves_before,
            fruit: count_tagged(&mut self.world, Tag::Fruit) - fruit_before,
            trees,
        };
        info!(
            min_x,
            max_x,
            blocks = report.blocks,
            trees = report.trees.len(),
            leaves = report.leaves,
            fruit = report.fruit,
            "range built"
        );
        report
    }

    /// Remove every world object whose left edge lies in `[min_x, max_x)`.
    /// The avatar stays. Pending respawns and sway starts of removed entities
    /// turn into no-ops. Returns how many entities were removed.
    pub fn cull_range(&mut self, min_x: i32, max_x: i32) -> usize {
        despawn_in_range(&mut self.world, min_x as f32, max_x as f32)
    }

    /// Stand the avatar on the ground at `x`.
    pub fn spawn_avatar(&mut self, x: f32) -> Entity {
        let size = self.energy.params().size;
        let ground = self.terrain.ground_height_at(x + size * 0.5);
        let avatar = spawn_avatar(&mut self.world, x, ground, size);
        self.avatar = Some(avatar);
        avatar
    }

    pub fn avatar(&self) -> Option<Entity> {
        self.avatar
    }

    pub fn energy(&self) -> f32 {
        self.energy.energy()
    }

    /// Advance session time by `dt` seconds and run one frame.
    pub fn tick(&mut self, dt: f64) {
        self.schedules.run(&mut self.world, dt);
    }

    /// Apply an avatar action. A successful run moves the avatar by one
    /// frame's worth of running; a successful jump notifies jump observers.
    pub fn perform(&mut self, action: AvatarAction) -> ActionOutcome {
        let outcome = self.energy.apply(action);

        if outcome.moved
            && let Some(avatar) = self.avatar
        {
            let dt = self.world.get_resource::<TimeRes>().map_or(0.0, |t| t.delta);
            let dx = self.energy.params().run_speed * dt as f32;
            let terrain = &self.terrain;
            move_avatar(&mut self.world, avatar, dx, |x| terrain.ground_height_at(x));
        }

        if outcome.jumped {
            let notified = self.jump_events.publish(&JumpEvent, &mut self.world);
            debug!(notified, energy = outcome.energy, "jump published");
        }
        outcome
    }

    /// Collect every visible fruit overlapping `avatar`. Returns how many
    /// were collected.
    pub fn touch_fruit(&mut self, avatar: &Bounds) -> usize {
        fruit_touching(&mut self.world, avatar)
            .into_iter()
            .filter(|&fruit| collect_fruit(&mut self.world, fruit, &mut self.energy))
            .count()
    }

    /// [`touch_fruit`](Self::touch_fruit) with the spawned avatar's bounds.
    pub fn collect_touched_fruit(&mut self) -> usize {
        let Some(bounds) = self
            .avatar
            .and_then(|avatar| avatar_bounds(&self.world, avatar))
        else {
            return 0;
        };
        self.touch_fruit(&bounds)
    }

    /// Add another jump observer after the appearance pass.
    pub fn subscribe_jump(&mut self, observer: Box<dyn Observer<JumpEvent>>) {
        self.jump_events.subscribe(observer);
    }

    pub fn snapshot(&mut self) -> WorldSnapshot {
        WorldSnapshot::capture(&mut self.world, self.seed, self.energy.energy())
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
