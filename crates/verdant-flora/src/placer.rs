//! Stochastic tree, leaf and fruit placement on top of the terrain.
//!
//! Placement runs in two steps. [`FloraPlacer::plan_in_range`] is pure: it
//! decides per grid column whether a tree grows there, how tall it is, and
//! which cells of its canopy square hold a leaf or a fruit.
//! [`FloraPlacer::create_in_range`] spawns those plans into the registry and
//! schedules each leaf's sway.
//!
//! Every column draws from its own seeded stream, so the plan for a column
//! does not depend on which range query produced it.

use bevy_ecs::prelude::*;
use glam::{IVec2, Vec2};
use rand::{Rng, RngCore};
use tracing::{debug, trace};
use verdant_ecs::{
    Bounds, Color, ColorJitter, ColorVariance, Fill, StaticBundle, Tag, TimeRes, schedule_after,
};
use verdant_terrain::{GroundHeight, SeedStream, column_rng, grid_columns};

use crate::components::{Fruit, FruitBundle, Leaf, LeafBundle, LeafMotion, SwayParams, SwayStart, Tree};
use crate::error::FloraError;

/// Flora placement parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct FloraParams {
    /// Grid step between candidate tree columns. Also the trunk width.
    pub block_size: i32,
    /// Chance that a column grows a tree.
    pub tree_probability: f64,
    /// Chance that a canopy cell holds a leaf.
    pub leaf_probability: f64,
    /// Chance that a canopy cell holds a fruit, independent of the leaf.
    pub fruit_probability: f64,
    /// Leaf side length and canopy sub-grid step.
    pub leaf_size: i32,
    pub fruit_size: f32,
    /// Canopy square side, in leaf cells. Must be even.
    pub leaves_square_cells: i32,
    /// How far above the trunk center the canopy sits, as a fraction of
    /// the trunk height.
    pub leaves_square_factor: f32,
    pub fruit_energy_gain: f32,
    /// Seconds a collected fruit stays hidden.
    pub respawn_delay: f64,
    /// Leaves start swaying after a uniform delay in `[0, leaf_wait_time)`.
    pub leaf_wait_time: f64,
    pub sway: SwayParams,
    /// Per-channel deviation for trunk, leaf and fruit colors.
    pub color_delta: u8,
}

impl Default for FloraParams {
    fn default() -> Self {
        Self {
            block_size: 30,
            tree_probability: 0.1,
            leaf_probability: 0.5,
            fruit_probability: 0.05,
            leaf_size: 30,
            fruit_size: 25.0,
            leaves_square_cells: 8,
            leaves_square_factor: 0.5,
            fruit_energy_gain: 10.0,
            respawn_delay: 30.0,
            leaf_wait_time: 5.0,
            sway: SwayParams::default(),
            color_delta: 10,
        }
    }
}

impl FloraParams {
    /// Side of the canopy square.
    pub fn leaves_square_size(&self) -> i32 {
        self.leaves_square_cells * self.leaf_size
    }

    pub fn half_square(&self) -> i32 {
        self.leaves_square_size() / 2
    }

    pub fn validate(&self) -> Result<(), FloraError> {
        for (name, value) in [
            ("tree_probability", self.tree_probability),
            ("leaf_probability", self.leaf_probability),
            ("fruit_probability", self.fruit_probability),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FloraError::InvalidProbability { name, value });
            }
        }
        if self.block_size <= 0 || self.leaf_size <= 0 || self.fruit_size <= 0.0 {
            return Err(FloraError::InvalidCanopy(
                "block, leaf and fruit sizes must be positive".into(),
            ));
        }
        if self.leaves_square_cells <= 0 || self.leaves_square_cells % 2 != 0 {
            return Err(FloraError::InvalidCanopy(format!(
                "leaves_square_cells must be even and positive, got {}",
                self.leaves_square_cells
            )));
        }
        Ok(())
    }
}

/// A leaf to spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LeafPlan {
    pub top_left: IVec2,
    pub color: Color,
    /// Seconds until the leaf starts swaying.
    pub sway_delay: f64,
}

/// A fruit to spawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FruitPlan {
    pub top_left: IVec2,
    pub color: Color,
}

/// A tree with everything that grows in its canopy.
#[derive(Clone, Debug, PartialEq)]
pub struct TreePlan {
    pub tree: Tree,
    pub trunk_color: Color,
    /// Top-left corner of the canopy square.
    pub canopy_origin: IVec2,
    pub leaves: Vec<LeafPlan>,
    pub fruit: Vec<FruitPlan>,
}

/// Draw an even tree height in `[half_square, floor(ground) - half_square)`
/// with a single uniform draw.
pub fn sample_tree_height(
    x: i32,
    ground: f32,
    half_square: i32,
    rng: &mut dyn RngCore,
) -> Result<i32, FloraError> {
    let lowest = half_square + half_square.rem_euclid(2);
    let limit = ground.floor() as i32 - half_square;
    if limit <= lowest {
        return Err(FloraError::EmptyHeightRange { x, ground });
    }
    let choices = (limit - lowest + 1) / 2;
    Ok(lowest + 2 * rng.random_range(0..choices))
}

/// Record the start of a leaf's sway. No-op if the entity is not a leaf.
pub fn start_sway(world: &mut World, leaf: Entity, sway: SwayParams, leaf_size: f32) {
    let now = world.get_resource::<TimeRes>().map_or(0.0, |t| t.elapsed);
    if let Some(mut state) = world.get_mut::<Leaf>(leaf) {
        state.sway = Some(SwayStart {
            at: now,
            angle: sway.angle,
            size: (leaf_size, leaf_size * sway.size_factor),
            period: sway.period,
        });
        trace!(?leaf, at = now, "leaf sway started");
    }
}

/// Places trees along the terrain and seeds their canopies.
pub struct FloraPlacer {
    seed: u64,
    params: FloraParams,
    colors: Box<dyn ColorVariance>,
}

impl FloraPlacer {
    pub fn new(seed: u64, params: FloraParams) -> Result<Self, FloraError> {
        params.validate()?;
        let colors = Box::new(ColorJitter::new(params.color_delta));
        Ok(Self {
            seed,
            params,
            colors,
        })
    }

    /// Replace the trunk/leaf/fruit color variance.
    pub fn with_colors(mut self, colors: Box<dyn ColorVariance>) -> Self {
        self.colors = colors;
        self
    }

    pub fn params(&self) -> &FloraParams {
        &self.params
    }

    /// Top-left corner of the canopy square for `tree`.
    ///
    /// The square is centered `leaves_square_factor * height` above the
    /// trunk center. With the default factor that is the top of the trunk.
    pub fn canopy_origin(&self, tree: &Tree) -> IVec2 {
        let lift = self.params.leaves_square_factor * tree.height as f32;
        let center = tree.bounds().center() - Vec2::new(0.0, lift);
        let half = self.params.half_square();
        IVec2::new(center.x.floor() as i32 - half, center.y.floor() as i32 - half)
    }

    /// Decide what grows in the column at grid-aligned `x`.
    pub fn plan_column(&self, x: i32, ground: f32) -> Option<TreePlan> {
        let params = &self.params;
        let mut rng = column_rng(self.seed, SeedStream::Flora, i64::from(x));

        if rng.random::<f64>() >= params.tree_probability {
            return None;
        }

        let height = match sample_tree_height(x, ground, params.half_square(), &mut rng) {
            Ok(height) => height,
            Err(err) => {
                debug!(%err, "skipping tree");
                return None;
            }
        };

        let tree = Tree {
            x,
            height,
            ground,
            width: params.block_size,
        };
        let trunk_color = self.colors.approximate(Color::TRUNK, &mut rng);
        let canopy_origin = self.canopy_origin(&tree);

        let mut leaves = Vec::new();
        let mut fruit = Vec::new();
        for i in 0..params.leaves_square_cells {
            for j in 0..params.leaves_square_cells {
                let top_left = canopy_origin + IVec2::new(i, j) * params.leaf_size;

                if rng.random::<f64>() < params.leaf_probability {
                    let color = self.colors.approximate(Color::LEAF, &mut rng);
                    let sway_delay = rng.random::<f64>() * params.leaf_wait_time;
                    leaves.push(LeafPlan {
                        top_left,
                        color,
                        sway_delay,
                    });
                }
                if rng.random::<f64>() < params.fruit_probability {
                    let color = self.colors.approximate(Color::RED, &mut rng);
                    fruit.push(FruitPlan { top_left, color });
                }
            }
        }

        Some(TreePlan {
            tree,
            trunk_color,
            canopy_origin,
            leaves,
            fruit,
        })
    }

    /// Plan every tree in the columns covering `[min_x, max_x)`.
    ///
    /// Columns follow the terrain's covering rule: `min_x` snaps down to the
    /// grid and every column starting before `max_x` is a candidate.
    pub fn plan_in_range<G: GroundHeight + ?Sized>(
        &self,
        ground: &G,
        min_x: i32,
        max_x: i32,
    ) -> Vec<TreePlan> {
        grid_columns(min_x, max_x, self.params.block_size)
            .filter_map(|x| self.plan_column(x, ground.ground_height_at(x as f32)))
            .collect()
    }

    /// Spawn trees, leaves and fruit for `[min_x, max_x)` into `world`.
    ///
    /// Only the trees are returned. Leaves and fruit are sibling entities in
    /// the registry.
    pub fn create_in_range<G: GroundHeight + ?Sized>(
        &self,
        ground: &G,
        world: &mut World,
        min_x: i32,
        max_x: i32,
    ) -> Vec<Tree> {
        let plans = self.plan_in_range(ground, min_x, max_x);
        let mut trees = Vec::with_capacity(plans.len());
        let mut leaves = 0usize;
        let mut fruit = 0usize;

        for plan in &plans {
            self.spawn_plan(world, plan);
            leaves += plan.leaves.len();
            fruit += plan.fruit.len();
            trees.push(plan.tree);
        }

        debug!(
            min_x,
            max_x,
            trees = trees.len(),
            leaves,
            fruit,
            "flora range created"
        );
        trees
    }

    fn spawn_plan(&self, world: &mut World, plan: &TreePlan) {
        let params = &self.params;
        let trunk = world
            .spawn((
                StaticBundle::new(Tag::Tree, plan.tree.bounds(), Fill::rectangle(plan.trunk_color)),
                plan.tree,
            ))
            .id();
        trace!(?trunk, x = plan.tree.x, height = plan.tree.height, "tree spawned");

        let leaf_size = params.leaf_size as f32;
        for leaf in &plan.leaves {
            let entity = world
                .spawn(LeafBundle {
                    tag: Tag::Leaf,
                    bounds: Bounds::square(leaf.top_left.as_vec2(), leaf_size),
                    fill: Fill::rectangle(leaf.color),
                    leaf: Leaf::default(),
                    motion: LeafMotion::default(),
                })
                .id();
            let sway = params.sway;
            schedule_after(world, entity, leaf.sway_delay, "leaf_sway", move |world, leaf| {
                start_sway(world, leaf, sway, leaf_size);
            });
        }

        for fruit in &plan.fruit {
            world.spawn(FruitBundle {
                tag: Tag::Fruit,
                bounds: Bounds::square(fruit.top_left.as_vec2(), params.fruit_size),
                fill: Fill::oval(fruit.color),
                fruit: Fruit::new(params.fruit_energy_gain, params.respawn_delay, params.fruit_size),
            });
        }
    }
}
