//! Vegetation on top of the terrain: tree placement with leaf and fruit
//! canopies, the fruit respawn cycle, and the jump-triggered appearance pass.

mod appearance;
mod components;
mod error;
mod fruit;
mod placer;

pub use appearance::{AppearanceMutator, MutationReport, SweepParams, retire_finished_sweeps};
pub use components::{
    Fruit, FruitBundle, FruitState, Leaf, LeafBundle, LeafMotion, RotationSweep, SwayParams,
    SwayStart, Tree,
};
pub use error::FloraError;
pub use fruit::{collect_fruit, fruit_touching, respawn_fruit};
pub use placer::{
    FloraParams, FloraPlacer, FruitPlan, LeafPlan, TreePlan, sample_tree_height, start_sway,
};
