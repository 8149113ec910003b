//! Procedural terrain: a seeded 1-D noise field, the ground height function
//! built on it, and the grid of ground blocks beneath that height.

mod noise_field;
mod seed;
mod terrain_grid;

pub use noise_field::{FlatNoiseField, NoiseField, SimplexNoiseField};
pub use seed::{SeedStream, column_rng, derive_seed, random_seed, stream_rng};
pub use terrain_grid::{
    Block, GroundHeight, TerrainGrid, TerrainParams, grid_columns, snap_down,
};
