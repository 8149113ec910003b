//! Ground height sampling and grid-aligned block materialization.
//!
//! Ground height is a baseline two thirds of the way down the window, pushed
//! up or down by the noise field. Columns of blocks are emitted from the
//! block-quantized ground height down to the block-quantized window bottom.

use glam::IVec2;
use tracing::{debug, trace};
use verdant_ecs::{Bounds, Color, ColorJitter, ColorVariance};

use crate::noise_field::{NoiseField, SimplexNoiseField};
use crate::seed::{SeedStream, column_rng, derive_seed};

/// Anything that can answer "where is the ground at `x`?".
///
/// Screen coordinates: larger values are further down.
pub trait GroundHeight {
    fn ground_height_at(&self, x: f32) -> f32;
}

impl<F: Fn(f32) -> f32> GroundHeight for F {
    fn ground_height_at(&self, x: f32) -> f32 {
        self(x)
    }
}

/// Terrain grid parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct TerrainParams {
    /// Side length of a block; all columns start on multiples of it.
    pub block_size: i32,
    /// Window height. Columns extend down to its block-quantized value.
    pub window_height: f32,
    /// Baseline ground height as a fraction of the window height.
    pub ground_height_factor: f32,
    /// Noise scale in blocks.
    pub noise_scale_blocks: i32,
    /// Noise octaves.
    pub octaves: u32,
    /// Per-channel ground color deviation.
    pub color_delta: u8,
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            block_size: 30,
            window_height: 600.0,
            ground_height_factor: 2.0 / 3.0,
            noise_scale_blocks: 7,
            octaves: 3,
            color_delta: 10,
        }
    }
}

/// One immovable ground cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Block {
    /// Grid-aligned top-left corner.
    pub top_left: IVec2,
    pub size: i32,
    pub color: Color,
}

impl Block {
    pub fn bounds(&self) -> Bounds {
        Bounds::square(self.top_left.as_vec2(), self.size as f32)
    }
}

/// Largest multiple of `step` that is `<= value`.
///
/// Near `i32::MIN`, where that multiple does not fit, this is the smallest
/// multiple that does.
pub fn snap_down(value: i32, step: i32) -> i32 {
    let step = i64::from(step.max(1));
    let mut snapped = i64::from(value).div_euclid(step) * step;
    if snapped < i64::from(i32::MIN) {
        snapped += step;
    }
    i32::try_from(snapped).unwrap_or(value)
}

/// Column origins covering `[min_x, max_x)`: `min_x` is snapped down to the
/// grid, then every `step` while the column starts before `max_x`.
pub fn grid_columns(min_x: i32, max_x: i32, step: i32) -> std::iter::StepBy<std::ops::Range<i32>> {
    let start = snap_down(min_x, step);
    let end = if max_x > min_x { max_x } else { start };
    (start..end).step_by(step.max(1) as usize)
}

/// Deterministic ground height function and block materializer.
pub struct TerrainGrid<N = SimplexNoiseField> {
    seed: u64,
    noise: N,
    params: TerrainParams,
    colors: Box<dyn ColorVariance>,
    ground_height_at_x0: f32,
}

impl TerrainGrid<SimplexNoiseField> {
    /// Terrain over simplex noise seeded from the world seed.
    pub fn new(seed: u64, params: TerrainParams) -> Self {
        let noise_seed = derive_seed(seed, SeedStream::Noise, 0);
        let noise = SimplexNoiseField::new(noise_seed, params.octaves);
        Self::with_noise(seed, params, noise)
    }
}

impl<N: NoiseField> TerrainGrid<N> {
    /// Terrain over a caller-supplied noise field.
    pub fn with_noise(seed: u64, params: TerrainParams, noise: N) -> Self {
        let ground_height_at_x0 = params.window_height * params.ground_height_factor;
        let colors = Box::new(ColorJitter::new(params.color_delta));
        Self {
            seed,
            noise,
            params,
            colors,
            ground_height_at_x0,
        }
    }

    /// Replace the ground color variance.
    pub fn with_colors(mut self, colors: Box<dyn ColorVariance>) -> Self {
        self.colors = colors;
        self
    }

    pub fn params(&self) -> &TerrainParams {
        &self.params
    }

    /// Baseline ground height the noise perturbs.
    pub fn ground_height_at_x0(&self) -> f32 {
        self.ground_height_at_x0
    }

    /// Noise scale: `noise_scale_blocks` blocks.
    pub fn noise_scale(&self) -> f32 {
        (self.params.noise_scale_blocks * self.params.block_size) as f32
    }

    /// Ground height at `x`. Deterministic and continuous for a fixed seed.
    pub fn ground_height_at(&self, x: f32) -> f32 {
        self.ground_height_at_x0 + self.noise.sample(x, self.noise_scale())
    }

    /// Top of the highest block in the column at `x`.
    pub fn block_top_at(&self, x: f32) -> i32 {
        let size = self.params.block_size as f32;
        ((self.ground_height_at(x) / size).floor() * size) as i32
    }

    /// Bottom edge of every column: the window bottom snapped down to the grid.
    pub fn column_bottom(&self) -> i32 {
        snap_down(self.params.window_height as i32, self.params.block_size)
    }

    /// Blocks of the column starting at grid-aligned `x`, top to bottom.
    pub fn column(&self, x: i32) -> Vec<Block> {
        let size = self.params.block_size;
        let start = self.block_top_at(x as f32);
        let end = self.column_bottom();
        if start >= end {
            return Vec::new();
        }

        let mut rng = column_rng(self.seed, SeedStream::GroundColor, i64::from(x));
        (start..end)
            .step_by(size as usize)
            .map(|y| Block {
                top_left: IVec2::new(x, y),
                size,
                color: self.colors.approximate(Color::GROUND, &mut rng),
            })
            .collect()
    }

    /// Materialize every ground block for columns covering `[min_x, max_x)`.
    ///
    /// Only `min_x` is snapped to the grid. An empty or inverted range yields
    /// no blocks.
    pub fn create_in_range(&self, min_x: i32, max_x: i32) -> Vec<Block> {
        let mut blocks = Vec::new();
        let mut columns = 0usize;
        for x in grid_columns(min_x, max_x, self.params.block_size) {
            let column = self.column(x);
            trace!(x, blocks = column.len(), "terrain column");
            blocks.extend(column);
            columns += 1;
        }
        debug!(min_x, max_x, columns, blocks = blocks.len(), "terrain range created");
        blocks
    }
}

impl<N: NoiseField> GroundHeight for TerrainGrid<N> {
    fn ground_height_at(&self, x: f32) -> f32 {
        TerrainGrid::ground_height_at(self, x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise_field::FlatNoiseField;
    use std::collections::BTreeMap;

    fn flat_grid() -> TerrainGrid<FlatNoiseField> {
        TerrainGrid::with_noise(1, TerrainParams::default(), FlatNoiseField)
    }

    #[test]
    fn test_snap_down_handles_negatives() {
        assert_eq!(snap_down(0, 30), 0);
        assert_eq!(snap_down(29, 30), 0);
        assert_eq!(snap_down(30, 30), 30);
        assert_eq!(snap_down(-1, 30), -30);
        assert_eq!(snap_down(-30, 30), -30);
    }

    #[test]
    fn test_ranges_near_i32_min_stay_on_grid() {
        let start = snap_down(i32::MIN, 30);
        assert_eq!(start % 30, 0);
        assert!(start >= i32::MIN && start - i32::MIN < 30, "start {start}");

        let cols: Vec<i32> = grid_columns(i32::MIN, i32::MIN + 100, 30).collect();
        assert_eq!(cols.len(), 4);
        assert!(cols.iter().all(|x| x % 30 == 0), "{cols:?} off the grid");

        let blocks = flat_grid().create_in_range(i32::MIN, i32::MIN + 60);
        assert_eq!(blocks.len(), 2 * 7, "two full columns");
    }

    #[test]
    fn test_grid_columns_snap_only_min() {
        let cols: Vec<i32> = grid_columns(-10, 50, 30).collect();
        assert_eq!(cols, vec![-30, 0, 30]);
        let cols: Vec<i32> = grid_columns(0, 61, 30).collect();
        assert_eq!(cols, vec![0, 30, 60], "partial last column is covered");
    }

    #[test]
    fn test_grid_columns_empty_for_inverted_range() {
        assert_eq!(grid_columns(100, 100, 30).count(), 0);
        assert_eq!(grid_columns(100, 40, 30).count(), 0);
    }

    #[test]
    fn test_ground_height_deterministic() {
        let a = TerrainGrid::new(42, TerrainParams::default());
        let b = TerrainGrid::new(42, TerrainParams::default());
        for i in -50..50 {
            let x = i as f32 * 13.0;
            assert_eq!(a.ground_height_at(x), b.ground_height_at(x));
            assert_eq!(a.ground_height_at(x), a.ground_height_at(x));
        }
    }

    #[test]
    fn test_ground_height_within_noise_scale_of_baseline() {
        let grid = TerrainGrid::new(3, TerrainParams::default());
        let scale = grid.noise_scale();
        for i in 0..500 {
            let h = grid.ground_height_at(i as f32 * 4.0);
            assert!(
                (h - grid.ground_height_at_x0()).abs() <= scale + 1e-3,
                "Height {h} strays more than {scale} from baseline"
            );
        }
    }

    #[test]
    fn test_flat_range_block_count() {
        let grid = flat_grid();
        let blocks = grid.create_in_range(0, 800);
        // 27 columns (0..=780), each from 390 down to 600: 7 blocks.
        assert_eq!(blocks.len(), 27 * 7);
    }

    #[test]
    fn test_blocks_grid_aligned_and_contiguous() {
        let grid = TerrainGrid::new(42, TerrainParams::default());
        let blocks = grid.create_in_range(-95, 805);
        assert!(!blocks.is_empty());

        let mut columns: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for b in &blocks {
            assert_eq!(b.top_left.x.rem_euclid(30), 0, "x not aligned: {b:?}");
            assert_eq!(b.top_left.y.rem_euclid(30), 0, "y not aligned: {b:?}");
            columns.entry(b.top_left.x).or_default().push(b.top_left.y);
        }

        let bottom = grid.column_bottom();
        for (x, ys) in columns {
            let top = grid.block_top_at(x as f32);
            let expected: Vec<i32> = (top..bottom).step_by(30).collect();
            assert_eq!(ys, expected, "column {x} has gaps or overlaps");
        }
    }

    #[test]
    fn test_column_bottom_snaps_window_height() {
        let params = TerrainParams {
            window_height: 613.0,
            ..Default::default()
        };
        let grid = TerrainGrid::with_noise(0, params, FlatNoiseField);
        assert_eq!(grid.column_bottom(), 600);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let grid = flat_grid();
        assert!(grid.create_in_range(300, 300).is_empty());
        assert!(grid.create_in_range(300, 0).is_empty());
    }

    #[test]
    fn test_block_colors_near_ground_color() {
        let grid = flat_grid();
        for b in grid.create_in_range(0, 300) {
            assert!((i16::from(b.color.r) - 212).abs() <= 10);
            assert!((i16::from(b.color.g) - 123).abs() <= 10);
            assert!((i16::from(b.color.b) - 74).abs() <= 10);
        }
    }

    #[test]
    fn test_split_ranges_match_whole_range() {
        let grid = TerrainGrid::new(42, TerrainParams::default());
        let whole = grid.create_in_range(0, 600);
        let mut split = grid.create_in_range(0, 300);
        split.extend(grid.create_in_range(300, 600));
        assert_eq!(whole, split);
    }

    #[test]
    fn test_closure_ground_height() {
        let ground = |x: f32| 400.0 + x * 0.0;
        assert_eq!(ground.ground_height_at(10.0), 400.0);
    }
}
