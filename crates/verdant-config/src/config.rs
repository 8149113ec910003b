//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level world configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings. The window height bounds the terrain columns.
    pub window: WindowConfig,
    /// Session-wide world settings.
    pub world: WorldConfig,
    /// Terrain grid settings.
    pub terrain: TerrainConfig,
    /// Tree, leaf and fruit placement settings.
    pub flora: FloraConfig,
    /// Avatar energy settings.
    pub player: PlayerConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
}

/// Session-wide world settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldConfig {
    /// World seed. `None` draws a fresh seed at startup.
    pub seed: Option<u64>,
    /// First horizontal position generated at startup.
    pub range_start: i32,
    /// End of the startup range (exclusive). `None` uses the window width.
    pub range_end: Option<i32>,
    /// Length of one day/night cycle in seconds. Collected fruit reappears
    /// after one full cycle.
    pub cycle_length: f64,
}

/// Terrain grid configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Side length of a ground block. Every block and tree sits on this grid.
    pub block_size: i32,
    /// Baseline ground height as a fraction of the window height.
    pub ground_height_factor: f32,
    /// Noise scale in blocks. Bounds the ground's deviation from the baseline.
    pub noise_scale_blocks: i32,
    /// Number of noise octaves.
    pub octaves: u32,
    /// Maximum per-channel deviation from the base ground color.
    pub color_delta: u8,
}

/// Flora placement configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FloraConfig {
    /// Chance that a grid column grows a tree.
    pub tree_probability: f64,
    /// Chance that a canopy cell grows a leaf.
    pub leaf_probability: f64,
    /// Chance that a canopy cell grows a fruit.
    pub fruit_probability: f64,
    /// Side length of a leaf and of a canopy cell.
    pub leaf_size: i32,
    /// Diameter of a fruit.
    pub fruit_size: f32,
    /// Canopy square side, in cells.
    pub leaves_square_cells: i32,
    /// Offset of the canopy center above the trunk center, as a fraction of
    /// the trunk height.
    pub leaves_square_factor: f32,
    /// Energy granted by eating one fruit.
    pub fruit_energy_gain: f32,
    /// Upper bound of the random delay before a leaf starts swaying, in seconds.
    pub leaf_wait_time: f32,
    /// Sway angle range in degrees.
    pub sway_angle: (f32, f32),
    /// Duration of one sway half-cycle in seconds.
    pub sway_period: f32,
    /// Leaf size at the far end of a sway, as a fraction of its full size.
    pub sway_size_factor: f32,
    /// Rotation sweep played on every jump, in degrees.
    pub sweep_angle: (f32, f32),
    /// Duration of the jump sweep in seconds.
    pub sweep_duration: f32,
}

/// Avatar energy configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerConfig {
    /// Energy cap. The avatar starts full.
    pub max_energy: f32,
    /// Energy floor.
    pub min_energy: f32,
    /// Energy regained per idle frame.
    pub idle_gain: f32,
    /// Energy spent per running frame.
    pub run_cost: f32,
    /// Energy spent per jump.
    pub jump_cost: f32,
    /// Side length of the avatar's body.
    pub size: f32,
    /// Horizontal running speed, units per second.
    pub run_speed: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            seed: None,
            range_start: 0,
            range_end: None,
            cycle_length: 30.0,
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            block_size: 30,
            ground_height_factor: 2.0 / 3.0,
            noise_scale_blocks: 7,
            octaves: 3,
            color_delta: 10,
        }
    }
}

impl Default for FloraConfig {
    fn default() -> Self {
        Self {
            tree_probability: 0.1,
            leaf_probability: 0.5,
            fruit_probability: 0.05,
            leaf_size: 30,
            fruit_size: 25.0,
            leaves_square_cells: 8,
            leaves_square_factor: 0.5,
            fruit_energy_gain: 10.0,
            leaf_wait_time: 5.0,
            sway_angle: (-15.0, 15.0),
            sway_period: 4.0,
            sway_size_factor: 0.925,
            sweep_angle: (0.0, 90.0),
            sweep_duration: 2.0,
        }
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            max_energy: 100.0,
            min_energy: 0.0,
            idle_gain: 1.0,
            run_cost: 0.5,
            jump_cost: 10.0,
            size: 50.0,
            run_speed: 350.0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Per-user config directory (`<config_dir>/verdant`), if the platform has one.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("verdant"))
}

// --- Accessors ---

impl Config {
    /// End of the startup range: `world.range_end`, or the window width.
    pub fn range_end(&self) -> i32 {
        self.world
            .range_end
            .unwrap_or_else(|| i32::try_from(self.window.width).unwrap_or(i32::MAX))
    }
}

// --- Validation ---

impl Config {
    /// Reject values the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let probabilities = [
            ("flora.tree_probability", self.flora.tree_probability),
            ("flora.leaf_probability", self.flora.leaf_probability),
            ("flora.fruit_probability", self.flora.fruit_probability),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        if self.terrain.block_size <= 0 {
            return Err(ConfigError::Invalid(format!(
                "terrain.block_size must be positive, got {}",
                self.terrain.block_size
            )));
        }
        if (self.window.height as i64) < self.terrain.block_size as i64 {
            return Err(ConfigError::Invalid(format!(
                "window.height {} is shorter than one block ({})",
                self.window.height, self.terrain.block_size
            )));
        }
        if self.terrain.noise_scale_blocks < 0 {
            return Err(ConfigError::Invalid(format!(
                "terrain.noise_scale_blocks must not be negative, got {}",
                self.terrain.noise_scale_blocks
            )));
        }
        if self.flora.leaf_size <= 0 || self.flora.fruit_size <= 0.0 {
            return Err(ConfigError::Invalid(
                "flora.leaf_size and flora.fruit_size must be positive".to_string(),
            ));
        }
        if self.flora.leaves_square_cells <= 0 || self.flora.leaves_square_cells % 2 != 0 {
            return Err(ConfigError::Invalid(format!(
                "flora.leaves_square_cells must be a positive even count, got {}",
                self.flora.leaves_square_cells
            )));
        }
        if self.player.min_energy > self.player.max_energy {
            return Err(ConfigError::Invalid(format!(
                "player.min_energy {} exceeds player.max_energy {}",
                self.player.min_energy, self.player.max_energy
            )));
        }
        if self.world.cycle_length < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "world.cycle_length must not be negative, got {}",
                self.world.cycle_length
            )));
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
