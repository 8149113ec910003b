//! Translate the persisted configuration into per-subsystem parameters.

use verdant_config::Config;
use verdant_flora::{FloraParams, SwayParams, SweepParams};
use verdant_player::PlayerParams;
use verdant_terrain::TerrainParams;

pub fn terrain_params(config: &Config) -> TerrainParams {
    TerrainParams {
        block_size: config.terrain.block_size,
        window_height: config.window.height as f32,
        ground_height_factor: config.terrain.ground_height_factor,
        noise_scale_blocks: config.terrain.noise_scale_blocks,
        octaves: config.terrain.octaves,
        color_delta: config.terrain.color_delta,
    }
}

pub fn flora_params(config: &Config) -> FloraParams {
    let flora = &config.flora;
    FloraParams {
        block_size: config.terrain.block_size,
        tree_probability: flora.tree_probability,
        leaf_probability: flora.leaf_probability,
        fruit_probability: flora.fruit_probability,
        leaf_size: flora.leaf_size,
        fruit_size: flora.fruit_size,
        leaves_square_cells: flora.leaves_square_cells,
        leaves_square_factor: flora.leaves_square_factor,
        fruit_energy_gain: flora.fruit_energy_gain,
        respawn_delay: config.world.cycle_length,
        leaf_wait_time: f64::from(flora.leaf_wait_time),
        sway: SwayParams {
            angle: flora.sway_angle,
            period: flora.sway_period,
            size_factor: flora.sway_size_factor,
        },
        color_delta: config.terrain.color_delta,
    }
}

pub fn sweep_params(config: &Config) -> SweepParams {
    SweepParams {
        angle: config.flora.sweep_angle,
        duration: config.flora.sweep_duration,
    }
}

pub fn player_params(config: &Config) -> PlayerParams {
    let player = &config.player;
    PlayerParams {
        max_energy: player.max_energy,
        min_energy: player.min_energy,
        idle_gain: player.idle_gain,
        run_cost: player.run_cost,
        jump_cost: player.jump_cost,
        size: player.size,
        run_speed: player.run_speed,
    }
}
